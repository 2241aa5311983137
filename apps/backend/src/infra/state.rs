//! Builder for creating AppState instances (used in both tests and main).

use std::sync::Arc;
use std::time::Duration;

use crate::adapters::realtime_http::HttpRealtimeAdmin;
use crate::adapters::session_http::HttpSessionGateway;
use crate::config::realtime::RealtimeConfig;
use crate::config::session::SessionConfig;
use crate::error::AppError;
use crate::services::gateways::{RealtimeAdmin, SessionGateway};
use crate::state::app_state::AppState;

/// Outbound calls get a bounded wait; the platform specifies no timeout of
/// its own, so this default is ours. Override with HTTP_TIMEOUT_SECS.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 8;

pub struct StateBuilder {
    realtime_cfg: Option<RealtimeConfig>,
    session: Option<Arc<dyn SessionGateway>>,
    realtime: Option<Arc<dyn RealtimeAdmin>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            realtime_cfg: None,
            session: None,
            realtime: None,
        }
    }

    pub fn with_realtime_config(mut self, cfg: RealtimeConfig) -> Self {
        self.realtime_cfg = Some(cfg);
        self
    }

    pub fn with_session_gateway(mut self, gateway: Arc<dyn SessionGateway>) -> Self {
        self.session = Some(gateway);
        self
    }

    pub fn with_realtime_admin(mut self, admin: Arc<dyn RealtimeAdmin>) -> Self {
        self.realtime = Some(admin);
        self
    }

    /// Wire the production HTTP adapters from config, sharing one client.
    pub fn with_http_gateways(
        self,
        session_cfg: SessionConfig,
        realtime_cfg: RealtimeConfig,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(http_timeout_secs()))
            .build()
            .map_err(|e| AppError::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(self
            .with_session_gateway(Arc::new(HttpSessionGateway::new(http.clone(), session_cfg)))
            .with_realtime_admin(Arc::new(HttpRealtimeAdmin::new(http, realtime_cfg.clone())))
            .with_realtime_config(realtime_cfg))
    }

    pub fn build(self) -> Result<AppState, AppError> {
        let realtime_cfg = self
            .realtime_cfg
            .ok_or_else(|| AppError::config("realtime configuration not provided"))?;
        let session = self
            .session
            .ok_or_else(|| AppError::config("session gateway not provided"))?;
        let realtime = self
            .realtime
            .ok_or_else(|| AppError::config("realtime admin not provided"))?;

        Ok(AppState::new(session, realtime, realtime_cfg))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

fn http_timeout_secs() -> u64 {
    std::env::var("HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
}
