use std::sync::Arc;

use crate::config::realtime::RealtimeConfig;
use crate::services::gateways::{RealtimeAdmin, SessionGateway};

/// Application state containing shared resources.
///
/// Collaborators are injected as trait objects so tests can swap in mocks;
/// there are no module-level singletons anywhere in this crate.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<dyn SessionGateway>,
    pub realtime: Arc<dyn RealtimeAdmin>,
    pub realtime_cfg: RealtimeConfig,
}

impl AppState {
    pub fn new(
        session: Arc<dyn SessionGateway>,
        realtime: Arc<dyn RealtimeAdmin>,
        realtime_cfg: RealtimeConfig,
    ) -> Self {
        Self {
            session,
            realtime,
            realtime_cfg,
        }
    }
}
