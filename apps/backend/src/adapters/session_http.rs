//! HTTP adapter for the hosted session/profile store.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::config::session::SessionConfig;
use crate::error::AppError;
use crate::services::gateways::{Principal, Profile, SessionGateway};

pub struct HttpSessionGateway {
    http: reqwest::Client,
    cfg: SessionConfig,
}

impl HttpSessionGateway {
    pub fn new(http: reqwest::Client, cfg: SessionConfig) -> Self {
        Self { http, cfg }
    }
}

#[derive(Debug, Deserialize)]
struct SessionUser {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    display_name: Option<String>,
    avatar_url: Option<String>,
}

#[async_trait]
impl SessionGateway for HttpSessionGateway {
    async fn resolve_session(&self, bearer: &str) -> Result<Principal, AppError> {
        let url = format!("{}/auth/v1/user", self.cfg.base_url);

        // Any failure here means the caller cannot be authenticated, so the
        // transport error collapses into Unauthorized.
        let resp = self
            .http
            .get(url)
            .bearer_auth(bearer)
            .header("apikey", &self.cfg.service_key)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "session store unreachable during auth");
                AppError::unauthorized()
            })?;

        if !resp.status().is_success() {
            return Err(AppError::unauthorized());
        }

        let user: SessionUser = resp.json().await.map_err(|_| AppError::unauthorized())?;
        if user.id.is_empty() {
            return Err(AppError::unauthorized());
        }

        Ok(Principal { id: user.id })
    }

    async fn fetch_profile(&self, principal_id: &str) -> Result<Option<Profile>, AppError> {
        let url = format!("{}/rest/v1/profiles", self.cfg.base_url);

        let resp = self
            .http
            .get(url)
            .query(&[
                ("id", format!("eq.{principal_id}")),
                ("select", "display_name,avatar_url".to_string()),
                ("limit", "1".to_string()),
            ])
            .header("apikey", &self.cfg.service_key)
            .bearer_auth(&self.cfg.service_key)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("profile store unreachable: {e}")))?;

        let resp = resp
            .error_for_status()
            .map_err(|e| AppError::upstream(format!("profile lookup failed: {e}")))?;

        let rows: Vec<ProfileRow> = resp
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("profile response malformed: {e}")))?;

        Ok(rows.into_iter().next().map(|row| Profile {
            display_name: row.display_name,
            avatar_url: row.avatar_url,
        }))
    }
}
