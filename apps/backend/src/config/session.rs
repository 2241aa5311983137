//! Configuration for the hosted session/profile store.

use crate::config::{require_env, trim_base_url};
use crate::error::AppError;

/// Connection parameters for the auth/profile collaborator.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Store base URL (auth and REST surfaces hang off this).
    pub base_url: String,
    /// Server-side service key, sent on every call.
    pub service_key: String,
}

impl SessionConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            base_url: trim_base_url(&require_env("SESSION_API_URL")?),
            service_key: require_env("SESSION_SERVICE_KEY")?,
        })
    }
}
