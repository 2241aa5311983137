//! Claims carried by realtime platform tokens, plus the TTL policy for
//! each token class.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Chat/video session tokens live for one hour.
pub const SESSION_TOKEN_TTL_SECS: i64 = 3600;
/// Activity feed tokens are longer-lived.
pub const FEED_TOKEN_TTL_SECS: i64 = 86_400;
/// Server-to-server credentials only need to outlive the provisioning calls.
pub const SERVER_TOKEN_TTL_SECS: i64 = 300;

/// Sentinel subject used for server-scoped credentials.
pub const SERVER_SUBJECT: &str = "server";

/// Payload of a platform token.
///
/// Field order is load-bearing: the payload is serialized in declaration
/// order and signed byte-for-byte, so reordering fields changes the wire
/// format. `call_cids` is omitted entirely when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeClaims {
    pub user_id: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    /// Call identifiers this token is scoped to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_cids: Option<Vec<String>>,
}

impl RealtimeClaims {
    /// Build claims with an explicit issued-at instant.
    pub fn at(
        user_id: impl Into<String>,
        iat: i64,
        ttl_secs: i64,
        call_cids: Option<Vec<String>>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            iat,
            exp: iat + ttl_secs,
            call_cids,
        }
    }

    /// Claims for a chat/video session token.
    pub fn session(
        user_id: impl Into<String>,
        now: SystemTime,
        call_cids: Option<Vec<String>>,
    ) -> Result<Self, AppError> {
        Ok(Self::at(user_id, unix_seconds(now)?, SESSION_TOKEN_TTL_SECS, call_cids))
    }

    /// Claims for an activity feed token.
    pub fn feed(user_id: impl Into<String>, now: SystemTime) -> Result<Self, AppError> {
        Ok(Self::at(user_id, unix_seconds(now)?, FEED_TOKEN_TTL_SECS, None))
    }

    /// Claims for the server-scoped credential used on provisioning calls.
    pub fn server(now: SystemTime) -> Result<Self, AppError> {
        Ok(Self::at(
            SERVER_SUBJECT,
            unix_seconds(now)?,
            SERVER_TOKEN_TTL_SECS,
            None,
        ))
    }

    pub fn ttl(&self) -> i64 {
        self.exp - self.iat
    }
}

fn unix_seconds(now: SystemTime) -> Result<i64, AppError> {
    now.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .map_err(|_| AppError::internal("system clock is before the unix epoch"))
}
