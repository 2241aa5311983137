//! Collaborator seams for the token issuance flow.
//!
//! Two external systems participate in issuing a token: the session/profile
//! store that authenticates the caller, and the realtime platform's
//! management API that receives provisioning calls. Both are modeled as
//! traits so handlers depend on behavior, not transport; the HTTP
//! implementations live in `crate::adapters`.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::AppError;

/// An authenticated caller, as resolved by the session store.
#[derive(Debug, Clone)]
pub struct Principal {
    /// Opaque user id (UUID form, not yet normalized).
    pub id: String,
}

/// Display data looked up from the profile store.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// User record upserted on the realtime platform.
#[derive(Debug, Clone, Serialize)]
pub struct RealtimeUser {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Directive for one feed-follow relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedFollow {
    /// Feed doing the following, e.g. `timeline:u_123`.
    pub source: String,
    /// Feed being followed, e.g. `community:global`.
    pub target: String,
}

/// Session/profile store collaborator.
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Resolve the caller behind a bearer credential.
    /// Any failure, including transport failure, is an auth failure.
    async fn resolve_session(&self, bearer: &str) -> Result<Principal, AppError>;

    /// Look up the caller's profile. `Ok(None)` means no profile exists;
    /// transport failures surface as `Upstream` and are treated as absence
    /// by callers.
    async fn fetch_profile(&self, principal_id: &str) -> Result<Option<Profile>, AppError>;
}

/// Realtime platform management API collaborator. Every call is
/// authenticated with a server-scoped credential minted for the request.
#[async_trait]
pub trait RealtimeAdmin: Send + Sync {
    async fn upsert_user(&self, credential: &str, user: &RealtimeUser) -> Result<(), AppError>;

    /// Create-or-get a channel by cid (`type:id`).
    async fn ensure_channel(&self, credential: &str, cid: &str) -> Result<(), AppError>;

    async fn add_member(&self, credential: &str, cid: &str, user_id: &str)
        -> Result<(), AppError>;

    async fn follow_feed(&self, credential: &str, follow: &FeedFollow) -> Result<(), AppError>;
}
