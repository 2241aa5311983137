//! Token issuance orchestration.
//!
//! Answers "give me a credential for this session": authenticate the
//! caller, resolve a display name, provision the user on the realtime
//! platform, then mint and return the signed token. The flow is linear
//! with no retries; only authentication and signing failures are fatal.

use std::time::SystemTime;

use tracing::{debug, warn};

use crate::auth::claims::RealtimeClaims;
use crate::auth::{identity, jws};
use crate::error::AppError;
use crate::logging::redact::Redacted;
use crate::services::gateways::{FeedFollow, RealtimeUser};
use crate::services::provisioning::{self, ProvisioningPlan};
use crate::state::app_state::AppState;

/// Display name used when the caller has no profile yet.
pub const DEFAULT_DISPLAY_NAME: &str = "Eco Explorer";

/// Everything a client needs to connect to the realtime platform.
#[derive(Debug, Clone)]
pub struct TokenBundle {
    pub token: String,
    pub user_id: String,
    pub user_name: String,
    pub api_key: String,
    pub app_id: Option<String>,
    pub community_enabled: Option<bool>,
}

/// Issue a chat/video session token (1h TTL), optionally scoped to the
/// given call ids, joining the caller to the configured community channels.
pub async fn issue_session_token(
    state: &AppState,
    bearer: &str,
    call_ids: Option<Vec<String>>,
) -> Result<TokenBundle, AppError> {
    let cfg = &state.realtime_cfg;
    require_signing_secret(cfg)?;

    let principal = state.session.resolve_session(bearer).await?;
    let (display_name, avatar_url) = resolve_display(state, &principal.id).await;
    let user_id = identity::normalize(&principal.id);

    let plan = ProvisioningPlan::for_user(RealtimeUser {
        id: user_id.clone(),
        name: display_name.clone(),
        image: avatar_url,
        role: Some("user".to_string()),
    })
    .with_channels(cfg.community_channels.clone());
    provision(state, &plan).await?;

    let claims = RealtimeClaims::session(user_id.as_str(), SystemTime::now(), call_ids)?;
    let token = jws::sign_compact(&claims, cfg.api_secret.as_bytes())?;

    debug!(user_id = %Redacted(&user_id), "issued session token");

    Ok(TokenBundle {
        token,
        user_id,
        user_name: display_name,
        api_key: cfg.api_key.clone(),
        app_id: cfg.app_id.clone(),
        community_enabled: Some(cfg.community_enabled()),
    })
}

/// Issue an activity feed token (24h TTL), following the community feed
/// from the caller's timeline when one is configured.
pub async fn issue_feed_token(state: &AppState, bearer: &str) -> Result<TokenBundle, AppError> {
    let cfg = &state.realtime_cfg;
    require_signing_secret(cfg)?;

    let principal = state.session.resolve_session(bearer).await?;
    let (display_name, avatar_url) = resolve_display(state, &principal.id).await;
    let user_id = identity::normalize(&principal.id);

    let follows = cfg
        .community_feed
        .iter()
        .map(|feed| FeedFollow {
            source: format!("timeline:{user_id}"),
            target: feed.clone(),
        })
        .collect();

    let plan = ProvisioningPlan::for_user(RealtimeUser {
        id: user_id.clone(),
        name: display_name.clone(),
        image: avatar_url,
        role: Some("user".to_string()),
    })
    .with_follows(follows);
    provision(state, &plan).await?;

    let claims = RealtimeClaims::feed(user_id.as_str(), SystemTime::now())?;
    let token = jws::sign_compact(&claims, cfg.api_secret.as_bytes())?;

    debug!(user_id = %Redacted(&user_id), "issued feed token");

    Ok(TokenBundle {
        token,
        user_id,
        user_name: display_name,
        api_key: cfg.api_key.clone(),
        app_id: cfg.app_id.clone(),
        community_enabled: None,
    })
}

fn require_signing_secret(cfg: &crate::config::realtime::RealtimeConfig) -> Result<(), AppError> {
    if cfg.api_secret.is_empty() {
        return Err(AppError::config("realtime API secret is not configured"));
    }
    Ok(())
}

/// Profile lookup with fallback: a missing or unreachable profile store
/// must not block token issuance.
async fn resolve_display(state: &AppState, principal_id: &str) -> (String, Option<String>) {
    let profile = match state.session.fetch_profile(principal_id).await {
        Ok(profile) => profile,
        Err(e) => {
            warn!(
                principal = %Redacted(principal_id),
                error = %e,
                "profile lookup failed, using default display name"
            );
            None
        }
    };

    match profile {
        Some(p) => (
            p.display_name.unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
            p.avatar_url,
        ),
        None => (DEFAULT_DISPLAY_NAME.to_string(), None),
    }
}

/// Mint the server credential and run the plan. Partial failure is logged
/// and swallowed; only a failure to mint the server credential itself is
/// fatal, since that means the signing secret is unusable.
async fn provision(state: &AppState, plan: &ProvisioningPlan) -> Result<(), AppError> {
    let server_claims = RealtimeClaims::server(SystemTime::now())?;
    let credential = jws::sign_compact(&server_claims, state.realtime_cfg.api_secret.as_bytes())?;

    let outcome = provisioning::execute(state.realtime.as_ref(), &credential, plan).await;
    if !outcome.fully_applied() {
        warn!(
            attempted = outcome.attempted,
            failed = outcome.failures.len(),
            "provisioning partially failed; token issuance continues"
        );
    }

    Ok(())
}
