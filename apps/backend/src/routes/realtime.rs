//! Token issuance endpoints for the realtime platform.

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::auth_token::AuthToken;
use crate::services::tokens::{self, TokenBundle};
use crate::state::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    /// Call identifiers the minted token should be scoped to.
    pub call_ids: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub user_id: String,
    pub user_name: String,
    pub api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_enabled: Option<bool>,
}

impl From<TokenBundle> for TokenResponse {
    fn from(bundle: TokenBundle) -> Self {
        Self {
            token: bundle.token,
            user_id: bundle.user_id,
            user_name: bundle.user_name,
            api_key: bundle.api_key,
            app_id: bundle.app_id,
            community_enabled: bundle.community_enabled,
        }
    }
}

/// Mint a chat/video session token for the authenticated caller.
/// The body is optional; `{"callIds": [...]}` scopes the token to calls.
async fn session_token(
    auth: AuthToken,
    body: Option<web::Json<TokenRequest>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let call_ids = body.and_then(|b| b.into_inner().call_ids);

    let bundle = tokens::issue_session_token(&app_state, &auth.token, call_ids).await?;
    Ok(HttpResponse::Ok().json(TokenResponse::from(bundle)))
}

/// Mint a longer-lived activity feed token for the authenticated caller.
async fn feed_token(
    auth: AuthToken,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let bundle = tokens::issue_feed_token(&app_state, &auth.token).await?;
    Ok(HttpResponse::Ok().json(TokenResponse::from(bundle)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/token", web::post().to(session_token));
    cfg.route("/feed-token", web::post().to(feed_token));
}
