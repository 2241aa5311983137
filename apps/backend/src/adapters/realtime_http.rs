//! HTTP adapter for the realtime platform's management API.
//!
//! Every request carries the public API key as a query parameter and the
//! per-request server credential as a bearer header. Responses outside 2xx
//! become `Upstream` errors; callers decide whether that is fatal (it never
//! is for provisioning). No retries here.

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::config::realtime::RealtimeConfig;
use crate::error::AppError;
use crate::services::gateways::{FeedFollow, RealtimeAdmin, RealtimeUser};

pub struct HttpRealtimeAdmin {
    http: reqwest::Client,
    cfg: RealtimeConfig,
}

impl HttpRealtimeAdmin {
    pub fn new(http: reqwest::Client, cfg: RealtimeConfig) -> Self {
        Self { http, cfg }
    }

    async fn post(&self, credential: &str, path: &str, body: Value) -> Result<(), AppError> {
        let resp = self
            .http
            .post(format!("{}{path}", self.cfg.base_url))
            .query(&[("api_key", self.cfg.api_key.as_str())])
            .bearer_auth(credential)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("realtime API unreachable: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::upstream(format!(
                "realtime API returned {status} for {path}"
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl RealtimeAdmin for HttpRealtimeAdmin {
    async fn upsert_user(&self, credential: &str, user: &RealtimeUser) -> Result<(), AppError> {
        self.post(credential, "/api/v1/users", upsert_user_body(user)?)
            .await
    }

    async fn ensure_channel(&self, credential: &str, cid: &str) -> Result<(), AppError> {
        let (channel_type, channel_id) = split_cid(cid);
        self.post(
            credential,
            &format!("/api/v1/channels/{channel_type}/{channel_id}/query"),
            channel_query_body(),
        )
        .await
    }

    async fn add_member(
        &self,
        credential: &str,
        cid: &str,
        user_id: &str,
    ) -> Result<(), AppError> {
        let (channel_type, channel_id) = split_cid(cid);
        self.post(
            credential,
            &format!("/api/v1/channels/{channel_type}/{channel_id}/members"),
            add_member_body(user_id),
        )
        .await
    }

    async fn follow_feed(&self, credential: &str, follow: &FeedFollow) -> Result<(), AppError> {
        let (group, id) = split_cid(&follow.source);
        self.post(
            credential,
            &format!("/api/v1/feeds/{group}/{id}/follows"),
            follow_body(follow),
        )
        .await
    }
}

/// Split a `type:id` cid. A bare id falls back to the `messaging` type.
fn split_cid(cid: &str) -> (&str, &str) {
    cid.split_once(':').unwrap_or(("messaging", cid))
}

/// `{"users": {"<id>": {...}}}`: the upsert endpoint keys records by id.
fn upsert_user_body(user: &RealtimeUser) -> Result<Value, AppError> {
    let record = serde_json::to_value(user)
        .map_err(|e| AppError::internal(format!("user record failed to serialize: {e}")))?;
    let mut users = Map::new();
    users.insert(user.id.clone(), record);
    Ok(json!({ "users": users }))
}

fn channel_query_body() -> Value {
    // Channels created through provisioning are owned by the server identity.
    json!({ "data": { "created_by_id": "server" } })
}

fn add_member_body(user_id: &str) -> Value {
    json!({ "add_members": [user_id] })
}

fn follow_body(follow: &FeedFollow) -> Value {
    json!({ "target": follow.target })
}
