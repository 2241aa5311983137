#![allow(dead_code)]

//! Shared test support: mock collaborators and state builders for
//! exercising the token endpoints without any network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use greenquest_backend::config::realtime::RealtimeConfig;
use greenquest_backend::error::AppError;
use greenquest_backend::services::gateways::{
    FeedFollow, Principal, Profile, RealtimeAdmin, RealtimeUser, SessionGateway,
};
use greenquest_backend::state::app_state::AppState;

pub const TEST_SECRET: &str = "testsecret";
pub const TEST_API_KEY: &str = "key_abc123";
pub const TEST_PRINCIPAL: &str = "11111111-1111-1111-1111-111111111111";

/// Session gateway with a scripted principal/profile.
pub struct MockSessionGateway {
    /// `None` rejects every bearer as unauthorized.
    pub principal: Option<String>,
    pub profile: Option<Profile>,
    /// Simulate a profile store transport failure.
    pub profile_unreachable: bool,
}

impl MockSessionGateway {
    pub fn authenticated() -> Self {
        Self {
            principal: Some(TEST_PRINCIPAL.to_string()),
            profile: Some(Profile {
                display_name: Some("Terra Green".to_string()),
                avatar_url: Some("https://cdn.example.com/avatar.png".to_string()),
            }),
            profile_unreachable: false,
        }
    }

    pub fn rejecting() -> Self {
        Self {
            principal: None,
            profile: None,
            profile_unreachable: false,
        }
    }
}

#[async_trait]
impl SessionGateway for MockSessionGateway {
    async fn resolve_session(&self, _bearer: &str) -> Result<Principal, AppError> {
        match &self.principal {
            Some(id) => Ok(Principal { id: id.clone() }),
            None => Err(AppError::unauthorized()),
        }
    }

    async fn fetch_profile(&self, _principal_id: &str) -> Result<Option<Profile>, AppError> {
        if self.profile_unreachable {
            return Err(AppError::upstream("profile store unreachable"));
        }
        Ok(self.profile.clone())
    }
}

/// Realtime admin that records every call and optionally fails them all,
/// simulating non-2xx responses from the management API.
#[derive(Default)]
pub struct RecordingRealtimeAdmin {
    pub fail_all: bool,
    pub calls: AtomicUsize,
    pub log: Mutex<Vec<String>>,
}

impl RecordingRealtimeAdmin {
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Default::default()
        }
    }

    fn record(&self, entry: String) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push(entry);
        if self.fail_all {
            Err(AppError::upstream("realtime API returned 500"))
        } else {
            Ok(())
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn entries(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl RealtimeAdmin for RecordingRealtimeAdmin {
    async fn upsert_user(&self, _credential: &str, user: &RealtimeUser) -> Result<(), AppError> {
        self.record(format!("upsert_user {}", user.id))
    }

    async fn ensure_channel(&self, _credential: &str, cid: &str) -> Result<(), AppError> {
        self.record(format!("ensure_channel {cid}"))
    }

    async fn add_member(
        &self,
        _credential: &str,
        cid: &str,
        user_id: &str,
    ) -> Result<(), AppError> {
        self.record(format!("add_member {cid} {user_id}"))
    }

    async fn follow_feed(&self, _credential: &str, follow: &FeedFollow) -> Result<(), AppError> {
        self.record(format!("follow {} -> {}", follow.source, follow.target))
    }
}

pub fn test_realtime_config() -> RealtimeConfig {
    RealtimeConfig {
        api_key: TEST_API_KEY.to_string(),
        api_secret: TEST_SECRET.to_string(),
        app_id: Some("app_42".to_string()),
        base_url: "https://api.realtime-chat.io".to_string(),
        community_channels: vec!["community:general".to_string()],
        community_feed: Some("community:global".to_string()),
    }
}

pub fn test_state(
    session: MockSessionGateway,
    realtime: Arc<RecordingRealtimeAdmin>,
    cfg: RealtimeConfig,
) -> AppState {
    AppState::new(Arc::new(session), realtime, cfg)
}

/// Decode a compact JWS payload segment into JSON for assertions.
pub fn decode_payload(token: &str) -> serde_json::Value {
    let payload = token.split('.').nth(1).expect("token has three segments");
    let bytes = URL_SAFE_NO_PAD.decode(payload).expect("valid base64url");
    serde_json::from_slice(&bytes).expect("payload is JSON")
}
