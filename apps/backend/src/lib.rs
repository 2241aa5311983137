#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use auth::claims::{
    RealtimeClaims, FEED_TOKEN_TTL_SECS, SERVER_SUBJECT, SERVER_TOKEN_TTL_SECS,
    SESSION_TOKEN_TTL_SECS,
};
pub use auth::identity::{normalize, normalize_unique};
pub use auth::jws::sign_compact;
pub use config::realtime::RealtimeConfig;
pub use config::session::SessionConfig;
pub use error::AppError;
pub use extractors::auth_token::AuthToken;
pub use infra::state::build_state;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use services::tokens::{issue_feed_token, issue_session_token, TokenBundle};
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
