//! Rate limiting configuration helpers.
//!
//! Token minting is the only state-changing surface this service exposes,
//! so it gets a per-IP budget; health checks are exempt.

use std::time::Duration;

use actix_extensible_rate_limit::backend::SimpleInputFunctionBuilder;

/// Token endpoints: 30 requests per 60 seconds per IP address.
pub fn token_rate_limit_config() -> SimpleInputFunctionBuilder {
    SimpleInputFunctionBuilder::new(Duration::from_secs(60), 30).real_ip_key()
}
