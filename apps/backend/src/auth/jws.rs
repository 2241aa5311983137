//! Compact JWS (JSON Web Signature) construction with HMAC-SHA256.
//!
//! The realtime platform accepts HS256 tokens in compact serialization:
//! three base64url segments (header, payload, signature) joined by periods,
//! with no padding characters. The signature is computed over the exact byte
//! sequence `header_b64 "." payload_b64` using the platform API secret as
//! the MAC key.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Fixed JOSE header for every token this service mints.
/// Field order matters: the platform-side fixtures pin the exact
/// `{"alg":"HS256","typ":"JWT"}` byte sequence.
#[derive(Serialize)]
struct Header {
    alg: &'static str,
    typ: &'static str,
}

const HEADER: Header = Header {
    alg: "HS256",
    typ: "JWT",
};

/// Serialize `claims` and produce the signed compact JWS.
///
/// Pure and deterministic: identical claims and secret always yield the
/// same token. Fails with a signing error if the secret is empty or the
/// claims are not JSON-encodable.
pub fn sign_compact<C: Serialize>(claims: &C, secret: &[u8]) -> Result<String, AppError> {
    if secret.is_empty() {
        return Err(AppError::signing("signing secret is empty"));
    }

    let header_json = serde_json::to_vec(&HEADER)
        .map_err(|e| AppError::signing(format!("header failed to serialize: {e}")))?;
    let payload_json = serde_json::to_vec(claims)
        .map_err(|e| AppError::signing(format!("claims failed to serialize: {e}")))?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header_json),
        URL_SAFE_NO_PAD.encode(payload_json)
    );

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AppError::signing(format!("invalid HMAC key: {e}")))?;
    mac.update(signing_input.as_bytes());
    let signature = mac.finalize().into_bytes();

    Ok(format!(
        "{signing_input}.{}",
        URL_SAFE_NO_PAD.encode(signature)
    ))
}
