//! Bearer credential extraction from the Authorization header.
//!
//! The credential is opaque to this service: it is passed through to the
//! session store for verification, never decoded locally.

use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};

use crate::error::AppError;

/// Caller's session credential, as presented in `Authorization: Bearer ...`.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub token: String,
}

impl FromRequest for AuthToken {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        std::future::ready(extract_bearer(req))
    }
}

fn extract_bearer(req: &HttpRequest) -> Result<AuthToken, AppError> {
    let auth_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(AppError::unauthorized)?
        .to_str()
        .map_err(|_| AppError::unauthorized())?;

    match auth_value.split_once(' ') {
        Some(("Bearer", token)) if !token.trim().is_empty() => Ok(AuthToken {
            token: token.trim().to_string(),
        }),
        _ => Err(AppError::unauthorized()),
    }
}
