use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::trace_ctx;

/// Wire shape for error responses: `{"error": "<message>"}`.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Signing error: {detail}")]
    Signing { detail: String },
    #[error("Upstream error: {detail}")]
    Upstream { detail: String },
    #[error("Identity collision: {detail}")]
    IdentityCollision { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn signing(detail: impl Into<String>) -> Self {
        Self::Signing {
            detail: detail.into(),
        }
    }

    pub fn upstream(detail: impl Into<String>) -> Self {
        Self::Upstream {
            detail: detail.into(),
        }
    }

    pub fn identity_collision(detail: impl Into<String>) -> Self {
        Self::IdentityCollision {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Signing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::IdentityCollision { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed on the wire. Details stay in logs; the client only
    /// needs to distinguish an auth failure from a server-side one.
    fn public_message(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "Unauthorized",
            AppError::Config { .. } => "Server configuration error",
            AppError::Signing { .. }
            | AppError::Upstream { .. }
            | AppError::IdentityCollision { .. }
            | AppError::Internal { .. } => "Internal server error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = trace_ctx::trace_id();

        if self.status().is_server_error() {
            tracing::error!(error = %self, trace_id = %trace_id, "request failed");
        }

        HttpResponse::build(self.status())
            .insert_header(("x-trace-id", trace_id))
            .json(ErrorBody {
                error: self.public_message().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_maps_to_401() {
        assert_eq!(AppError::unauthorized().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn server_side_errors_map_to_500() {
        for err in [
            AppError::config("missing secret"),
            AppError::signing("bad claims"),
            AppError::upstream("profile store down"),
            AppError::identity_collision("a-b vs a_b"),
            AppError::internal("boom"),
        ] {
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn public_message_hides_details() {
        let err = AppError::config("REALTIME_API_SECRET must be set");
        assert_eq!(err.public_message(), "Server configuration error");

        let err = AppError::unauthorized();
        assert_eq!(err.public_message(), "Unauthorized");
    }
}
