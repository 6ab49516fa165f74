use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::oauth::{ResolveError, UpstreamError};

/// Why authentication could not be completed for a request.
///
/// Anonymous outcomes (absent request, missing token, unknown token) are not
/// represented here; those return `Ok` from the pipeline. These variants mean
/// the lookup itself failed and the request must not proceed as either
/// authenticated or anonymous.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The OAuth API rejected the lookup; its error body is replayed as-is.
    #[error("token lookup rejected upstream: {error}")]
    Upstream {
        status: StatusCode,
        error: UpstreamError,
    },

    /// The OAuth API could not be reached at all.
    #[error("token service unreachable: {0}")]
    Transport(String),

    /// The OAuth API answered with a body we could not decode.
    #[error("malformed token service response: {0}")]
    MalformedResponse(String),
}

#[derive(Serialize)]
struct ErrorResponseBody {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Upstream { status, error } => (status, Json(error)).into_response(),

            // The fault detail stays on the variant for logs; the response
            // body never leaks it.
            AuthError::Transport(_) | AuthError::MalformedResponse(_) => {
                let body = ErrorResponseBody {
                    error: ErrorBody {
                        code: "INTERNAL",
                        message: "internal server error".to_string(),
                    },
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl From<ResolveError> for AuthError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::Upstream { status, error } => AuthError::Upstream { status, error },
            ResolveError::Transport(fault) => AuthError::Transport(fault.0),
            ResolveError::MalformedResponse(reason) => AuthError::MalformedResponse(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::oauth::TransportError;

    #[test]
    fn conversion_keeps_failure_kinds_distinguishable() {
        let transport: AuthError =
            ResolveError::Transport(TransportError("connection refused".to_string())).into();
        assert!(matches!(transport, AuthError::Transport(_)));

        let malformed: AuthError =
            ResolveError::MalformedResponse("undecodable access token".to_string()).into();
        assert!(matches!(malformed, AuthError::MalformedResponse(_)));
    }

    #[test]
    fn upstream_errors_keep_their_status() {
        let err: AuthError = ResolveError::Upstream {
            status: StatusCode::SERVICE_UNAVAILABLE,
            error: UpstreamError {
                code: "UNAVAILABLE".to_string(),
                message: "token store down".to_string(),
                causes: Vec::new(),
            },
        }
        .into();

        match err {
            AuthError::Upstream { status, .. } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE)
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }
}
