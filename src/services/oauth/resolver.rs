//! Access-token lookup against the OAuth API.

use std::fmt;
use std::sync::Arc;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::{ConfigError, OauthConfig};
use crate::services::oauth::client::{HttpTokenClient, TokenClient, TransportError};

/// A successfully resolved access token: who the request acts for
/// (`user_id`) and which application obtained the token (`client_id`).
///
/// Produced only by [`TokenResolver::resolve`]; the annotator copies the two
/// numeric fields into headers and drops it.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub id: String,
    pub user_id: i64,
    pub client_id: i64,
}

/// Structured error body the OAuth API returns on a failed lookup.
///
/// Kept serializable because a decodable upstream error is replayed verbatim
/// to our own caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamError {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub causes: Vec<serde_json::Value>,
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Why a lookup failed. An unknown token is not a failure and is reported as
/// `Ok(None)` by [`TokenResolver::resolve`] instead.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The lookup never completed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The OAuth API reported a failure of its own; `error` is its body.
    #[error("token lookup rejected upstream: {error}")]
    Upstream {
        status: StatusCode,
        error: UpstreamError,
    },

    /// The OAuth API answered with a body that does not match its contract.
    /// Never collapsed into "not found": an unreadable answer is an outage,
    /// not anonymity.
    #[error("malformed token service response: {0}")]
    MalformedResponse(String),
}

/// Resolves opaque access-token ids to caller/client identities.
///
/// Holds the single long-lived upstream client behind the [`TokenClient`]
/// seam; cheap to clone and safe to share across concurrent requests.
#[derive(Clone)]
pub struct TokenResolver {
    client: Arc<dyn TokenClient>,
}

impl TokenResolver {
    pub fn new(client: impl TokenClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Resolver over the production HTTP client described by `config`.
    pub fn over_http(config: &OauthConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(HttpTokenClient::new(config)?))
    }

    /// Looks up `token_id`. `Ok(None)` means the OAuth API does not know the
    /// token (expired or rotated); callers treat that as anonymous.
    ///
    /// `Ok(None)` is derived only from the status of a real upstream
    /// response, so a transport fault can never masquerade as a missing
    /// token.
    pub async fn resolve(&self, token_id: &str) -> Result<Option<AccessToken>, ResolveError> {
        let path = format!("/oauth/access_token/{token_id}");
        let response = self.client.get(&path).await?;

        if response.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if response.status.as_u16() > 299 {
            return Err(match serde_json::from_slice::<UpstreamError>(&response.body) {
                Ok(error) => ResolveError::Upstream {
                    status: response.status,
                    error,
                },
                Err(e) => {
                    warn!(
                        status = %response.status,
                        error = %e,
                        "undecodable error body from token service"
                    );
                    ResolveError::MalformedResponse(format!("undecodable error body: {e}"))
                }
            });
        }

        let token: AccessToken = serde_json::from_slice(&response.body).map_err(|e| {
            warn!(error = %e, "undecodable access token from token service");
            ResolveError::MalformedResponse(format!("undecodable access token: {e}"))
        })?;

        Ok(Some(token))
    }
}
