//! Transport seam between the token resolver and the OAuth API.
use async_trait::async_trait;
use axum::http::StatusCode;
use bytes::Bytes;
use thiserror::Error;
use url::Url;

use crate::config::{ConfigError, OauthConfig};

/// One raw upstream exchange: status code plus body bytes.
///
/// Interpreting either is the resolver's job; the transport only reports
/// what came back.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// The exchange itself never completed (connect, timeout, body read).
///
/// Distinct from an upstream-reported failure: no status code exists here,
/// so this can never be mistaken for a not-found token.
#[derive(Debug, Error)]
#[error("token service request failed: {0}")]
pub struct TransportError(pub String);

/// Request/response exchange with the OAuth API.
///
/// This is the only seam in the crate that touches the network.
/// Implementations must be safe to share across in-flight requests; the
/// resolver keeps a single instance for the process lifetime.
#[async_trait]
pub trait TokenClient: Send + Sync + 'static {
    async fn get(&self, path: &str) -> Result<UpstreamResponse, TransportError>;
}

/// reqwest-backed client with fixed short timeouts, so the OAuth API cannot
/// become a latency sink for every guarded request.
#[derive(Clone, Debug)]
pub struct HttpTokenClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpTokenClient {
    pub fn new(config: &OauthConfig) -> Result<Self, ConfigError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|_| ConfigError::Invalid("base_url"))?;

        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.response_timeout)
            .build()
            .map_err(|_| ConfigError::Invalid("http client"))?;

        Ok(Self { http, base_url })
    }
}

#[async_trait]
impl TokenClient for HttpTokenClient {
    async fn get(&self, path: &str) -> Result<UpstreamResponse, TransportError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| TransportError(format!("invalid lookup path: {e}")))?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError(format!("request failed: {e}")))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError(format!("body read failed: {e}")))?;

        Ok(UpstreamResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_an_unparseable_base_url() {
        let config = OauthConfig::new("not a url");
        assert!(matches!(
            HttpTokenClient::new(&config),
            Err(ConfigError::Invalid("base_url"))
        ));
    }

    #[test]
    fn accepts_the_default_config() {
        assert!(HttpTokenClient::new(&OauthConfig::default()).is_ok());
    }
}
