use std::fmt;
use std::time::Duration;

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Connection settings for the upstream OAuth API.
///
/// Built programmatically by the embedding service and injected into the
/// resolver at construction time. The timeouts are deliberately short: this
/// interceptor runs in front of every guarded request, so a slow OAuth API
/// must surface as an error quickly instead of stalling the whole service.
#[derive(Debug, Clone)]
pub struct OauthConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub response_timeout: Duration,
}

impl Default for OauthConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout: Duration::from_millis(200),
            response_timeout: Duration::from_millis(200),
        }
    }
}

impl OauthConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeouts(mut self, connect: Duration, response: Duration) -> Self {
        self.connect_timeout = connect;
        self.response_timeout = response;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_mesh_profile() {
        let config = OauthConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.connect_timeout, Duration::from_millis(200));
        assert_eq!(config.response_timeout, Duration::from_millis(200));
    }

    #[test]
    fn new_overrides_only_the_base_url() {
        let config = OauthConfig::new("http://oauth-api:8080");
        assert_eq!(config.base_url, "http://oauth-api:8080");
        assert_eq!(config.connect_timeout, Duration::from_millis(200));
    }
}
