//! Request-time OAuth interceptor for services behind the internal mesh.
//!
//! The pipeline is fixed: strip any caller/client identity headers from the
//! inbound request, look up the `access_token` query parameter against the
//! OAuth API, and stamp `X-Caller-Id` / `X-Client-Id` back onto the request
//! on success. Downstream handlers read identity only through the accessors
//! in [`headers`] (or the [`extract::Identity`] extractor), so an external
//! caller can never forge an identity by pre-setting those headers.
//!
//! A token the OAuth API does not know is not an error — the request simply
//! proceeds anonymously. A lookup that *fails* (transport fault, undecodable
//! response, upstream-reported error) aborts authentication for that request.
//!
//! ```ignore
//! let resolver = TokenResolver::over_http(&OauthConfig::new("http://oauth-api:8080"))?;
//! let app = middleware::oauth::apply(router, resolver);
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod headers;
pub mod middleware;
pub mod services;

pub use config::OauthConfig;
pub use error::AuthError;
pub use extract::Identity;
pub use middleware::oauth::{apply, authenticate};
pub use services::oauth::{AccessToken, ResolveError, TokenResolver};
