pub mod client;
pub mod resolver;

pub use client::{HttpTokenClient, TokenClient, TransportError, UpstreamResponse};
pub use resolver::{AccessToken, ResolveError, TokenResolver, UpstreamError};
