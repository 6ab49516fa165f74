//! Extractors for handlers that read the identity stamped by the middleware.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::headers;

/// Identity carried by the trusted headers, as seen by a handler.
///
/// Both ids are 0 on an anonymous request. The extractor never rejects:
/// absent identity is a valid state here, and the access decision belongs to
/// the handler (or its policy layer), not to extraction.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub caller_id: i64,
    pub client_id: i64,
}

impl Identity {
    pub fn is_anonymous(&self) -> bool {
        self.caller_id == 0 && self.client_id == 0
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            caller_id: headers::caller_id(Some(&parts.headers)),
            client_id: headers::client_id(Some(&parts.headers)),
        })
    }
}
