//! The identity headers this crate owns, and the helpers to read them.
//!
//! `X-Caller-Id` / `X-Client-Id` are trust-boundary headers: downstream code
//! treats them as authoritative, so only [`crate::middleware::oauth`] may
//! write them and [`sanitize`] always runs first. `X-Public` is a routing
//! marker we only ever read.

use axum::http::{HeaderMap, HeaderName};

/// Marks a route as reachable anonymously. Consumed, never written.
pub static X_PUBLIC: HeaderName = HeaderName::from_static("x-public");
/// End-user identity, stamped after a successful token lookup.
pub static X_CALLER_ID: HeaderName = HeaderName::from_static("x-caller-id");
/// Application/client identity, stamped after a successful token lookup.
pub static X_CLIENT_ID: HeaderName = HeaderName::from_static("x-client-id");

/// Query parameter carrying the access-token reference.
pub const PARAM_ACCESS_TOKEN: &str = "access_token";

/// Removes the caller/client identity headers so an external caller cannot
/// pre-set them. Leaves every other header, including `X-Public`, untouched.
/// Idempotent; a `None` request is a no-op.
pub fn sanitize(headers: Option<&mut HeaderMap>) {
    if let Some(headers) = headers {
        headers.remove(&X_CALLER_ID);
        headers.remove(&X_CLIENT_ID);
    }
}

/// Whether the request is marked public. An absent request counts as public;
/// on a present request, anything other than exactly `"true"` does not.
pub fn is_public(headers: Option<&HeaderMap>) -> bool {
    match headers {
        None => true,
        Some(headers) => header_str(headers, &X_PUBLIC) == Some("true"),
    }
}

/// End-user id from `X-Caller-Id`; 0 when absent or not a base-10 integer.
pub fn caller_id(headers: Option<&HeaderMap>) -> i64 {
    numeric_header(headers, &X_CALLER_ID)
}

/// Client id from `X-Client-Id`; 0 when absent or not a base-10 integer.
pub fn client_id(headers: Option<&HeaderMap>) -> i64 {
    numeric_header(headers, &X_CLIENT_ID)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

// Missing or garbage identity must never crash authorization logic
// downstream; it degrades to "no identity".
fn numeric_header(headers: Option<&HeaderMap>, name: &HeaderName) -> i64 {
    headers
        .and_then(|headers| header_str(headers, name))
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(entries: &[(&HeaderName, &str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in entries {
            headers.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn sanitize_removes_only_identity_headers() {
        let mut headers = headers_with(&[
            (&X_CALLER_ID, "999"),
            (&X_CLIENT_ID, "999"),
            (&X_PUBLIC, "true"),
        ]);

        sanitize(Some(&mut headers));

        assert!(headers.get(&X_CALLER_ID).is_none());
        assert!(headers.get(&X_CLIENT_ID).is_none());
        assert_eq!(headers.get(&X_PUBLIC).unwrap(), "true");
    }

    #[test]
    fn sanitize_is_idempotent_and_tolerates_absence() {
        let mut headers = headers_with(&[(&X_CALLER_ID, "1")]);
        sanitize(Some(&mut headers));
        sanitize(Some(&mut headers));
        assert!(headers.is_empty());

        sanitize(None);
    }

    #[test]
    fn is_public_requires_exactly_true() {
        assert!(is_public(None));
        assert!(is_public(Some(&headers_with(&[(&X_PUBLIC, "true")]))));

        assert!(!is_public(Some(&HeaderMap::new())));
        assert!(!is_public(Some(&headers_with(&[(&X_PUBLIC, "TRUE")]))));
        assert!(!is_public(Some(&headers_with(&[(&X_PUBLIC, "1")]))));
        assert!(!is_public(Some(&headers_with(&[(&X_PUBLIC, "false")]))));
    }

    #[test]
    fn numeric_accessors_degrade_to_zero() {
        assert_eq!(caller_id(None), 0);
        assert_eq!(client_id(None), 0);
        assert_eq!(caller_id(Some(&HeaderMap::new())), 0);

        let garbage = headers_with(&[(&X_CALLER_ID, "abc"), (&X_CLIENT_ID, "12.5")]);
        assert_eq!(caller_id(Some(&garbage)), 0);
        assert_eq!(client_id(Some(&garbage)), 0);
    }

    #[test]
    fn numeric_accessors_read_decimal_values() {
        let headers = headers_with(&[(&X_CALLER_ID, "42"), (&X_CLIENT_ID, "7")]);
        assert_eq!(caller_id(Some(&headers)), 42);
        assert_eq!(client_id(Some(&headers)), 7);
    }
}
