//! Authentication middleware: sanitize, resolve the access token, stamp the
//! trusted identity headers.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderValue, Request},
    middleware::{self, Next},
    response::Response,
};
use tracing::warn;
use url::form_urlencoded;

use crate::error::AuthError;
use crate::headers::{self, PARAM_ACCESS_TOKEN, X_CALLER_ID, X_CLIENT_ID};
use crate::services::oauth::TokenResolver;

/// Guard every route of `router` with the OAuth interceptor.
///
/// ```ignore
/// let resolver = TokenResolver::over_http(&config)?;
/// let app = middleware::oauth::apply(api::v1::routes(state.clone()), resolver);
/// ```
pub fn apply<S>(router: Router<S>, resolver: TokenResolver) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(resolver, oauth_middleware))
}

async fn oauth_middleware(
    State(resolver): State<TokenResolver>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    authenticate(&resolver, Some(&mut req)).await?;
    Ok(next.run(req).await)
}

/// Runs the full pipeline on one request, terminal on the first applicable
/// branch.
///
/// On return the request is in exactly one of two states: no identity
/// headers at all (anonymous), or both stamped from a single successful
/// lookup of the `access_token` carried by this same request. Running the
/// pipeline again on an already-annotated request reaches the same state.
pub async fn authenticate<B>(
    resolver: &TokenResolver,
    request: Option<&mut Request<B>>,
) -> Result<(), AuthError> {
    // An absent request has nothing to sanitize and nobody to identify.
    let Some(request) = request else {
        return Ok(());
    };

    headers::sanitize(Some(request.headers_mut()));

    let Some(token_id) = access_token_param(request) else {
        return Ok(());
    };

    let token = match resolver.resolve(&token_id).await {
        Ok(Some(token)) => token,
        // An unknown token id is indistinguishable from no token id: tokens
        // expire and rotate, so the request proceeds anonymously.
        Ok(None) => return Ok(()),
        Err(e) => {
            warn!(error = %e, "access token resolution failed");
            return Err(e.into());
        }
    };

    let req_headers = request.headers_mut();
    req_headers.insert(&X_CLIENT_ID, HeaderValue::from(token.client_id));
    req_headers.insert(&X_CALLER_ID, HeaderValue::from(token.user_id));

    Ok(())
}

/// The trimmed `access_token` query parameter, if it carries anything.
fn access_token_param<B>(request: &Request<B>) -> Option<String> {
    let query = request.uri().query()?;

    form_urlencoded::parse(query.as_bytes())
        .find_map(|(name, value)| {
            (name == PARAM_ACCESS_TOKEN).then(|| value.trim().to_string())
        })
        .filter(|token_id| !token_id.is_empty())
}
