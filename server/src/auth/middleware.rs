//! Request Signature Middleware

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;

use super::error::AuthFailure;

/// Middleware rejecting requests that are not signed by the voice platform.
///
/// Buffers the body (the signature covers the exact bytes received),
/// authenticates it, then hands an identical request to the next layer.
///
/// # Usage
///
/// ```ignore
/// Router::new()
///     .route("/", post(skill_endpoint))
///     .layer(axum::middleware::from_fn_with_state(state, require_signed_request))
/// ```
pub async fn require_signed_request(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthFailure> {
    let (parts, body) = request.into_parts();

    let bytes = to_bytes(body, state.config.max_body_bytes)
        .await
        .map_err(|e| AuthFailure::MalformedBody(format!("unreadable body: {e}")))?;

    state.authenticator.authenticate(&parts.headers, &bytes).await?;

    let request = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(request).await)
}
