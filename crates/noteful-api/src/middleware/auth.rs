//! Bearer-token gate for protected routes.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized request";

/// Reject requests whose `Authorization` header is not exactly
/// `Bearer <API_TOKEN>`.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token);

    match token {
        Some(token) if token == &*state.api_token => Ok(next.run(request).await),
        _ => {
            tracing::warn!(
                path = %request.uri().path(),
                method = %request.method(),
                "Rejected request without valid bearer token"
            );
            Err(ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string()))
        }
    }
}

/// Token part of a `Bearer` authorization value. The scheme is
/// case-insensitive.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(bearer_token("bearer abc123"), Some("abc123"));
        assert_eq!(bearer_token("Bearer  abc123 "), Some("abc123"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic abc123"), None);
        assert_eq!(bearer_token("abc123"), None);
    }
}
