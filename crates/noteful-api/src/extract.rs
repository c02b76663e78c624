//! Request extractors: request metadata for logging, lenient JSON bodies,
//! and the resource lookup gate for `/:id` routes.

use std::net::{IpAddr, SocketAddr};

use axum::body::Bytes;
use axum::extract::{ConnectInfo, FromRequest, FromRequestParts, OriginalUri, Path, Request};
use axum::http::request::Parts;
use axum::http::Method;
use serde::de::DeserializeOwned;

use noteful_core::{Error, Result, ValidationError};

use crate::error::ApiError;
use crate::state::AppState;

/// Method, path, and peer address of the current request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    pub client_ip: Option<IpAddr>,
}

impl RequestContext {
    /// Log a rejected body and convert it into a 400.
    pub fn reject(&self, err: ValidationError) -> ApiError {
        let ip = self
            .client_ip
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "-".to_string());
        tracing::error!(
            request = %self.path,
            method = %self.method,
            ip = %ip,
            field = err.field().unwrap_or("-"),
            message = %err,
            "Request body failed validation"
        );
        err.into()
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map(|uri| uri.0.path().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());
        let client_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip());

        Ok(RequestContext {
            method: parts.method.clone(),
            path,
            client_ip,
        })
    }
}

/// JSON request body. An empty body reads as `{}` so that missing-field
/// validation, not a parse failure, reports what is absent.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Rejection {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

        parse_body(&bytes).map(JsonBody)
    }
}

fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> std::result::Result<T, ApiError> {
    let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        bytes
    };
    serde_json::from_slice(bytes)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON in request body: {}", e)))
}

/// A row addressable by integer id under `/:id`.
#[axum::async_trait]
pub trait Resource: Sized + Send + 'static {
    /// Human name used in the not-found message.
    const NAME: &'static str;

    async fn lookup(state: &AppState, id: i32) -> Result<Option<Self>>;
}

/// The row named by the `:id` path segment. Requests for ids that are not
/// integers or have no row stop here with a 404.
#[derive(Debug, Clone)]
pub struct Resolved<T>(pub T);

#[axum::async_trait]
impl<T: Resource> FromRequestParts<AppState> for Resolved<T> {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let not_found =
            || ApiError::from(Error::NotFound(format!("{} doesn't exist", T::NAME)));

        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| not_found())?;
        let id: i32 = raw.parse().map_err(|_| not_found())?;

        match T::lookup(state, id).await? {
            Some(row) => Ok(Resolved(row)),
            None => Err(not_found()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use noteful_core::CreateFolderRequest;

    #[test]
    fn test_empty_body_reads_as_empty_object() {
        let req: CreateFolderRequest = parse_body(b"").unwrap();
        assert_eq!(req.title, None);

        let req: CreateFolderRequest = parse_body(b"  \n").unwrap();
        assert_eq!(req.title, None);
    }

    #[test]
    fn test_malformed_body_is_bad_request() {
        let err = parse_body::<CreateFolderRequest>(b"{\"title\": ").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        match err {
            ApiError::BadRequest(msg) => assert!(msg.starts_with("Invalid JSON in request body")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let req: CreateFolderRequest =
            parse_body(br#"{"title": "Inbox", "colour": "blue"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("Inbox"));
    }

    #[test]
    fn test_reject_converts_to_bad_request() {
        let ctx = RequestContext {
            method: Method::POST,
            path: "/api/folders".to_string(),
            client_ip: None,
        };
        let err = ctx.reject(ValidationError::MissingField("title"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
