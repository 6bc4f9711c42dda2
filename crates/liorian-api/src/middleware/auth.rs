//! Bearer-token gate for protected routes.
//!
//! Only the header shape is checked: tokens are opaque and are not
//! verified against anything.

use axum::Json;
use axum::extract::Request;
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::error::ApiErrorResponse;

/// Body message of the 401 returned when no token is sent.
pub const NO_TOKEN_MESSAGE: &str = "Access denied. No token provided.";

/// The token of an accepted request, inserted as a request extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

/// The non-empty remainder of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Rejects requests without a bearer token with 401.
pub async fn require_bearer(mut request: Request, next: Next) -> Response {
    let Some(token) = bearer_token(request.headers()).map(str::to_owned) else {
        debug!(path = %request.uri().path(), "Request without bearer token rejected");
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiErrorResponse::message(NO_TOKEN_MESSAGE)),
        )
            .into_response();
    };

    request.extensions_mut().insert(BearerToken(token));
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer abc123")), Some("abc123"));
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("Bearer    ")), None);
        assert_eq!(bearer_token(&headers("Basic abc123")), None);
        assert_eq!(bearer_token(&headers("bearer abc123")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
