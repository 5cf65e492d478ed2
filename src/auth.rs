use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Clone)]
pub struct AuthState {
    pub api_token: String,
}

#[derive(Debug, Serialize)]
struct UnauthorizedResponse {
    error: &'static str,
}

/// Rejects any request whose bearer token does not exactly match the
/// configured shared secret. Runs before route logic, so unauthorized
/// requests never touch the store.
pub async fn require_bearer(State(auth): State<AuthState>, req: Request, next: Next) -> Response {
    match bearer_token(req.headers()) {
        Some(token) if token == auth.api_token => next.run(req).await,
        _ => {
            tracing::error!("unauthorized request to path: {}", req.uri().path());
            (
                StatusCode::UNAUTHORIZED,
                Json(UnauthorizedResponse {
                    error: "Unauthorized Request",
                }),
            )
                .into_response()
        }
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_token_from_bearer_header() {
        let headers = headers_with("Bearer sekrit");
        assert_eq!(bearer_token(&headers), Some("sekrit"));
    }

    #[test]
    fn rejects_missing_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn rejects_non_bearer_scheme() {
        let headers = headers_with("Basic sekrit");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn rejects_empty_token() {
        let headers = headers_with("Bearer ");
        assert_eq!(bearer_token(&headers), None);
    }
}
