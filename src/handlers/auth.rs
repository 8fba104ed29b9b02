//! Bearer identity extraction shared by the protected API routes
//!
//! The identity provider is external; this layer only gates on the presence
//! of an opaque bearer token and never inspects or logs its value.

use axum::http::{header, HeaderMap, StatusCode};

/// Extract the bearer identity from the Authorization header.
/// Missing, malformed or empty bearer → 401.
pub fn require_bearer(headers: &HeaderMap) -> Result<String, StatusCode> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let (scheme, token) = value.split_once(' ').ok_or(StatusCode::UNAUTHORIZED)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_valid_bearer_is_accepted() {
        let headers = headers_with_auth("Bearer user-token-123");
        assert_eq!(require_bearer(&headers).unwrap(), "user-token-123");
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let headers = headers_with_auth("bearer abc");
        assert_eq!(require_bearer(&headers).unwrap(), "abc");
        let headers = headers_with_auth("BEARER abc");
        assert_eq!(require_bearer(&headers).unwrap(), "abc");
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let headers = HeaderMap::new();
        assert_eq!(require_bearer(&headers), Err(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_empty_token_is_unauthorized() {
        let headers = headers_with_auth("Bearer ");
        assert_eq!(require_bearer(&headers), Err(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_other_schemes_are_unauthorized() {
        let headers = headers_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(require_bearer(&headers), Err(StatusCode::UNAUTHORIZED));
    }
}
