//! Owner identity extraction.
//!
//! Identity verification is handled upstream (the deployment's identity
//! provider or gateway); this layer only resolves the caller's opaque owner
//! id once per request and threads it through every operation explicitly.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

/// Name of the session cookie carrying the owner id (web clients).
pub const SESSION_COOKIE: &str = "shednote_session";

/// Extractor for the authenticated owner id. Returns 401 if not
/// authenticated. The rejection never names the resource being accessed.
pub struct Owner(pub Uuid);

impl<S> FromRequestParts<S> for Owner
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Try Authorization header first (for API clients)
        if let Some(auth_header) = parts.headers.get(AUTHORIZATION) {
            let header_value = auth_header
                .to_str()
                .map_err(|_| (StatusCode::UNAUTHORIZED, "Invalid authorization header"))?;

            let token = header_value
                .strip_prefix("Bearer ")
                .ok_or((StatusCode::UNAUTHORIZED, "Invalid authorization header"))?;

            let owner_id = token
                .trim()
                .parse::<Uuid>()
                .map_err(|_| (StatusCode::UNAUTHORIZED, "Invalid credentials"))?;

            return Ok(Owner(owner_id));
        }

        // Fall back to the session cookie (for web clients)
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar
            .get(SESSION_COOKIE)
            .ok_or((StatusCode::UNAUTHORIZED, "Not authenticated"))?;

        let owner_id = cookie
            .value()
            .parse::<Uuid>()
            .map_err(|_| (StatusCode::UNAUTHORIZED, "Invalid credentials"))?;

        Ok(Owner(owner_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<Owner, (StatusCode, &'static str)> {
        let (mut parts, _) = request.into_parts();
        Owner::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_bearer_token_resolves_owner() {
        let owner_id = Uuid::new_v4();
        let request = Request::builder()
            .header(AUTHORIZATION, format!("Bearer {owner_id}"))
            .body(())
            .unwrap();

        let Owner(resolved) = extract(request).await.unwrap();
        assert_eq!(resolved, owner_id);
    }

    #[tokio::test]
    async fn test_session_cookie_fallback() {
        let owner_id = Uuid::new_v4();
        let request = Request::builder()
            .header("cookie", format!("{SESSION_COOKIE}={owner_id}"))
            .body(())
            .unwrap();

        let Owner(resolved) = extract(request).await.unwrap();
        assert_eq!(resolved, owner_id);
    }

    #[tokio::test]
    async fn test_missing_credentials_rejected() {
        let request = Request::builder().body(()).unwrap();

        let result = extract(request).await;
        assert_eq!(result.err().map(|(status, _)| status), Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_malformed_bearer_rejected() {
        let request = Request::builder()
            .header(AUTHORIZATION, "Bearer not-a-uuid")
            .body(())
            .unwrap();

        let result = extract(request).await;
        assert_eq!(result.err().map(|(status, _)| status), Some(StatusCode::UNAUTHORIZED));
    }
}
