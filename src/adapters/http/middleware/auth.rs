//! Session resolution middleware and the `RequireAuth` extractor.
//!
//! ```text
//! Request → auth_middleware → AuthenticatedUser in extensions (if any)
//!                 ↓
//!           route_guard → redirect or continue
//!                 ↓
//!           Handler → RequireAuth reads the user
//! ```
//!
//! The middleware only resolves; deciding what an anonymous request may see
//! is the guard's job.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::AuthenticatedUser;
use crate::ports::SessionValidator;

/// Cookie carrying the session token for browser requests.
pub const SESSION_COOKIE: &str = "review_ritual_session";

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Resolves the session token, if any, into an `AuthenticatedUser`.
///
/// The token is read from `Authorization: Bearer <token>` or, failing that,
/// the session cookie. Invalid or expired tokens are treated as no session.
/// An unreachable session service is a 503.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = session_token(request.headers()) else {
        return next.run(request).await;
    };

    match validator.validate(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(error) if error.is_rejection() => {
            tracing::debug!(%error, path = %request.uri().path(), "session rejected");
            next.run(request).await
        }
        Err(error) => {
            tracing::error!(%error, "session service unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "code": "AUTH_UNAVAILABLE",
                    "message": "Authentication service unavailable",
                    "retryable": true
                })),
            )
                .into_response()
        }
    }
}

fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Extractor for handlers that need the signed-in user.
///
/// Rejects with 401 when no session was resolved. Behind the route guard
/// this only happens if a route was misconfigured as public.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

#[derive(Debug, Clone)]
pub enum AuthRejection {
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({
                    "code": "UNAUTHENTICATED",
                    "message": "Authentication required"
                })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use axum::{body::Body, http::Request as HttpRequest, middleware, routing::get, Router};
    use tower::ServiceExt;

    async fn whoami(user: Option<axum::Extension<AuthenticatedUser>>) -> String {
        user.map(|u| u.0.id.to_string()).unwrap_or_else(|| "anonymous".to_string())
    }

    fn app(validator: MockSessionValidator) -> Router {
        let state: AuthState = Arc::new(validator);
        Router::new()
            .route("/whoami", get(whoami))
            .layer(middleware::from_fn_with_state(state, auth_middleware))
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn get_with(header_name: header::HeaderName, value: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .uri("/whoami")
            .header(header_name, value)
            .body(Body::empty())
            .unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Middleware
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn bearer_token_resolves_user() {
        let app = app(MockSessionValidator::new().with_test_user("good", "user-7"));

        let response = app
            .oneshot(get_with(header::AUTHORIZATION, "Bearer good"))
            .await
            .unwrap();

        assert_eq!(body_text(response).await, "user-7");
    }

    #[tokio::test]
    async fn session_cookie_resolves_user() {
        let app = app(MockSessionValidator::new().with_test_user("good", "user-7"));

        let response = app
            .oneshot(get_with(
                header::COOKIE,
                "theme=dark; review_ritual_session=good",
            ))
            .await
            .unwrap();

        assert_eq!(body_text(response).await, "user-7");
    }

    #[tokio::test]
    async fn invalid_token_continues_anonymously() {
        let app = app(MockSessionValidator::new());

        let response = app
            .oneshot(get_with(header::AUTHORIZATION, "Bearer forged"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "anonymous");
    }

    #[tokio::test]
    async fn expired_token_continues_anonymously() {
        let validator = MockSessionValidator::new().with_test_user("good", "user-7");
        validator.expire("good");

        let response = app(validator)
            .oneshot(get_with(header::AUTHORIZATION, "Bearer good"))
            .await
            .unwrap();

        assert_eq!(body_text(response).await, "anonymous");
    }

    #[tokio::test]
    async fn unavailable_session_service_is_503() {
        let app = app(MockSessionValidator::new().with_outage("identity provider down"));

        let response = app
            .oneshot(get_with(header::AUTHORIZATION, "Bearer any"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // RequireAuth
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn require_auth_extracts_user_from_extensions() {
        let mut request = HttpRequest::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(AuthenticatedUser::new(
            crate::domain::foundation::UserId::new("user-123").unwrap(),
            "test@example.com",
            None,
        ));
        let (mut parts, _) = request.into_parts();

        let RequireAuth(user) = RequireAuth::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(user.email, "test@example.com");
    }

    #[tokio::test]
    async fn require_auth_rejects_anonymous_with_401() {
        let request = HttpRequest::builder().uri("/test").body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let rejection = RequireAuth::from_request_parts(&mut parts, &()).await.unwrap_err();

        assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn blank_bearer_falls_back_to_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer ".parse().unwrap());
        headers.insert(header::COOKIE, "review_ritual_session=abc".parse().unwrap());

        assert_eq!(session_token(&headers), Some("abc".to_string()));
    }
}
