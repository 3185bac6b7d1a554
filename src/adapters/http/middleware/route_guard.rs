//! Route guard: the public allow-list and login redirects.
//!
//! Runs after `auth_middleware`, so a resolved session is already in the
//! request extensions.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::domain::foundation::AuthenticatedUser;

/// Paths reachable without a session, and where anonymous requests go.
#[derive(Debug, Clone)]
pub struct GuardState {
    login_path: String,
    public_paths: Arc<[String]>,
}

impl GuardState {
    /// The login path is always public.
    pub fn new(login_path: impl Into<String>, public_paths: impl IntoIterator<Item = String>) -> Self {
        let login_path = login_path.into();
        let mut paths: Vec<String> = public_paths.into_iter().collect();
        if !paths.contains(&login_path) {
            paths.push(login_path.clone());
        }
        Self {
            login_path,
            public_paths: paths.into(),
        }
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| p == path)
    }

    /// `/login?next=<percent-encoded path and query>`.
    pub fn login_redirect(&self, path_and_query: &str) -> String {
        format!(
            "{}?next={}",
            self.login_path,
            urlencoding::encode(path_and_query)
        )
    }
}

/// Anonymous request to a protected path: 303 to the login page with a
/// return path. Signed-in request to the login page: 303 to `/`.
pub async fn route_guard(State(guard): State<GuardState>, request: Request, next: Next) -> Response {
    let path = request.uri().path();
    let signed_in = request.extensions().get::<AuthenticatedUser>().is_some();

    if signed_in && path == guard.login_path {
        return Redirect::to("/").into_response();
    }

    if !signed_in && !guard.is_public(path) {
        let target = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or(path);
        tracing::debug!(path, "redirecting anonymous request to login");
        return Redirect::to(&guard.login_redirect(target)).into_response();
    }

    next.run(request).await
}
