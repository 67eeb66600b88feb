//! HTTP endpoints.

pub mod page;
pub mod user;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use visit_store::VisitStore;

use crate::state::AppState;

/// Cookie carrying the client's selected user id.
pub const ACTIVE_USER_COOKIE: &str = "active_user";

/// Reads the client's selection; an unparseable cookie counts as none.
pub(crate) fn selection_from(jar: &CookieJar) -> Option<i64> {
    jar.get(ACTIVE_USER_COOKIE)
        .and_then(|cookie| cookie.value().parse().ok())
}

/// Creates the router with all endpoints.
pub fn create_router<S: VisitStore + 'static>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/", get(page::index))
        .route("/add", post(page::add_country))
        .route("/user", post(user::switch_user))
        .route("/new", post(user::create_user))
        // Health check
        .route("/health", get(health_check))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
