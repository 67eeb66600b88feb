//! User selection and registration endpoints.

use std::sync::Arc;

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use serde::Deserialize;
use visit_store::VisitStore;

use super::{ACTIVE_USER_COOKIE, page::render_main, selection_from};
use crate::error::{ServerError, ServerResult};
use crate::services::{TrackerError, roster, users};
use crate::state::AppState;
use crate::view::{NewUserView, render};

/// Form body of `POST /user`.
#[derive(Debug, Deserialize)]
pub struct SwitchUserForm {
    /// Present when the "add family member" tab was pressed.
    pub add: Option<String>,
    /// Candidate user id.
    pub user: Option<String>,
}

/// Form body of `POST /new`.
#[derive(Debug, Deserialize)]
pub struct NewUserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// Switches the active user, or shows the new-user form.
pub async fn switch_user<S: VisitStore>(
    State(state): State<Arc<AppState<S>>>,
    jar: CookieJar,
    Form(form): Form<SwitchUserForm>,
) -> ServerResult<Response> {
    if form.add.is_some() {
        return Ok(Html(render::render_new_user(&NewUserView::default())).into_response());
    }

    let candidate = form
        .user
        .ok_or_else(|| ServerError::InvalidRequest("Expected `add` or `user`".to_string()))?;

    let selected = match candidate.trim().parse::<i64>() {
        Ok(id) => roster::select_user(&state.store, id).await,
        Err(_) => Err(TrackerError::not_found("User does not exist")),
    };

    match selected {
        Ok(user) => {
            let cookie = Cookie::build((ACTIVE_USER_COOKIE, user.id.to_string()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax);
            Ok((jar.add(cookie), Redirect::to("/")).into_response())
        }
        Err(err) => Ok(render_main(&state, selection_from(&jar), Some(err.to_string()))
            .await
            .into_response()),
    }
}

/// Registers a new user.
pub async fn create_user<S: VisitStore>(
    State(state): State<Arc<AppState<S>>>,
    Form(form): Form<NewUserForm>,
) -> Response {
    match users::create_user(&state.store, &form.name, &form.color).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(err) => Html(render::render_new_user(&NewUserView {
            error: Some(err.to_string()),
        }))
        .into_response(),
    }
}
