//! Main page endpoints.

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use visit_store::VisitStore;

use super::selection_from;
use crate::services::{
    roster::{self, ActiveUser},
    visits,
};
use crate::state::AppState;
use crate::view::{self, render};

/// Form body of `POST /add`.
#[derive(Debug, Deserialize)]
pub struct AddCountryForm {
    #[serde(default)]
    pub country: String,
}

/// Loads everything the main page needs and renders it.
///
/// Store failures degrade to an empty section plus an inline error; the
/// page itself always renders.
pub(crate) async fn render_main<S: VisitStore>(
    state: &AppState<S>,
    selection: Option<i64>,
    error: Option<String>,
) -> Html<String> {
    let roster = match roster::load_roster(&state.store).await {
        Ok(roster) => roster,
        Err(err) => {
            tracing::error!(error = %err, "Failed to load roster");
            let view = view::compose(
                Vec::new(),
                BTreeSet::new(),
                &ActiveUser::Empty,
                Some(err.to_string()),
            );
            return Html(render::render_index(&view));
        }
    };

    let active = roster::resolve_active(&roster, selection);
    let (visited, error) = match active.user() {
        Some(user) => match visits::load_visited(&state.store, user.id).await {
            Ok(visited) => (visited, error),
            Err(err) => {
                tracing::error!(
                    user_id = user.id,
                    error = %err,
                    "Failed to load visited countries"
                );
                (BTreeSet::new(), error.or_else(|| Some(err.to_string())))
            }
        },
        None => {
            if let ActiveUser::Missing(id) = &active {
                tracing::warn!(user_id = *id, "Selected user does not exist");
            }
            (BTreeSet::new(), error)
        }
    };

    let view = view::compose(roster, visited, &active, error);
    Html(render::render_index(&view))
}

/// Renders the main view for the client's selection.
pub async fn index<S: VisitStore>(
    State(state): State<Arc<AppState<S>>>,
    jar: CookieJar,
) -> Html<String> {
    render_main(&state, selection_from(&jar), None).await
}

/// Marks a country as visited by the active user.
pub async fn add_country<S: VisitStore>(
    State(state): State<Arc<AppState<S>>>,
    jar: CookieJar,
    Form(form): Form<AddCountryForm>,
) -> Response {
    let selection = selection_from(&jar);

    let roster = match roster::load_roster(&state.store).await {
        Ok(roster) => roster,
        Err(err) => {
            return render_main(&state, selection, Some(err.to_string()))
                .await
                .into_response();
        }
    };

    // Without a resolved user the page already carries the reason.
    let Some(user) = roster::resolve_active(&roster, selection).user().cloned() else {
        return render_main(&state, selection, None).await.into_response();
    };

    match visits::add_country(&state.store, user.id, &form.country).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(err) => render_main(&state, selection, Some(err.to_string()))
            .await
            .into_response(),
    }
}
