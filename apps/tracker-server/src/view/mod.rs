//! Page composition.

pub mod render;

use std::collections::BTreeSet;

use entities::User;

use crate::services::roster::ActiveUser;

/// Shown when the selected user id matches no registered user.
pub const MISSING_USER_MESSAGE: &str = "Selected user does not exist";

/// Shown when nobody has registered yet.
pub const EMPTY_ROSTER_MESSAGE: &str = "No users yet, add a family member";

/// Everything the main page renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    /// Codes visited by the active user, sorted.
    pub countries: Vec<String>,
    /// Number of visited countries.
    pub total: usize,
    /// The full roster, ordered by id.
    pub users: Vec<User>,
    /// Colour of the active user, if one resolved.
    pub color: Option<String>,
    /// Id of the active user, if one resolved.
    pub active_user_id: Option<i64>,
    /// Inline error message.
    pub error: Option<String>,
}

/// View model of the new-user form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUserView {
    /// Inline error message.
    pub error: Option<String>,
}

/// Assembles the main page view model.
///
/// An unresolved active user never fails composition; it surfaces as an
/// error message unless the caller already supplied one.
pub fn compose(
    roster: Vec<User>,
    visited: BTreeSet<String>,
    active: &ActiveUser,
    error: Option<String>,
) -> ViewModel {
    let (color, active_user_id, fallback_error) = match active {
        ActiveUser::Resolved(user) => (Some(user.color.clone()), Some(user.id), None),
        ActiveUser::Missing(_) => (None, None, Some(MISSING_USER_MESSAGE)),
        ActiveUser::Empty => (None, None, Some(EMPTY_ROSTER_MESSAGE)),
    };

    let countries: Vec<String> = visited.into_iter().collect();
    ViewModel {
        total: countries.len(),
        countries,
        users: roster,
        color,
        active_user_id,
        error: error.or_else(|| fallback_error.map(str::to_string)),
    }
}
