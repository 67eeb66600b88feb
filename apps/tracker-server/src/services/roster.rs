//! Roster resolution and user selection.

use entities::User;
use visit_store::VisitStore;

use super::{TrackerError, TrackerResult};

/// Outcome of resolving the selected user against the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveUser {
    /// The selection names a registered user.
    Resolved(User),
    /// The selection names an id no user has.
    Missing(i64),
    /// No users are registered yet.
    Empty,
}

impl ActiveUser {
    /// Returns the resolved user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Resolved(user) => Some(user),
            _ => None,
        }
    }
}

/// Loads all registered users, ordered by id ascending.
///
/// A store failure fails the whole load; no partial roster is returned.
pub async fn load_roster<S: VisitStore + ?Sized>(store: &S) -> TrackerResult<Vec<User>> {
    Ok(store.list_users().await?)
}

/// Resolves the active user from a roster and an optional selection.
///
/// Without a selection the first user of the roster is active.
pub fn resolve_active(roster: &[User], selection: Option<i64>) -> ActiveUser {
    match selection {
        Some(id) => roster
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .map_or(ActiveUser::Missing(id), ActiveUser::Resolved),
        None => roster
            .first()
            .cloned()
            .map_or(ActiveUser::Empty, ActiveUser::Resolved),
    }
}

/// Validates a candidate selection against the roster.
///
/// The caller persists the returned user's id as the client's selection.
pub async fn select_user<S: VisitStore + ?Sized>(
    store: &S,
    candidate_id: i64,
) -> TrackerResult<User> {
    let user = store
        .get_user(candidate_id)
        .await?
        .ok_or_else(|| TrackerError::not_found("User does not exist"))?;

    tracing::debug!(user_id = user.id, "User selected");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use entities::NewUser;
    use tokio_test::assert_err;
    use visit_store::MemoryVisitStore;

    use super::*;

    fn user(id: i64, name: &str) -> User {
        NewUser::new(name, "teal").into_user(id)
    }

    #[test]
    fn test_resolve_defaults_to_first_user() {
        let roster = vec![user(1, "Angela"), user(2, "Jack")];
        assert_eq!(
            resolve_active(&roster, None),
            ActiveUser::Resolved(user(1, "Angela"))
        );
    }

    #[test]
    fn test_resolve_selected_user() {
        let roster = vec![user(1, "Angela"), user(2, "Jack")];
        let active = resolve_active(&roster, Some(2));
        assert_eq!(active.user().map(|u| u.name.as_str()), Some("Jack"));
    }

    #[test]
    fn test_resolve_unknown_selection_is_missing() {
        let roster = vec![user(1, "Angela")];
        assert_eq!(resolve_active(&roster, Some(9999)), ActiveUser::Missing(9999));
        assert!(resolve_active(&roster, Some(9999)).user().is_none());
    }

    #[test]
    fn test_resolve_empty_roster() {
        assert_eq!(resolve_active(&[], None), ActiveUser::Empty);
    }

    #[tokio::test]
    async fn test_select_user_validates_existence() {
        let store = MemoryVisitStore::new();
        let angela = store.create_user(NewUser::new("Angela", "teal")).await.unwrap();

        let selected = select_user(&store, angela.id).await.unwrap();
        assert_eq!(selected, angela);

        let err = assert_err!(select_user(&store, 9999).await);
        assert!(matches!(err, TrackerError::NotFound(_)));
        assert_eq!(err.to_string(), "User does not exist");
    }

    #[tokio::test]
    async fn test_load_roster_is_idempotent() {
        let store = MemoryVisitStore::new();
        store.create_user(NewUser::new("Angela", "teal")).await.unwrap();
        store.create_user(NewUser::new("Jack", "gold")).await.unwrap();

        let first = load_roster(&store).await.unwrap();
        let second = load_roster(&store).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
