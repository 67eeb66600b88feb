//! User-creation controller.

use entities::{NewUser, User};
use visit_store::{Constraint, StoreError, VisitStore};

use super::{TrackerError, TrackerResult};

/// Validates and inserts a new user.
///
/// The new user is not made active.
pub async fn create_user<S: VisitStore + ?Sized>(
    store: &S,
    name: &str,
    color: &str,
) -> TrackerResult<User> {
    let (name, color) = (name.trim(), color.trim());
    if name.is_empty() || color.is_empty() {
        return Err(TrackerError::validation(
            "Please enter your name and select your color",
        ));
    }

    match store.create_user(NewUser::new(name, color)).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, name = %user.name, "User created");
            Ok(user)
        }
        Err(StoreError::ConstraintViolation {
            constraint: Constraint::UniqueUserName,
        }) => Err(TrackerError::duplicate("Username already exists")),
        Err(err) => {
            tracing::warn!(name, error = %err, "Failed to create user");
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::assert_err;
    use visit_store::MemoryVisitStore;

    use super::*;
    use crate::services::roster::load_roster;

    #[tokio::test]
    async fn test_created_users_append_to_roster() {
        let store = MemoryVisitStore::new();
        let angela = create_user(&store, "Angela", "teal").await.unwrap();
        let jack = create_user(&store, "Jack", "powderblue").await.unwrap();

        let roster = load_roster(&store).await.unwrap();
        assert_eq!(roster, vec![angela, jack.clone()]);
        assert_eq!(roster.last(), Some(&jack));
    }

    #[tokio::test]
    async fn test_missing_fields_fail_validation() {
        let store = MemoryVisitStore::new();

        for (name, color) in [("", "teal"), ("Angela", ""), ("  ", "  ")] {
            let err = assert_err!(create_user(&store, name, color).await);
            assert!(matches!(err, TrackerError::Validation(_)));
            assert_eq!(
                err.to_string(),
                "Please enter your name and select your color"
            );
        }
        assert!(load_roster(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_name_regardless_of_color() {
        let store = MemoryVisitStore::new();
        create_user(&store, "Angela", "teal").await.unwrap();

        for color in ["teal", "gold"] {
            let err = assert_err!(create_user(&store, "Angela", color).await);
            assert!(matches!(err, TrackerError::Duplicate(_)));
            assert_eq!(err.to_string(), "Username already exists");
        }
        assert_eq!(load_roster(&store).await.unwrap().len(), 1);
    }
}
