//! Visit store error types.

use thiserror::Error;

/// Uniqueness constraints the store reports symbolically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// `users.name` must be unique.
    UniqueUserName,
    /// A user may mark a country at most once.
    UniqueVisit,
    /// Any other constraint, carrying the driver's name or message.
    Other(String),
}

impl Constraint {
    /// Classifies a driver-reported unique violation.
    ///
    /// PostgreSQL reports the constraint name (`users_name_key`); SQLite only
    /// reports a message such as `UNIQUE constraint failed: users.name`, so
    /// both are inspected.
    pub fn classify(constraint: Option<&str>, message: &str) -> Self {
        let haystack = constraint.unwrap_or(message);
        if haystack.contains("users_name") || haystack.contains("users.name") {
            Self::UniqueUserName
        } else if haystack.contains("visited_countries") {
            Self::UniqueVisit
        } else {
            Self::Other(haystack.to_string())
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UniqueUserName => f.write_str("unique user name"),
            Self::UniqueVisit => f.write_str("unique visited country"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Errors that can occur during visit store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A uniqueness constraint rejected the write.
    #[error("Constraint violation: {constraint}")]
    ConstraintViolation { constraint: Constraint },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// Creates a not found error.
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a constraint violation error.
    pub fn violation(constraint: Constraint) -> Self {
        Self::ConstraintViolation { constraint }
    }

    /// Returns the violated constraint, if this is a constraint violation.
    pub fn constraint(&self) -> Option<&Constraint> {
        match self {
            Self::ConstraintViolation { constraint } => Some(constraint),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::violation(Constraint::classify(
                    db_err.constraint(),
                    db_err.message(),
                ));
            }
        }
        Self::Database(err)
    }
}

/// Result type for visit store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_postgres_constraint_names() {
        assert_eq!(
            Constraint::classify(Some("users_name_key"), "duplicate key value"),
            Constraint::UniqueUserName
        );
        assert_eq!(
            Constraint::classify(Some("visited_countries_user_country_key"), "duplicate key value"),
            Constraint::UniqueVisit
        );
    }

    #[test]
    fn test_classify_sqlite_messages() {
        assert_eq!(
            Constraint::classify(None, "UNIQUE constraint failed: users.name"),
            Constraint::UniqueUserName
        );
        assert_eq!(
            Constraint::classify(
                None,
                "UNIQUE constraint failed: visited_countries.user_id, visited_countries.country_code"
            ),
            Constraint::UniqueVisit
        );
    }

    #[test]
    fn test_classify_unknown_constraint() {
        assert_eq!(
            Constraint::classify(Some("countries_pkey"), "duplicate key value"),
            Constraint::Other("countries_pkey".to_string())
        );
    }

    #[test]
    fn test_non_database_error_is_not_a_violation() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(err.constraint().is_none());
        assert!(matches!(err, StoreError::Database(_)));
    }
}
