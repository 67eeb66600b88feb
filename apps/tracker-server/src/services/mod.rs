//! Request-independent tracker logic.
//!
//! Each function here is one controller or resolver of the tracker. They
//! take the store by reference and return [`TrackerError`] for failures the
//! page shows inline.

pub mod roster;
pub mod users;
pub mod visits;

use visit_store::StoreError;

/// Failures attached to the re-rendered page.
///
/// `Display` is the user-facing message.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Required input missing or empty.
    #[error("{0}")]
    Validation(String),

    /// Lookup miss for a user or country.
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness constraint rejected the write.
    #[error("{0}")]
    Duplicate(String),

    /// Any other store failure, shown with its raw message.
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl TrackerError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Creates a duplicate error.
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate(message.into())
    }
}

/// Result type alias for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;
