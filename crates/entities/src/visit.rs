//! Visited-mark entity definitions.

use serde::{Deserialize, Serialize};

/// Association between a user and a country they have visited.
///
/// At most one mark exists per `(user_id, country_code)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisitedMark {
    /// Owning user.
    pub user_id: i64,
    /// Catalog code of the visited country.
    pub country_code: String,
}

impl VisitedMark {
    /// Creates a new visited mark.
    pub fn new(user_id: i64, country_code: impl Into<String>) -> Self {
        Self {
            user_id,
            country_code: country_code.into(),
        }
    }
}
