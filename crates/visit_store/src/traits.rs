//! Visit store trait definitions.

use std::collections::BTreeSet;

use async_trait::async_trait;
use entities::{Country, NewUser, User};

use crate::StoreResult;

/// Trait for roster, catalog and visited-country storage.
#[async_trait]
pub trait VisitStore: Send + Sync {
    // =========================================================================
    // User operations
    // =========================================================================

    /// Lists all users ordered by id ascending.
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// Gets a user by ID.
    async fn get_user(&self, id: i64) -> StoreResult<Option<User>>;

    /// Creates a new user.
    ///
    /// Fails with a [`Constraint::UniqueUserName`](crate::Constraint) violation
    /// when the name is taken.
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;

    // =========================================================================
    // Catalog operations
    // =========================================================================

    /// Finds catalog countries whose lower-cased name contains `fragment`,
    /// ordered by code ascending.
    ///
    /// `fragment` must already be lower-cased.
    async fn search_countries(&self, fragment: &str) -> StoreResult<Vec<Country>>;

    /// Inserts catalog rows that are not present yet.
    ///
    /// Returns the number of rows inserted.
    async fn seed_countries(&self, countries: &[Country]) -> StoreResult<usize>;

    // =========================================================================
    // Visit operations
    // =========================================================================

    /// Lists the country codes visited by a user.
    async fn list_visited(&self, user_id: i64) -> StoreResult<BTreeSet<String>>;

    /// Marks a country as visited by a user.
    ///
    /// Fails with a [`Constraint::UniqueVisit`](crate::Constraint) violation
    /// when the pair already exists.
    async fn add_visit(&self, user_id: i64, country_code: &str) -> StoreResult<()>;
}
