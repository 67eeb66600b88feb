//! In-memory visit store implementation for testing.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use async_trait::async_trait;
use entities::{Country, NewUser, User, VisitedMark};
use tokio::sync::RwLock;

use crate::{Constraint, StoreError, StoreResult, VisitStore};

#[derive(Debug, Default)]
struct Users {
    next_id: i64,
    by_id: BTreeMap<i64, User>,
}

/// In-memory visit store.
///
/// Enforces the same uniqueness constraints as the SQL schemas so callers
/// observe identical failures.
#[derive(Debug, Default)]
pub struct MemoryVisitStore {
    users: RwLock<Users>,
    countries: RwLock<BTreeMap<String, Country>>,
    visits: RwLock<HashSet<VisitedMark>>,
}

impl MemoryVisitStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VisitStore for MemoryVisitStore {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.by_id.values().cloned().collect())
    }

    async fn get_user(&self, id: i64) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.by_id.get(&id).cloned())
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.by_id.values().any(|u| u.name == user.name) {
            return Err(StoreError::violation(Constraint::UniqueUserName));
        }
        users.next_id += 1;
        let user = user.into_user(users.next_id);
        users.by_id.insert(user.id, user.clone());
        Ok(user)
    }

    async fn search_countries(&self, fragment: &str) -> StoreResult<Vec<Country>> {
        let countries = self.countries.read().await;
        // BTreeMap iteration keeps the code ordering.
        Ok(countries
            .values()
            .filter(|c| c.name_contains(fragment))
            .cloned()
            .collect())
    }

    async fn seed_countries(&self, seed: &[Country]) -> StoreResult<usize> {
        let mut countries = self.countries.write().await;
        let before = countries.len();
        for country in seed {
            countries
                .entry(country.code.clone())
                .or_insert_with(|| country.clone());
        }
        Ok(countries.len() - before)
    }

    async fn list_visited(&self, user_id: i64) -> StoreResult<BTreeSet<String>> {
        let visits = self.visits.read().await;
        Ok(visits
            .iter()
            .filter(|v| v.user_id == user_id)
            .map(|v| v.country_code.clone())
            .collect())
    }

    async fn add_visit(&self, user_id: i64, country_code: &str) -> StoreResult<()> {
        if !self.users.read().await.by_id.contains_key(&user_id) {
            return Err(StoreError::not_found("User", user_id.to_string()));
        }
        if !self.countries.read().await.contains_key(country_code) {
            return Err(StoreError::not_found("Country", country_code));
        }

        let mut visits = self.visits.write().await;
        if !visits.insert(VisitedMark::new(user_id, country_code)) {
            return Err(StoreError::violation(Constraint::UniqueVisit));
        }
        Ok(())
    }
}
