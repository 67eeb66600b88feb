//! SQLite visit store implementation.

use std::collections::BTreeSet;

use async_trait::async_trait;
use entities::{Country, NewUser, User};
use sqlx::{FromRow, Pool, Sqlite, sqlite::SqlitePoolOptions};

use crate::{RetryPolicy, StoreResult, VisitStore};

/// Database row for User.
#[derive(Debug, FromRow)]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub color: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            color: row.color,
        }
    }
}

/// Database row for Country.
#[derive(Debug, FromRow)]
pub(crate) struct CountryRow {
    pub code: String,
    pub name: String,
}

impl From<CountryRow> for Country {
    fn from(row: CountryRow) -> Self {
        Country::new(row.code, row.name)
    }
}

/// SQLite-backed visit store.
#[derive(Debug, Clone)]
pub struct SqliteVisitStore {
    pool: Pool<Sqlite>,
}

impl SqliteVisitStore {
    /// Connects to `url`, retrying per `retry`, and creates the schema.
    pub async fn connect(url: &str, retry: RetryPolicy) -> StoreResult<Self> {
        // Each connection to `:memory:` is its own database.
        let max_connections = if url.contains(":memory:") { 1 } else { 5 };

        let pool = retry
            .run(|| {
                SqlitePoolOptions::new()
                    .max_connections(max_connections)
                    .connect(url)
            })
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        tracing::debug!("SQLite schema ready");
        Ok(())
    }
}

#[async_trait]
impl VisitStore for SqliteVisitStore {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as("SELECT id, name, color FROM users ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_user(&self, id: i64) -> StoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as("SELECT id, name, color FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(User::from))
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let id: i64 = sqlx::query_scalar("INSERT INTO users (name, color) VALUES (?, ?) RETURNING id")
            .bind(&user.name)
            .bind(&user.color)
            .fetch_one(&self.pool)
            .await?;

        Ok(user.into_user(id))
    }

    async fn search_countries(&self, fragment: &str) -> StoreResult<Vec<Country>> {
        // instr() instead of LIKE keeps `%` and `_` in the input literal.
        let rows: Vec<CountryRow> = sqlx::query_as(
            "SELECT code, name FROM countries
             WHERE instr(lower(name), ?) > 0
             ORDER BY code ASC",
        )
        .bind(fragment)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Country::from).collect())
    }

    async fn seed_countries(&self, countries: &[Country]) -> StoreResult<usize> {
        let mut inserted = 0;
        for country in countries {
            let result = sqlx::query("INSERT OR IGNORE INTO countries (code, name) VALUES (?, ?)")
                .bind(&country.code)
                .bind(&country.name)
                .execute(&self.pool)
                .await?;
            inserted += result.rows_affected() as usize;
        }
        Ok(inserted)
    }

    async fn list_visited(&self, user_id: i64) -> StoreResult<BTreeSet<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT vc.country_code FROM visited_countries vc
             JOIN users u ON u.id = vc.user_id
             WHERE u.id = ?",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(code,)| code).collect())
    }

    async fn add_visit(&self, user_id: i64, country_code: &str) -> StoreResult<()> {
        sqlx::query("INSERT INTO visited_countries (user_id, country_code) VALUES (?, ?)")
            .bind(user_id)
            .bind(country_code)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// SQL schema definition
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    color TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS countries (
    code TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS visited_countries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    country_code TEXT NOT NULL REFERENCES countries(code),
    UNIQUE (user_id, country_code)
);

CREATE INDEX IF NOT EXISTS idx_visited_countries_user ON visited_countries(user_id);
"#;

#[cfg(test)]
mod tests {
    use tokio_test::assert_err;

    use super::*;
    use crate::{Constraint, StoreError};

    async fn memory_store() -> SqliteVisitStore {
        let store = SqliteVisitStore::connect("sqlite::memory:", RetryPolicy::once())
            .await
            .unwrap();
        store
            .seed_countries(&[
                Country::new("FRA", "France"),
                Country::new("GUF", "French Guiana"),
                Country::new("ESP", "Spain"),
            ])
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_user_roundtrip_and_ordering() {
        let store = memory_store().await;

        let angela = store.create_user(NewUser::new("Angela", "teal")).await.unwrap();
        let jack = store.create_user(NewUser::new("Jack", "powderblue")).await.unwrap();

        let users = store.list_users().await.unwrap();
        assert_eq!(users, vec![angela.clone(), jack]);
        assert_eq!(store.get_user(angela.id).await.unwrap(), Some(angela));
        assert!(store.get_user(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_user_name_maps_to_constraint() {
        let store = memory_store().await;
        store.create_user(NewUser::new("Angela", "teal")).await.unwrap();

        let err = assert_err!(store.create_user(NewUser::new("Angela", "gold")).await);
        assert_eq!(err.constraint(), Some(&Constraint::UniqueUserName));
    }

    #[tokio::test]
    async fn test_search_countries_case_insensitive_substring() {
        let store = memory_store().await;

        let found = store.search_countries("fr").await.unwrap();
        let codes: Vec<_> = found.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["FRA", "GUF"]);

        // Wildcard characters are matched literally.
        assert!(store.search_countries("%").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seed_countries_ignores_existing_rows() {
        let store = memory_store().await;
        let inserted = store
            .seed_countries(&[Country::new("FRA", "France"), Country::new("ITA", "Italy")])
            .await
            .unwrap();
        assert_eq!(inserted, 1);
    }

    #[tokio::test]
    async fn test_duplicate_visit_maps_to_constraint() {
        let store = memory_store().await;
        let angela = store.create_user(NewUser::new("Angela", "teal")).await.unwrap();

        assert!(store.list_visited(angela.id).await.unwrap().is_empty());
        store.add_visit(angela.id, "FRA").await.unwrap();

        let err = assert_err!(store.add_visit(angela.id, "FRA").await);
        assert!(matches!(
            err,
            StoreError::ConstraintViolation {
                constraint: Constraint::UniqueVisit
            }
        ));

        let visited = store.list_visited(angela.id).await.unwrap();
        assert_eq!(visited, BTreeSet::from(["FRA".to_string()]));
    }
}
