//! PostgreSQL visit store implementation.

use std::collections::BTreeSet;

use async_trait::async_trait;
use entities::{Country, NewUser, User};
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};

use crate::sqlite::{CountryRow, UserRow};
use crate::{RetryPolicy, StoreResult, VisitStore};

/// PostgreSQL-backed visit store.
///
/// Constraint names in the schema are the ones
/// [`Constraint::classify`](crate::Constraint::classify) recognises.
#[derive(Debug, Clone)]
pub struct PostgresVisitStore {
    pool: Pool<Postgres>,
}

impl PostgresVisitStore {
    /// Connects to `url`, retrying per `retry`, and creates the schema.
    pub async fn connect(url: &str, retry: RetryPolicy) -> StoreResult<Self> {
        let pool = retry
            .run(|| PgPoolOptions::new().max_connections(10).connect(url))
            .await?;

        let store = Self { pool };
        store.init().await?;
        Ok(store)
    }

    /// Initializes the database tables.
    async fn init(&self) -> StoreResult<()> {
        sqlx::raw_sql(SCHEMA_SQL).execute(&self.pool).await?;
        tracing::debug!("PostgreSQL schema ready");
        Ok(())
    }
}

#[async_trait]
impl VisitStore for PostgresVisitStore {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as("SELECT id, name, color FROM users ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_user(&self, id: i64) -> StoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as("SELECT id, name, color FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(User::from))
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let id: i64 =
            sqlx::query_scalar("INSERT INTO users (name, color) VALUES ($1, $2) RETURNING id")
                .bind(&user.name)
                .bind(&user.color)
                .fetch_one(&self.pool)
                .await?;

        Ok(user.into_user(id))
    }

    async fn search_countries(&self, fragment: &str) -> StoreResult<Vec<Country>> {
        let rows: Vec<CountryRow> = sqlx::query_as(
            "SELECT code, name FROM countries
             WHERE strpos(lower(name), $1) > 0
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
            let result = sqlx::query(
                "INSERT INTO countries (code, name) VALUES ($1, $2)
                 ON CONFLICT (code) DO NOTHING",
            )
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
             WHERE u.id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(code,)| code).collect())
    }

    async fn add_visit(&self, user_id: i64, country_code: &str) -> StoreResult<()> {
        sqlx::query("INSERT INTO visited_countries (user_id, country_code) VALUES ($1, $2)")
            .bind(user_id)
            .bind(country_code)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    name VARCHAR(50) NOT NULL,
    color VARCHAR(30) NOT NULL,
    CONSTRAINT users_name_key UNIQUE (name)
);

CREATE TABLE IF NOT EXISTS countries (
    code VARCHAR(3) PRIMARY KEY,
    name VARCHAR(100) NOT NULL
);

CREATE TABLE IF NOT EXISTS visited_countries (
    id BIGSERIAL PRIMARY KEY,
    user_id BIGINT NOT NULL REFERENCES users(id),
    country_code VARCHAR(3) NOT NULL REFERENCES countries(code),
    CONSTRAINT visited_countries_user_country_key UNIQUE (user_id, country_code)
);
"#;

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use tokio_test::assert_err;

    use super::*;
    use crate::{Constraint, catalog};

    /// Connects to the server named by a postgres `DATABASE_URL`, if any.
    async fn connect_from_env() -> Option<PostgresVisitStore> {
        let url = std::env::var("DATABASE_URL").ok()?;
        if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
            return None;
        }
        let store = PostgresVisitStore::connect(&url, RetryPolicy::once())
            .await
            .unwrap();
        store.seed_countries(&catalog::countries()).await.unwrap();
        Some(store)
    }

    /// Tables outlive the test, so names must not repeat across runs.
    fn unique_name(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        format!("{prefix}-{}-{nanos}", std::process::id())
    }

    #[tokio::test]
    async fn test_postgres_store_roundtrip() {
        let Some(store) = connect_from_env().await else {
            return;
        };

        let name = unique_name("angela");
        let user = store.create_user(NewUser::new(&name, "teal")).await.unwrap();
        assert_eq!(store.get_user(user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(store.list_users().await.unwrap().last(), Some(&user));

        let err = assert_err!(store.create_user(NewUser::new(&name, "gold")).await);
        assert_eq!(err.constraint(), Some(&Constraint::UniqueUserName));

        let found = store.search_countries("samoa").await.unwrap();
        let codes: Vec<_> = found.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["ASM", "WSM"]);
        assert!(store.search_countries("%").await.unwrap().is_empty());

        assert_eq!(
            store
                .seed_countries(&[Country::new("FRA", "France")])
                .await
                .unwrap(),
            0
        );

        assert!(store.list_visited(user.id).await.unwrap().is_empty());
        store.add_visit(user.id, "FRA").await.unwrap();
        let err = assert_err!(store.add_visit(user.id, "FRA").await);
        assert_eq!(err.constraint(), Some(&Constraint::UniqueVisit));
        assert_eq!(
            store.list_visited(user.id).await.unwrap(),
            BTreeSet::from(["FRA".to_string()])
        );
    }
}
