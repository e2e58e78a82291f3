//! SQLite-backed person store.
//!
//! # Responsibilities
//! - Open the connection pool and create the `persons` table if missing
//! - Map rows to `PersonRecord`
//! - Translate the `UNIQUE(name)` violation into `StoreError::Duplicate`
//!
//! # Design Decisions
//! - Runtime-checked queries (`sqlx::query`), no compile-time database
//! - Row order follows `rowid`, i.e. insertion order
//! - In-memory databases use a single pinned connection, otherwise every
//!   pooled connection would see its own empty database

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;

use crate::model::{NewPerson, PersonId, PersonRecord};
use crate::store::{PersonStore, StoreError, StoreResult};

const MAX_CONNECTIONS: u32 = 5;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS persons (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL UNIQUE,
        number TEXT NOT NULL,
        version INTEGER NOT NULL DEFAULT 0
    )"#;

/// Person store on top of a SQLite connection pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to `url` (e.g. `sqlite://phonebook.db` or `sqlite::memory:`).
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool_options = if is_in_memory(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
        };

        let pool = pool_options.connect_with(options).await?;
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, creating the table if needed.
    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

fn record_from_row(row: &SqliteRow) -> StoreResult<PersonRecord> {
    let raw_id: String = row.try_get("id")?;
    let id = PersonId::parse(&raw_id).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    let version: i64 = row.try_get("version")?;

    Ok(PersonRecord {
        id,
        name: row.try_get("name")?,
        number: row.try_get("number")?,
        version,
    })
}

fn classify_write_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            let field = if db.message().contains("persons.name") { "name" } else { "id" };
            StoreError::Duplicate { field }
        }
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl PersonStore for SqliteStore {
    async fn find_all(&self) -> StoreResult<Vec<PersonRecord>> {
        let rows = sqlx::query("SELECT id, name, number, version FROM persons ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(record_from_row).collect()
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<PersonRecord>> {
        let id = PersonId::parse(id)?;
        let row = sqlx::query("SELECT id, name, number, version FROM persons WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(record_from_row).transpose()
    }

    async fn insert(&self, person: NewPerson) -> StoreResult<PersonRecord> {
        let record = PersonRecord::create(PersonId::generate(), person);
        sqlx::query("INSERT INTO persons (id, name, number, version) VALUES (?, ?, ?, ?)")
            .bind(record.id.to_string())
            .bind(&record.name)
            .bind(&record.number)
            .bind(record.version)
            .execute(&self.pool)
            .await
            .map_err(classify_write_error)?;
        Ok(record)
    }

    async fn update_by_id(&self, id: &str, person: NewPerson) -> StoreResult<Option<PersonRecord>> {
        let id = PersonId::parse(id)?;
        let row = sqlx::query(
            "UPDATE persons SET name = ?, number = ?, version = version + 1 \
             WHERE id = ? RETURNING id, name, number, version",
        )
        .bind(person.name())
        .bind(person.number())
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(classify_write_error)?;
        row.as_ref().map(record_from_row).transpose()
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<Option<PersonRecord>> {
        let id = PersonId::parse(id)?;
        let row = sqlx::query("DELETE FROM persons WHERE id = ? RETURNING id, name, number, version")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(record_from_row).transpose()
    }

    async fn count(&self) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM persons")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }
}
