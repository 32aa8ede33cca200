//! SQLite store adapter.
#![allow(clippy::collapsible_if)]

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use upi_types::{CardStore, SavedCard, SavedCardId, StoreError};

use crate::types::DbSavedCard;

const SCHEMA: &str = include_str!("../migrations/0001_create_saved_cards.sql");

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Store
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite store. Rows keep insertion order through an autoincrement column.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connects and creates the schema if needed.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        let in_memory = database_url.contains(":memory:");
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if !in_memory {
                if let Some(parent) = std::path::Path::new(path)
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Each in-memory connection is its own database.
        let max_connections = if in_memory { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        sqlx::query(SCHEMA).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn db_err(e: sqlx::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Store implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl CardStore for SqliteStore {
    async fn list(&self) -> Result<Vec<SavedCard>, StoreError> {
        let rows: Vec<DbSavedCard> = sqlx::query_as(
            r#"SELECT id, name, card_number, upi_id, bank, saved_at FROM saved_cards ORDER BY position"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(DbSavedCard::into_domain).collect()
    }

    async fn append(&self, card: SavedCard) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO saved_cards (id, name, card_number, upi_id, bank, saved_at) VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(card.id.to_string())
        .bind(&card.name)
        .bind(card.card_number.as_str())
        .bind(card.upi_id.as_str())
        .bind(card.bank.code())
        .bind(card.saved_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn remove(&self, id: SavedCardId) -> Result<bool, StoreError> {
        let result = sqlx::query(r#"DELETE FROM saved_cards WHERE id = ?"#)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query(r#"DELETE FROM saved_cards"#)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(())
    }
}
