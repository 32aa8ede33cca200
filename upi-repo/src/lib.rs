//! # UPI Repository
//!
//! Concrete storage adapters for saved cards. Every adapter implements the
//! `CardStore` port from `upi-types`.

use async_trait::async_trait;
use upi_types::{CardStore, SavedCard, SavedCardId, StoreError};

pub mod json_file;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
mod types;

#[cfg(test)]
mod json_file_tests;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// Unified store wrapper over the available adapters.
pub enum Store {
    Memory(MemoryStore),
    JsonFile(JsonFileStore),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteStore),
}

/// Build a store from a location string.
///
/// - `memory` keeps cards for the life of the process
/// - `sqlite://…` or `sqlite::memory:` opens a database (needs the `sqlite` feature)
/// - anything else, optionally prefixed with `file://`, is a JSON file path
///
/// # Examples
///
/// ```ignore
/// let store = build_store("saved_cards.json").await?;
/// let store = build_store("sqlite://cards.db?mode=rwc").await?;
/// ```
pub async fn build_store(url: &str) -> anyhow::Result<Store> {
    Store::new(url).await
}

impl Store {
    pub async fn new(url: &str) -> anyhow::Result<Self> {
        if url == "memory" || url == "memory://" {
            return Ok(Store::Memory(MemoryStore::new()));
        }

        if url.starts_with("sqlite:") {
            #[cfg(feature = "sqlite")]
            return Ok(Store::Sqlite(SqliteStore::new(url).await?));
            #[cfg(not(feature = "sqlite"))]
            anyhow::bail!("{url}: SQLite support is not compiled in (enable the `sqlite` feature)");
        }

        let path = url.strip_prefix("file://").unwrap_or(url);
        if path.is_empty() {
            anyhow::bail!("Saved card store location is empty");
        }
        Ok(Store::JsonFile(JsonFileStore::new(path)))
    }

    /// Short adapter name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Store::Memory(_) => "memory",
            Store::JsonFile(_) => "json",
            #[cfg(feature = "sqlite")]
            Store::Sqlite(_) => "sqlite",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Implement CardStore for Store (delegation)
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl CardStore for Store {
    async fn list(&self) -> Result<Vec<SavedCard>, StoreError> {
        match self {
            Store::Memory(s) => s.list().await,
            Store::JsonFile(s) => s.list().await,
            #[cfg(feature = "sqlite")]
            Store::Sqlite(s) => s.list().await,
        }
    }

    async fn append(&self, card: SavedCard) -> Result<(), StoreError> {
        match self {
            Store::Memory(s) => s.append(card).await,
            Store::JsonFile(s) => s.append(card).await,
            #[cfg(feature = "sqlite")]
            Store::Sqlite(s) => s.append(card).await,
        }
    }

    async fn remove(&self, id: SavedCardId) -> Result<bool, StoreError> {
        match self {
            Store::Memory(s) => s.remove(id).await,
            Store::JsonFile(s) => s.remove(id).await,
            #[cfg(feature = "sqlite")]
            Store::Sqlite(s) => s.remove(id).await,
        }
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match self {
            Store::Memory(s) => s.clear().await,
            Store::JsonFile(s) => s.clear().await,
            #[cfg(feature = "sqlite")]
            Store::Sqlite(s) => s.clear().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_store_selects_adapter() {
        assert_eq!(build_store("memory").await.unwrap().kind(), "memory");
        assert_eq!(build_store("cards.json").await.unwrap().kind(), "json");
        assert_eq!(
            build_store("file:///tmp/cards.json").await.unwrap().kind(),
            "json"
        );
        assert!(build_store("").await.is_err());
    }

    #[tokio::test]
    async fn test_file_prefix_is_stripped() {
        match build_store("file:///tmp/cards.json").await.unwrap() {
            Store::JsonFile(s) => assert_eq!(s.path(), std::path::Path::new("/tmp/cards.json")),
            _ => panic!("expected a JSON file store"),
        }
    }
}
