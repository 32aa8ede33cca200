//! Saved card storage port.
//!
//! Adapters (in-memory, JSON file, SQLite) implement this trait. The store
//! is a best-effort mirror: callers keep their own list authoritative and
//! only commit to it after a write succeeds.

use crate::domain::{SavedCard, SavedCardId};
use crate::error::StoreError;

/// Ordered list of saved cards, addressable by id.
#[async_trait::async_trait]
pub trait CardStore: Send + Sync + 'static {
    /// All saved cards in insertion order. Unreadable data is an empty list.
    async fn list(&self) -> Result<Vec<SavedCard>, StoreError>;

    /// Appends a card at the end of the list.
    async fn append(&self, card: SavedCard) -> Result<(), StoreError>;

    /// Removes a card. Returns `false` if no card had that id.
    async fn remove(&self, id: SavedCardId) -> Result<bool, StoreError>;

    /// Removes every card.
    async fn clear(&self) -> Result<(), StoreError>;
}
