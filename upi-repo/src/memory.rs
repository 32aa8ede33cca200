//! In-memory store. Nothing survives the process.

use async_trait::async_trait;
use tokio::sync::RwLock;

use upi_types::{CardStore, SavedCard, SavedCardId, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    cards: RwLock<Vec<SavedCard>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CardStore for MemoryStore {
    async fn list(&self) -> Result<Vec<SavedCard>, StoreError> {
        Ok(self.cards.read().await.clone())
    }

    async fn append(&self, card: SavedCard) -> Result<(), StoreError> {
        self.cards.write().await.push(card);
        Ok(())
    }

    async fn remove(&self, id: SavedCardId) -> Result<bool, StoreError> {
        let mut cards = self.cards.write().await;
        let before = cards.len();
        cards.retain(|c| c.id != id);
        Ok(cards.len() != before)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.cards.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use upi_types::{Bank, CardNumber, UpiId};

    fn card(name: &str) -> SavedCard {
        SavedCard::new(
            name,
            CardNumber::from_trusted("4111111111111111"),
            UpiId::new("ccpay.98765432101111@icici"),
            Bank::Icici,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_keeps_insertion_order() {
        let store = MemoryStore::new();
        store.append(card("First")).await.unwrap();
        store.append(card("Second")).await.unwrap();

        let names: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["First", "Second"]);
    }

    #[tokio::test]
    async fn test_remove_reports_missing() {
        let store = MemoryStore::new();
        let saved = card("Travel");
        store.append(saved.clone()).await.unwrap();

        assert!(store.remove(saved.id).await.unwrap());
        assert!(!store.remove(saved.id).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }
}
