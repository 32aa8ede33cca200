//! SavedCardService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use upi_types::{
        AppError, Bank, CardStore, SaveCardRequest, SavedCard, SavedCardId, StoreError,
    };

    use crate::SavedCardService;

    /// Simple in-memory store with a switch to make writes fail.
    pub struct MockStore {
        cards: Mutex<Vec<SavedCard>>,
        fail_writes: AtomicBool,
        fail_reads: AtomicBool,
    }

    impl MockStore {
        pub fn new() -> Self {
            Self {
                cards: Mutex::new(Vec::new()),
                fail_writes: AtomicBool::new(false),
                fail_reads: AtomicBool::new(false),
            }
        }

        pub fn with_cards(cards: Vec<SavedCard>) -> Self {
            let store = Self::new();
            *store.cards.lock().unwrap() = cards;
            store
        }

        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        pub fn stored(&self) -> usize {
            self.cards.lock().unwrap().len()
        }

        fn check_write(&self) -> Result<(), StoreError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::QuotaExceeded);
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CardStore for MockStore {
        async fn list(&self) -> Result<Vec<SavedCard>, StoreError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(StoreError::Corrupt("not json".into()));
            }
            Ok(self.cards.lock().unwrap().clone())
        }

        async fn append(&self, card: SavedCard) -> Result<(), StoreError> {
            self.check_write()?;
            self.cards.lock().unwrap().push(card);
            Ok(())
        }

        async fn remove(&self, id: SavedCardId) -> Result<bool, StoreError> {
            self.check_write()?;
            let mut cards = self.cards.lock().unwrap();
            let before = cards.len();
            cards.retain(|c| c.id != id);
            Ok(cards.len() != before)
        }

        async fn clear(&self) -> Result<(), StoreError> {
            self.check_write()?;
            self.cards.lock().unwrap().clear();
            Ok(())
        }
    }

    fn request(name: &str, card: &str, upi: &str, bank: Bank) -> SaveCardRequest {
        SaveCardRequest {
            name: name.to_string(),
            card_number: card.to_string(),
            upi_id: upi.to_string(),
            bank,
        }
    }

    fn visa(name: &str) -> SaveCardRequest {
        request(
            name,
            "4111111111111111",
            "ccpay.98765432101111@icici",
            Bank::Icici,
        )
    }

    #[tokio::test]
    async fn test_save_card() {
        let mut service = SavedCardService::new(MockStore::new());

        let saved = service.save(visa(" Travel ")).await.unwrap();

        assert_eq!(saved.name, "Travel");
        assert_eq!(service.list().len(), 1);
        assert_eq!(service.store().stored(), 1);
        assert_eq!(service.find(saved.id).unwrap().name, "Travel");
    }

    #[tokio::test]
    async fn test_save_requires_name() {
        let mut service = SavedCardService::new(MockStore::new());

        let result = service.save(visa("   ")).await;

        match result {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Please enter a card name"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(service.list().is_empty());
    }

    #[tokio::test]
    async fn test_save_requires_data() {
        let mut service = SavedCardService::new(MockStore::new());

        let result = service
            .save(request("Travel", "4111111111111111", "", Bank::Icici))
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == "No card data to save"));
    }

    #[tokio::test]
    async fn test_duplicate_card_reports_existing_name() {
        let mut service = SavedCardService::new(MockStore::new());
        service.save(visa("Travel")).await.unwrap();

        let result = service
            .save(request(
                "Other",
                "4111111111111111",
                "sbicard.4111111111111111@sbi",
                Bank::Sbi,
            ))
            .await;

        match result {
            Err(AppError::DuplicateSave { name }) => assert_eq!(name, "Travel"),
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(service.list().len(), 1);
        assert_eq!(service.list()[0].bank, Bank::Icici);
        assert_eq!(service.store().stored(), 1);
    }

    #[tokio::test]
    async fn test_write_failure_leaves_list_untouched() {
        let mut service = SavedCardService::new(MockStore::new());
        let kept = service.save(visa("Travel")).await.unwrap();
        service.store().fail_writes(true);

        let result = service
            .save(request(
                "Bills",
                "5500000000000004",
                "sbicard.5500000000000004@sbi",
                Bank::Sbi,
            ))
            .await;
        assert!(matches!(result, Err(AppError::PersistenceFailure(_))));
        assert_eq!(service.list().len(), 1);

        let result = service.remove(kept.id).await;
        assert!(matches!(result, Err(AppError::PersistenceFailure(_))));
        assert_eq!(service.list().len(), 1);

        let result = service.clear().await;
        assert!(matches!(result, Err(AppError::PersistenceFailure(_))));
        assert_eq!(service.list().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_card() {
        let mut service = SavedCardService::new(MockStore::new());
        let first = service.save(visa("Travel")).await.unwrap();
        let second = service
            .save(request(
                "Bills",
                "5500000000000004",
                "sbicard.5500000000000004@sbi",
                Bank::Sbi,
            ))
            .await
            .unwrap();

        let removed = service.remove(first.id).await.unwrap();

        assert_eq!(removed.id, first.id);
        assert_eq!(service.list().len(), 1);
        assert_eq!(service.list()[0].id, second.id);
        assert_eq!(service.store().stored(), 1);
    }

    #[tokio::test]
    async fn test_remove_unknown_card() {
        let mut service = SavedCardService::new(MockStore::new());

        let result = service.remove(SavedCardId::new()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_clear_cards() {
        let mut service = SavedCardService::new(MockStore::new());
        service.save(visa("Travel")).await.unwrap();

        let removed = service.clear().await.unwrap();

        assert_eq!(removed, 1);
        assert!(service.list().is_empty());
        assert_eq!(service.store().stored(), 0);
    }

    #[tokio::test]
    async fn test_load_reads_store() {
        let mut seed = SavedCardService::new(MockStore::new());
        let saved = seed.save(visa("Travel")).await.unwrap();

        let service = SavedCardService::load(MockStore::with_cards(vec![saved.clone()])).await;

        assert_eq!(service.list(), &[saved]);
    }

    #[tokio::test]
    async fn test_unreadable_store_loads_empty() {
        let store = MockStore::new();
        store.fail_reads.store(true, Ordering::SeqCst);

        let service = SavedCardService::load(store).await;

        assert!(service.list().is_empty());
    }
}
