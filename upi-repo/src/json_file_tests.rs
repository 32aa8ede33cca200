//! JSON file store tests.

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use upi_types::{Bank, CardNumber, CardStore, SavedCard, SavedCardId, UpiId};

    use crate::JsonFileStore;

    fn setup_store() -> (TempDir, JsonFileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("saved_cards.json"));
        (dir, store)
    }

    fn card(name: &str, number: &str, upi: &str, bank: Bank) -> SavedCard {
        SavedCard::new(name, CardNumber::from_trusted(number), UpiId::new(upi), bank).unwrap()
    }

    fn travel() -> SavedCard {
        card(
            "Travel",
            "4111111111111111",
            "ccpay.98765432101111@icici",
            Bank::Icici,
        )
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let (_dir, store) = setup_store();

        let cards = store.list().await.unwrap();

        assert!(cards.is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_append_and_list() {
        let (_dir, store) = setup_store();
        let first = travel();
        let second = card(
            "Bills",
            "5500000000000004",
            "AUCC.98765432100004@aubank",
            Bank::AuBank,
        );

        store.append(first.clone()).await.unwrap();
        store.append(second.clone()).await.unwrap();

        assert_eq!(store.list().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let (dir, store) = setup_store();
        let saved = travel();
        store.append(saved.clone()).await.unwrap();
        drop(store);

        let reopened = JsonFileStore::new(dir.path().join("saved_cards.json"));

        assert_eq!(reopened.list().await.unwrap(), vec![saved]);
    }

    #[tokio::test]
    async fn test_blob_is_a_json_array() {
        let (_dir, store) = setup_store();
        store.append(travel()).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        let entry = &value.as_array().unwrap()[0];
        assert_eq!(entry["name"], "Travel");
        assert_eq!(entry["cardNumber"], "4111111111111111");
        assert_eq!(entry["upiId"], "ccpay.98765432101111@icici");
        assert_eq!(entry["bank"], "ICICI");
    }

    #[tokio::test]
    async fn test_malformed_file_reads_empty() {
        let (_dir, store) = setup_store();
        std::fs::write(store.path(), b"{not json").unwrap();

        assert!(store.list().await.unwrap().is_empty());

        // The next write starts a fresh list.
        store.append(travel()).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_card() {
        let (_dir, store) = setup_store();
        let saved = travel();
        store.append(saved.clone()).await.unwrap();

        assert!(store.remove(saved.id).await.unwrap());
        assert!(!store.remove(SavedCardId::new()).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_cards() {
        let (_dir, store) = setup_store();
        store.append(travel()).await.unwrap();

        store.clear().await.unwrap();

        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/deeper/cards.json"));

        store.append(travel()).await.unwrap();

        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unwritable_location_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the parent directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let store = JsonFileStore::new(blocker.join("cards.json"));

        let result = store.append(travel()).await;

        assert!(result.is_err());
    }
}
