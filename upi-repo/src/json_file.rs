//! JSON file store.
//!
//! The whole list lives in one file as a JSON array, the same blob shape a
//! browser would keep under a single storage key. Every write replaces the
//! file through a temporary sibling and a rename, so a crash mid-write leaves
//! the previous list in place.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use upi_types::{CardStore, SavedCard, SavedCardId, StoreError};

/// File-backed store holding the list as a single JSON document.
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<SavedCard>, StoreError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(map_io(e)),
        };

        match serde_json::from_slice(&raw) {
            Ok(cards) => Ok(cards),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring malformed saved cards file");
                Ok(Vec::new())
            }
        }
    }

    async fn write_all(&self, cards: &[SavedCard]) -> Result<(), StoreError> {
        let body = serde_json::to_vec(cards).map_err(|e| StoreError::Corrupt(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(map_io)?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &body).await.map_err(map_io)?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(map_io(e));
        }

        debug!(path = %self.path.display(), count = cards.len(), "Saved cards written");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "saved_cards".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn map_io(err: io::Error) -> StoreError {
    match err.kind() {
        io::ErrorKind::StorageFull => StoreError::QuotaExceeded,
        _ => StoreError::Unavailable(err.to_string()),
    }
}

#[async_trait]
impl CardStore for JsonFileStore {
    async fn list(&self) -> Result<Vec<SavedCard>, StoreError> {
        self.read_all().await
    }

    async fn append(&self, card: SavedCard) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut cards = self.read_all().await?;
        cards.push(card);
        self.write_all(&cards).await
    }

    async fn remove(&self, id: SavedCardId) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut cards = self.read_all().await?;
        let before = cards.len();
        cards.retain(|c| c.id != id);
        if cards.len() == before {
            return Ok(false);
        }
        self.write_all(&cards).await?;
        Ok(true)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write_all(&[]).await
    }
}
