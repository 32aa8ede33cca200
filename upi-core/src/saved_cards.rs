//! Saved Card Service
//!
//! Keeps the authoritative list of saved cards in memory and mirrors every
//! change to a [`CardStore`]. A change only reaches the in-memory list after
//! the store accepted it, so a storage failure leaves the list as it was.

use tracing::{info, warn};
use upi_types::{
    AppError, CardNumber, CardStore, SaveCardRequest, SavedCard, SavedCardId, UpiId,
};

/// Application service for saved cards.
///
/// Generic over `S: CardStore` - the adapter is injected at compile time.
pub struct SavedCardService<S: CardStore> {
    store: S,
    cards: Vec<SavedCard>,
}

impl<S: CardStore> SavedCardService<S> {
    /// Creates a service with an empty list, without reading the store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            cards: Vec::new(),
        }
    }

    /// Creates a service and loads whatever the store holds.
    pub async fn load(store: S) -> Self {
        let mut service = Self::new(store);
        service.reload().await;
        service
    }

    /// Re-reads the store. Unreadable storage counts as empty.
    pub async fn reload(&mut self) {
        self.cards = match self.store.list().await {
            Ok(cards) => cards,
            Err(e) => {
                warn!(error = %e, "Could not read saved cards, starting empty");
                Vec::new()
            }
        };
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────────

    /// All saved cards, oldest first.
    pub fn list(&self) -> &[SavedCard] {
        &self.cards
    }

    pub fn find(&self, id: SavedCardId) -> Option<&SavedCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn find_by_card_number(&self, card_number: &str) -> Option<&SavedCard> {
        self.cards
            .iter()
            .find(|c| c.card_number.as_str() == card_number)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────────

    /// Saves a generated card under a name.
    ///
    /// A card number that is already saved is not overwritten; the error
    /// names the existing record instead.
    pub async fn save(&mut self, req: SaveCardRequest) -> Result<SavedCard, AppError> {
        let card = SavedCard::new(
            &req.name,
            CardNumber::from_trusted(req.card_number),
            UpiId::new(req.upi_id),
            req.bank,
        )?;

        if let Some(existing) = self.find_by_card_number(card.card_number.as_str()) {
            return Err(AppError::DuplicateSave {
                name: existing.name.clone(),
            });
        }

        self.store.append(card.clone()).await?;
        info!(id = %card.id, bank = %card.bank, "Card saved");
        self.cards.push(card.clone());
        Ok(card)
    }

    /// Deletes one saved card.
    pub async fn remove(&mut self, id: SavedCardId) -> Result<SavedCard, AppError> {
        let Some(pos) = self.cards.iter().position(|c| c.id == id) else {
            return Err(AppError::NotFound(format!("Saved card {}", id)));
        };

        if !self.store.remove(id).await? {
            warn!(%id, "Saved card was missing from storage");
        }
        info!(%id, "Saved card removed");
        Ok(self.cards.remove(pos))
    }

    /// Deletes every saved card. Returns how many were removed.
    pub async fn clear(&mut self) -> Result<usize, AppError> {
        self.store.clear().await?;
        let removed = self.cards.len();
        self.cards.clear();
        info!(removed, "Saved cards cleared");
        Ok(removed)
    }
}
