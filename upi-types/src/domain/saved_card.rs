//! Saved card domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Bank, CardNumber, UpiId};
use crate::error::DomainError;

/// Unique identifier for a SavedCard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedCardId(Uuid);

impl SavedCardId {
    /// Creates a new random SavedCardId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a SavedCardId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SavedCardId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SavedCardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SavedCardId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A card the user chose to keep, with the identifier generated for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCard {
    /// Unique identifier
    pub id: SavedCardId,
    /// User-chosen label
    pub name: String,
    pub card_number: CardNumber,
    pub upi_id: UpiId,
    pub bank: Bank,
    /// When the card was saved
    pub saved_at: DateTime<Utc>,
}

impl SavedCard {
    /// Creates a new saved card record.
    ///
    /// # Validation
    /// - Name cannot be blank (it is stored trimmed)
    /// - Card number and UPI ID cannot be empty
    pub fn new(
        name: &str,
        card_number: CardNumber,
        upi_id: UpiId,
        bank: Bank,
    ) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::ValidationError(
                "Please enter a card name".into(),
            ));
        }
        if card_number.is_empty() || upi_id.as_str().is_empty() {
            return Err(DomainError::ValidationError("No card data to save".into()));
        }

        Ok(Self {
            id: SavedCardId::new(),
            name: name.to_string(),
            card_number,
            upi_id,
            bank,
            saved_at: Utc::now(),
        })
    }

    /// Creates a saved card with all fields specified (for storage reconstruction).
    pub fn from_parts(
        id: SavedCardId,
        name: String,
        card_number: CardNumber,
        upi_id: UpiId,
        bank: Bank,
        saved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            card_number,
            upi_id,
            bank,
            saved_at,
        }
    }
}
