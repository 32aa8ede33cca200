//! Database row types.

use sqlx::FromRow;

use upi_types::{Bank, CardNumber, SavedCard, SavedCardId, StoreError, UpiId};

/// Saved card row. SQLite keeps ids and timestamps as text.
#[derive(FromRow)]
pub struct DbSavedCard {
    pub id: String,
    pub name: String,
    pub card_number: String,
    pub upi_id: String,
    pub bank: String,
    pub saved_at: String,
}

impl DbSavedCard {
    pub fn into_domain(self) -> Result<SavedCard, StoreError> {
        let id =
            uuid::Uuid::parse_str(&self.id).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let saved_at = chrono::DateTime::parse_from_rfc3339(&self.saved_at)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?
            .with_timezone(&chrono::Utc);

        Ok(SavedCard::from_parts(
            SavedCardId::from_uuid(id),
            self.name,
            CardNumber::from_trusted(self.card_number),
            UpiId::new(self.upi_id),
            Bank::from_code(&self.bank),
            saved_at,
        ))
    }
}
