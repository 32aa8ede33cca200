//! Data Transfer Objects (DTOs) for requests and reports.

use serde::{Deserialize, Serialize};

use crate::domain::{Bank, CardNetwork, SavedCard, SavedCardId, UpiId};

// ─────────────────────────────────────────────────────────────────────────────
// Saved card DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to save the current card under a name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCardRequest {
    /// Label for the card
    pub name: String,
    pub card_number: String,
    pub upi_id: String,
    pub bank: Bank,
}

/// A saved card as listed to the user, with the number masked unless asked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCardView {
    pub id: SavedCardId,
    pub name: String,
    pub card_number: String,
    pub network: CardNetwork,
    pub upi_id: UpiId,
    pub bank: Bank,
    pub saved_at: String,
}

impl SavedCardView {
    pub fn from_card(card: &SavedCard, show_full: bool) -> Self {
        let card_number = if show_full {
            card.card_number.grouped()
        } else {
            card.card_number.masked_grouped()
        };
        Self {
            id: card.id,
            name: card.name.clone(),
            card_number,
            network: card.card_number.network(),
            upi_id: card.upi_id.clone(),
            bank: card.bank.clone(),
            saved_at: card.saved_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Generation DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Everything produced by a successful generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    pub upi_id: UpiId,
    pub bank: Bank,
    pub network: CardNetwork,
    /// `upi://pay` link for the identifier
    pub payment_uri: String,
    /// Bank-specific notice, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
}

/// Result of checking a single field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReport {
    pub input: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<CardNetwork>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CardNumber;

    #[test]
    fn test_view_masks_by_default() {
        let card = SavedCard::new(
            "Travel",
            CardNumber::parse("4111111111111111").unwrap(),
            UpiId::new("sbicard.4111111111111111@sbi"),
            Bank::Sbi,
        )
        .unwrap();

        let masked = SavedCardView::from_card(&card, false);
        assert_eq!(masked.card_number, "**** **** **** 1111");
        assert_eq!(masked.network, CardNetwork::Visa);

        let full = SavedCardView::from_card(&card, true);
        assert_eq!(full.card_number, "4111 1111 1111 1111");
    }
}
