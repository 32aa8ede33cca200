//! Error types for the UPI ID generator.
//!
//! Every error here is recoverable: they are returned or stored as settled
//! outcomes and shown to the user, never raised past the caller.

use std::fmt;

/// Why a mobile number was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobileRejection {
    /// Not 10 digits starting with 6-9.
    Structure,
    /// Well formed, but the numbering plan does not assign it.
    NotAssignable,
}

/// Why a card number was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardRejection {
    NonDigit,
    Length { len: usize },
    Checksum,
}

/// An input field of the generator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Mobile,
    Card,
}

impl Field {
    /// Top-level message shown when generation is refused because of this field.
    pub fn blocked_message(&self) -> &'static str {
        match self {
            Field::Mobile => "Please enter a valid 10-digit mobile number to continue.",
            Field::Card => "Please enter a valid card number to continue.",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Mobile => write!(f, "mobile"),
            Field::Card => write!(f, "card"),
        }
    }
}

/// Domain-level errors (input validation failures).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Please enter a valid 10-digit mobile number starting with 6-9.")]
    InvalidMobileFormat { reason: MobileRejection },

    #[error("Invalid card number. Please check and try again.")]
    InvalidCardFormat { reason: CardRejection },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// The form field this error belongs to, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            DomainError::InvalidMobileFormat { .. } => Some(Field::Mobile),
            DomainError::InvalidCardFormat { .. } => Some(Field::Card),
            DomainError::ValidationError(_) => None,
        }
    }
}

/// Storage-level errors (saved card persistence failures).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage quota exceeded")]
    QuotaExceeded,

    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Application-level errors (what the user is told).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{}", .field.blocked_message())]
    GenerationBlocked { field: Field },

    #[error("Failed to update saved cards: {0}")]
    PersistenceFailure(String),

    #[error("Card is already saved with name: \"{name}\"")]
    DuplicateSave { name: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::PersistenceFailure(err.to_string())
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::ValidationError(msg) => AppError::BadRequest(msg),
            e => AppError::BadRequest(e.to_string()),
        }
    }
}
