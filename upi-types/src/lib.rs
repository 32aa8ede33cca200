//! # UPI Types
//!
//! Domain types and port traits for the card-to-UPI identifier generator.
//! This crate has ZERO IO dependencies - only value types, the pure
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Value types (MobileNumber, CardNumber, Bank, UpiId, SavedCard)
//!   and the pure validators/classifier they are built on
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for the outer surfaces
//! - `error/` - Domain, storage and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Bank, CardNetwork, CardNumber, MobileNumber, PaymentUri, SavedCard, SavedCardId, UpiId,
    classify_network, is_valid_card_number, is_valid_mobile, luhn_check, luhn_check_digit,
};
pub use dto::*;
pub use error::{AppError, CardRejection, DomainError, Field, MobileRejection, StoreError};
pub use ports::{CardStore, Clipboard, NumberingPlan, PaymentCodeRenderer, RenderError};
