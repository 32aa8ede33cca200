//! Domain models for the UPI ID generator.

pub mod bank;
pub mod card;
pub mod mobile;
pub mod network;
pub mod payment_uri;
pub mod saved_card;
pub mod upi_id;

pub use bank::Bank;
pub use card::{CardNumber, is_valid_card_number, last_four, luhn_check, luhn_check_digit};
pub use mobile::{MobileNumber, is_valid_mobile};
pub use network::{CardNetwork, classify_network};
pub use payment_uri::PaymentUri;
pub use saved_card::{SavedCard, SavedCardId};
pub use upi_id::UpiId;
