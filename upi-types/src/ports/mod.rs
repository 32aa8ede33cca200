//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The core depends on these traits, not concrete implementations.

mod card_store;
mod numbering_plan;
mod output;

pub use card_store::CardStore;
pub use numbering_plan::NumberingPlan;
pub use output::{Clipboard, PaymentCodeRenderer, RenderError};
