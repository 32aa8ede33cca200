//! # UPI Core
//!
//! Application layer of the UPI ID generator.
//!
//! ## Architecture
//!
//! - `generator` - bank rule table and UPI ID templates
//! - `recovery` - reads the mobile number back out of a generated ID
//! - `numbering` - table-driven numbering-plan oracle
//! - `orchestrator` - debounced validation and generation state
//! - `saved_cards` - saved card service
//!
//! The saved card service is generic over `S: CardStore` and the
//! orchestrator over `P: NumberingPlan`, allowing different adapters to be
//! injected.

pub mod feedback;
pub mod generator;
pub mod numbering;
pub mod orchestrator;
pub mod recovery;
pub mod saved_cards;

#[cfg(test)]
mod saved_cards_tests;

pub use feedback::TransientFlag;
pub use generator::{Template, generate_upi_id, select_template};
pub use numbering::StaticNumberingPlan;
pub use orchestrator::{DebounceConfig, GenerationOrchestrator, Phase};
pub use recovery::recover_mobile;
pub use saved_cards::SavedCardService;
