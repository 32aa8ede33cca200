//! Generation orchestrator.
//!
//! Holds the form state (mobile, card, bank), runs debounced per-field
//! validation, and gates generation on a fresh synchronous re-validation.
//! Everything derivable from the current fields (phase, network, payment
//! link) is computed on demand rather than cached.
//!
//! Time is passed in explicitly. A driver calls [`GenerationOrchestrator::settle`]
//! whenever [`GenerationOrchestrator::next_deadline`] passes.

use std::time::{Duration, Instant};

use tracing::debug;
use upi_types::{
    AppError, Bank, CardNetwork, CardNumber, Clipboard, DomainError, Field, GenerationReport,
    MobileNumber, NumberingPlan, PaymentUri, SavedCard, UpiId, classify_network,
    is_valid_card_number, is_valid_mobile,
};
use upi_types::domain::card::MIN_CARD_LEN;

use crate::feedback::{COPY_CONFIRMATION, TransientFlag};
use crate::generator::generate_upi_id;
use crate::recovery::recover_mobile;

/// Quiet periods before a field's error is recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    pub mobile: Duration,
    pub card: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            mobile: Duration::from_millis(500),
            card: Duration::from_millis(300),
        }
    }
}

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing entered.
    Idle,
    /// At least one field is empty or invalid.
    Editing,
    /// Both fields valid, nothing generated yet.
    Ready,
    /// An identifier is being shown.
    Generated,
}

/// The only stateful component: sequences validation before generation.
pub struct GenerationOrchestrator<P: NumberingPlan> {
    plan: P,
    debounce: DebounceConfig,
    mobile: String,
    card: String,
    bank: Bank,
    mobile_error: Option<DomainError>,
    card_error: Option<DomainError>,
    mobile_deadline: Option<Instant>,
    card_deadline: Option<Instant>,
    upi_id: Option<UpiId>,
    blocked: Option<Field>,
    copied: TransientFlag,
}

impl<P: NumberingPlan> GenerationOrchestrator<P> {
    /// Creates an empty form with the given oracle and default debounce.
    pub fn new(plan: P) -> Self {
        Self::with_debounce(plan, DebounceConfig::default())
    }

    pub fn with_debounce(plan: P, debounce: DebounceConfig) -> Self {
        Self {
            plan,
            debounce,
            mobile: String::new(),
            card: String::new(),
            bank: Bank::default(),
            mobile_error: None,
            card_error: None,
            mobile_deadline: None,
            card_deadline: None,
            upi_id: None,
            blocked: None,
            copied: TransientFlag::new(COPY_CONFIRMATION),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Events
    // ─────────────────────────────────────────────────────────────────────────

    /// Mobile field changed. Returns `false` if the input was rejected
    /// because it contains something other than digits.
    pub fn set_mobile(&mut self, raw: &str, now: Instant) -> bool {
        if self.blocked == Some(Field::Mobile) {
            self.blocked = None;
        }
        if !is_digits(raw) {
            return false;
        }
        if raw == self.mobile {
            return true;
        }

        self.mobile = raw.to_string();
        self.discard_identifier();
        if raw.is_empty() {
            self.mobile_deadline = None;
            self.mobile_error = None;
        } else {
            self.mobile_deadline = Some(now + self.debounce.mobile);
        }
        true
    }

    /// Card field changed. Returns `false` if the input was rejected
    /// because it contains something other than digits.
    pub fn set_card(&mut self, raw: &str, now: Instant) -> bool {
        if self.blocked == Some(Field::Card) {
            self.blocked = None;
        }
        if !is_digits(raw) {
            return false;
        }
        if raw == self.card {
            return true;
        }

        self.card = raw.to_string();
        self.discard_identifier();
        if raw.is_empty() {
            self.card_deadline = None;
            self.card_error = None;
        } else {
            self.card_deadline = Some(now + self.debounce.card);
        }
        true
    }

    /// Bank selection changed.
    pub fn select_bank(&mut self, bank: Bank) {
        if bank == self.bank {
            return;
        }
        debug!(bank = %bank, "Bank selected");
        self.bank = bank;
        self.discard_identifier();
    }

    /// Fires every debounce timer whose deadline has passed.
    pub fn settle(&mut self, now: Instant) {
        if self.mobile_deadline.is_some_and(|d| d <= now) {
            self.mobile_deadline = None;
            self.mobile_error = MobileNumber::parse(&self.mobile, &self.plan).err();
            debug!(valid = self.mobile_error.is_none(), "Mobile field settled");
        }
        if self.card_deadline.is_some_and(|d| d <= now) {
            self.card_deadline = None;
            // Errors stay hidden until the input could be a whole card number.
            self.card_error = if self.card.len() >= MIN_CARD_LEN {
                CardNumber::parse(&self.card).err()
            } else {
                None
            };
            debug!(
                valid = self.card_error.is_none(),
                network = %self.network(),
                "Card field settled"
            );
        }
    }

    /// The earliest pending debounce deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.mobile_deadline, self.card_deadline) {
            (Some(m), Some(c)) => Some(m.min(c)),
            (m, c) => m.or(c),
        }
    }

    /// Re-validates both fields, ignoring debounce, and generates.
    ///
    /// Any previous identifier is discarded first, so a refused attempt never
    /// leaves a stale one behind.
    pub fn generate(&mut self) -> Result<UpiId, AppError> {
        self.blocked = None;
        self.discard_identifier();

        let Ok(mobile) = MobileNumber::parse(&self.mobile, &self.plan) else {
            return Err(self.block(Field::Mobile));
        };
        let Ok(card) = CardNumber::parse(&self.card) else {
            return Err(self.block(Field::Card));
        };

        let upi_id = generate_upi_id(&mobile, &card, &self.bank);
        debug!(bank = %self.bank, network = %card.network(), "UPI ID generated");
        self.upi_id = Some(upi_id.clone());
        Ok(upi_id)
    }

    /// Loads a previously saved card straight into the generated state.
    ///
    /// The saved values were validated when they were stored, so the
    /// validators are skipped. The mobile number is recovered from the
    /// identifier when its template embeds one; otherwise the mobile field is
    /// left as it was. Returns whether a mobile number was recovered.
    pub fn accept_saved(&mut self, saved: &SavedCard) -> bool {
        self.card = saved.card_number.as_str().to_string();
        self.bank = saved.bank.clone();
        self.upi_id = Some(saved.upi_id.clone());

        let recovered = recover_mobile(&saved.upi_id);
        let found = recovered.is_some();
        if let Some(mobile) = recovered {
            self.mobile = mobile.as_str().to_string();
        }

        self.mobile_error = None;
        self.card_error = None;
        self.mobile_deadline = None;
        self.card_deadline = None;
        self.blocked = None;
        self.copied.reset();
        debug!(id = %saved.id, mobile_recovered = found, "Saved card accepted");
        found
    }

    /// Copies the current identifier. Returns whether anything was copied.
    pub fn copy_upi_id(&mut self, clipboard: &dyn Clipboard, now: Instant) -> bool {
        let Some(upi_id) = &self.upi_id else {
            return false;
        };
        let copied = clipboard.copy(upi_id.as_str());
        if copied {
            self.copied.raise(now);
        }
        copied
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived state
    // ─────────────────────────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        if self.upi_id.is_some() {
            Phase::Generated
        } else if self.mobile.is_empty() && self.card.is_empty() {
            Phase::Idle
        } else if is_valid_mobile(&self.mobile, &self.plan) && is_valid_card_number(&self.card) {
            Phase::Ready
        } else {
            Phase::Editing
        }
    }

    /// Network of the card typed so far (needs at least two digits).
    pub fn network(&self) -> CardNetwork {
        classify_network(&self.card)
    }

    pub fn mobile(&self) -> &str {
        &self.mobile
    }

    pub fn card(&self) -> &str {
        &self.card
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    /// Inline error under the mobile field, as of the last settle.
    pub fn mobile_error(&self) -> Option<&DomainError> {
        self.mobile_error.as_ref()
    }

    /// Inline error under the card field, as of the last settle.
    pub fn card_error(&self) -> Option<&DomainError> {
        self.card_error.as_ref()
    }

    /// Top-level message from the last refused generation.
    pub fn message(&self) -> Option<&'static str> {
        self.blocked.map(|field| field.blocked_message())
    }

    pub fn blocked_field(&self) -> Option<Field> {
        self.blocked
    }

    pub fn upi_id(&self) -> Option<&UpiId> {
        self.upi_id.as_ref()
    }

    /// Payment link for the current identifier; payee defaults to the bank code.
    pub fn payment_uri(&self, payee_name: Option<&str>) -> Option<PaymentUri> {
        let upi_id = self.upi_id.clone()?;
        let name = payee_name.unwrap_or_else(|| self.bank.code());
        Some(PaymentUri::new(upi_id, name))
    }

    /// Bank notice for the current identifier.
    pub fn advisory(&self) -> Option<&'static str> {
        self.upi_id.as_ref().and(self.bank.advisory())
    }

    pub fn copy_confirmed(&self, now: Instant) -> bool {
        self.copied.is_raised(now)
    }

    /// Summary of the current identifier, if there is one.
    pub fn report(&self, payee_name: Option<&str>) -> Option<GenerationReport> {
        let upi_id = self.upi_id.clone()?;
        let payment_uri = self.payment_uri(payee_name)?.to_string();
        Some(GenerationReport {
            upi_id,
            bank: self.bank.clone(),
            network: self.network(),
            payment_uri,
            advisory: self.advisory().map(str::to_string),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn discard_identifier(&mut self) {
        if self.upi_id.take().is_some() {
            debug!("Generated UPI ID discarded");
        }
        self.copied.reset();
    }

    fn block(&mut self, field: Field) -> AppError {
        debug!(%field, "Generation blocked");
        self.blocked = Some(field);
        AppError::GenerationBlocked { field }
    }
}

fn is_digits(raw: &str) -> bool {
    raw.bytes().all(|b| b.is_ascii_digit())
}
