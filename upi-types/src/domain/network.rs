//! Card network classification from IIN/BIN prefixes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Card networks recognised from the leading digits of a card number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardNetwork {
    Visa,
    Mastercard,
    Amex,
    Diners,
    Rupay,
    None,
}

impl CardNetwork {
    /// Lowercase tag, also used as the logo key.
    pub fn tag(&self) -> &'static str {
        match self {
            CardNetwork::Visa => "visa",
            CardNetwork::Mastercard => "mastercard",
            CardNetwork::Amex => "amex",
            CardNetwork::Diners => "diners",
            CardNetwork::Rupay => "rupay",
            CardNetwork::None => "none",
        }
    }

    /// Human-readable network name.
    pub fn display_name(&self) -> &'static str {
        match self {
            CardNetwork::Visa => "Visa",
            CardNetwork::Mastercard => "Mastercard",
            CardNetwork::Amex => "American Express",
            CardNetwork::Diners => "Diners Club",
            CardNetwork::Rupay => "RuPay",
            CardNetwork::None => "Unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CardNetwork::None)
    }
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

fn leading(card: &str, n: usize) -> Option<u32> {
    let prefix = card.get(..n)?;
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

/// Maps a (possibly partial) card number to its network.
///
/// Rules are checked in order and the first match wins. Luhn validity is not
/// required, so this works on input that is still being typed.
pub fn classify_network(card: &str) -> CardNetwork {
    if card.len() < 2 {
        return CardNetwork::None;
    }
    let first_two = leading(card, 2);
    let first_six = if card.len() >= 6 {
        leading(card, 6)
    } else {
        None
    };

    if card.starts_with('4') {
        return CardNetwork::Visa;
    }
    if matches!(first_two, Some(51..=55)) || matches!(first_six, Some(222100..=272099)) {
        return CardNetwork::Mastercard;
    }
    match first_two {
        Some(34 | 37) => CardNetwork::Amex,
        Some(36) => CardNetwork::Diners,
        Some(60 | 65 | 81 | 82) => CardNetwork::Rupay,
        _ => CardNetwork::None,
    }
}
