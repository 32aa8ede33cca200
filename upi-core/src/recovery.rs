//! Best-effort recovery of the mobile number from a saved UPI identifier.
//!
//! Mirrors the generator's templates in reverse. Only templates that embed
//! the mobile number have a pattern; for the rest (and anything ambiguous)
//! the answer is `None`, never a guess.

use std::sync::LazyLock;

use regex::Regex;
use upi_types::{MobileNumber, UpiId};

use crate::generator::Template;

struct MobilePattern {
    template: Template,
    regex: Regex,
}

static PATTERNS: LazyLock<Vec<MobilePattern>> = LazyLock::new(|| {
    [
        (Template::IciciCcpay, r"^ccpay\.(\d{10})\d{4}@icici$"),
        (Template::AxisCc, r"^CC\.91(\d{10})\d{4}@axisbank$"),
        (Template::AuCc, r"^AUCC\.(\d{10})\d{4}@aubank$"),
        (Template::Fallback, r"^(\d{10})@[^@]+$"),
    ]
    .into_iter()
    .filter_map(|(template, pattern)| {
        Regex::new(pattern)
            .ok()
            .map(|regex| MobilePattern { template, regex })
    })
    .collect()
});

/// Identifies which mobile-bearing template produced `upi_id`, if any.
pub fn matching_template(upi_id: &UpiId) -> Option<Template> {
    PATTERNS
        .iter()
        .find(|p| p.regex.is_match(upi_id.as_str()))
        .map(|p| p.template)
}

/// Extracts the mobile number embedded in `upi_id`.
///
/// Returns `None` when no template matches or the captured digits are not a
/// plausible mobile number.
pub fn recover_mobile(upi_id: &UpiId) -> Option<MobileNumber> {
    let captured = PATTERNS
        .iter()
        .find_map(|p| p.regex.captures(upi_id.as_str()))?
        .get(1)?
        .as_str();

    let mobile = MobileNumber::from_trusted(captured);
    if mobile.is_none() {
        tracing::debug!(upi_id = %upi_id, "Recovered digits are not a mobile number");
    }
    mobile
}
