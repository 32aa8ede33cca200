//! Indian mobile number validation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DomainError, MobileRejection};
use crate::ports::NumberingPlan;

/// Region code handed to the numbering-plan oracle.
pub const REGION: &str = "IN";

/// Length of a local mobile number.
pub const MOBILE_LEN: usize = 10;

/// `^[6-9][0-9]{9}$` without a regex.
fn is_well_formed(raw: &str) -> bool {
    raw.len() == MOBILE_LEN
        && raw.bytes().all(|b| b.is_ascii_digit())
        && matches!(raw.as_bytes()[0], b'6'..=b'9')
}

fn check(raw: &str, plan: &dyn NumberingPlan) -> Result<(), MobileRejection> {
    // Malformed input never reaches the oracle.
    if !is_well_formed(raw) {
        return Err(MobileRejection::Structure);
    }
    if !plan.is_assignable_number(raw, REGION) {
        return Err(MobileRejection::NotAssignable);
    }
    Ok(())
}

/// True when `raw` is a well-formed mobile number the numbering plan assigns.
pub fn is_valid_mobile(raw: &str, plan: &dyn NumberingPlan) -> bool {
    check(raw, plan).is_ok()
}

/// A validated 10-digit Indian mobile number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Parses a mobile number, consulting `plan` once the shape is right.
    pub fn parse(raw: &str, plan: &dyn NumberingPlan) -> Result<Self, DomainError> {
        check(raw, plan).map_err(|reason| DomainError::InvalidMobileFormat { reason })?;
        Ok(Self(raw.to_string()))
    }

    /// Wraps a number recovered from data that was validated earlier.
    ///
    /// Only the shape is checked; the numbering plan is not consulted.
    pub fn from_trusted(raw: &str) -> Option<Self> {
        is_well_formed(raw).then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
