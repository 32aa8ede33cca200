//! Generated UPI identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A UPI identifier (VPA) such as `ccpay.98765432101111@icici`.
///
/// Opaque to the core: it is displayed, copied, saved, and encoded into a
/// payment URI, never interpreted beyond the `@` split.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpiId(String);

impl UpiId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Part before the `@`.
    pub fn handle(&self) -> &str {
        self.0.split_once('@').map_or(self.0.as_str(), |(h, _)| h)
    }

    /// Part after the `@`, if there is one.
    pub fn provider(&self) -> Option<&str> {
        self.0.split_once('@').map(|(_, p)| p)
    }
}

impl fmt::Display for UpiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UpiId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
