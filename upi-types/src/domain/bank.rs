//! Issuing banks known to the generator.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The bank selected for generation.
///
/// Known codes get their own issuer templates; any other configured bank
/// goes through the generic `<mobile>@<bank>` path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Bank {
    #[default]
    Icici,
    Sbi,
    Amex,
    Axis,
    Idfc,
    AuBank,
    Other(String),
}

/// Banks offered when configuration does not override the list.
pub const DEFAULT_BANKS: &[&str] = &["ICICI", "SBI", "AMEX", "AXIS", "IDFC", "AU Bank"];

impl Bank {
    /// Parses a bank code. Matching is exact; unknown names become [`Bank::Other`].
    pub fn from_code(code: &str) -> Self {
        match code {
            "ICICI" => Bank::Icici,
            "SBI" => Bank::Sbi,
            "AMEX" => Bank::Amex,
            "AXIS" => Bank::Axis,
            "IDFC" => Bank::Idfc,
            "AU Bank" => Bank::AuBank,
            other => Bank::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Bank::Icici => "ICICI",
            Bank::Sbi => "SBI",
            Bank::Amex => "AMEX",
            Bank::Axis => "AXIS",
            Bank::Idfc => "IDFC",
            Bank::AuBank => "AU Bank",
            Bank::Other(name) => name,
        }
    }

    /// Notice to show next to an identifier generated for this bank.
    pub fn advisory(&self) -> Option<&'static str> {
        match self {
            Bank::Sbi => Some(
                "SBI card UPI IDs only work after SBI Pay (UPI) is enabled through YONO SBI \
                 or BHIM SBI Pay, and then only resolve inside the app they were created with.",
            ),
            _ => None,
        }
    }

    /// The default selectable list.
    pub fn defaults() -> Vec<Bank> {
        DEFAULT_BANKS.iter().map(|c| Bank::from_code(c)).collect()
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Bank {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Bank::from_code(s))
    }
}

impl Serialize for Bank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Bank {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Bank::from_code(&code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for code in DEFAULT_BANKS {
            assert_eq!(Bank::from_code(code).code(), *code);
        }
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(Bank::from_code("AU Bank"), Bank::AuBank);
        assert_eq!(Bank::from_code("icici"), Bank::Other("icici".into()));
        assert_eq!(Bank::from_code("HDFC"), Bank::Other("HDFC".into()));
    }

    #[test]
    fn test_serde_uses_code() {
        let json = serde_json::to_string(&Bank::AuBank).unwrap();
        assert_eq!(json, "\"AU Bank\"");
        let bank: Bank = serde_json::from_str("\"Kotak\"").unwrap();
        assert_eq!(bank, Bank::Other("Kotak".into()));
    }

    #[test]
    fn test_only_sbi_has_advisory() {
        assert!(Bank::Sbi.advisory().is_some());
        assert!(Bank::Axis.advisory().is_none());
    }
}
