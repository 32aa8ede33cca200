//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use upi_core::{DebounceConfig, StaticNumberingPlan};
use upi_types::Bank;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_url: String,
    pub mobile_pattern: Option<String>,
    pub payee_name: Option<String>,
    pub banks: Vec<Bank>,
    pub debounce: DebounceConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let store_url =
            non_empty("UPI_STORE_URL").unwrap_or_else(|| "saved_cards.json".to_string());

        let banks = match non_empty("UPI_BANKS") {
            Some(list) => parse_banks(&list),
            None => Bank::defaults(),
        };
        if banks.is_empty() {
            anyhow::bail!("UPI_BANKS must name at least one bank");
        }

        let defaults = DebounceConfig::default();
        let debounce = DebounceConfig {
            mobile: millis(&non_empty, "UPI_MOBILE_DEBOUNCE_MS", defaults.mobile)?,
            card: millis(&non_empty, "UPI_CARD_DEBOUNCE_MS", defaults.card)?,
        };

        Ok(Self {
            store_url,
            mobile_pattern: non_empty("UPI_MOBILE_PATTERN"),
            payee_name: non_empty("UPI_PAYEE_NAME"),
            banks,
            debounce,
        })
    }

    /// Builds the numbering plan, applying a custom mobile series if set.
    pub fn numbering_plan(&self) -> anyhow::Result<StaticNumberingPlan> {
        match &self.mobile_pattern {
            Some(pattern) => StaticNumberingPlan::india()
                .with_region("IN", pattern)
                .map_err(|e| anyhow::anyhow!("Invalid UPI_MOBILE_PATTERN: {}", e)),
            None => Ok(StaticNumberingPlan::india()),
        }
    }

    /// Finds a configured bank by code, ignoring case.
    pub fn find_bank(&self, code: &str) -> Option<&Bank> {
        find_bank(&self.banks, code)
    }
}

pub fn find_bank<'a>(banks: &'a [Bank], code: &str) -> Option<&'a Bank> {
    let code = code.trim();
    banks.iter().find(|b| b.code().eq_ignore_ascii_case(code))
}

fn parse_banks(list: &str) -> Vec<Bank> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Bank::from_code)
        .collect()
}

fn millis(
    get: impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> anyhow::Result<Duration> {
    match get(key) {
        Some(v) => {
            let ms: u64 = v
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("{} must be a number of milliseconds", key))?;
            Ok(Duration::from_millis(ms))
        }
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use upi_types::NumberingPlan;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.store_url, "saved_cards.json");
        assert_eq!(config.banks, Bank::defaults());
        assert_eq!(config.debounce, DebounceConfig::default());
        assert!(config.payee_name.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("UPI_STORE_URL", "sqlite://cards.db"),
            ("UPI_BANKS", "ICICI, HDFC ,,AU Bank"),
            ("UPI_MOBILE_DEBOUNCE_MS", "250"),
            ("UPI_PAYEE_NAME", "Card Bills"),
        ])
        .unwrap();

        assert_eq!(config.store_url, "sqlite://cards.db");
        assert_eq!(
            config.banks,
            vec![Bank::Icici, Bank::Other("HDFC".into()), Bank::AuBank]
        );
        assert_eq!(config.debounce.mobile, Duration::from_millis(250));
        assert_eq!(config.debounce.card, Duration::from_millis(300));
        assert_eq!(config.payee_name.as_deref(), Some("Card Bills"));
    }

    #[test]
    fn test_bad_debounce_is_an_error() {
        assert!(load(&[("UPI_CARD_DEBOUNCE_MS", "soon")]).is_err());
    }

    #[test]
    fn test_empty_bank_list_is_an_error() {
        assert!(load(&[("UPI_BANKS", " , ")]).is_err());
    }

    #[test]
    fn test_custom_mobile_pattern() {
        let config = load(&[("UPI_MOBILE_PATTERN", r"^9\d{9}$")]).unwrap();
        let plan = config.numbering_plan().unwrap();

        assert!(plan.is_assignable_number("9876543210", "IN"));
        assert!(!plan.is_assignable_number("8876543210", "IN"));

        let config = load(&[("UPI_MOBILE_PATTERN", "(")]).unwrap();
        assert!(config.numbering_plan().is_err());
    }

    #[test]
    fn test_find_bank_ignores_case() {
        let config = load(&[]).unwrap();

        assert_eq!(config.find_bank("au bank"), Some(&Bank::AuBank));
        assert_eq!(config.find_bank("hdfc"), None);
    }
}
