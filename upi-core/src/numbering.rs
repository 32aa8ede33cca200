//! Table-driven numbering-plan oracle.

use std::collections::HashMap;

use regex::Regex;
use upi_types::NumberingPlan;

/// Mobile number series per region, as anchored regular expressions over the
/// national number.
///
/// Regions without an entry reject every number.
#[derive(Debug, Clone)]
pub struct StaticNumberingPlan {
    regions: HashMap<String, Regex>,
}

/// Indian mobile series: ten digits in the 6-9 blocks.
pub const INDIA_MOBILE_PATTERN: &str = r"^[6-9]\d{9}$";

impl StaticNumberingPlan {
    /// A plan with no regions.
    pub fn empty() -> Self {
        Self {
            regions: HashMap::new(),
        }
    }

    /// The Indian mobile plan.
    pub fn india() -> Self {
        let mut plan = Self::empty();
        if let Ok(regex) = Regex::new(INDIA_MOBILE_PATTERN) {
            plan.regions.insert("IN".to_string(), regex);
        }
        plan
    }

    /// Adds or replaces the pattern for `region`.
    pub fn with_region(mut self, region: &str, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.regions.insert(region.to_ascii_uppercase(), regex);
        Ok(self)
    }
}

impl Default for StaticNumberingPlan {
    fn default() -> Self {
        Self::india()
    }
}

impl NumberingPlan for StaticNumberingPlan {
    fn is_assignable_number(&self, number: &str, region: &str) -> bool {
        self.regions
            .get(&region.to_ascii_uppercase())
            .is_some_and(|re| re.is_match(number))
    }
}
