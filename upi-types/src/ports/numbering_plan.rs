//! Phone numbering-plan oracle port.

/// Decides whether a well-formed national number is actually assignable in
/// a region's numbering plan.
///
/// Only called after the structural mobile check has passed.
pub trait NumberingPlan: Send + Sync {
    fn is_assignable_number(&self, number: &str, region: &str) -> bool;
}

impl<F> NumberingPlan for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn is_assignable_number(&self, number: &str, region: &str) -> bool {
        self(number, region)
    }
}
