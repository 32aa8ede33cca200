//! Bank-specific UPI identifier templates.
//!
//! Card issuers publish a fixed identifier shape for paying a card bill over
//! UPI. [`RULES`] lists them in priority order; the first rule whose
//! condition holds picks the template, and [`Template::Fallback`] covers
//! everything else.

use upi_types::{Bank, CardNetwork, CardNumber, MobileNumber, UpiId};
use upi_types::domain::last_four;

/// The identifier shapes the generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// `ccpay.<mobile><last4>@icici`
    IciciCcpay,
    /// `sbicard.<card>@sbi`
    SbiCard,
    /// `AEBC.<card>@sc`
    AmexBc,
    /// `CC.91<mobile><last4>@axisbank`
    AxisCc,
    /// `<card>.cc@idfcbank`
    IdfcCc,
    /// `AUCC.<mobile><last4>@aubank`
    AuCc,
    /// `<mobile>@<lowercase bank>`
    Fallback,
}

impl Template {
    /// Fills the template. No validation happens here.
    pub fn render(&self, mobile: &str, card: &str, bank: &Bank) -> String {
        match self {
            Template::IciciCcpay => format!("ccpay.{}{}@icici", mobile, last_four(card)),
            Template::SbiCard => format!("sbicard.{}@sbi", card),
            Template::AmexBc => format!("AEBC.{}@sc", card),
            Template::AxisCc => format!("CC.91{}{}@axisbank", mobile, last_four(card)),
            Template::IdfcCc => format!("{}.cc@idfcbank", card),
            Template::AuCc => format!("AUCC.{}{}@aubank", mobile, last_four(card)),
            Template::Fallback => format!("{}@{}", mobile, bank.code().to_lowercase()),
        }
    }

    /// Whether the rendered identifier contains the mobile number.
    pub fn embeds_mobile(&self) -> bool {
        matches!(
            self,
            Template::IciciCcpay | Template::AxisCc | Template::AuCc | Template::Fallback
        )
    }
}

/// A template together with the condition that selects it.
pub struct BankRule {
    pub template: Template,
    pub applies: fn(&Bank, &str) -> bool,
}

/// Issuer rules in priority order. Anything unmatched uses [`Template::Fallback`].
pub const RULES: &[BankRule] = &[
    BankRule {
        template: Template::IciciCcpay,
        applies: |bank, _| matches!(bank, Bank::Icici),
    },
    BankRule {
        template: Template::SbiCard,
        applies: |bank, _| matches!(bank, Bank::Sbi),
    },
    BankRule {
        // Length is compared literally; amex cards are 15 digits.
        template: Template::AmexBc,
        applies: |bank, card| {
            (upi_types::classify_network(card) == CardNetwork::Amex || matches!(bank, Bank::Amex))
                && card.len() == 15
        },
    },
    BankRule {
        template: Template::AxisCc,
        applies: |bank, _| matches!(bank, Bank::Axis),
    },
    BankRule {
        template: Template::IdfcCc,
        applies: |bank, _| matches!(bank, Bank::Idfc),
    },
    BankRule {
        template: Template::AuCc,
        applies: |bank, _| matches!(bank, Bank::AuBank),
    },
];

/// Picks the template for a card/bank pair.
pub fn select_template(card: &str, bank: &Bank) -> Template {
    RULES
        .iter()
        .find(|rule| (rule.applies)(bank, card))
        .map_or(Template::Fallback, |rule| rule.template)
}

/// Builds the UPI identifier for a validated mobile number and card.
///
/// Pure and total: validity is the caller's responsibility.
pub fn generate_upi_id(mobile: &MobileNumber, card: &CardNumber, bank: &Bank) -> UpiId {
    let template = select_template(card.as_str(), bank);
    UpiId::new(template.render(mobile.as_str(), card.as_str(), bank))
}
