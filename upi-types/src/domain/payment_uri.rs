//! `upi://pay` deep links.

use std::fmt;

use super::UpiId;

/// Currency code carried by every payment link.
pub const CURRENCY: &str = "INR";

/// A `upi://pay?pa=<upiId>&pn=<displayName>&cu=INR` payment link.
///
/// Encoded into the QR code and also usable directly as a link that hands
/// the payment to an installed UPI app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentUri {
    payee_address: UpiId,
    payee_name: String,
}

impl PaymentUri {
    pub fn new(payee_address: UpiId, payee_name: impl Into<String>) -> Self {
        Self {
            payee_address,
            payee_name: payee_name.into(),
        }
    }

    pub fn payee_address(&self) -> &UpiId {
        &self.payee_address
    }

    pub fn payee_name(&self) -> &str {
        &self.payee_name
    }
}

impl fmt::Display for PaymentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pa` goes out verbatim: UPI apps expect the literal `@`.
        write!(
            f,
            "upi://pay?pa={}&pn={}&cu={}",
            self.payee_address,
            urlencoding::encode(&self.payee_name),
            CURRENCY
        )
    }
}
