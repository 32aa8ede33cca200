//! Output ports: payment code rendering and the clipboard.

use crate::domain::PaymentUri;

/// Error type for payment code rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Payload does not fit in a QR code: {0}")]
    Encode(String),

    #[error("Failed to write rendered code: {0}")]
    Io(String),
}

/// Turns a payment link into something scannable.
pub trait PaymentCodeRenderer {
    fn render(&self, uri: &PaymentUri) -> Result<String, RenderError>;
}

/// System clipboard.
pub trait Clipboard {
    /// Copies `text`; returns whether the copy went through.
    fn copy(&self, text: &str) -> bool;
}
