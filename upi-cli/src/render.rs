//! QR rendering of payment links.

use std::path::Path;

use qrcode::QrCode;
use qrcode::render::{svg, unicode};
use upi_types::{PaymentCodeRenderer, PaymentUri, RenderError};

fn encode(uri: &PaymentUri) -> Result<QrCode, RenderError> {
    QrCode::new(uri.to_string()).map_err(|e| RenderError::Encode(e.to_string()))
}

/// Draws the code with unicode half blocks, two modules per character row.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalQr;

impl PaymentCodeRenderer for TerminalQr {
    fn render(&self, uri: &PaymentUri) -> Result<String, RenderError> {
        let code = encode(uri)?;
        // Dark terminals: swap colours so the code reads as dark-on-light.
        Ok(code
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .quiet_zone(true)
            .build())
    }
}

/// Produces a standalone SVG document.
#[derive(Debug, Clone, Copy)]
pub struct SvgQr {
    pub min_size: u32,
}

impl Default for SvgQr {
    fn default() -> Self {
        Self { min_size: 256 }
    }
}

impl SvgQr {
    /// Renders and writes the SVG to `path`.
    pub fn write_to(&self, uri: &PaymentUri, path: &Path) -> Result<(), RenderError> {
        let svg = self.render(uri)?;
        std::fs::write(path, svg).map_err(|e| RenderError::Io(e.to_string()))
    }
}

impl PaymentCodeRenderer for SvgQr {
    fn render(&self, uri: &PaymentUri) -> Result<String, RenderError> {
        let code = encode(uri)?;
        Ok(code
            .render::<svg::Color<'_>>()
            .min_dimensions(self.min_size, self.min_size)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use upi_types::UpiId;

    fn uri() -> PaymentUri {
        PaymentUri::new(UpiId::new("ccpay.98765432101111@icici"), "ICICI")
    }

    #[test]
    fn test_terminal_render_is_square_block() {
        let art = TerminalQr.render(&uri()).unwrap();
        let lines: Vec<&str> = art.lines().collect();

        assert!(lines.len() > 10);
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn test_svg_render() {
        let svg = SvgQr::default().render(&uri()).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("#000000"));
    }

    #[test]
    fn test_svg_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code.svg");

        SvgQr::default().write_to(&uri(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<svg"));
    }

    #[test]
    fn test_unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("code.svg");

        let result = SvgQr::default().write_to(&uri(), &path);

        assert!(matches!(result, Err(RenderError::Io(_))));
    }
}
