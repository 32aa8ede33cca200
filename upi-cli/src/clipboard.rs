//! Terminal clipboard through the OSC 52 escape sequence.

use std::cell::RefCell;
use std::io::{self, IsTerminal, Write};

use base64::Engine;
use tracing::debug;
use upi_types::Clipboard;

/// Asks the terminal emulator to place text on the system clipboard.
///
/// Works over SSH and inside tmux when the terminal allows OSC 52. There is
/// no acknowledgement, so a successful write is the best signal available.
pub struct Osc52Clipboard<W: Write> {
    out: RefCell<W>,
    enabled: bool,
}

impl Osc52Clipboard<io::Stdout> {
    /// Writes to stdout, but only when stdout is a terminal.
    pub fn stdout() -> Self {
        let out = io::stdout();
        let enabled = out.is_terminal();
        Self {
            enabled,
            ..Self::with_writer(out)
        }
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out: RefCell::new(out),
            enabled: true,
        }
    }
}

/// Builds the escape sequence carrying `text`.
pub fn osc52_sequence(text: &str) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(text);
    format!("\x1b]52;c;{}\x07", payload)
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn copy(&self, text: &str) -> bool {
        if !self.enabled {
            debug!("Clipboard unavailable: output is not a terminal");
            return false;
        }
        let mut out = self.out.borrow_mut();
        let written = out
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|_| out.flush());
        if let Err(e) = &written {
            debug!(error = %e, "Clipboard write failed");
        }
        written.is_ok()
    }
}
