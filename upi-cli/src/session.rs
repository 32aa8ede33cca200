//! Interactive session: a line-based front end over the orchestrator.
//!
//! Debounce timers run against the wall clock. The loop sleeps until the
//! orchestrator's next deadline or the next input line, whichever comes
//! first.

use std::time::Instant;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use upi_core::feedback::SAVE_CONFIRMATION;
use upi_core::{GenerationOrchestrator, Phase, SavedCardService, TransientFlag};
use upi_types::{
    Bank, CardNetwork, CardStore, Clipboard, NumberingPlan, PaymentCodeRenderer, SaveCardRequest,
};

use crate::config::find_bank;
use crate::render::TerminalQr;

pub const HELP: &str = "\
Commands:
  mobile <digits>   set the mobile number
  card <digits>     set the card number (spaces are ignored)
  bank <name>       choose the bank
  generate          generate the UPI ID
  copy              copy the UPI ID to the clipboard
  qr                show the payment QR code
  save <name>       save the card under a name
  saved             list saved cards
  use <n>           load saved card n
  remove <n>        delete saved card n
  status            show the form
  help              show this text
  quit              leave";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mobile(String),
    Card(String),
    Bank(String),
    Generate,
    Copy,
    Qr,
    Save(String),
    Saved,
    Use(usize),
    Remove(usize),
    Status,
    Help,
    Quit,
}

/// Parses a line. Blank lines are `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let index = |what: &str| -> Result<usize, String> {
        rest.parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| format!("Usage: {what} <n> (see `saved`)"))
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "mobile" | "m" => Command::Mobile(rest.to_string()),
        "card" | "c" => Command::Card(rest.split_whitespace().collect()),
        "bank" | "b" => Command::Bank(rest.to_string()),
        "generate" | "gen" | "g" => Command::Generate,
        "copy" => Command::Copy,
        "qr" => Command::Qr,
        "save" => Command::Save(rest.to_string()),
        "saved" | "cards" => Command::Saved,
        "use" => Command::Use(index("use")?),
        "remove" | "rm" => Command::Remove(index("remove")?),
        "status" | "s" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("Unknown command `{other}`. Type `help`.")),
    };
    Ok(Some(command))
}

/// Form state plus the saved cards, driven by commands.
pub struct Session<P: NumberingPlan, S: CardStore, C: Clipboard> {
    form: GenerationOrchestrator<P>,
    cards: SavedCardService<S>,
    clipboard: C,
    banks: Vec<Bank>,
    payee_name: Option<String>,
    saved: TransientFlag,
}

impl<P: NumberingPlan, S: CardStore, C: Clipboard> Session<P, S, C> {
    pub fn new(
        form: GenerationOrchestrator<P>,
        cards: SavedCardService<S>,
        clipboard: C,
        banks: Vec<Bank>,
        payee_name: Option<String>,
    ) -> Self {
        Self {
            form,
            cards,
            clipboard,
            banks,
            payee_name,
            saved: TransientFlag::new(SAVE_CONFIRMATION),
        }
    }

    /// Reads commands from stdin until `quit` or end of input.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        println!("{HELP}");

        loop {
            let deadline = self.form.next_deadline();
            let wake = tokio::time::Instant::from_std(deadline.unwrap_or_else(Instant::now));

            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match parse_command(&line) {
                        Ok(Some(Command::Quit)) => break,
                        Ok(Some(command)) => {
                            for out in self.handle(command, Instant::now()).await {
                                println!("{out}");
                            }
                        }
                        Ok(None) => {}
                        Err(msg) => println!("{msg}"),
                    }
                }
                _ = tokio::time::sleep_until(wake), if deadline.is_some() => {
                    for out in self.settle(Instant::now()) {
                        println!("{out}");
                    }
                }
            }
        }

        debug!("Session ended");
        Ok(())
    }

    /// Fires due timers and reports the field errors that are now visible.
    pub fn settle(&mut self, now: Instant) -> Vec<String> {
        self.form.settle(now);
        let mut out = Vec::new();
        if let Some(e) = self.form.mobile_error() {
            out.push(format!("Mobile: {e}"));
        }
        if let Some(e) = self.form.card_error() {
            out.push(format!("Card: {e}"));
        }
        if out.is_empty() && self.form.phase() == Phase::Ready {
            out.push("Ready. Type `generate`.".to_string());
        }
        out
    }

    /// Applies one command and returns the lines to show.
    pub async fn handle(&mut self, command: Command, now: Instant) -> Vec<String> {
        match command {
            Command::Mobile(value) => {
                if self.form.set_mobile(&value, now) {
                    Vec::new()
                } else {
                    vec!["Mobile number can only contain digits.".to_string()]
                }
            }
            Command::Card(value) => {
                if !self.form.set_card(&value, now) {
                    return vec!["Card number can only contain digits.".to_string()];
                }
                match self.form.network() {
                    CardNetwork::None => Vec::new(),
                    network => vec![format!("Network: {}", network.display_name())],
                }
            }
            Command::Bank(name) => match find_bank(&self.banks, &name).cloned() {
                Some(bank) => {
                    self.form.select_bank(bank);
                    vec![format!("Bank: {}", self.form.bank())]
                }
                None => vec![format!(
                    "Unknown bank `{}`. Choose one of: {}",
                    name,
                    self.bank_list()
                )],
            },
            Command::Generate => match self.form.generate() {
                Ok(_) => self.generated_lines(),
                Err(e) => vec![e.to_string()],
            },
            Command::Copy => {
                if self.form.upi_id().is_none() {
                    vec!["Generate a UPI ID first.".to_string()]
                } else if self.form.copy_upi_id(&self.clipboard, now) {
                    vec!["Copied!".to_string()]
                } else {
                    vec!["Could not reach the clipboard; copy the ID above by hand.".to_string()]
                }
            }
            Command::Qr => match self.form.payment_uri(self.payee_name.as_deref()) {
                Some(uri) => match TerminalQr.render(&uri) {
                    Ok(art) => vec![art, uri.to_string()],
                    Err(e) => vec![e.to_string()],
                },
                None => vec!["Generate a UPI ID first.".to_string()],
            },
            Command::Save(name) => {
                let req = SaveCardRequest {
                    name,
                    card_number: self.form.card().to_string(),
                    upi_id: self
                        .form
                        .upi_id()
                        .map(|id| id.as_str().to_string())
                        .unwrap_or_default(),
                    bank: self.form.bank().clone(),
                };
                match self.cards.save(req).await {
                    Ok(_) => {
                        self.saved.raise(now);
                        vec!["Card saved successfully!".to_string()]
                    }
                    Err(e) => vec![e.to_string()],
                }
            }
            Command::Saved => self.saved_lines(),
            Command::Use(n) => {
                let Some(card) = self.cards.list().get(n - 1).cloned() else {
                    return vec![format!("No saved card #{n}.")];
                };
                let recovered = self.form.accept_saved(&card);
                let mut out = vec![format!("Loaded \"{}\".", card.name)];
                if !recovered {
                    out.push("The mobile number could not be read back from this UPI ID.".into());
                }
                out.extend(self.generated_lines());
                out
            }
            Command::Remove(n) => {
                let Some(id) = self.cards.list().get(n - 1).map(|c| c.id) else {
                    return vec![format!("No saved card #{n}.")];
                };
                match self.cards.remove(id).await {
                    Ok(card) => vec![format!("Removed \"{}\".", card.name)],
                    Err(e) => vec![e.to_string()],
                }
            }
            Command::Status => self.status_lines(now),
            Command::Help => vec![HELP.to_string()],
            Command::Quit => Vec::new(),
        }
    }

    fn bank_list(&self) -> String {
        self.banks
            .iter()
            .map(Bank::code)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn generated_lines(&self) -> Vec<String> {
        let Some(report) = self.form.report(self.payee_name.as_deref()) else {
            return Vec::new();
        };
        let mut out = vec![format!("UPI ID: {}", report.upi_id)];
        if let Some(advisory) = report.advisory {
            out.push(format!("Note: {advisory}"));
        }
        out.push(format!("Pay link: {}", report.payment_uri));
        out
    }

    fn saved_lines(&self) -> Vec<String> {
        if self.cards.list().is_empty() {
            return vec!["No saved cards.".to_string()];
        }
        self.cards
            .list()
            .iter()
            .enumerate()
            .map(|(i, c)| {
                format!(
                    "{:>2}. {}  {}  {}  {}",
                    i + 1,
                    c.name,
                    c.card_number.masked_grouped(),
                    c.bank,
                    c.upi_id
                )
            })
            .collect()
    }

    fn status_lines(&self, now: Instant) -> Vec<String> {
        let field = |value: &str| {
            if value.is_empty() {
                "-".to_string()
            } else {
                value.to_string()
            }
        };

        let mut out = vec![
            format!("Mobile:  {}", field(self.form.mobile())),
            format!("Card:    {}", field(self.form.card())),
            format!("Bank:    {}", self.form.bank()),
        ];
        if self.form.network().is_known() {
            out.push(format!("Network: {}", self.form.network().display_name()));
        }
        out.push(format!("Phase:   {:?}", self.form.phase()));
        if let Some(e) = self.form.mobile_error() {
            out.push(format!("Mobile error: {e}"));
        }
        if let Some(e) = self.form.card_error() {
            out.push(format!("Card error: {e}"));
        }
        if let Some(message) = self.form.message() {
            out.push(message.to_string());
        }
        if let Some(id) = self.form.upi_id() {
            out.push(format!("UPI ID:  {id}"));
        }
        if self.form.copy_confirmed(now) {
            out.push("Copied!".to_string());
        }
        if self.saved.is_raised(now) {
            out.push("Card saved successfully!".to_string());
        }
        out
    }
}
