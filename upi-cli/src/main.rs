//! UPI CLI
//!
//! Command-line front end for the UPI ID generator:
//! - one-shot validation and generation
//! - saved card management
//! - an interactive session with debounced validation

mod clipboard;
mod config;
mod render;
mod session;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use upi_core::{GenerationOrchestrator, SavedCardService};
use upi_repo::{Store, build_store};
use upi_types::{
    CardNetwork, CardNumber, DomainError, FieldReport, MobileNumber, PaymentCodeRenderer,
    PaymentUri, SaveCardRequest, SavedCard, SavedCardView, UpiId, classify_network,
};

use crate::clipboard::Osc52Clipboard;
use crate::config::Config;
use crate::render::{SvgQr, TerminalQr};
use crate::session::Session;

#[derive(Parser)]
#[command(name = "upi")]
#[command(author, version, about = "Generate UPI IDs for paying credit card bills", long_about = None)]
struct Cli {
    /// Saved card store: a JSON file path, `sqlite://...` or `memory`
    #[arg(long, env = "UPI_STORE_URL")]
    store: Option<String>,

    /// Payee name used in payment links (defaults to the bank)
    #[arg(long, env = "UPI_PAYEE_NAME")]
    payee_name: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a mobile or card number
    Validate {
        #[command(subcommand)]
        field: ValidateCommands,
    },
    /// Show the card network for a card number
    Network {
        /// Card number (digits)
        card: String,
    },
    /// Generate the UPI ID for a card
    Generate {
        /// 10-digit mobile number linked to the card
        #[arg(long)]
        mobile: String,
        /// Card number (digits)
        #[arg(long)]
        card: String,
        /// Issuing bank
        #[arg(long, default_value = "ICICI")]
        bank: String,
        /// Print a QR code for the payment link
        #[arg(long)]
        qr: bool,
        /// Write the QR code as SVG to this path
        #[arg(long)]
        qr_svg: Option<PathBuf>,
        /// Copy the UPI ID to the clipboard
        #[arg(long)]
        copy: bool,
        /// Save the card under this name
        #[arg(long)]
        save: Option<String>,
    },
    /// Build a payment link for any UPI ID
    Uri {
        /// UPI ID (handle@provider)
        upi_id: String,
        /// Payee name (defaults to the configured payee, then the provider)
        #[arg(long)]
        name: Option<String>,
    },
    /// List the selectable banks
    Banks,
    /// Saved card operations
    Cards {
        #[command(subcommand)]
        action: CardCommands,
    },
    /// Interactive session
    Session,
}

#[derive(Subcommand)]
enum ValidateCommands {
    /// Validate a mobile number
    Mobile { number: String },
    /// Validate a card number (Luhn)
    Card { number: String },
}

#[derive(Subcommand)]
enum CardCommands {
    /// List saved cards
    List {
        /// Show full card numbers
        #[arg(long)]
        full: bool,
    },
    /// Show a saved card with its payment link
    Use {
        /// Position in `cards list` (from 1)
        index: usize,
    },
    /// Delete a saved card
    Remove {
        /// Position in `cards list` (from 1)
        index: usize,
    },
    /// Delete every saved card
    Clear,
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,upi=info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn open_cards(config: &Config) -> Result<SavedCardService<Store>> {
    let store = build_store(&config.store_url).await?;
    tracing::debug!(store = store.kind(), url = %config.store_url, "Store opened");
    Ok(SavedCardService::load(store).await)
}

fn saved_card<'a>(
    cards: &'a SavedCardService<Store>,
    index: usize,
) -> Result<&'a SavedCard> {
    index
        .checked_sub(1)
        .and_then(|i| cards.list().get(i))
        .ok_or_else(|| anyhow::anyhow!("No saved card #{}", index))
}

fn field_report<T>(
    input: String,
    network: Option<CardNetwork>,
    result: Result<T, DomainError>,
) -> FieldReport {
    FieldReport {
        input,
        valid: result.is_ok(),
        network,
        error: result.err().map(|e| e.to_string()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut config = Config::from_env()?;
    if let Some(store) = cli.store {
        config.store_url = store;
    }
    if cli.payee_name.is_some() {
        config.payee_name = cli.payee_name;
    }
    let plan = config.numbering_plan()?;

    match cli.command {
        Commands::Validate { field } => {
            let report = match field {
                ValidateCommands::Mobile { number } => {
                    let result = MobileNumber::parse(&number, &plan);
                    field_report(number, None, result)
                }
                ValidateCommands::Card { number } => {
                    let network = Some(classify_network(&number)).filter(|n| n.is_known());
                    let result = CardNumber::parse(&number);
                    field_report(number, network, result)
                }
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.valid {
                std::process::exit(1);
            }
        }

        Commands::Network { card } => {
            println!("{}", classify_network(&card).display_name());
        }

        Commands::Generate {
            mobile,
            card,
            bank,
            qr,
            qr_svg,
            copy,
            save,
        } => {
            let bank = config.find_bank(&bank).cloned().ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown bank: {}. Configured: {}",
                    bank,
                    config
                        .banks
                        .iter()
                        .map(|b| b.code())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })?;

            let now = Instant::now();
            let mut form = GenerationOrchestrator::with_debounce(plan, config.debounce);
            if !form.set_mobile(&mobile, now) {
                anyhow::bail!("Mobile number can only contain digits");
            }
            if !form.set_card(&card, now) {
                anyhow::bail!("Card number can only contain digits");
            }
            form.select_bank(bank);
            form.generate()?;

            let report = form
                .report(config.payee_name.as_deref())
                .ok_or_else(|| anyhow::anyhow!("No UPI ID was generated"))?;
            println!("{}", serde_json::to_string_pretty(&report)?);

            if let Some(uri) = form.payment_uri(config.payee_name.as_deref()) {
                if qr {
                    println!("{}", TerminalQr.render(&uri)?);
                }
                if let Some(path) = qr_svg {
                    SvgQr::default().write_to(&uri, &path)?;
                    println!("✓ QR code written to {}", path.display());
                }
            }

            if copy {
                if form.copy_upi_id(&Osc52Clipboard::stdout(), now) {
                    println!("✓ Copied to clipboard");
                } else {
                    tracing::warn!("Clipboard is not available; copy the UPI ID manually");
                }
            }

            if let Some(name) = save {
                let mut cards = open_cards(&config).await?;
                let saved = cards
                    .save(SaveCardRequest {
                        name,
                        card_number: form.card().to_string(),
                        upi_id: report.upi_id.to_string(),
                        bank: form.bank().clone(),
                    })
                    .await?;
                println!("✓ Card saved as \"{}\"", saved.name);
            }
        }

        Commands::Uri { upi_id, name } => {
            let upi_id = UpiId::new(upi_id);
            let name = name
                .or(config.payee_name)
                .or_else(|| upi_id.provider().map(str::to_string))
                .unwrap_or_else(|| "UPI".to_string());
            println!("{}", PaymentUri::new(upi_id, name));
        }

        Commands::Banks => {
            for bank in &config.banks {
                println!("{}", bank);
            }
        }

        Commands::Cards { action } => {
            let mut cards = open_cards(&config).await?;
            match action {
                CardCommands::List { full } => {
                    let views: Vec<SavedCardView> = cards
                        .list()
                        .iter()
                        .map(|c| SavedCardView::from_card(c, full))
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&views)?);
                }
                CardCommands::Use { index } => {
                    let card = saved_card(&cards, index)?.clone();
                    let mut form = GenerationOrchestrator::with_debounce(plan, config.debounce);
                    if !form.accept_saved(&card) {
                        tracing::warn!(
                            upi_id = %card.upi_id,
                            "Mobile number cannot be recovered from this UPI ID"
                        );
                    }
                    let report = form
                        .report(config.payee_name.as_deref())
                        .ok_or_else(|| anyhow::anyhow!("Saved card has no UPI ID"))?;
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                CardCommands::Remove { index } => {
                    let id = saved_card(&cards, index)?.id;
                    let removed = cards.remove(id).await?;
                    println!("✓ Removed \"{}\"", removed.name);
                }
                CardCommands::Clear => {
                    let removed = cards.clear().await?;
                    println!("✓ Cleared {} saved card(s)", removed);
                }
            }
        }

        Commands::Session => {
            let cards = open_cards(&config).await?;
            let form = GenerationOrchestrator::with_debounce(plan, config.debounce);
            Session::new(
                form,
                cards,
                Osc52Clipboard::stdout(),
                config.banks,
                config.payee_name,
            )
            .run()
            .await?;
        }
    }

    Ok(())
}
