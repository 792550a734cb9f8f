//! Command-line surface.
//!
//! Argument definitions and the dispatch for each subcommand. `main.rs`
//! only loads configuration, sets up logging and calls [`run`].

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::AppConfig;
use crate::engine::{validate_bet_number_format, ResultDeclaration, Settler};
use crate::rates::RateSource;
use crate::storage;
use crate::types::{BetType, SessionResults};

#[derive(Parser, Debug)]
#[command(name = "matka", author, version, about, long_about = None)]
pub struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a bet number against the format its bet type requires.
    Validate {
        #[arg(long)]
        bet_type: String,
        #[arg(long)]
        number: String,
    },
    /// Declare a main-game session result; the digit is derived if omitted.
    Declare {
        #[arg(long)]
        pana: String,
        #[arg(long)]
        digit: Option<String>,
    },
    /// Settle pending bets against one declared result.
    Settle {
        #[arg(long)]
        bets: String,
        #[arg(long)]
        result: String,
        #[arg(long)]
        out: Option<String>,
    },
    /// Settle jodi and sangam bets against a day's open and close panas.
    SettleDay {
        #[arg(long)]
        bets: String,
        #[arg(long)]
        open: String,
        #[arg(long)]
        close: String,
        #[arg(long)]
        out: Option<String>,
    },
}

/// Run one subcommand. An `Err` means a non-zero exit status.
pub fn run(command: Command, cfg: &AppConfig) -> Result<()> {
    match command {
        Command::Validate { bet_type, number } => {
            let bet_type: BetType = bet_type.parse()?;
            let result = validate_bet_number_format(bet_type, &number);
            println!("{bet_type} {number}: {result}");
            if !result.valid {
                bail!("bet number rejected");
            }
        }
        Command::Declare { pana, digit } => {
            let declared = ResultDeclaration::Main { pana, digit }
                .declare(cfg.engine.enforce_digit_sum)?;
            println!("{}", serde_json::to_string_pretty(&declared)?);
        }
        Command::Settle { bets, result, out } => {
            let rates = cfg.rates.payout_rates()?;
            let bets = storage::load_bets(&bets)?;
            let declared = storage::load_declaration(&result)?
                .declare(cfg.engine.enforce_digit_sum)
                .with_context(|| format!("Rejected result declaration in {result}"))?;

            let report = Settler::settle(&bets, &declared, &rates);
            let path = storage::save_report(&report, out.as_deref())?;
            info!(path = %path, "{report}");
        }
        Command::SettleDay { bets, open, close, out } => {
            let rates = cfg.rates.payout_rates()?;
            let bets = storage::load_bets(&bets)?;
            let day = SessionResults::from_panas(&open, &close)?;

            let report = Settler::settle_day(&bets, &day, &rates);
            let path = storage::save_report(&report, out.as_deref())?;
            info!(path = %path, "{report}");
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
