//! Command line arguments.

use agora_core::currency::ExchangeRate;
use clap::{Parser, Subcommand};

/// Inspect, convert and redenominate currency values.
#[derive(Debug, Parser)]
#[command(name = "agora-currency", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Validates a value and prints it with its currency.
    Show {
        /// Amount in smallest units, e.g. `12345` for 123.45 USD.
        #[arg(allow_negative_numbers = true)]
        amount: String,
        /// Currency code.
        code: String,
    },
    /// Converts a value into another currency at a given rate.
    Convert {
        /// Amount in smallest units of the source currency.
        #[arg(allow_negative_numbers = true)]
        amount: String,
        /// Source currency code.
        from: String,
        /// Target currency code.
        to: String,
        /// Target display units per source display unit.
        #[arg(long)]
        rate: ExchangeRate,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Re-expresses a value at another divisibility without losing digits.
    Adjust {
        /// Amount in smallest units.
        #[arg(allow_negative_numbers = true)]
        amount: String,
        /// Currency code.
        code: String,
        /// Target divisibility.
        divisibility: u32,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Lists the known currencies.
    Currencies {
        /// Print the list as JSON.
        #[arg(long)]
        json: bool,
    },
}
