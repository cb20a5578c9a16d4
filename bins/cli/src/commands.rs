//! Command execution.
//!
//! Every command renders its output to a `String` so the caller decides
//! where it goes.

use agora_core::currency::{CurrencyDictionary, CurrencyError, CurrencyLookup, CurrencyValue};
use tracing::debug;

use crate::error::CliError;
use crate::opt::Command;

/// Runs `command` against `registry`.
pub fn run(command: &Command, registry: &CurrencyDictionary) -> Result<String, CliError> {
    match command {
        Command::Show { amount, code } => {
            let value = CurrencyValue::with_lookup(amount, code, registry)?;
            value.valid()?;
            Ok(value.to_string())
        }
        Command::Convert {
            amount,
            from,
            to,
            rate,
            json,
        } => {
            let value = CurrencyValue::with_lookup(amount, from, registry)?;
            let target = registry
                .lookup(to)
                .ok_or_else(|| CurrencyError::UnknownCurrency(to.clone()))?;
            debug!(from = %value, to = %target, %rate, "converting");
            render(&value.convert_to_rate(target, rate)?, *json)
        }
        Command::Adjust {
            amount,
            code,
            divisibility,
            json,
        } => {
            let value = CurrencyValue::with_lookup(amount, code, registry)?;
            render(&value.adjust_divisibility(*divisibility)?, *json)
        }
        Command::Currencies { json } => {
            if *json {
                let definitions: Vec<_> = registry.iter().collect();
                return Ok(serde_json::to_string_pretty(&definitions)?);
            }
            let lines: Vec<String> = registry
                .iter()
                .map(|def| {
                    let kind = def
                        .currency_type
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_default();
                    format!(
                        "{:<6} {:>3}  {:<7} {}",
                        def.code.as_str(),
                        def.divisibility,
                        kind,
                        def.name
                    )
                    .trim_end()
                    .to_string()
                })
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

fn render(value: &CurrencyValue, json: bool) -> Result<String, CliError> {
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(value.to_string())
    }
}
