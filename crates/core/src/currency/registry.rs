//! Currency definition lookup by code.
//!
//! The engine never reaches for a process-wide table. Call sites hand it a
//! [`CurrencyLookup`], which is read-only once built and can be shared across
//! threads without locking.

use std::collections::BTreeMap;
use std::sync::Arc;

use agora_shared::AppError;
use agora_shared::config::CurrenciesConfig;
use tracing::debug;

use super::definition::{CurrencyCode, CurrencyDefinition, CurrencyType};
use super::error::CurrencyError;

/// Read-only access to currency definitions by code.
pub trait CurrencyLookup {
    /// Returns the definition for `code`, compared case-insensitively.
    ///
    /// The empty code never resolves.
    fn lookup(&self, code: &str) -> Option<&CurrencyDefinition>;
}

impl<T: CurrencyLookup + ?Sized> CurrencyLookup for &T {
    fn lookup(&self, code: &str) -> Option<&CurrencyDefinition> {
        (**self).lookup(code)
    }
}

impl<T: CurrencyLookup + ?Sized> CurrencyLookup for Arc<T> {
    fn lookup(&self, code: &str) -> Option<&CurrencyDefinition> {
        (**self).lookup(code)
    }
}

/// Built-in definitions: (name, code, divisibility, type).
const WELL_KNOWN: &[(&str, &str, u32, CurrencyType)] = &[
    ("United States Dollar", "USD", 2, CurrencyType::Fiat),
    ("Euro", "EUR", 2, CurrencyType::Fiat),
    ("Pound Sterling", "GBP", 2, CurrencyType::Fiat),
    ("Canadian Dollar", "CAD", 2, CurrencyType::Fiat),
    ("Australian Dollar", "AUD", 2, CurrencyType::Fiat),
    ("Swiss Franc", "CHF", 2, CurrencyType::Fiat),
    ("Bitcoin", "BTC", 8, CurrencyType::Crypto),
    ("Bitcoin Cash", "BCH", 8, CurrencyType::Crypto),
    ("Litecoin", "LTC", 8, CurrencyType::Crypto),
    ("Zcash", "ZEC", 8, CurrencyType::Crypto),
    ("Ethereum", "ETH", 18, CurrencyType::Crypto),
];

/// In-memory currency dictionary keyed by canonical code.
#[derive(Debug, Clone, Default)]
pub struct CurrencyDictionary {
    definitions: BTreeMap<CurrencyCode, CurrencyDefinition>,
}

impl CurrencyDictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dictionary holding the built-in fiat and crypto definitions.
    #[must_use]
    pub fn well_known() -> Self {
        let definitions = WELL_KNOWN
            .iter()
            .map(|&(name, code, divisibility, currency_type)| {
                let definition = CurrencyDefinition::new(name, code, divisibility, currency_type);
                (definition.code.clone(), definition)
            })
            .collect();
        Self { definitions }
    }

    /// Creates a dictionary from `definitions`. Later entries replace earlier
    /// ones with the same code.
    ///
    /// # Errors
    ///
    /// Returns the validity error of the first definition that cannot
    /// denominate money.
    pub fn from_definitions<I>(definitions: I) -> Result<Self, CurrencyError>
    where
        I: IntoIterator<Item = CurrencyDefinition>,
    {
        let mut dictionary = Self::new();
        for definition in definitions {
            dictionary.insert(definition)?;
        }
        Ok(dictionary)
    }

    /// Builds the dictionary described by configuration: the built-in
    /// definitions (unless disabled) overlaid with the configured ones.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an unknown currency type or a
    /// definition that cannot denominate money.
    pub fn from_config(config: &CurrenciesConfig) -> Result<Self, AppError> {
        let mut dictionary = if config.include_well_known {
            Self::well_known()
        } else {
            Self::new()
        };

        for entry in &config.definitions {
            let currency_type = entry
                .currency_type
                .as_deref()
                .map(str::parse::<CurrencyType>)
                .transpose()
                .map_err(|err| AppError::Validation(format!("{}: {err}", entry.code)))?;
            let definition = CurrencyDefinition {
                name: entry.name.clone(),
                code: CurrencyCode::new(&entry.code),
                divisibility: entry.divisibility,
                currency_type,
            };
            if let Some(previous) = dictionary.insert(definition)? {
                debug!(code = %previous.code, "configured currency replaces built-in definition");
            }
        }

        Ok(dictionary)
    }

    /// Adds `definition`, returning the definition it replaced.
    ///
    /// # Errors
    ///
    /// Returns the validity error if `definition` cannot denominate money.
    pub fn insert(
        &mut self,
        definition: CurrencyDefinition,
    ) -> Result<Option<CurrencyDefinition>, CurrencyError> {
        definition.valid()?;
        Ok(self
            .definitions
            .insert(definition.code.clone(), definition))
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns true if the dictionary holds no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterates definitions in code order.
    pub fn iter(&self) -> impl Iterator<Item = &CurrencyDefinition> {
        self.definitions.values()
    }
}

impl CurrencyLookup for CurrencyDictionary {
    fn lookup(&self, code: &str) -> Option<&CurrencyDefinition> {
        let code = CurrencyCode::new(code);
        if code.is_empty() {
            return None;
        }
        self.definitions.get(&code)
    }
}
