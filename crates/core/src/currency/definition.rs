//! Currency definitions: the immutable descriptor a value is denominated in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::CurrencyError;

/// A short currency identifier such as `"USD"` or `"BTC"`.
///
/// Codes are case-insensitive and always stored in uppercase. The empty code
/// identifies the nil definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// The empty code.
    pub const EMPTY: Self = Self(String::new());

    /// Creates a code, normalizing it to uppercase.
    #[must_use]
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the empty code.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a currency is a government-issued fiat currency or a
/// cryptocurrency.
///
/// Informational only: conversion arithmetic never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyType {
    /// Fiat currency.
    Fiat,
    /// Cryptocurrency.
    Crypto,
}

impl fmt::Display for CurrencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fiat => write!(f, "fiat"),
            Self::Crypto => write!(f, "crypto"),
        }
    }
}

impl FromStr for CurrencyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fiat" => Ok(Self::Fiat),
            "crypto" => Ok(Self::Crypto),
            _ => Err(format!("Unknown currency type: {s}")),
        }
    }
}

/// Describes a currency: its display name, code, divisibility, and type.
///
/// `divisibility` is the number of decimal digits between the smallest
/// indivisible unit and one display unit (2 for cents, 8 for satoshis).
///
/// `==` compares every field. [`CurrencyDefinition::equal`] is the looser
/// comparison used when deciding whether two definitions denominate amounts
/// the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyDefinition {
    /// Human-readable name, possibly empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Canonical uppercase code.
    pub code: CurrencyCode,
    /// Decimal places between the smallest unit and one display unit.
    pub divisibility: u32,
    /// Fiat or crypto, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_type: Option<CurrencyType>,
}

/// The "no currency" sentinel: empty code, zero divisibility.
pub const NIL_CURRENCY_DEFINITION: CurrencyDefinition = CurrencyDefinition::NIL;

impl CurrencyDefinition {
    /// The "no currency" sentinel. Never valid.
    pub const NIL: Self = Self {
        name: String::new(),
        code: CurrencyCode::EMPTY,
        divisibility: 0,
        currency_type: None,
    };

    /// Creates a fully described definition.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        code: impl Into<CurrencyCode>,
        divisibility: u32,
        currency_type: CurrencyType,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            divisibility,
            currency_type: Some(currency_type),
        }
    }

    /// Creates a minimal definition carrying only a code and divisibility.
    #[must_use]
    pub fn minimal(code: impl Into<CurrencyCode>, divisibility: u32) -> Self {
        Self {
            name: String::new(),
            code: code.into(),
            divisibility,
            currency_type: None,
        }
    }

    /// Returns a copy of this definition with a different divisibility.
    #[must_use]
    pub fn with_divisibility(&self, divisibility: u32) -> Self {
        Self {
            divisibility,
            ..self.clone()
        }
    }

    /// Returns true if this is the nil definition (empty code).
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.code.is_empty()
    }

    /// Checks that this definition can denominate money.
    ///
    /// # Errors
    ///
    /// - [`CurrencyError::DefinitionUndefined`] for the nil definition.
    /// - [`CurrencyError::DivisibilityNonPositive`] when divisibility is zero.
    pub fn valid(&self) -> Result<(), CurrencyError> {
        if self.is_nil() {
            return Err(CurrencyError::DefinitionUndefined);
        }
        if self.divisibility == 0 {
            return Err(CurrencyError::DivisibilityNonPositive);
        }
        Ok(())
    }

    /// Compares code and divisibility, and the currency type when both sides
    /// declare one. Names are ignored.
    #[must_use]
    pub fn equal(&self, other: &Self) -> bool {
        if self.code != other.code || self.divisibility != other.divisibility {
            return false;
        }
        match (self.currency_type, other.currency_type) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }
}

impl fmt::Display for CurrencyDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}div{})", self.name, self.code, self.divisibility)
    }
}
