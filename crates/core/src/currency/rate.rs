//! Exchange rates as exact decimals.
//!
//! Market rates arrive as `f64`. Multiplying an arbitrary-size amount by a
//! float would squeeze the amount through 53 bits of mantissa, so the rate is
//! first turned into an exact decimal and all arithmetic stays in integers.
//!
//! The float is read through its shortest round-trip decimal rendering: `0.3`
//! becomes exactly `3/10`, not the binary neighbour `0.29999999999999998889...`.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use super::error::CurrencyError;

/// A strictly positive multiplicative factor converting one currency's
/// display units into another's (1 source unit = `rate` target units).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRate(BigDecimal);

impl ExchangeRate {
    /// Creates a rate from an exact decimal.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::InvalidRate`] if `rate` is zero or negative.
    pub fn new(rate: BigDecimal) -> Result<Self, CurrencyError> {
        if !rate.is_positive() {
            return Err(CurrencyError::InvalidRate(render(&rate)));
        }
        Ok(Self(rate.normalized()))
    }

    /// The unit rate, used for pure redenomination.
    #[must_use]
    pub fn unit() -> Self {
        Self(BigDecimal::one())
    }

    /// Returns true if the rate is exactly one.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        // The decimal is kept normalized, so one is exactly (1, 0).
        let (mantissa, scale) = self.to_scaled_integer();
        scale == 0 && mantissa.is_one()
    }

    /// Returns the rate as an exact decimal.
    #[must_use]
    pub fn as_decimal(&self) -> &BigDecimal {
        &self.0
    }

    /// Returns the rate as `mantissa * 10^-scale`.
    ///
    /// The scale may be negative for large whole-number rates.
    #[must_use]
    pub(crate) fn to_scaled_integer(&self) -> (BigInt, i64) {
        self.0.as_bigint_and_exponent()
    }
}

impl TryFrom<f64> for ExchangeRate {
    type Error = CurrencyError;

    fn try_from(rate: f64) -> Result<Self, Self::Error> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(CurrencyError::InvalidRate(rate.to_string()));
        }
        // `Display` for f64 is the shortest string that round-trips and never
        // uses exponent notation.
        let decimal = BigDecimal::from_str(&rate.to_string())
            .map_err(|_| CurrencyError::InvalidRate(rate.to_string()))?;
        if decimal.is_zero() {
            return Err(CurrencyError::InvalidRate(rate.to_string()));
        }
        Self::new(decimal)
    }
}

impl FromStr for ExchangeRate {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal =
            BigDecimal::from_str(s.trim()).map_err(|_| CurrencyError::InvalidRate(s.to_string()))?;
        Self::new(decimal)
    }
}

/// Exponent magnitude above which rates are shown in scientific notation.
const PLAIN_EXPONENT_LIMIT: u64 = 64;

fn render(decimal: &BigDecimal) -> String {
    let (_, scale) = decimal.as_bigint_and_exponent();
    if scale.unsigned_abs() > PLAIN_EXPONENT_LIMIT {
        decimal.to_scientific_notation()
    } else {
        decimal.to_plain_string()
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.0))
    }
}
