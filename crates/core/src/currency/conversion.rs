//! Currency conversion and redenomination.
//!
//! CRITICAL: Rounding policy for currency values:
//! - Results are truncated toward zero at the target divisibility, never floored
//!   and never rounded to nearest
//! - Market-rate conversions truncate silently; they are approximate by nature
//! - Value-preserving operations (unit rate, divisibility adjustment) refuse to
//!   drop non-zero digits
//!
//! All arithmetic is on arbitrary-precision integers. The amount never passes
//! through a float.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use tracing::{debug, warn};

use super::definition::CurrencyDefinition;
use super::error::CurrencyError;
use super::rate::ExchangeRate;
use super::value::CurrencyValue;

/// Largest power of ten a single rescale may multiply by.
///
/// Divisibilities and rate exponents come from peers and operators, and a
/// factor of `10^n` costs memory linear in `n`. Scaling down never needs the
/// factor once it exceeds the amount, so only growth is capped.
pub const MAX_RESCALE: u64 = 4096;

/// Returns `10^exp`. Callers keep `exp` bounded.
pub(crate) fn pow10(exp: u64) -> BigInt {
    let exp = usize::try_from(exp).unwrap_or(usize::MAX);
    num_traits::pow(BigInt::from(10u8), exp)
}

/// Returns true if `10^exp` exceeds `|amount|`.
pub(crate) fn exceeds_magnitude(amount: &BigInt, exp: u64) -> bool {
    // 10^exp > 2^exp >= 2^bits > |amount|
    exp > amount.bits() || pow10(exp) > amount.abs()
}

/// An integer re-expressed at a new decimal scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rescaled {
    /// The amount at the new scale, truncated toward zero.
    pub amount: BigInt,
    /// False if truncation dropped non-zero digits.
    pub exact: bool,
}

/// Re-expresses `amount * 10^-from_scale` as an integer count of
/// `10^-to_scale` units, truncating toward zero.
///
/// Fails with [`CurrencyError::ScaleOutOfRange`] when scaling up by more than
/// [`MAX_RESCALE`] digits.
pub(crate) fn rescale(
    amount: &BigInt,
    from_scale: i64,
    to_scale: i64,
) -> Result<Rescaled, CurrencyError> {
    let gap = to_scale.abs_diff(from_scale);

    if to_scale >= from_scale {
        if amount.is_zero() {
            return Ok(Rescaled {
                amount: BigInt::zero(),
                exact: true,
            });
        }
        if gap > MAX_RESCALE {
            return Err(CurrencyError::ScaleOutOfRange(gap));
        }
        return Ok(Rescaled {
            amount: amount * pow10(gap),
            exact: true,
        });
    }

    if exceeds_magnitude(amount, gap) {
        return Ok(Rescaled {
            amount: BigInt::zero(),
            exact: amount.is_zero(),
        });
    }

    let divisor = pow10(gap);
    // BigInt division truncates toward zero and the remainder takes the sign
    // of the dividend.
    let quotient = amount / &divisor;
    let remainder = amount % &divisor;
    Ok(Rescaled {
        amount: quotient,
        exact: remainder.is_zero(),
    })
}

impl CurrencyValue {
    /// Converts into `target` at `rate` target units per source unit.
    ///
    /// See [`CurrencyValue::convert_to_rate`].
    ///
    /// # Errors
    ///
    /// - [`CurrencyError::UnknownCurrency`] if `target` is the nil definition.
    /// - [`CurrencyError::DivisibilityNonPositive`] if `target` has zero
    ///   divisibility.
    /// - [`CurrencyError::InvalidSourceValue`] if `self` is not valid.
    /// - [`CurrencyError::InvalidRate`] if `rate` is not a positive finite number.
    /// - [`CurrencyError::InsufficientPrecision`] if `rate` is exactly one and
    ///   the result would drop non-zero digits.
    /// - [`CurrencyError::ScaleOutOfRange`] if the result would need more than
    ///   [`MAX_RESCALE`] extra digits.
    pub fn convert_to(&self, target: &CurrencyDefinition, rate: f64) -> Result<Self, CurrencyError> {
        self.check_conversion(target)?;
        let rate = ExchangeRate::try_from(rate)?;
        self.convert_checked(target, &rate)
    }

    /// Converts into `target` at an exact decimal rate.
    ///
    /// The result is `truncate(amount * rate * 10^(target_div - source_div))`,
    /// truncated toward zero, and carries `target` exactly as given.
    ///
    /// A unit rate is a redenomination, not a market conversion: it must
    /// preserve value, so dropping non-zero digits is an error. At any other
    /// rate truncation is expected and the truncated result is returned.
    ///
    /// # Errors
    ///
    /// Same as [`CurrencyValue::convert_to`], minus the rate checks already
    /// enforced by [`ExchangeRate`].
    pub fn convert_to_rate(
        &self,
        target: &CurrencyDefinition,
        rate: &ExchangeRate,
    ) -> Result<Self, CurrencyError> {
        self.check_conversion(target)?;
        self.convert_checked(target, rate)
    }

    /// Re-expresses the value at `divisibility` without changing its currency
    /// or its real value.
    ///
    /// Scaling up is always exact. Scaling down succeeds only when the digits
    /// below the new divisibility are all zero.
    ///
    /// # Errors
    ///
    /// - Any error from [`CurrencyValue::valid`] on `self`.
    /// - [`CurrencyError::DivisibilityNonPositive`] if `divisibility` is zero.
    /// - [`CurrencyError::InsufficientPrecision`] if scaling down would drop
    ///   non-zero digits.
    /// - [`CurrencyError::ScaleOutOfRange`] if scaling up by more than
    ///   [`MAX_RESCALE`] digits.
    pub fn adjust_divisibility(&self, divisibility: u32) -> Result<Self, CurrencyError> {
        self.valid()?;
        if divisibility == self.currency.divisibility {
            return Ok(self.clone());
        }
        let target = self.currency.with_divisibility(divisibility);
        target.valid()?;

        self.convert_checked(&target, &ExchangeRate::unit())
    }

    fn check_conversion(&self, target: &CurrencyDefinition) -> Result<(), CurrencyError> {
        if target.is_nil() {
            return Err(CurrencyError::UnknownCurrency(target.code.to_string()));
        }
        target.valid()?;
        self.valid()
            .map_err(|err| CurrencyError::InvalidSourceValue(Box::new(err)))
    }

    /// Conversion arithmetic; `self` and `target` have already been checked.
    fn convert_checked(
        &self,
        target: &CurrencyDefinition,
        rate: &ExchangeRate,
    ) -> Result<Self, CurrencyError> {
        let amount = self.amount.as_ref().ok_or(CurrencyError::AmountInvalid)?;

        let (rate_mantissa, rate_scale) = rate.to_scaled_integer();
        let product = amount * rate_mantissa;
        let product_scale = i64::from(self.currency.divisibility).saturating_add(rate_scale);
        let rescaled = rescale(&product, product_scale, i64::from(target.divisibility))?;

        if !rescaled.exact {
            if rate.is_unit() {
                warn!(
                    from = %self,
                    to = %target,
                    "refusing redenomination that would drop non-zero digits"
                );
                return Err(CurrencyError::InsufficientPrecision);
            }
            debug!(
                from = %self,
                to = %target,
                rate = %rate,
                truncated = %rescaled.amount,
                "conversion truncated toward zero"
            );
        }

        Ok(Self {
            amount: Some(rescaled.amount),
            currency: target.clone(),
        })
    }
}
