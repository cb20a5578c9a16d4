//! Property-based tests for currency values.
//!
//! - Serialization round-trips losslessly
//! - Equality is symmetric and invariant under redenomination
//! - Conversion truncates toward zero

use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::Signed;
use proptest::prelude::*;

use super::conversion::pow10;
use super::definition::{CurrencyDefinition, CurrencyType};
use super::error::CurrencyError;
use super::rate::ExchangeRate;
use super::value::{CurrencyValue, values_equal};

/// Strategy to generate amounts well beyond 64-bit range, either sign.
fn big_amount() -> impl Strategy<Value = BigInt> {
    "-?[1-9][0-9]{0,40}|0".prop_map(|digits| BigInt::from_str(&digits).unwrap())
}

/// Strategy to generate divisibilities (1 to 18).
fn divisibility() -> impl Strategy<Value = u32> {
    1u32..=18
}

/// Strategy to generate a currency code from a small pool so that codes
/// collide often.
fn code() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("BTC"), Just("USD"), Just("SPC")]
}

/// Strategy to generate a valid currency value.
fn valid_value() -> impl Strategy<Value = CurrencyValue> {
    (big_amount(), code(), divisibility(), any::<bool>()).prop_map(
        |(amount, code, divisibility, crypto)| {
            let currency_type = if crypto {
                CurrencyType::Crypto
            } else {
                CurrencyType::Fiat
            };
            CurrencyValue::from_amount(
                amount,
                CurrencyDefinition::new(code, code, divisibility, currency_type),
            )
        },
    )
}

/// Strategy to generate a possibly absent, possibly invalid value.
fn any_value() -> impl Strategy<Value = Option<CurrencyValue>> {
    prop_oneof![
        3 => valid_value().prop_map(Some),
        1 => Just(None),
        1 => big_amount().prop_map(|amount| Some(CurrencyValue::from_amount(amount, CurrencyDefinition::NIL))),
        1 => valid_value().prop_map(|mut value| {
            value.amount = None;
            Some(value)
        }),
    ]
}

/// Strategy to generate a positive decimal rate (mantissa, scale) other than
/// one.
fn market_rate() -> impl Strategy<Value = (u64, u32)> {
    (2u64..10_000_000, 0u32..=8)
        .prop_filter("unit rate", |&(mantissa, scale)| u128::from(mantissa) != 10u128.pow(scale))
}

fn rate_from(mantissa: u64, scale: u32) -> ExchangeRate {
    let text = if scale == 0 {
        mantissa.to_string()
    } else {
        format!("{mantissa}e-{scale}")
    };
    ExchangeRate::from_str(&text).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // =========================================================================
    // Serialization
    // =========================================================================

    /// *For any* valid value, decoding its JSON yields an identical value that
    /// is also `equal` to the original.
    #[test]
    fn prop_json_round_trip(value in valid_value()) {
        let json = serde_json::to_string(&value).unwrap();
        let decoded: CurrencyValue = serde_json::from_str(&json).unwrap();
        prop_assert!(decoded.equal(Some(&value)));
        prop_assert_eq!(decoded, value);
    }

    // =========================================================================
    // Equality
    // =========================================================================

    /// *For any* pair of possibly absent values, `equal` is symmetric.
    #[test]
    fn prop_equal_is_symmetric(a in any_value(), b in any_value()) {
        prop_assert_eq!(
            values_equal(a.as_ref(), b.as_ref()),
            values_equal(b.as_ref(), a.as_ref())
        );
    }

    /// *For any* valid value, `equal` is reflexive.
    #[test]
    fn prop_equal_is_reflexive(value in valid_value()) {
        prop_assert!(value.equal(Some(&value)));
    }

    /// *For any* valid value and larger divisibility, the redenominated copy
    /// is equal to the original and scaling back down restores it exactly.
    #[test]
    fn prop_equal_survives_redenomination(value in valid_value(), extra in 0u32..12) {
        let target = value.currency.divisibility + extra;
        let scaled = value.adjust_divisibility(target).unwrap();
        prop_assert!(scaled.equal(Some(&value)));
        prop_assert!(value.equal(Some(&scaled)));

        let restored = scaled.adjust_divisibility(value.currency.divisibility).unwrap();
        prop_assert_eq!(restored, value);
    }

    /// *For any* valid value, a unit-rate conversion to a new divisibility
    /// agrees with `adjust_divisibility`, including when both refuse.
    #[test]
    fn prop_unit_rate_matches_adjust(value in valid_value(), target in divisibility()) {
        let converted = value.convert_to(&value.currency.with_divisibility(target), 1.0);
        let adjusted = value.adjust_divisibility(target);
        match (converted, adjusted) {
            (Ok(c), Ok(a)) => prop_assert_eq!(c, a),
            (Err(c), Err(a)) => {
                prop_assert_eq!(&c, &CurrencyError::InsufficientPrecision);
                prop_assert_eq!(c, a);
            }
            (c, a) => prop_assert!(false, "convert {:?} but adjust {:?}", c, a),
        }
    }

    // =========================================================================
    // Conversion
    // =========================================================================

    /// *For any* value and market rate, converting the negated value yields the
    /// negated result. Flooring would break this for inexact results.
    #[test]
    fn prop_conversion_is_odd(
        value in valid_value(),
        (mantissa, scale) in market_rate(),
        target in divisibility(),
    ) {
        let rate = rate_from(mantissa, scale);
        let target = CurrencyDefinition::minimal("XYZ", target);

        let mut negated = value.clone();
        negated.amount = value.amount.clone().map(|a| -a);

        let forward = value.convert_to_rate(&target, &rate).unwrap();
        let backward = negated.convert_to_rate(&target, &rate).unwrap();
        prop_assert_eq!(forward.amount.map(|a| -a), backward.amount);
    }

    /// *For any* value and market rate, the result is the exact product
    /// truncated toward zero: never larger in magnitude, and less than one
    /// target unit short.
    #[test]
    fn prop_conversion_truncates_toward_zero(
        value in valid_value(),
        (mantissa, scale) in market_rate(),
        target in divisibility(),
    ) {
        let rate = rate_from(mantissa, scale);
        let target_def = CurrencyDefinition::minimal("XYZ", target);
        let result = value.convert_to_rate(&target_def, &rate).unwrap();
        let result = result.amount.unwrap();
        let source = value.amount.unwrap();

        // exact = source * mantissa * 10^(target - divisibility - scale)
        let exact_scale = i64::from(value.currency.divisibility) + i64::from(scale);
        let product = (source * BigInt::from(mantissa)).abs();
        let result = result.abs();
        let (lhs, rhs, unit) = if i64::from(target) >= exact_scale {
            let factor = pow10(i64::from(target).abs_diff(exact_scale));
            (result, product * &factor, factor)
        } else {
            let factor = pow10(exact_scale.abs_diff(i64::from(target)));
            (result * &factor, product, factor)
        };
        prop_assert!(lhs <= rhs);
        prop_assert!(rhs - lhs < unit);
    }
}
