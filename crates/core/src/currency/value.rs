//! Currency values: an arbitrary-precision amount in a currency's smallest
//! unit, paired with the definition that gives it meaning.
//!
//! Values are never mutated by the engine. Every transformation returns a new
//! value and leaves the receiver untouched, so a failed operation always leaves
//! the caller holding the prior value.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use super::conversion::{exceeds_magnitude, pow10};
use super::definition::CurrencyDefinition;
use super::error::CurrencyError;
use super::registry::CurrencyLookup;

/// An amount of a currency.
///
/// `amount` is denominated in the smallest unit, so the display quantity is
/// `amount / 10^currency.divisibility`. An absent amount is invalid and is not
/// the same thing as zero.
///
/// `==` compares fields exactly. Use [`CurrencyValue::equal`] to compare real
/// magnitudes across divisibilities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyValue {
    /// Amount in the smallest unit of `currency`.
    #[serde(default, with = "amount_format")]
    pub amount: Option<BigInt>,
    /// The currency the amount is denominated in.
    pub currency: CurrencyDefinition,
}

impl CurrencyValue {
    /// Parses `amount` as a base-10 integer in `currency`'s smallest unit.
    ///
    /// An empty string is zero. The definition is not checked here; call
    /// [`CurrencyValue::valid`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::Parse`] if `amount` is not an optionally signed
    /// run of decimal digits.
    pub fn new(amount: &str, currency: CurrencyDefinition) -> Result<Self, CurrencyError> {
        Ok(Self {
            amount: Some(parse_amount(amount)?),
            currency,
        })
    }

    /// Like [`CurrencyValue::new`], resolving `code` through `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::UnknownCurrency`] if `code` is empty or not
    /// known to `registry`, or [`CurrencyError::Parse`] for a malformed amount.
    pub fn with_lookup<L>(amount: &str, code: &str, registry: &L) -> Result<Self, CurrencyError>
    where
        L: CurrencyLookup + ?Sized,
    {
        let currency = registry
            .lookup(code)
            .ok_or_else(|| CurrencyError::UnknownCurrency(code.to_string()))?;
        Self::new(amount, currency.clone())
    }

    /// Creates a value from an amount already in smallest units.
    #[must_use]
    pub fn from_amount(amount: impl Into<BigInt>, currency: CurrencyDefinition) -> Self {
        Self {
            amount: Some(amount.into()),
            currency,
        }
    }

    /// Creates a zero value in `currency`.
    #[must_use]
    pub fn zero(currency: CurrencyDefinition) -> Self {
        Self::from_amount(BigInt::zero(), currency)
    }

    /// Checks the value can represent money.
    ///
    /// Checks run in order and the first failure wins.
    ///
    /// # Errors
    ///
    /// - [`CurrencyError::AmountInvalid`] when the amount is absent.
    /// - [`CurrencyError::DefinitionUndefined`] when the currency is nil.
    /// - [`CurrencyError::DivisibilityNonPositive`] when divisibility is zero.
    pub fn valid(&self) -> Result<(), CurrencyError> {
        if self.amount.is_none() {
            return Err(CurrencyError::AmountInvalid);
        }
        self.currency.valid()
    }

    /// Returns true if the amount is present and zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.as_ref().is_some_and(Zero::is_zero)
    }

    /// Decimal rendering of the amount; an absent amount renders as `"0"`.
    #[must_use]
    pub fn amount_string(&self) -> String {
        self.amount
            .as_ref()
            .map_or_else(|| "0".to_string(), ToString::to_string)
    }

    /// Compares real magnitudes.
    ///
    /// Two values are equal when their codes match and
    /// `a.amount * 10^b.divisibility == b.amount * 10^a.divisibility`. Absent
    /// values, absent amounts, and undefined currencies never compare equal,
    /// not even to themselves.
    #[must_use]
    pub fn equal(&self, other: Option<&Self>) -> bool {
        let Some(other) = other else {
            return false;
        };
        let (Some(a), Some(b)) = (self.amount.as_ref(), other.amount.as_ref()) else {
            return false;
        };
        if self.currency.is_nil() || self.currency.code != other.currency.code {
            return false;
        }
        let (da, db) = (self.currency.divisibility, other.currency.divisibility);
        if da == db {
            return a == b;
        }

        // Equal iff `fine == coarse * 10^gap`, where `fine` is the amount at
        // the larger divisibility.
        let (coarse, fine, gap) = if da < db {
            (a, b, u64::from(db - da))
        } else {
            (b, a, u64::from(da - db))
        };
        if coarse.is_zero() {
            return fine.is_zero();
        }
        if exceeds_magnitude(fine, gap) {
            return false;
        }
        coarse * pow10(gap) == *fine
    }
}

/// [`CurrencyValue::equal`] for two possibly absent values.
///
/// Symmetric, and false whenever either side is `None`.
#[must_use]
pub fn values_equal(a: Option<&CurrencyValue>, b: Option<&CurrencyValue>) -> bool {
    a.is_some_and(|a| a.equal(b))
}

impl fmt::Display for CurrencyValue {
    /// Diagnostic rendering, e.g. `"0 United States Dollar (USDdiv2)"`. Not
    /// meant to be parsed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount_string(), self.currency)
    }
}

/// Parses an optionally signed base-10 integer literal. Empty input is zero.
pub(crate) fn parse_amount(input: &str) -> Result<BigInt, CurrencyError> {
    if input.is_empty() {
        return Ok(BigInt::zero());
    }
    let digits = input.strip_prefix(['-', '+']).unwrap_or(input);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CurrencyError::Parse(input.to_string()));
    }
    BigInt::from_str(input).map_err(|_| CurrencyError::Parse(input.to_string()))
}

/// Amounts travel as decimal strings so they are never narrowed to a
/// fixed-width number. Plain JSON integers are accepted on input for older
/// documents.
mod amount_format {
    use std::fmt;

    use num_bigint::BigInt;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    use super::parse_amount;

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(amount: &Option<BigInt>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match amount {
            Some(amount) => serializer.serialize_str(&amount.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BigInt>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }

    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = Option<BigInt>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a base-10 integer string, an integer, or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            parse_amount(value).map(Some).map_err(E::custom)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(BigInt::from(value)))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(BigInt::from(value)))
        }

        fn visit_i128<E>(self, value: i128) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(BigInt::from(value)))
        }

        fn visit_u128<E>(self, value: u128) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(BigInt::from(value)))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::definition::CurrencyType;
    use crate::currency::registry::CurrencyDictionary;

    fn btc() -> CurrencyDefinition {
        CurrencyDefinition::new("Bitcoin", "BTC", 8, CurrencyType::Crypto)
    }

    fn value(amount: i64, currency: CurrencyDefinition) -> CurrencyValue {
        CurrencyValue::from_amount(amount, currency)
    }

    #[test]
    fn test_new_parses_signed_integers() {
        assert_eq!(
            CurrencyValue::new("-42", btc()).unwrap().amount,
            Some(BigInt::from(-42))
        );
        assert_eq!(
            CurrencyValue::new("+42", btc()).unwrap().amount,
            Some(BigInt::from(42))
        );
    }

    #[test]
    fn test_new_accepts_empty_as_zero() {
        let zero = CurrencyValue::new("", btc()).unwrap();
        assert!(zero.is_zero());
        assert_eq!(zero.amount_string(), "0");
    }

    #[test]
    fn test_new_accepts_amounts_beyond_machine_words() {
        let big = CurrencyValue::new("123456789012345678901234567890", btc()).unwrap();
        assert_eq!(big.amount_string(), "123456789012345678901234567890");
    }

    #[test]
    fn test_new_rejects_malformed_amounts() {
        for input in ["abc", "1.5", "-", "+", "1_000", " 1", "1e5", "--1", "0x10"] {
            assert_eq!(
                CurrencyValue::new(input, btc()),
                Err(CurrencyError::Parse(input.to_string())),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_new_defers_definition_checks() {
        let value = CurrencyValue::new("1", CurrencyDefinition::NIL).unwrap();
        assert_eq!(value.valid(), Err(CurrencyError::DefinitionUndefined));
    }

    #[test]
    fn test_with_lookup() {
        let registry = CurrencyDictionary::well_known();

        assert!(matches!(
            CurrencyValue::with_lookup("0", "", &registry),
            Err(CurrencyError::UnknownCurrency(_))
        ));
        assert!(matches!(
            CurrencyValue::with_lookup("0", "invalid", &registry),
            Err(CurrencyError::UnknownCurrency(_))
        ));

        let usd = CurrencyValue::with_lookup("", "usd", &registry).unwrap();
        assert_eq!(usd.to_string(), "0 United States Dollar (USDdiv2)");

        let eth = CurrencyValue::with_lookup("1234567890987654321", "ETH", &registry).unwrap();
        assert!(eth.valid().is_ok());
    }

    #[test]
    fn test_validity_checks_in_order() {
        assert!(value(1, btc()).valid().is_ok());

        let absent = CurrencyValue {
            amount: None,
            currency: CurrencyDefinition::NIL,
        };
        assert_eq!(absent.valid(), Err(CurrencyError::AmountInvalid));

        assert_eq!(
            value(123, CurrencyDefinition::NIL).valid(),
            Err(CurrencyError::DefinitionUndefined)
        );
        assert_eq!(
            value(123, btc().with_divisibility(0)).valid(),
            Err(CurrencyError::DivisibilityNonPositive)
        );
    }

    #[test]
    fn test_amount_string() {
        assert_eq!(CurrencyValue::default().amount_string(), "0");
        assert_eq!(value(100, btc()).amount_string(), "100");
    }

    #[test]
    fn test_equal_normalizes_divisibility() {
        let a = value(1234, btc().with_divisibility(2));
        let b = value(123_400, btc().with_divisibility(4));
        assert!(a.equal(Some(&b)));
        assert!(b.equal(Some(&a)));

        let c = value(123_401, btc().with_divisibility(4));
        assert!(!a.equal(Some(&c)));

        let negative = value(-1, btc().with_divisibility(2));
        assert!(negative.equal(Some(&value(-100, btc().with_divisibility(4)))));
    }

    #[test]
    fn test_equal_with_extreme_divisibility() {
        // Peer documents may carry any u32 divisibility.
        let wide = btc().with_divisibility(4_000_000_000);
        assert!(!value(1, btc()).equal(Some(&value(1, wide.clone()))));
        assert!(!value(1, wide.clone()).equal(Some(&value(1, btc()))));
        assert!(value(0, btc()).equal(Some(&value(0, wide.clone()))));
        assert!(!value(0, btc()).equal(Some(&value(5, wide))));
    }

    #[test]
    fn test_equal_requires_same_code() {
        let eth = CurrencyDefinition::new("Ethereum", "ETH", 8, CurrencyType::Crypto);
        assert!(!value(1, btc()).equal(Some(&value(1, eth))));
        assert!(!value(1, btc()).equal(Some(&value(2, btc()))));
        assert!(value(1, btc()).equal(Some(&value(1, btc()))));
    }

    #[test]
    fn test_absence_is_never_equal() {
        let one = value(1, btc());
        assert!(!values_equal(None, None));
        assert!(!values_equal(None, Some(&one)));
        assert!(!values_equal(Some(&one), None));
        assert!(!one.equal(None));

        let no_amount = CurrencyValue {
            amount: None,
            currency: btc(),
        };
        assert!(!no_amount.equal(Some(&no_amount)));
    }

    #[test]
    fn test_undefined_currency_never_equal() {
        let undefined = value(0, CurrencyDefinition::NIL);
        let eth = value(0, CurrencyDefinition::minimal("ETH", 18));
        assert!(!undefined.equal(Some(&eth)));
        assert!(!eth.equal(Some(&undefined)));
        assert!(!undefined.equal(Some(&undefined)));
    }

    #[test]
    fn test_json_round_trip_is_lossless() {
        let original = CurrencyValue::new("123456789012345678901234567890", btc()).unwrap();
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains(r#""amount":"123456789012345678901234567890""#));

        let decoded: CurrencyValue = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, original);
        assert!(decoded.equal(Some(&original)));
    }

    #[test]
    fn test_json_accepts_integer_and_null_amounts() {
        let decoded: CurrencyValue =
            serde_json::from_str(r#"{"amount":250,"currency":{"code":"usd","divisibility":2}}"#)
                .unwrap();
        assert_eq!(decoded.amount, Some(BigInt::from(250)));
        assert_eq!(decoded.currency.code.as_str(), "USD");

        let absent: CurrencyValue =
            serde_json::from_str(r#"{"amount":null,"currency":{"code":"USD","divisibility":2}}"#)
                .unwrap();
        assert_eq!(absent.valid(), Err(CurrencyError::AmountInvalid));

        let missing: CurrencyValue =
            serde_json::from_str(r#"{"currency":{"code":"USD","divisibility":2}}"#).unwrap();
        assert!(missing.amount.is_none());
    }

    #[test]
    fn test_json_rejects_malformed_amounts() {
        assert!(
            serde_json::from_str::<CurrencyValue>(
                r#"{"amount":"12.5","currency":{"code":"USD","divisibility":2}}"#
            )
            .is_err()
        );
        assert!(
            serde_json::from_str::<CurrencyValue>(
                r#"{"amount":12.5,"currency":{"code":"USD","divisibility":2}}"#
            )
            .is_err()
        );
    }
}
