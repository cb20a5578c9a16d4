//! Legacy and current listing prices.

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::PricingError;
use crate::currency::{CurrencyCode, CurrencyDefinition, CurrencyLookup, CurrencyValue};

/// Divisibilities the legacy format used for its crypto codes. Every other
/// code was written at the configured default (hundredths).
const LEGACY_DIVISIBILITY: &[(&str, u32)] = &[("BTC", 8), ("BCH", 8), ("LTC", 8), ("ZEC", 8)];

/// Returns the divisibility legacy amounts in `code` were written at.
///
/// This is fixed by the legacy format and independent of any currency
/// dictionary: a legacy ETH price of `150` is 1.50 ETH.
#[must_use]
pub fn legacy_divisibility(code: &str, default_divisibility: u32) -> u32 {
    let code = CurrencyCode::new(code);
    LEGACY_DIVISIBILITY
        .iter()
        .find(|(known, _)| *known == code.as_str())
        .map_or(default_divisibility, |&(_, divisibility)| divisibility)
}

/// A price in the legacy listing index format.
///
/// The amount is in the currency's smallest unit at the divisibility given by
/// [`legacy_divisibility`]. The divisibility itself is not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPrice {
    /// Currency code as written by the legacy node.
    pub currency_code: String,
    /// Amount in smallest units.
    pub amount: u64,
    /// Percentage applied on top of market price for crypto listings.
    #[serde(default)]
    pub modifier: f32,
}

/// A listing price in the current format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPrice {
    /// The price itself.
    pub price: CurrencyValue,
    /// Percentage applied on top of market price for crypto listings.
    #[serde(default)]
    pub modifier: f32,
}

impl LegacyPrice {
    /// Upgrades to a [`ListingPrice`].
    ///
    /// The amount is read at its legacy divisibility. Codes known to
    /// `registry` are then redenominated to the registry definition without
    /// loss; any other code keeps a bare definition at the legacy divisibility.
    ///
    /// # Errors
    ///
    /// - Validity errors for an empty code or a zero divisibility.
    /// - `InsufficientPrecision` if the registry definition is coarser than the
    ///   legacy amount allows.
    pub fn upgrade<L>(
        &self,
        registry: &L,
        default_divisibility: u32,
    ) -> Result<ListingPrice, PricingError>
    where
        L: CurrencyLookup + ?Sized,
    {
        let divisibility = legacy_divisibility(&self.currency_code, default_divisibility);
        let written = CurrencyValue::from_amount(
            self.amount,
            CurrencyDefinition::minimal(self.currency_code.as_str(), divisibility),
        );
        written.valid()?;

        let price = match registry.lookup(&self.currency_code) {
            Some(definition) => {
                let mut price = written.adjust_divisibility(definition.divisibility)?;
                price.currency = definition.clone();
                price
            }
            None => {
                debug!(
                    code = %written.currency.code,
                    divisibility,
                    "legacy price has unregistered currency, keeping legacy divisibility"
                );
                written
            }
        };

        Ok(ListingPrice {
            price,
            modifier: self.modifier,
        })
    }
}

impl ListingPrice {
    /// Downgrades to a [`LegacyPrice`].
    ///
    /// The amount is redenominated to the code's [`legacy_divisibility`]. A
    /// redenomination that would drop digits fails with
    /// `InsufficientPrecision`, and an amount outside `u64` fails with
    /// [`PricingError::AmountOutOfRange`].
    pub fn downgrade(&self, default_divisibility: u32) -> Result<LegacyPrice, PricingError> {
        self.price.valid()?;

        let code = &self.price.currency.code;
        let legacy = self
            .price
            .adjust_divisibility(legacy_divisibility(code.as_str(), default_divisibility))?;

        let amount = legacy
            .amount
            .as_ref()
            .and_then(ToPrimitive::to_u64)
            .ok_or_else(|| PricingError::AmountOutOfRange(legacy.amount_string()))?;

        Ok(LegacyPrice {
            currency_code: code.to_string(),
            amount,
            modifier: self.modifier,
        })
    }
}
