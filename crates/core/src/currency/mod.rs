//! Currency values with arbitrary precision.
//!
//! This module implements the currency value engine:
//! - Currency definitions (code, name, divisibility, fiat/crypto)
//! - Currency values with arbitrary-precision amounts in smallest units
//! - Divisibility-aware equality and value-preserving redenomination
//! - Conversion at an exchange rate with truncation toward zero
//! - Lookup of definitions by code
//! - Error types for all of the above

mod conversion;
pub mod definition;
pub mod error;
pub mod rate;
pub mod registry;
pub mod value;

#[cfg(test)]
mod props;

pub use conversion::MAX_RESCALE;
pub use definition::{CurrencyCode, CurrencyDefinition, CurrencyType, NIL_CURRENCY_DEFINITION};
pub use error::CurrencyError;
pub use rate::ExchangeRate;
pub use registry::{CurrencyDictionary, CurrencyLookup};
pub use value::{CurrencyValue, values_equal};
