//! Listing prices and the bridge to the legacy fixed-width price format.
//!
//! Older listing index documents priced items with a `u64` amount and a bare
//! currency code. Current documents carry a full [`CurrencyValue`]. This
//! module converts between the two without touching document storage.
//!
//! [`CurrencyValue`]: crate::currency::CurrencyValue

pub mod error;
pub mod legacy;

pub use error::PricingError;
pub use legacy::{LegacyPrice, ListingPrice, legacy_divisibility};
