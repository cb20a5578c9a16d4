//! Pricing error types.

use agora_shared::AppError;
use thiserror::Error;

use crate::currency::CurrencyError;

/// Errors raised while moving prices between formats.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The underlying currency value was rejected.
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    /// The amount is negative or too large for a legacy price.
    #[error("amount {0} does not fit a legacy price")]
    AmountOutOfRange(String),
}

impl PricingError {
    /// Returns the stable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Currency(err) => err.error_code(),
            Self::AmountOutOfRange(_) => "AMOUNT_OUT_OF_RANGE",
        }
    }
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        Self::Validation(err.to_string())
    }
}
