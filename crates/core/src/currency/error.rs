//! Currency error types.
//!
//! Every failure of the currency engine is local and terminal: callers treat
//! these as data-validation failures for the specific value involved and never
//! retry them.

use agora_shared::AppError;
use thiserror::Error;

/// Errors that can occur while constructing, validating, or converting
/// currency values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    // ========== Validity Errors ==========
    /// The amount is absent.
    #[error("currency value amount is invalid")]
    AmountInvalid,

    /// The currency is the nil definition.
    #[error("currency definition is undefined")]
    DefinitionUndefined,

    /// The currency divisibility is zero.
    #[error("currency divisibility must be greater than zero")]
    DivisibilityNonPositive,

    // ========== Lookup Errors ==========
    /// The code could not be resolved, or a nil definition was given as a
    /// conversion target.
    #[error("unknown currency: '{0}'")]
    UnknownCurrency(String),

    // ========== Conversion Errors ==========
    /// The exchange rate is zero, negative, or not a finite number.
    #[error("rate must be greater than zero, got {0}")]
    InvalidRate(String),

    /// The value being converted is not itself valid.
    #[error("cannot convert invalid value: {0}")]
    InvalidSourceValue(#[source] Box<CurrencyError>),

    /// A value-preserving operation would drop non-zero digits.
    #[error("insufficient precision to represent the value without loss")]
    InsufficientPrecision,

    /// Rescaling would multiply by a power of ten above
    /// [`MAX_RESCALE`](crate::currency::MAX_RESCALE).
    #[error("rescaling by 10^{0} exceeds the supported range")]
    ScaleOutOfRange(u64),

    // ========== Parse Errors ==========
    /// The amount string is not a base-10 integer literal.
    #[error("cannot parse amount '{0}' as a base-10 integer")]
    Parse(String),
}

impl CurrencyError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AmountInvalid => "AMOUNT_INVALID",
            Self::DefinitionUndefined => "DEFINITION_UNDEFINED",
            Self::DivisibilityNonPositive => "DIVISIBILITY_NON_POSITIVE",
            Self::UnknownCurrency(_) => "UNKNOWN_CURRENCY",
            Self::InvalidRate(_) => "INVALID_RATE",
            Self::InvalidSourceValue(_) => "INVALID_SOURCE_VALUE",
            Self::InsufficientPrecision => "INSUFFICIENT_PRECISION",
            Self::ScaleOutOfRange(_) => "SCALE_OUT_OF_RANGE",
            Self::Parse(_) => "PARSE_FAILURE",
        }
    }
}

impl From<CurrencyError> for AppError {
    fn from(err: CurrencyError) -> Self {
        Self::Validation(err.to_string())
    }
}
