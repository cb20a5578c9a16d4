//! Command failures.

use agora_core::currency::CurrencyError;
use agora_shared::AppError;
use thiserror::Error;

/// A failed command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The currency engine rejected the input.
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    /// Output could not be encoded.
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CliError {
    /// Returns the stable error code printed with the message.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Currency(err) => err.error_code(),
            Self::Encode(_) => "ENCODE_FAILURE",
        }
    }

    /// Returns the process exit code.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Currency(err) => AppError::from(err.clone()).exit_code(),
            Self::Encode(err) => AppError::Internal(err.to_string()).exit_code(),
        }
    }
}
