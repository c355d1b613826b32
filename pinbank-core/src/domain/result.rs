//! Result and error types for the core library

use rust_decimal::Decimal;
use thiserror::Error;

/// Core library error type
///
/// Every variant is a caller-input or precondition failure. None of them are
/// transient, so nothing in the core retries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("PIN already registered")]
    AlreadyRegistered,

    #[error("PIN not registered")]
    NotRegistered,

    #[error("Invalid PIN")]
    InvalidPin,

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Cannot withdraw: Minimum balance of {minimum} required")]
    MinimumBalanceViolation { minimum: Decimal },

    #[error("Cannot withdraw: Overdraft limit of {limit} exceeded")]
    OverdraftLimitExceeded { limit: Decimal },
}

impl Error {
    /// Short machine-readable name, used as a tracing field and in JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            Error::AlreadyRegistered => "already_registered",
            Error::NotRegistered => "not_registered",
            Error::InvalidPin => "invalid_pin",
            Error::InvalidAmount => "invalid_amount",
            Error::MinimumBalanceViolation { .. } => "minimum_balance_violation",
            Error::OverdraftLimitExceeded { .. } => "overdraft_limit_exceeded",
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
