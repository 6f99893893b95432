//! COB review errors
//!
//! Rule evaluation itself never fails; these cover configuration and
//! report aggregation.

use thiserror::Error;

use core_kernel::MoneyError;

/// Errors raised by the COB review crate
#[derive(Debug, Error)]
pub enum CobError {
    #[error("Failed to load detection configuration: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Invalid detection configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl CobError {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        CobError::InvalidConfiguration(message.into())
    }
}
