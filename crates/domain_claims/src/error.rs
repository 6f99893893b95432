//! Claims domain errors

use thiserror::Error;

/// Errors raised while assembling a claim from ingested data
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Negative amount for {field}: {amount}")]
    NegativeAmount { field: String, amount: String },

    #[error("Currency mismatch: billed in {billed}, paid in {paid}")]
    CurrencyMismatch { billed: String, paid: String },

    #[error("Secondary payer {0} is the same policy as the primary payer")]
    SecondaryMatchesPrimary(String),
}
