//! Coverage domain errors

use thiserror::Error;

use core_kernel::TemporalError;

/// Errors that can occur while assembling patient coverage
#[derive(Debug, Error)]
pub enum CoverageError {
    #[error("Priority order must be at least 1 for policy {0}")]
    InvalidPriorityOrder(String),

    #[error("Duplicate priority order {priority} for patient {patient_id}")]
    DuplicatePriorityOrder { patient_id: String, priority: u32 },

    #[error("Duplicate insurance {insurance_id} for patient {patient_id}")]
    DuplicateInsurance {
        patient_id: String,
        insurance_id: String,
    },

    #[error("Invalid coverage period: {0}")]
    InvalidPeriod(#[from] TemporalError),

    #[error("Missing required field: {0}")]
    MissingRequiredField(String),
}
