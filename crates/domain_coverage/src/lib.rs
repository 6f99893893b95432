//! Patient Coverage Domain
//!
//! This crate models the insurance records a patient holds and the queries
//! coordination-of-benefits review needs from them.
//!
//! # Priority order
//!
//! A patient's policies are kept in billing priority order: the policy with
//! `priority_order` 1 bills first, 2 bills second, and so on.
//!
//! ```text
//! Patient
//!   ├── Insurance (priority 1, COMMERCIAL)
//!   └── Insurance (priority 2, MEDICARE)
//! ```

pub mod insurance;
pub mod patient;
pub mod error;

pub use insurance::{Insurance, InsuranceType};
pub use patient::{EmploymentStatus, Patient, PatientBuilder};
pub use error::CoverageError;
