//! Core Kernel - Foundational types for coordination-of-benefits review
//!
//! This crate provides the building blocks shared by the coverage, claims and
//! COB detection crates:
//! - Money types with precise decimal arithmetic
//! - Coverage periods and age arithmetic over calendar dates
//! - Strongly-typed identifiers for patients, claims, policies and alerts

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;

pub use money::{Money, Currency, MoneyError, Rate};
pub use temporal::{CoveragePeriod, PeriodBoundary, TemporalError, age_on};
pub use identifiers::{PatientId, ClaimId, InsuranceId, AlertId};
pub use error::CoreError;
