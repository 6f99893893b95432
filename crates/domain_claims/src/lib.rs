//! Claims Domain
//!
//! This crate models a billed healthcare claim as received back from
//! remittance: which payers were billed, what was paid, and why a payer
//! denied it.
//!
//! # Claim outcome
//!
//! ```text
//! Pending -> Paid
//!         \-> Denied -> Appealed
//! ```

pub mod claim;
pub mod error;

pub use claim::{Claim, ClaimBuilder, ClaimStatus, DenialReason};
pub use error::ClaimError;
