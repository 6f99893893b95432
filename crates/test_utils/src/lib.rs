//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! COB review test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built dates, policies and patients
//! - `builders`: Builder patterns for claims and patients with test defaults
//! - `assertions`: Custom assertion helpers for alerts and money
//! - `generators`: Property-based test data generators
//! - `logging`: One-time tracing subscriber for test output

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod logging;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use logging::init_tracing;
