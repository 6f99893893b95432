//! Coordination-of-Benefits Review
//!
//! This crate inspects claims against the patient's insurance records and
//! raises alerts where a claim was billed to the wrong payer, billed out of
//! priority order, missed a payer, or was left under-recovered.
//!
//! # Flow
//!
//! ```text
//! Claims + Patients -> CobDetector (RuleCatalog R001..R008) -> Alerts
//!                   -> prioritize_alerts / generate_risk_score -> downstream
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_cob::{CobDetector, DetectionConfig, prioritize_alerts};
//!
//! let detector = CobDetector::with_config(&DetectionConfig::from_env()?);
//! let outcome = detector.scan(&claims, &patients, today);
//! let ranked = prioritize_alerts(outcome.alerts);
//! ```

pub mod alert;
pub mod evidence;
pub mod config;
pub mod rules;
pub mod ids;
pub mod engine;
pub mod scoring;
pub mod report;
pub mod error;

pub use alert::{Alert, AlertDraft, AlertType, Severity};
pub use evidence::{DataPoint, Evidence};
pub use self::config::DetectionConfig;
pub use rules::{DetectionRule, Finding, RuleCatalog, RuleId};
pub use ids::{AlertIdSource, ContentDerivedIds, SequentialIds};
pub use engine::{CobDetector, PatientDirectory, ScanOutcome};
pub use scoring::{
    generate_risk_score, prioritize_alerts, priority_score, risk_scores_by_claim, ClaimRisk,
    RiskLevel,
};
pub use report::{AlertDigest, ScanSummary};
pub use error::CobError;
