//! Detection Rule Catalog
//!
//! Each COB check is an independent [`DetectionRule`] that inspects one
//! claim against the patient's coverage and either produces a [`Finding`]
//! or stays silent. The [`RuleCatalog`] keys rules by [`RuleId`] and runs
//! them in identifier order, which also fixes the order of their alerts.
//!
//! | Rule | Alert type | Severity |
//! |------|------------|----------|
//! | R001 | MSP_VIOLATION | HIGH |
//! | R002 | WRONG_PRIMARY_ORDER | HIGH |
//! | R003 | MISSING_SECONDARY | MEDIUM |
//! | R004 | DEPENDENT_AGE_OUT | HIGH |
//! | R005 | AUTO_LIABILITY_PRIMARY | HIGH |
//! | R006 | WORKERS_COMP_PRIMARY | HIGH |
//! | R007 | COORDINATION_PERIOD_MISMATCH | HIGH |
//! | R008 | SECONDARY_NOT_BILLED | MEDIUM |

mod msp;
mod payer_order;
mod missing_secondary;
mod age_out;
mod casualty;
mod coverage_period;
mod dual_coverage;

pub use msp::MspViolationRule;
pub use payer_order::WrongPrimaryOrderRule;
pub use missing_secondary::MissingSecondaryRule;
pub use age_out::DependentAgeOutRule;
pub use casualty::{AutoLiabilityRule, WorkersCompRule};
pub use coverage_period::CoordinationPeriodRule;
pub use dual_coverage::DualCoverageRule;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use core_kernel::Money;
use domain_claims::Claim;
use domain_coverage::{Insurance, Patient};

use crate::alert::{AlertDraft, AlertType, Severity};
use crate::config::DetectionConfig;
use crate::evidence::Evidence;

/// Identifier of a detection rule
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(Cow<'static, str>);

impl RuleId {
    pub const MSP_VIOLATION: RuleId = RuleId::from_static("R001");
    pub const WRONG_PRIMARY_ORDER: RuleId = RuleId::from_static("R002");
    pub const MISSING_SECONDARY: RuleId = RuleId::from_static("R003");
    pub const DEPENDENT_AGE_OUT: RuleId = RuleId::from_static("R004");
    pub const AUTO_LIABILITY_PRIMARY: RuleId = RuleId::from_static("R005");
    pub const WORKERS_COMP_PRIMARY: RuleId = RuleId::from_static("R006");
    pub const COORDINATION_PERIOD_MISMATCH: RuleId = RuleId::from_static("R007");
    pub const DUAL_COVERAGE: RuleId = RuleId::from_static("R008");

    pub const fn from_static(id: &'static str) -> Self {
        RuleId(Cow::Borrowed(id))
    }

    pub fn new(id: impl Into<String>) -> Self {
        RuleId(Cow::Owned(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a rule found on a claim
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    /// Confidence in [0, 1]
    pub confidence: Decimal,
    pub estimated_recovery: Option<Money>,
    pub description: String,
    pub recommended_action: String,
    pub data_points: Evidence,
}

/// A single COB check over one claim and its patient
pub trait DetectionRule: Send + Sync {
    fn id(&self) -> RuleId;

    /// Display name
    fn name(&self) -> &str;

    fn alert_type(&self) -> AlertType;

    fn severity(&self) -> Severity;

    /// Inspects the claim, returning None when the condition is absent
    fn evaluate(&self, claim: &Claim, patient: &Patient) -> Option<Finding>;

    /// Evaluates the rule and drafts an alert from the finding
    ///
    /// The payer denial code, when the claim carries one, is appended to
    /// the description.
    fn detect(&self, claim: &Claim, patient: &Patient) -> Option<AlertDraft> {
        let finding = self.evaluate(claim, patient)?;

        let mut description = finding.description;
        if let Some(code) = &claim.carc_code {
            description.push_str(&format!(" Payer denial code: {}.", code));
        }

        Some(AlertDraft {
            rule_id: self.id(),
            claim_id: claim.id.clone(),
            patient_id: patient.id().clone(),
            alert_type: self.alert_type(),
            severity: self.severity(),
            confidence_score: finding.confidence,
            estimated_recovery: finding.estimated_recovery,
            description,
            recommended_action: finding.recommended_action,
            data_points: finding.data_points,
        })
    }
}

/// The policy the claim billed as primary, if it is on file
pub(crate) fn billed_primary<'a>(claim: &Claim, patient: &'a Patient) -> Option<&'a Insurance> {
    claim
        .primary_insurance_id
        .as_ref()
        .and_then(|id| patient.insurance(id))
}

/// Claim diagnosis codes as a single evidence value
pub(crate) fn diagnosis_list(claim: &Claim) -> Option<String> {
    if claim.diagnosis_codes.is_empty() {
        None
    } else {
        Some(claim.diagnosis_codes.join(", "))
    }
}

/// Ordered table of detection rules
#[derive(Default)]
pub struct RuleCatalog {
    rules: BTreeMap<RuleId, Box<dyn DetectionRule>>,
}

impl RuleCatalog {
    /// Creates a catalog with no rules
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates the R001..R008 catalog from configuration
    pub fn standard(config: &DetectionConfig) -> Self {
        let mut catalog = Self::empty();
        catalog.register(MspViolationRule::new(config.msp.clone()));
        catalog.register(WrongPrimaryOrderRule::new(config.wrong_primary.clone()));
        catalog.register(MissingSecondaryRule::new(config.missing_secondary.clone()));
        catalog.register(DependentAgeOutRule::new(config.age_out.clone()));
        catalog.register(AutoLiabilityRule::new(config.auto_liability.clone()));
        catalog.register(WorkersCompRule::new(config.workers_comp.clone()));
        catalog.register(CoordinationPeriodRule::new(config.coverage_period.clone()));
        catalog.register(DualCoverageRule::new(config.dual_coverage.clone()));
        catalog
    }

    /// Adds a rule, returning any rule it replaced under the same id
    pub fn register<R>(&mut self, rule: R) -> Option<Box<dyn DetectionRule>>
    where
        R: DetectionRule + 'static,
    {
        self.rules.insert(rule.id(), Box::new(rule))
    }

    pub fn remove(&mut self, id: &RuleId) -> Option<Box<dyn DetectionRule>> {
        self.rules.remove(id)
    }

    pub fn get(&self, id: &RuleId) -> Option<&dyn DetectionRule> {
        self.rules.get(id).map(|rule| rule.as_ref())
    }

    /// Rule identifiers in evaluation order
    pub fn ids(&self) -> impl Iterator<Item = &RuleId> {
        self.rules.keys()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs every rule against the claim in identifier order
    pub fn evaluate(&self, claim: &Claim, patient: &Patient) -> Vec<AlertDraft> {
        self.rules
            .values()
            .filter_map(|rule| rule.detect(claim, patient))
            .collect()
    }
}

impl fmt::Debug for RuleCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleCatalog")
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}
