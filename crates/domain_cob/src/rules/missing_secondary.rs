//! R003 Missing secondary coverage
//!
//! A paid claim for a patient with a single policy on file, where either
//! the spouse works or a large share of the charges fell to the patient.

use domain_claims::Claim;
use domain_coverage::Patient;

use super::{DetectionRule, Finding, RuleId};
use crate::alert::{AlertType, Severity};
use crate::config::MissingSecondaryConfig;
use crate::evidence::Evidence;

#[derive(Debug, Clone, Default)]
pub struct MissingSecondaryRule {
    config: MissingSecondaryConfig,
}

impl MissingSecondaryRule {
    pub fn new(config: MissingSecondaryConfig) -> Self {
        Self { config }
    }
}

impl DetectionRule for MissingSecondaryRule {
    fn id(&self) -> RuleId {
        RuleId::MISSING_SECONDARY
    }

    fn name(&self) -> &str {
        "Missing Secondary Coverage"
    }

    fn alert_type(&self) -> AlertType {
        AlertType::MissingSecondary
    }

    fn severity(&self) -> Severity {
        Severity::Medium
    }

    fn evaluate(&self, claim: &Claim, patient: &Patient) -> Option<Finding> {
        if !claim.is_paid() || patient.coverage().len() != 1 {
            return None;
        }

        let spouse_employed = patient.has_employed_spouse();
        let responsibility = claim.patient_responsibility();
        let threshold = self.config.responsibility_threshold.apply(&claim.billed_amount);
        let high_responsibility = responsibility.amount() > threshold.amount();

        if !spouse_employed && !high_responsibility {
            return None;
        }

        let confidence = if spouse_employed {
            self.config.spouse_employed_confidence
        } else {
            self.config.high_responsibility_confidence
        };
        let owed = responsibility.floor_zero();

        Some(Finding {
            confidence,
            estimated_recovery: Some(self.config.recovery_rate.apply(&owed)),
            description: format!(
                "Patient likely has unreported secondary coverage. Patient responsibility: {}.",
                owed.round_to_currency()
            ),
            recommended_action: "Contact the patient to confirm any other insurance coverage"
                .to_string(),
            data_points: Evidence::new()
                .with("spouse_employed", spouse_employed)
                .with("patient_responsibility", responsibility)
                .with(
                    "responsibility_percentage",
                    responsibility.percentage_of(&claim.billed_amount),
                ),
        })
    }
}
