//! R008 Dual coverage not utilized

use domain_claims::Claim;
use domain_coverage::Patient;

use super::{DetectionRule, Finding, RuleId};
use crate::alert::{AlertType, Severity};
use crate::config::DualCoverageConfig;
use crate::evidence::Evidence;

/// Flags paid claims that left a balance while a second active policy was
/// never billed
#[derive(Debug, Clone, Default)]
pub struct DualCoverageRule {
    config: DualCoverageConfig,
}

impl DualCoverageRule {
    pub fn new(config: DualCoverageConfig) -> Self {
        Self { config }
    }
}

impl DetectionRule for DualCoverageRule {
    fn id(&self) -> RuleId {
        RuleId::DUAL_COVERAGE
    }

    fn name(&self) -> &str {
        "Dual Coverage Not Utilized"
    }

    fn alert_type(&self) -> AlertType {
        AlertType::SecondaryNotBilled
    }

    fn severity(&self) -> Severity {
        Severity::Medium
    }

    fn evaluate(&self, claim: &Claim, patient: &Patient) -> Option<Finding> {
        if !claim.is_paid() || claim.has_secondary() {
            return None;
        }

        let active = patient.active_coverage_on(claim.service_date);
        let secondary = active.get(1)?;

        let balance = claim.patient_responsibility();
        if balance.amount() <= self.config.min_balance {
            return None;
        }

        Some(Finding {
            confidence: self.config.confidence,
            estimated_recovery: Some(self.config.recovery_rate.apply(&balance)),
            description: format!(
                "Active secondary coverage with {} was not billed. Remaining balance: {}.",
                secondary.payer_name,
                balance.round_to_currency()
            ),
            recommended_action: format!(
                "Bill {} for the remaining patient responsibility",
                secondary.payer_name
            ),
            data_points: Evidence::new()
                .with("patient_responsibility", balance)
                .with("secondary_insurance", secondary.payer_name.as_str())
                .with("primary_paid", claim.paid_amount),
        })
    }
}
