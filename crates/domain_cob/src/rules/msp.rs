//! R001 Medicare Secondary Payer violation
//!
//! Medicare pays second when the patient has a group health plan, or when
//! their age and employment make employer coverage likely. The rule fires
//! only when Medicare was actually billed as primary.

use domain_claims::Claim;
use domain_coverage::{InsuranceType, Patient};

use super::{billed_primary, DetectionRule, Finding, RuleId};
use crate::alert::{AlertType, Severity};
use crate::config::MspConfig;
use crate::evidence::Evidence;

#[derive(Debug, Clone, Default)]
pub struct MspViolationRule {
    config: MspConfig,
}

impl MspViolationRule {
    pub fn new(config: MspConfig) -> Self {
        Self { config }
    }
}

impl DetectionRule for MspViolationRule {
    fn id(&self) -> RuleId {
        RuleId::MSP_VIOLATION
    }

    fn name(&self) -> &str {
        "Medicare Secondary Payer Violation"
    }

    fn alert_type(&self) -> AlertType {
        AlertType::MspViolation
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn evaluate(&self, claim: &Claim, patient: &Patient) -> Option<Finding> {
        let billed = billed_primary(claim, patient)?;
        if billed.insurance_type != InsuranceType::Medicare {
            return None;
        }

        let config = &self.config;
        let age = patient.age_on(claim.service_date);
        let employed = patient.is_employed();
        let group_plans = patient
            .active_coverage_on(claim.service_date)
            .into_iter()
            .filter(|ins| ins.insurance_type.is_group_health_plan())
            .count();
        let has_group_plan = group_plans > 0;

        let (confidence, reason) = if has_group_plan && employed {
            (
                config.commercial_employed_confidence,
                format!(
                    "Medicare billed as primary while the patient (age {}, employed) has active employer coverage that pays first.",
                    age
                ),
            )
        } else if has_group_plan {
            (
                config.commercial_confidence,
                format!(
                    "Medicare billed as primary while the patient (age {}) has active commercial coverage that pays first.",
                    age
                ),
            )
        } else if age < config.medicare_age && employed {
            (
                config.under_medicare_age_employed_confidence,
                format!(
                    "Patient under {} on Medicare is employed; employer coverage is likely primary. Age: {}.",
                    config.medicare_age, age
                ),
            )
        } else if age <= config.working_senior_max_age && employed {
            (
                config.working_senior_confidence,
                format!(
                    "Working senior (age {}) likely has employer coverage that is primary to Medicare.",
                    age
                ),
            )
        } else {
            return None;
        };

        let detection_method = if claim.carc_code.is_some() {
            "835 Remittance Analysis"
        } else {
            "Proactive Pre-Submission"
        };

        Some(Finding {
            confidence,
            estimated_recovery: Some(config.recovery_rate.apply(&claim.billed_amount)),
            description: reason,
            recommended_action:
                "Verify employer or commercial coverage and rebill with Medicare as secondary"
                    .to_string(),
            data_points: Evidence::new()
                .with("patient_age", age)
                .with("employment_status", patient.employment_status().to_string())
                .with("has_commercial_insurance", has_group_plan)
                .with("commercial_count", group_plans)
                .with_opt("carc_code", claim.carc_code.clone())
                .with("claim_status", claim.status.code())
                .with("detection_method", detection_method),
        })
    }
}
