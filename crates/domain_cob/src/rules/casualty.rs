//! R005 and R006: casualty payers that pay ahead of health coverage
//!
//! Accident injuries are the auto or liability carrier's responsibility and
//! workplace injuries are workers compensation's. Both rules fire when a
//! health payer was billed as primary instead.

use domain_claims::Claim;
use domain_coverage::{InsuranceType, Patient};

use super::{billed_primary, diagnosis_list, DetectionRule, Finding, RuleId};
use crate::alert::{AlertType, Severity};
use crate::config::{AutoLiabilityConfig, WorkersCompConfig};
use crate::evidence::Evidence;

/// Accident-related claim billed to a health payer
#[derive(Debug, Clone, Default)]
pub struct AutoLiabilityRule {
    config: AutoLiabilityConfig,
}

impl AutoLiabilityRule {
    pub fn new(config: AutoLiabilityConfig) -> Self {
        Self { config }
    }
}

impl DetectionRule for AutoLiabilityRule {
    fn id(&self) -> RuleId {
        RuleId::AUTO_LIABILITY_PRIMARY
    }

    fn name(&self) -> &str {
        "Auto/Liability Should Be Primary"
    }

    fn alert_type(&self) -> AlertType {
        AlertType::AutoLiabilityPrimary
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn evaluate(&self, claim: &Claim, patient: &Patient) -> Option<Finding> {
        if !claim.is_accident_related {
            return None;
        }

        let billed = billed_primary(claim, patient)?;
        if !matches!(
            billed.insurance_type,
            InsuranceType::Commercial | InsuranceType::Medicare | InsuranceType::Medicaid
        ) {
            return None;
        }

        let auto_on_file = patient.has_coverage_type(InsuranceType::AutoInsurance);
        let confidence = if auto_on_file {
            self.config.auto_on_file_confidence
        } else {
            self.config.confidence
        };

        Some(Finding {
            confidence,
            estimated_recovery: Some(self.config.recovery_rate.apply(&claim.billed_amount)),
            description: format!(
                "Accident-related claim billed to {} ({}). Auto or liability coverage should be primary.",
                billed.payer_name, billed.insurance_type
            ),
            recommended_action:
                "Obtain the patient's auto insurance details and rebill the auto carrier as primary"
                    .to_string(),
            data_points: Evidence::new()
                .with("has_auto_insurance_on_file", auto_on_file)
                .with_opt("diagnosis_codes", diagnosis_list(claim))
                .with("current_primary", billed.payer_name.as_str()),
        })
    }
}

/// Work-related injury billed to a payer other than workers compensation
#[derive(Debug, Clone, Default)]
pub struct WorkersCompRule {
    config: WorkersCompConfig,
}

impl WorkersCompRule {
    pub fn new(config: WorkersCompConfig) -> Self {
        Self { config }
    }
}

impl DetectionRule for WorkersCompRule {
    fn id(&self) -> RuleId {
        RuleId::WORKERS_COMP_PRIMARY
    }

    fn name(&self) -> &str {
        "Workers Comp Should Be Primary"
    }

    fn alert_type(&self) -> AlertType {
        AlertType::WorkersCompPrimary
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn evaluate(&self, claim: &Claim, patient: &Patient) -> Option<Finding> {
        if !claim.is_work_related {
            return None;
        }

        let billed = billed_primary(claim, patient)?;
        if billed.insurance_type == InsuranceType::WorkersComp {
            return None;
        }

        Some(Finding {
            confidence: self.config.confidence,
            estimated_recovery: Some(self.config.recovery_rate.apply(&claim.billed_amount)),
            description: format!(
                "Work-related injury billed to {} ({}). Workers compensation should be primary.",
                billed.payer_name, billed.insurance_type
            ),
            recommended_action:
                "Collect workers compensation details from the patient or employer and file the claim there"
                    .to_string(),
            data_points: Evidence::new()
                .with_opt("diagnosis_codes", diagnosis_list(claim))
                .with("current_primary", billed.payer_name.as_str())
                .with("employment_status", patient.employment_status().to_string()),
        })
    }
}
