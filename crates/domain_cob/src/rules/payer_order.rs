//! R002 Wrong primary payer order

use domain_claims::{Claim, DenialReason};
use domain_coverage::{InsuranceType, Patient};

use super::{billed_primary, DetectionRule, Finding, RuleId};
use crate::alert::{AlertType, Severity};
use crate::config::WrongPrimaryConfig;
use crate::evidence::Evidence;

/// Flags wrong-primary denials where a commercial policy ranked second
/// is active and should have been billed first
#[derive(Debug, Clone, Default)]
pub struct WrongPrimaryOrderRule {
    config: WrongPrimaryConfig,
}

impl WrongPrimaryOrderRule {
    pub fn new(config: WrongPrimaryConfig) -> Self {
        Self { config }
    }
}

impl DetectionRule for WrongPrimaryOrderRule {
    fn id(&self) -> RuleId {
        RuleId::WRONG_PRIMARY_ORDER
    }

    fn name(&self) -> &str {
        "Wrong Primary Payer Order"
    }

    fn alert_type(&self) -> AlertType {
        AlertType::WrongPrimaryOrder
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn evaluate(&self, claim: &Claim, patient: &Patient) -> Option<Finding> {
        if claim.denial_reason != Some(DenialReason::WrongPrimary) {
            return None;
        }

        let active = patient.active_coverage_on(claim.service_date);
        if active.len() < 2 {
            return None;
        }

        let correct = active.iter().find(|ins| {
            ins.priority_order == 2 && ins.insurance_type == InsuranceType::Commercial
        })?;

        let denied_payer = billed_primary(claim, patient)
            .or_else(|| patient.primary_coverage())
            .map(|ins| ins.payer_name.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        Some(Finding {
            confidence: self.config.confidence,
            estimated_recovery: Some(self.config.recovery_rate.apply(&claim.billed_amount)),
            description: format!(
                "Claim denied for wrong primary payer. {} should be billed as primary.",
                correct.payer_name
            ),
            recommended_action: format!("Rebill the claim with {} as primary payer", correct.payer_name),
            data_points: Evidence::new()
                .with("denied_payer", denied_payer)
                .with("correct_primary", correct.payer_name.as_str())
                .with_opt("denial_date", claim.denial_date),
        })
    }
}
