//! R004 Dependent age-out

use domain_claims::Claim;
use domain_coverage::Patient;

use super::{DetectionRule, Finding, RuleId};
use crate::alert::{AlertType, Severity};
use crate::config::AgeOutConfig;
use crate::evidence::Evidence;

/// Flags services after a dependent's primary coverage ended at the age
/// cutoff
#[derive(Debug, Clone, Default)]
pub struct DependentAgeOutRule {
    config: AgeOutConfig,
}

impl DependentAgeOutRule {
    pub fn new(config: AgeOutConfig) -> Self {
        Self { config }
    }
}

impl DetectionRule for DependentAgeOutRule {
    fn id(&self) -> RuleId {
        RuleId::DEPENDENT_AGE_OUT
    }

    fn name(&self) -> &str {
        "Dependent Age-Out"
    }

    fn alert_type(&self) -> AlertType {
        AlertType::DependentAgeOut
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn evaluate(&self, claim: &Claim, patient: &Patient) -> Option<Finding> {
        let config = &self.config;
        let age = patient.age_on(claim.service_date);
        if age < config.min_service_age || age > config.max_service_age {
            return None;
        }

        let primary = patient.primary_coverage()?;
        let terminated = primary.termination_date()?;
        let age_at_termination = patient.age_on(terminated);
        if age_at_termination < config.min_termination_age
            || age_at_termination > config.max_termination_age
        {
            return None;
        }
        if claim.service_date <= terminated {
            return None;
        }

        let days_after = (claim.service_date - terminated).num_days();

        Some(Finding {
            confidence: config.confidence,
            estimated_recovery: Some(config.recovery_rate.apply(&claim.billed_amount)),
            description: format!(
                "Dependent coverage with {} ended at age {}. Service date is {} days after termination.",
                primary.payer_name, age_at_termination, days_after
            ),
            recommended_action:
                "Confirm the patient has obtained new coverage and collect current insurance details"
                    .to_string(),
            data_points: Evidence::new()
                .with("patient_age", age)
                .with("termination_date", terminated)
                .with("service_date", claim.service_date)
                .with("days_after_termination", days_after),
        })
    }
}
