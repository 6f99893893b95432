//! R007 Coordination period mismatch

use domain_claims::Claim;
use domain_coverage::Patient;

use super::{billed_primary, DetectionRule, Finding, RuleId};
use crate::alert::{AlertType, Severity};
use crate::config::CoveragePeriodConfig;
use crate::evidence::{DataPoint, Evidence};

/// Flags services that fall outside the billed primary policy's period
#[derive(Debug, Clone, Default)]
pub struct CoordinationPeriodRule {
    config: CoveragePeriodConfig,
}

impl CoordinationPeriodRule {
    pub fn new(config: CoveragePeriodConfig) -> Self {
        Self { config }
    }
}

impl DetectionRule for CoordinationPeriodRule {
    fn id(&self) -> RuleId {
        RuleId::COORDINATION_PERIOD_MISMATCH
    }

    fn name(&self) -> &str {
        "Coordination Period Mismatch"
    }

    fn alert_type(&self) -> AlertType {
        AlertType::CoordinationPeriodMismatch
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn evaluate(&self, claim: &Claim, patient: &Patient) -> Option<Finding> {
        let billed = billed_primary(claim, patient)?;
        let (boundary, days_outside) = billed.period.outside(claim.service_date)?;

        let coverage_end = billed
            .termination_date()
            .map(DataPoint::from)
            .unwrap_or_else(|| DataPoint::from("Active"));

        Some(Finding {
            confidence: self.config.confidence,
            estimated_recovery: Some(self.config.recovery_rate.apply(&claim.billed_amount)),
            description: format!(
                "Service date {} with {}. Days outside coverage: {}.",
                boundary.describe(),
                billed.payer_name,
                days_outside
            ),
            recommended_action:
                "Check for other coverage active on the service date and update the claim's payers"
                    .to_string(),
            data_points: Evidence::new()
                .with("service_date", claim.service_date)
                .with("coverage_start", billed.effective_date())
                .with("coverage_end", coverage_end)
                .with("days_outside_coverage", days_outside)
                .with("coverage_boundary", boundary.describe()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use core_kernel::InsuranceId;
    use domain_coverage::{EmploymentStatus, InsuranceType};
    use rust_decimal_macros::dec;

    fn terminated_patient() -> Patient {
        patient(
            date(1970, 6, 1),
            EmploymentStatus::Employed,
            vec![policy("COM", "United", InsuranceType::Commercial, 1, Some(date(2024, 6, 30)))],
        )
    }

    fn billed_on(service: chrono::NaiveDate) -> Claim {
        claim(service, dec!(4000))
            .primary_insurance(InsuranceId::new("COM"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_after_coverage_end() {
        let finding = CoordinationPeriodRule::default()
            .evaluate(&billed_on(date(2024, 7, 15)), &terminated_patient())
            .unwrap();

        assert_eq!(finding.confidence, dec!(0.95));
        assert_eq!(finding.estimated_recovery.unwrap().amount(), dec!(3000));
        assert_eq!(
            finding.data_points.get("days_outside_coverage"),
            Some(&DataPoint::Number(dec!(15)))
        );
        assert!(finding.description.starts_with("Service date after coverage end"));
    }

    #[test]
    fn test_before_coverage_start() {
        let finding = CoordinationPeriodRule::default()
            .evaluate(&billed_on(date(2019, 12, 22)), &terminated_patient())
            .unwrap();

        assert_eq!(
            finding.data_points.get("coverage_boundary"),
            Some(&DataPoint::from("before coverage start"))
        );
        assert_eq!(
            finding.data_points.get("days_outside_coverage"),
            Some(&DataPoint::Number(dec!(10)))
        );
    }

    #[test]
    fn test_boundary_days_are_covered() {
        let rule = CoordinationPeriodRule::default();
        assert!(rule.evaluate(&billed_on(date(2020, 1, 1)), &terminated_patient()).is_none());
        assert!(rule.evaluate(&billed_on(date(2024, 6, 30)), &terminated_patient()).is_none());
    }

    #[test]
    fn test_open_ended_coverage_reports_active() {
        let patient = patient(
            date(1970, 6, 1),
            EmploymentStatus::Employed,
            vec![policy("COM", "United", InsuranceType::Commercial, 1, None)],
        );
        let finding = CoordinationPeriodRule::default()
            .evaluate(&billed_on(date(2019, 6, 1)), &patient)
            .unwrap();

        assert_eq!(finding.data_points.get("coverage_end"), Some(&DataPoint::from("Active")));
    }
}
