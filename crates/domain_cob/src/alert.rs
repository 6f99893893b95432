//! COB alerts
//!
//! An alert is an immutable record of one rule firing on one claim. Rules
//! produce an [`AlertDraft`]; the detector stamps it with an identifier and
//! detection date to issue the [`Alert`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{AlertId, ClaimId, Money, PatientId};
use crate::evidence::Evidence;
use crate::rules::RuleId;

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Weight used when ranking individual alerts
    pub fn priority_weight(&self) -> Decimal {
        match self {
            Severity::High => dec!(3),
            Severity::Medium => dec!(2),
            Severity::Low => dec!(1),
        }
    }

    /// Weight used when aggregating a claim's risk score
    pub fn risk_weight(&self) -> Decimal {
        match self {
            Severity::High => dec!(10),
            Severity::Medium => dec!(5),
            Severity::Low => dec!(2),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        };
        f.write_str(label)
    }
}

/// Kind of COB problem an alert reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    /// Medicare billed ahead of a payer that should be primary
    MspViolation,
    /// Denied for wrong primary with the correct payer on file
    WrongPrimaryOrder,
    /// Likely unreported secondary coverage
    MissingSecondary,
    /// Dependent coverage ended at the age cutoff
    DependentAgeOut,
    /// Accident claim billed to a health payer
    AutoLiabilityPrimary,
    /// Work injury billed to a non-workers-comp payer
    WorkersCompPrimary,
    /// Service outside the billed policy's coverage period
    CoordinationPeriodMismatch,
    /// Active secondary coverage was never billed
    SecondaryNotBilled,
    /// Raised by a rule outside the standard catalog
    Other,
}

impl Default for AlertType {
    fn default() -> Self {
        AlertType::Other
    }
}

impl AlertType {
    pub fn code(&self) -> &'static str {
        match self {
            AlertType::MspViolation => "MSP_VIOLATION",
            AlertType::WrongPrimaryOrder => "WRONG_PRIMARY_ORDER",
            AlertType::MissingSecondary => "MISSING_SECONDARY",
            AlertType::DependentAgeOut => "DEPENDENT_AGE_OUT",
            AlertType::AutoLiabilityPrimary => "AUTO_LIABILITY_PRIMARY",
            AlertType::WorkersCompPrimary => "WORKERS_COMP_PRIMARY",
            AlertType::CoordinationPeriodMismatch => "COORDINATION_PERIOD_MISMATCH",
            AlertType::SecondaryNotBilled => "SECONDARY_NOT_BILLED",
            AlertType::Other => "OTHER",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Alert content before it is issued
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDraft {
    pub rule_id: RuleId,
    pub claim_id: ClaimId,
    pub patient_id: PatientId,
    pub alert_type: AlertType,
    pub severity: Severity,
    /// Confidence in [0, 1]
    pub confidence_score: Decimal,
    pub estimated_recovery: Option<Money>,
    pub description: String,
    pub recommended_action: String,
    pub data_points: Evidence,
}

/// An issued COB alert
///
/// Decoding goes through [`Alert::issue`], so stored alerts keep the same
/// confidence and recovery bounds as freshly issued ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AlertRecord")]
pub struct Alert {
    id: AlertId,
    rule_id: RuleId,
    claim_id: ClaimId,
    patient_id: PatientId,
    alert_type: AlertType,
    severity: Severity,
    confidence_score: Decimal,
    estimated_recovery: Option<Money>,
    detected_date: NaiveDate,
    description: String,
    recommended_action: String,
    data_points: Evidence,
}

#[derive(Deserialize)]
struct AlertRecord {
    id: AlertId,
    rule_id: RuleId,
    claim_id: ClaimId,
    patient_id: PatientId,
    alert_type: AlertType,
    severity: Severity,
    confidence_score: Decimal,
    estimated_recovery: Option<Money>,
    detected_date: NaiveDate,
    description: String,
    recommended_action: String,
    data_points: Evidence,
}

impl From<AlertRecord> for Alert {
    fn from(record: AlertRecord) -> Self {
        let draft = AlertDraft {
            rule_id: record.rule_id,
            claim_id: record.claim_id,
            patient_id: record.patient_id,
            alert_type: record.alert_type,
            severity: record.severity,
            confidence_score: record.confidence_score,
            estimated_recovery: record.estimated_recovery,
            description: record.description,
            recommended_action: record.recommended_action,
            data_points: record.data_points,
        };
        Alert::issue(record.id, record.detected_date, draft)
    }
}

impl Alert {
    /// Issues a drafted alert
    ///
    /// Confidence is clamped to [0, 1] and a negative recovery estimate is
    /// floored at zero.
    pub fn issue(id: AlertId, detected_date: NaiveDate, draft: AlertDraft) -> Self {
        Self {
            id,
            rule_id: draft.rule_id,
            claim_id: draft.claim_id,
            patient_id: draft.patient_id,
            alert_type: draft.alert_type,
            severity: draft.severity,
            confidence_score: draft.confidence_score.clamp(Decimal::ZERO, Decimal::ONE),
            estimated_recovery: draft.estimated_recovery.map(|m| m.floor_zero()),
            detected_date,
            description: draft.description,
            recommended_action: draft.recommended_action,
            data_points: draft.data_points,
        }
    }

    pub fn id(&self) -> AlertId {
        self.id
    }

    pub fn rule_id(&self) -> &RuleId {
        &self.rule_id
    }

    pub fn claim_id(&self) -> &ClaimId {
        &self.claim_id
    }

    pub fn patient_id(&self) -> &PatientId {
        &self.patient_id
    }

    pub fn alert_type(&self) -> AlertType {
        self.alert_type
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn confidence_score(&self) -> Decimal {
        self.confidence_score
    }

    pub fn estimated_recovery(&self) -> Option<Money> {
        self.estimated_recovery
    }

    pub fn detected_date(&self) -> NaiveDate {
        self.detected_date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn recommended_action(&self) -> &str {
        &self.recommended_action
    }

    pub fn data_points(&self) -> &Evidence {
        &self.data_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::DataPoint;

    fn issued() -> Alert {
        let claim_id = ClaimId::new("CLM000000042");
        Alert::issue(
            AlertId::derive(&claim_id, "R003"),
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            AlertDraft {
                rule_id: RuleId::MISSING_SECONDARY,
                claim_id,
                patient_id: PatientId::new("PAT000042"),
                alert_type: AlertType::MissingSecondary,
                severity: Severity::Medium,
                confidence_score: dec!(0.70),
                estimated_recovery: Some(Money::usd(dec!(200))),
                description: "Patient likely has unreported secondary coverage.".to_string(),
                recommended_action: "Contact the patient".to_string(),
                data_points: Evidence::new()
                    .with("carc_code", "109")
                    .with("spouse_employed", true),
            },
        )
    }

    #[test]
    fn test_issue_clamps_confidence_and_floors_recovery() {
        let mut stored = issued();
        stored.confidence_score = dec!(1.4);
        stored.estimated_recovery = Some(Money::usd(dec!(-50)));

        let json = serde_json::to_string(&stored).unwrap();
        let decoded: Alert = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded.confidence_score(), Decimal::ONE);
        assert!(decoded.estimated_recovery().unwrap().is_zero());
    }

    #[test]
    fn test_decoded_alert_matches_issued() {
        let alert = issued();

        let json = serde_json::to_string(&alert).unwrap();
        let decoded: Alert = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, alert);
        assert_eq!(decoded.data_points().get("carc_code"), Some(&DataPoint::from("109")));
    }

    #[test]
    fn test_severity_weights() {
        assert_eq!(Severity::High.priority_weight(), dec!(3));
        assert_eq!(Severity::Low.risk_weight(), dec!(2));
        assert_eq!(AlertType::SecondaryNotBilled.to_string(), "SECONDARY_NOT_BILLED");
    }
}
