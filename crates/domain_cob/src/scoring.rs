//! Scoring and Prioritization
//!
//! Two measures are derived from alerts:
//!
//! - **Priority score** ranks individual alerts for work queues:
//!   `severity weight (3/2/1) x confidence x recovery / 1000`
//! - **Risk score** summarizes a claim's alerts on a 0-100 scale:
//!   `sum(severity weight (10/5/2) x confidence) / (alerts x 10) x 100`

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;

use core_kernel::ClaimId;
use crate::alert::Alert;

/// Ranking score for a single alert
///
/// A missing recovery estimate scores zero.
pub fn priority_score(alert: &Alert) -> Decimal {
    let recovery = alert
        .estimated_recovery()
        .map(|m| m.amount())
        .unwrap_or(Decimal::ZERO);

    alert.severity().priority_weight() * alert.confidence_score() * (recovery / dec!(1000))
}

/// Sorts alerts by descending priority score
///
/// The sort is stable: alerts with equal scores keep their input order.
pub fn prioritize_alerts(mut alerts: Vec<Alert>) -> Vec<Alert> {
    alerts.sort_by_cached_key(|alert| Reverse(priority_score(alert)));
    alerts
}

/// Aggregate risk score for a set of alerts, in [0, 100]
///
/// An empty set scores zero. The result is rounded to two decimal places.
pub fn generate_risk_score(alerts: &[Alert]) -> Decimal {
    if alerts.is_empty() {
        return Decimal::ZERO;
    }

    let total: Decimal = alerts
        .iter()
        .map(|alert| alert.severity().risk_weight() * alert.confidence_score())
        .sum();
    let max_possible = Decimal::from(alerts.len() as u64) * dec!(10);

    (total / max_possible * dec!(100)).min(dec!(100)).round_dp(2)
}

/// Triage band for a risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    Elevated,
    Critical,
}

impl RiskLevel {
    pub fn from_score(score: Decimal) -> Self {
        if score >= dec!(75) {
            RiskLevel::Critical
        } else if score >= dec!(50) {
            RiskLevel::Elevated
        } else if score >= dec!(25) {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::Elevated => "ELEVATED",
            RiskLevel::Critical => "CRITICAL",
        };
        f.write_str(label)
    }
}

/// Risk of a single claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRisk {
    pub claim_id: ClaimId,
    pub alert_count: usize,
    pub risk_score: Decimal,
    pub level: RiskLevel,
}

/// Risk score per claim, in the order claims first appear
pub fn risk_scores_by_claim(alerts: &[Alert]) -> Vec<ClaimRisk> {
    let mut order: Vec<&ClaimId> = Vec::new();
    let mut grouped: HashMap<&ClaimId, Vec<Alert>> = HashMap::new();

    for alert in alerts {
        grouped
            .entry(alert.claim_id())
            .or_insert_with(|| {
                order.push(alert.claim_id());
                Vec::new()
            })
            .push(alert.clone());
    }

    order
        .into_iter()
        .map(|claim_id| {
            let claim_alerts = grouped.get(claim_id).map(Vec::as_slice).unwrap_or(&[]);
            let risk_score = generate_risk_score(claim_alerts);
            ClaimRisk {
                claim_id: claim_id.clone(),
                alert_count: claim_alerts.len(),
                risk_score,
                level: RiskLevel::from_score(risk_score),
            }
        })
        .collect()
}
