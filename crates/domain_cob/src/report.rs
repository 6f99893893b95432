//! Scan summary
//!
//! Aggregate figures for one scan, ready for a downstream report or
//! dashboard to render.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use core_kernel::{AlertId, ClaimId, Currency, Money};
use crate::alert::{Alert, AlertType, Severity};
use crate::engine::ScanOutcome;
use crate::error::CobError;
use crate::scoring::prioritize_alerts;

/// One line of the top-alerts list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertDigest {
    pub alert_id: AlertId,
    pub claim_id: ClaimId,
    pub alert_type: AlertType,
    pub severity: Severity,
    pub potential_recovery: Option<Money>,
}

impl From<&Alert> for AlertDigest {
    fn from(alert: &Alert) -> Self {
        Self {
            alert_id: alert.id(),
            claim_id: alert.claim_id().clone(),
            alert_type: alert.alert_type(),
            severity: alert.severity(),
            potential_recovery: alert.estimated_recovery(),
        }
    }
}

/// Summary of a scan's alerts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub report_date: NaiveDate,
    pub total_claims_scanned: usize,
    pub total_alerts: usize,
    pub high_severity_alerts: usize,
    pub total_potential_recovery: Money,
    pub alerts_by_type: BTreeMap<AlertType, usize>,
    /// Highest-priority alerts, best first
    pub top_alerts: Vec<AlertDigest>,
}

impl ScanSummary {
    /// Summarizes alerts raised over `claims_scanned` claims
    ///
    /// Recovery estimates must share `currency`.
    pub fn build(
        alerts: &[Alert],
        claims_scanned: usize,
        currency: Currency,
        report_date: NaiveDate,
        top_n: usize,
    ) -> Result<Self, CobError> {
        let recoveries: Vec<Money> = alerts
            .iter()
            .filter_map(|alert| alert.estimated_recovery())
            .collect();
        let total_potential_recovery = Money::sum(currency, &recoveries)?;

        let mut alerts_by_type = BTreeMap::new();
        for alert in alerts {
            *alerts_by_type.entry(alert.alert_type()).or_insert(0) += 1;
        }

        let top_alerts = prioritize_alerts(alerts.to_vec())
            .iter()
            .take(top_n)
            .map(AlertDigest::from)
            .collect();

        Ok(Self {
            report_date,
            total_claims_scanned: claims_scanned,
            total_alerts: alerts.len(),
            high_severity_alerts: alerts
                .iter()
                .filter(|alert| alert.severity() == Severity::High)
                .count(),
            total_potential_recovery,
            alerts_by_type,
            top_alerts,
        })
    }

    /// Summarizes a scan; every submitted claim counts as scanned
    pub fn from_outcome(
        outcome: &ScanOutcome,
        currency: Currency,
        report_date: NaiveDate,
        top_n: usize,
    ) -> Result<Self, CobError> {
        Self::build(&outcome.alerts, outcome.total_claims(), currency, report_date, top_n)
    }

    pub fn count_for(&self, alert_type: AlertType) -> usize {
        self.alerts_by_type.get(&alert_type).copied().unwrap_or(0)
    }
}
