//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for alerts and money that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_cob::{Alert, AlertType, Severity};
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that an alert satisfies the invariants every issued alert holds
///
/// Confidence lies in [0, 1] and any recovery estimate is non-negative.
pub fn assert_alert_well_formed(alert: &Alert) {
    assert!(
        alert.confidence_score() >= Decimal::ZERO && alert.confidence_score() <= Decimal::ONE,
        "Alert {} confidence out of range: {}",
        alert.id(),
        alert.confidence_score()
    );
    if let Some(recovery) = alert.estimated_recovery() {
        assert!(
            !recovery.is_negative(),
            "Alert {} has negative recovery: {}",
            alert.id(),
            recovery
        );
    }
}

/// Returns the single alert of the given type, panicking otherwise
pub fn expect_single_alert(alerts: &[Alert], alert_type: AlertType) -> &Alert {
    let matching: Vec<&Alert> = alerts
        .iter()
        .filter(|alert| alert.alert_type() == alert_type)
        .collect();
    assert_eq!(
        matching.len(),
        1,
        "Expected exactly one {} alert, found {} among {:?}",
        alert_type,
        matching.len(),
        alerts.iter().map(|a| a.alert_type()).collect::<Vec<_>>()
    );
    matching[0]
}

/// Asserts that no alert of the given type was raised
pub fn assert_no_alert(alerts: &[Alert], alert_type: AlertType) {
    assert!(
        alerts.iter().all(|alert| alert.alert_type() != alert_type),
        "Unexpected {} alert",
        alert_type
    );
}

/// Asserts an alert's type, severity and confidence
pub fn assert_alert(alert: &Alert, alert_type: AlertType, severity: Severity, confidence: Decimal) {
    assert_eq!(alert.alert_type(), alert_type, "alert type");
    assert_eq!(alert.severity(), severity, "severity of {}", alert_type);
    assert_eq!(
        alert.confidence_score(),
        confidence,
        "confidence of {}",
        alert_type
    );
}

/// Asserts the alert's recovery estimate equals `expected` to the cent
pub fn assert_recovery(alert: &Alert, expected: Decimal) {
    let recovery = alert
        .estimated_recovery()
        .unwrap_or_else(|| panic!("{} alert has no recovery estimate", alert.alert_type()));
    assert_money_approx_eq(
        &recovery,
        &Money::new(expected, recovery.currency()),
        Decimal::new(1, 2),
    );
}
