//! Tests for scan summaries

use rust_decimal_macros::dec;
use std::collections::HashMap;

use core_kernel::{Currency, Money, PatientId};
use domain_cob::{AlertType, CobDetector, CobError, ScanSummary, Severity};
use domain_coverage::Patient;
use test_utils::{
    make_alert, DateFixtures, IdFixtures, PatientFixtures, TestClaimBuilder, TestPatientBuilder,
    PolicyFixtures,
};

#[test]
fn test_summary_from_scan() {
    let worker = PatientFixtures::commercial_only();
    let senior = TestPatientBuilder::new()
        .with_id(IdFixtures::patient_id_n(2))
        .born_on(DateFixtures::working_senior_birth_date())
        .with_policy(PolicyFixtures::medicare(1))
        .build();
    let patients: HashMap<PatientId, Patient> = [worker, senior]
        .into_iter()
        .map(|p| (p.id().clone(), p))
        .collect();

    let claims = vec![
        TestClaimBuilder::new()
            .with_id(IdFixtures::claim_id_n(1))
            .with_billed(dec!(1000))
            .billed_to("COM")
            .work_related()
            .build(),
        TestClaimBuilder::new()
            .with_id(IdFixtures::claim_id_n(2))
            .with_patient(IdFixtures::patient_id_n(2))
            .with_billed(dec!(5000))
            .billed_to("MCR")
            .build(),
        TestClaimBuilder::new()
            .with_id(IdFixtures::claim_id_n(3))
            .with_patient(IdFixtures::patient_id_n(77))
            .build(),
    ];

    let outcome = CobDetector::default().scan(&claims, &patients, DateFixtures::detected_on());
    let summary =
        ScanSummary::from_outcome(&outcome, Currency::USD, DateFixtures::detected_on(), 1).unwrap();

    assert_eq!(summary.total_claims_scanned, 3);
    assert_eq!(summary.total_alerts, 2);
    assert_eq!(summary.high_severity_alerts, 2);
    assert_eq!(summary.total_potential_recovery, Money::usd(dec!(5000)));
    assert_eq!(summary.count_for(AlertType::WorkersCompPrimary), 1);
    assert_eq!(summary.count_for(AlertType::MspViolation), 1);
    assert_eq!(summary.count_for(AlertType::MissingSecondary), 0);

    // MSP: 3 x 0.75 x 4.0 = 9.0 outranks workers comp: 3 x 0.9 x 1.0 = 2.7
    assert_eq!(summary.top_alerts.len(), 1);
    assert_eq!(summary.top_alerts[0].claim_id, IdFixtures::claim_id_n(2));
    assert_eq!(summary.top_alerts[0].alert_type, AlertType::MspViolation);
}

#[test]
fn test_empty_summary() {
    let summary = ScanSummary::build(&[], 0, Currency::USD, DateFixtures::detected_on(), 10).unwrap();

    assert_eq!(summary.total_alerts, 0);
    assert!(summary.total_potential_recovery.is_zero());
    assert!(summary.top_alerts.is_empty());
    assert!(summary.alerts_by_type.is_empty());
}

#[test]
fn test_mixed_currency_recoveries_rejected() {
    let alerts = vec![
        make_alert("C1", 0, Severity::High, dec!(0.9), Some(Money::usd(dec!(100)))),
        make_alert("C2", 1, Severity::High, dec!(0.9), Some(Money::new(dec!(100), Currency::CAD))),
    ];

    let result = ScanSummary::build(&alerts, 2, Currency::USD, DateFixtures::detected_on(), 5);
    assert!(matches!(result, Err(CobError::Money(_))));
}

#[test]
fn test_summary_serializes_type_counts_by_code() {
    let alerts = vec![make_alert("C1", 0, Severity::Low, dec!(0.5), None)];
    let summary = ScanSummary::build(&alerts, 1, Currency::USD, DateFixtures::detected_on(), 5).unwrap();

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["alerts_by_type"]["OTHER"], 1);
    assert_eq!(json["report_date"], "2024-09-01");
}
