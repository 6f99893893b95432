//! Tests for batch scanning, determinism and prioritization order

use proptest::prelude::*;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, HashMap, HashSet};

use core_kernel::{AlertId, PatientId};
use domain_cob::{
    prioritize_alerts, priority_score, AlertType, CobDetector, DetectionConfig, RuleCatalog,
};
use domain_coverage::Patient;
use test_utils::{
    assert_alert_well_formed, claim_strategy, init_tracing, patient_strategy, DateFixtures,
    IdFixtures, PatientFixtures, PolicyFixtures, TestClaimBuilder, TestPatientBuilder,
};

fn directory(patients: Vec<Patient>) -> HashMap<PatientId, Patient> {
    patients.into_iter().map(|p| (p.id().clone(), p)).collect()
}

// ============================================================================
// Scan Tests
// ============================================================================

mod scan_tests {
    use super::*;

    #[test]
    fn test_scan_keeps_claim_then_rule_order() {
        init_tracing();
        let senior = TestPatientBuilder::new()
            .with_id(IdFixtures::patient_id_n(1))
            .born_on(DateFixtures::working_senior_birth_date())
            .with_policy(PolicyFixtures::medicare(1))
            .build();
        let worker = TestPatientBuilder::new()
            .with_id(IdFixtures::patient_id_n(2))
            .with_policy(PolicyFixtures::commercial(1))
            .build();

        let claims = vec![
            TestClaimBuilder::new()
                .with_id(IdFixtures::claim_id_n(1))
                .with_patient(IdFixtures::patient_id_n(2))
                .billed_to("COM")
                .accident_related()
                .work_related()
                .build(),
            TestClaimBuilder::new()
                .with_id(IdFixtures::claim_id_n(2))
                .with_patient(IdFixtures::patient_id_n(1))
                .billed_to("MCR")
                .build(),
        ];

        let outcome = CobDetector::default().scan(
            &claims,
            &directory(vec![senior, worker]),
            DateFixtures::detected_on(),
        );

        let types: Vec<AlertType> = outcome.alerts.iter().map(|a| a.alert_type()).collect();
        assert_eq!(
            types,
            vec![
                AlertType::AutoLiabilityPrimary,
                AlertType::WorkersCompPrimary,
                AlertType::MspViolation,
            ]
        );
        assert_eq!(outcome.scanned.len(), 2);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_unknown_patient_skipped_silently() {
        let claims = vec![
            TestClaimBuilder::new()
                .with_id(IdFixtures::claim_id_n(1))
                .billed_to("COM")
                .work_related()
                .build(),
            TestClaimBuilder::new()
                .with_id(IdFixtures::claim_id_n(2))
                .with_patient(IdFixtures::patient_id_n(99))
                .billed_to("COM")
                .work_related()
                .build(),
        ];
        let patients: BTreeMap<PatientId, Patient> =
            [(IdFixtures::patient_id(), PatientFixtures::commercial_only())]
                .into_iter()
                .collect();

        let outcome = CobDetector::default().scan(&claims, &patients, DateFixtures::detected_on());

        assert_eq!(outcome.alerts.len(), 1);
        assert_eq!(outcome.scanned, vec![IdFixtures::claim_id_n(1)]);
        assert_eq!(outcome.skipped, vec![IdFixtures::claim_id_n(2)]);
        assert_eq!(outcome.total_claims(), 2);
    }

    #[test]
    fn test_repeated_claim_id_reviewed_once() {
        let claim = TestClaimBuilder::new()
            .with_id(IdFixtures::claim_id_n(1))
            .billed_to("COM")
            .accident_related()
            .work_related()
            .build();
        let claims = vec![claim.clone(), claim];
        let patients = directory(vec![PatientFixtures::commercial_only()]);

        let outcome = CobDetector::default().scan(&claims, &patients, DateFixtures::detected_on());

        assert_eq!(outcome.scanned, vec![IdFixtures::claim_id_n(1)]);
        assert_eq!(outcome.duplicates, vec![IdFixtures::claim_id_n(1)]);
        assert_eq!(outcome.total_claims(), 2);
        assert_eq!(outcome.alerts.len(), 2);

        let ids: HashSet<AlertId> = outcome.alerts.iter().map(|a| a.id()).collect();
        assert_eq!(ids.len(), outcome.alerts.len());
    }

    #[test]
    fn test_scan_claims_matches_scan() {
        let claims = vec![TestClaimBuilder::new().billed_to("MCR").build()];
        let patients = directory(vec![PatientFixtures::working_senior_on_medicare()]);
        let detector = CobDetector::default();

        let alerts = detector.scan_claims(&claims, &patients, DateFixtures::detected_on());
        let outcome = detector.scan(&claims, &patients, DateFixtures::detected_on());

        assert_eq!(alerts, outcome.alerts);
    }

    #[test]
    fn test_configured_confidence_flows_into_alerts() {
        let config = DetectionConfig::from_toml_str("[workers_comp]\nconfidence = 0.6\n").unwrap();
        let detector = CobDetector::new(RuleCatalog::standard(&config));
        let claim = TestClaimBuilder::new().billed_to("COM").work_related().build();

        let alerts =
            detector.analyze_claim(&claim, &PatientFixtures::commercial_only(), DateFixtures::detected_on());

        assert_eq!(alerts[0].confidence_score(), dec!(0.6));
    }
}

// ============================================================================
// Prioritization Tests
// ============================================================================

mod priority_tests {
    use super::*;

    #[test]
    fn test_equal_scores_keep_rule_order() {
        // Accident (no auto on file, 0.70) and work injury (0.90) on a
        // zero-billed claim both score zero
        let claim = TestClaimBuilder::new()
            .with_billed(dec!(0))
            .billed_to("COM")
            .accident_related()
            .work_related()
            .build();
        let alerts = CobDetector::default().analyze_claim(
            &claim,
            &PatientFixtures::commercial_only(),
            DateFixtures::detected_on(),
        );
        assert_eq!(priority_score(&alerts[0]), priority_score(&alerts[1]));

        let ranked = prioritize_alerts(alerts.clone());
        assert_eq!(ranked, alerts);
        assert_eq!(ranked[0].rule_id().as_str(), "R005");
    }

    #[test]
    fn test_higher_score_ranks_first() {
        let claim = TestClaimBuilder::new()
            .with_billed(dec!(1000))
            .billed_to("COM")
            .accident_related()
            .work_related()
            .build();
        let alerts = CobDetector::default().analyze_claim(
            &claim,
            &PatientFixtures::commercial_only(),
            DateFixtures::detected_on(),
        );

        let ranked = prioritize_alerts(alerts);
        assert_eq!(ranked[0].alert_type(), AlertType::WorkersCompPrimary);
        assert_eq!(priority_score(&ranked[0]), dec!(2.7));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn analyze_claim_is_deterministic(claim in claim_strategy(), patient in patient_strategy()) {
        let detector = CobDetector::default();
        let first = detector.analyze_claim(&claim, &patient, DateFixtures::detected_on());
        let second = detector.analyze_claim(&claim, &patient, DateFixtures::detected_on());

        prop_assert_eq!(&first, &second);
    }

    #[test]
    fn issued_alerts_are_well_formed(claim in claim_strategy(), patient in patient_strategy()) {
        let alerts = CobDetector::default().analyze_claim(&claim, &patient, DateFixtures::detected_on());

        prop_assert!(alerts.len() <= 8);
        for alert in &alerts {
            assert_alert_well_formed(alert);
        }
        let rule_ids: Vec<_> = alerts.iter().map(|a| a.rule_id().clone()).collect();
        let mut sorted = rule_ids.clone();
        sorted.sort();
        prop_assert_eq!(rule_ids, sorted);
    }
}
