//! Tests for patient coverage assembly and derived queries

use chrono::NaiveDate;
use core_kernel::{InsuranceId, PatientId};
use domain_coverage::{CoverageError, EmploymentStatus, Insurance, InsuranceType, Patient};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn policy(id: &str, insurance_type: InsuranceType, priority: u32, end: Option<NaiveDate>) -> Insurance {
    Insurance::new(
        InsuranceId::new(id),
        format!("Payer {}", id),
        insurance_type,
        date(2023, 1, 1),
        end,
        priority,
    )
    .unwrap()
}

mod building {
    use super::*;

    #[test]
    fn test_coverage_sorted_by_priority() {
        let patient = Patient::builder(PatientId::new("PAT000001"), date(1980, 5, 5))
            .add_insurance(policy("INS-B", InsuranceType::Medicare, 2, None))
            .add_insurance(policy("INS-A", InsuranceType::Commercial, 1, None))
            .build()
            .unwrap();

        let ids: Vec<&str> = patient.coverage().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["INS-A", "INS-B"]);
        assert_eq!(patient.primary_coverage().unwrap().id.as_str(), "INS-A");
    }

    #[test]
    fn test_duplicate_priority_rejected() {
        let result = Patient::builder(PatientId::new("PAT000002"), date(1980, 5, 5))
            .add_insurance(policy("INS-A", InsuranceType::Commercial, 1, None))
            .add_insurance(policy("INS-B", InsuranceType::Medicare, 1, None))
            .build();

        assert!(matches!(
            result,
            Err(CoverageError::DuplicatePriorityOrder { priority: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_insurance_rejected() {
        let result = Patient::builder(PatientId::new("PAT000003"), date(1980, 5, 5))
            .add_insurance(policy("INS-A", InsuranceType::Commercial, 1, None))
            .add_insurance(policy("INS-A", InsuranceType::Commercial, 2, None))
            .build();

        assert!(matches!(result, Err(CoverageError::DuplicateInsurance { .. })));
    }

    #[test]
    fn test_termination_before_effective_rejected() {
        let result = Insurance::new(
            InsuranceId::new("INS-X"),
            "Cigna",
            InsuranceType::Commercial,
            date(2024, 6, 1),
            Some(date(2024, 1, 1)),
            1,
        );

        assert!(matches!(result, Err(CoverageError::InvalidPeriod(_))));
    }

    #[test]
    fn test_defaults() {
        let patient = Patient::builder(PatientId::new("PAT000004"), date(1990, 1, 1))
            .build()
            .unwrap();

        assert_eq!(patient.employment_status(), EmploymentStatus::Unknown);
        assert!(patient.spouse_employment().is_none());
        assert!(patient.coverage().is_empty());
        assert!(patient.primary_coverage().is_none());
    }
}

mod queries {
    use super::*;

    fn two_policy_patient() -> Patient {
        Patient::builder(PatientId::new("PAT000010"), date(1957, 9, 30))
            .employment_status(EmploymentStatus::Employed)
            .spouse_employment(EmploymentStatus::Retired)
            .add_insurance(policy("INS-M", InsuranceType::Medicare, 1, None))
            .add_insurance(policy(
                "INS-C",
                InsuranceType::Commercial,
                2,
                Some(date(2024, 3, 31)),
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn test_active_coverage_on_respects_termination() {
        let patient = two_policy_patient();

        assert_eq!(patient.active_coverage_on(date(2024, 3, 31)).len(), 2);
        let after = patient.active_coverage_on(date(2024, 4, 1));
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].insurance_type, InsuranceType::Medicare);
    }

    #[test]
    fn test_active_coverage_before_any_effective_date() {
        let patient = two_policy_patient();
        assert!(patient.active_coverage_on(date(2022, 12, 31)).is_empty());
    }

    #[test]
    fn test_age_on_service_date() {
        let patient = two_policy_patient();
        assert_eq!(patient.age_on(date(2024, 9, 29)), 66);
        assert_eq!(patient.age_on(date(2024, 9, 30)), 67);
    }

    #[test]
    fn test_employment_flags() {
        let patient = two_policy_patient();
        assert!(patient.is_employed());
        assert!(!patient.has_employed_spouse());
    }

    #[test]
    fn test_insurance_lookup() {
        let patient = two_policy_patient();
        assert!(patient.insurance(&InsuranceId::new("INS-C")).is_some());
        assert!(patient.insurance(&InsuranceId::new("INS-Z")).is_none());
    }

    #[test]
    fn test_has_coverage_type() {
        let patient = two_policy_patient();
        assert!(patient.has_coverage_type(InsuranceType::Commercial));
        assert!(!patient.has_coverage_type(InsuranceType::AutoInsurance));
    }

    #[test]
    fn test_group_health_plan_classification() {
        assert!(InsuranceType::Commercial.is_group_health_plan());
        assert!(InsuranceType::MedicareAdvantage.is_group_health_plan());
        assert!(!InsuranceType::Medicare.is_group_health_plan());
        assert!(!InsuranceType::WorkersComp.is_group_health_plan());
    }
}

mod decoding {
    use super::*;
    use serde_json::json;

    fn policy_json(id: &str, priority: u32, is_primary: bool) -> serde_json::Value {
        json!({
            "id": id,
            "payer_name": format!("Payer {}", id),
            "insurance_type": "COMMERCIAL",
            "period": { "effective_date": "2023-01-01", "termination_date": null },
            "is_primary": is_primary,
            "priority_order": priority,
        })
    }

    fn patient_json(coverage: Vec<serde_json::Value>) -> serde_json::Value {
        json!({
            "id": "PAT000020",
            "date_of_birth": "1970-06-15",
            "employment_status": "Employed",
            "coverage": coverage,
        })
    }

    #[test]
    fn test_duplicate_priority_rejected_on_decode() {
        let doc = patient_json(vec![policy_json("INS-B", 2, false), policy_json("INS-A", 2, false)]);

        let result = serde_json::from_value::<Patient>(doc);

        let message = result.unwrap_err().to_string();
        assert!(message.contains("Duplicate priority order 2"), "{}", message);
    }

    #[test]
    fn test_decoded_coverage_sorted_and_flag_derived() {
        let doc = patient_json(vec![policy_json("INS-B", 2, true), policy_json("INS-A", 1, false)]);

        let patient: Patient = serde_json::from_value(doc).unwrap();

        let primary = patient.primary_coverage().unwrap();
        assert_eq!(primary.id.as_str(), "INS-A");
        assert!(primary.is_primary);
        assert!(!patient.coverage()[1].is_primary);
        assert_eq!(patient.spouse_employment(), None);
    }

    #[test]
    fn test_inverted_period_rejected_on_decode() {
        let mut policy = policy_json("INS-A", 1, true);
        policy["period"] = json!({ "effective_date": "2024-06-01", "termination_date": "2024-01-01" });

        assert!(serde_json::from_value::<Patient>(patient_json(vec![policy])).is_err());
    }

    #[test]
    fn test_encoded_patient_decodes_to_same_record() {
        let patient = Patient::builder(PatientId::new("PAT000021"), date(1960, 2, 2))
            .spouse_employment(EmploymentStatus::Retired)
            .add_insurance(policy("INS-M", InsuranceType::Medicare, 1, None))
            .build()
            .unwrap();

        let json = serde_json::to_string(&patient).unwrap();
        let back: Patient = serde_json::from_str(&json).unwrap();
        assert_eq!(back, patient);
    }
}
