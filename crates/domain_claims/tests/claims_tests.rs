//! Tests for claim assembly and derived amounts

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{ClaimId, Currency, InsuranceId, Money, PatientId};
use domain_claims::{Claim, ClaimBuilder, ClaimError, ClaimStatus, DenialReason};

fn service_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
}

fn base_builder() -> ClaimBuilder {
    Claim::builder(
        ClaimId::new("CLM000000001"),
        PatientId::new("PAT000001"),
        service_date(),
    )
}

// ============================================================================
// Builder Tests
// ============================================================================

mod builder_tests {
    use super::*;

    #[test]
    fn test_build_minimal_claim() {
        let claim = base_builder().billed(Money::usd(dec!(1200))).build().unwrap();

        assert_eq!(claim.status, ClaimStatus::Pending);
        assert!(claim.paid_amount.is_zero());
        assert!(claim.primary_insurance_id.is_none());
        assert!(!claim.has_secondary());
        assert!(!claim.is_accident_related);
        assert!(!claim.is_work_related);
    }

    #[test]
    fn test_build_requires_billed_amount() {
        let result = base_builder().build();
        assert!(matches!(result, Err(ClaimError::MissingRequiredField(_))));
    }

    #[test]
    fn test_build_rejects_negative_paid() {
        let result = base_builder()
            .billed(Money::usd(dec!(100)))
            .paid(Money::usd(dec!(-1)))
            .build();

        assert!(matches!(result, Err(ClaimError::NegativeAmount { .. })));
    }

    #[test]
    fn test_build_rejects_currency_mismatch() {
        let result = base_builder()
            .billed(Money::usd(dec!(100)))
            .paid(Money::new(dec!(50), Currency::CAD))
            .build();

        assert!(matches!(result, Err(ClaimError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_build_rejects_same_primary_and_secondary() {
        let result = base_builder()
            .billed(Money::usd(dec!(100)))
            .primary_insurance(InsuranceId::new("INS1"))
            .secondary_insurance(InsuranceId::new("INS1"))
            .build();

        assert!(matches!(result, Err(ClaimError::SecondaryMatchesPrimary(_))));
    }

    #[test]
    fn test_denied_sets_reason_and_date() {
        let denial = NaiveDate::from_ymd_opt(2024, 8, 2).unwrap();
        let claim = base_builder()
            .billed(Money::usd(dec!(18000)))
            .denied(DenialReason::WrongPrimary, Some(denial))
            .carc_code("CO-22")
            .build()
            .unwrap();

        assert_eq!(claim.status, ClaimStatus::Denied);
        assert_eq!(claim.denial_reason, Some(DenialReason::WrongPrimary));
        assert_eq!(claim.denial_date, Some(denial));
        assert_eq!(claim.carc_code.as_deref(), Some("CO-22"));
    }

    #[test]
    fn test_diagnosis_codes_keep_order() {
        let claim = base_builder()
            .billed(Money::usd(dec!(100)))
            .diagnosis_code("S06.0X0A")
            .diagnosis_code("V43.52XA")
            .build()
            .unwrap();

        assert_eq!(claim.diagnosis_codes, vec!["S06.0X0A", "V43.52XA"]);
    }
}

// ============================================================================
// Derived Amount Tests
// ============================================================================

mod amount_tests {
    use super::*;

    #[test]
    fn test_patient_responsibility() {
        let claim = base_builder()
            .billed(Money::usd(dec!(10000)))
            .paid(Money::usd(dec!(9950)))
            .status(ClaimStatus::Paid)
            .build()
            .unwrap();

        assert_eq!(claim.patient_responsibility().amount(), dec!(50));
        assert!(claim.is_paid());
    }

    #[test]
    fn test_patient_responsibility_negative_on_overpayment() {
        let claim = base_builder()
            .billed(Money::usd(dec!(100)))
            .paid(Money::usd(dec!(120)))
            .build()
            .unwrap();

        assert!(claim.patient_responsibility().is_negative());
    }
}

// ============================================================================
// Serialization Tests
// ============================================================================

mod serde_tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&ClaimStatus::Paid).unwrap(), "\"PAID\"");
        assert_eq!(
            serde_json::to_string(&DenialReason::WrongPrimary).unwrap(),
            "\"WRONG_PRIMARY\""
        );
    }

    #[test]
    fn test_claim_roundtrip_preserves_references() {
        let claim = base_builder()
            .billed(Money::usd(dec!(2500)))
            .primary_insurance(InsuranceId::new("INS1"))
            .secondary_insurance(InsuranceId::new("INS2"))
            .build()
            .unwrap();

        let json = serde_json::to_string(&claim).unwrap();
        let back: Claim = serde_json::from_str(&json).unwrap();
        assert_eq!(back, claim);
    }
}
