//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Duration, NaiveDate};
use core_kernel::{AlertId, ClaimId, InsuranceId, Money, PatientId};
use domain_claims::{Claim, ClaimStatus, DenialReason};
use domain_cob::{Alert, AlertDraft, AlertType, Evidence, RuleId, Severity};
use domain_coverage::{EmploymentStatus, Insurance, InsuranceType, Patient};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::fixtures::{date, DateFixtures};

/// Strategy for generating severities
pub fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::High),
        Just(Severity::Medium),
        Just(Severity::Low),
    ]
}

/// Strategy for generating confidence scores in [0, 1] at two decimals
pub fn confidence_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=100i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for generating USD amounts from $0.00 to $100,000.00
pub fn usd_amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for generating optional recovery estimates
pub fn recovery_strategy() -> impl Strategy<Value = Option<Money>> {
    prop::option::of(usd_amount_strategy().prop_map(Money::usd))
}

/// Strategy for generating insurance types
pub fn insurance_type_strategy() -> impl Strategy<Value = InsuranceType> {
    prop_oneof![
        Just(InsuranceType::Commercial),
        Just(InsuranceType::Medicare),
        Just(InsuranceType::Medicaid),
        Just(InsuranceType::MedicareAdvantage),
        Just(InsuranceType::AutoInsurance),
        Just(InsuranceType::WorkersComp),
    ]
}

/// Strategy for generating employment statuses
pub fn employment_strategy() -> impl Strategy<Value = EmploymentStatus> {
    prop_oneof![
        Just(EmploymentStatus::Employed),
        Just(EmploymentStatus::SelfEmployed),
        Just(EmploymentStatus::Unemployed),
        Just(EmploymentStatus::Retired),
        Just(EmploymentStatus::Unknown),
    ]
}

/// Builds an issued alert with the given scoring inputs
///
/// The alert id is derived from the claim and position so distinct
/// positions produce distinct alerts.
pub fn make_alert(
    claim: &str,
    position: usize,
    severity: Severity,
    confidence: Decimal,
    recovery: Option<Money>,
) -> Alert {
    let claim_id = ClaimId::new(claim);
    let rule_id = RuleId::new(format!("P{:03}", position));
    Alert::issue(
        AlertId::derive(&claim_id, rule_id.as_str()),
        DateFixtures::detected_on(),
        AlertDraft {
            rule_id,
            claim_id,
            patient_id: PatientId::new("PAT000001"),
            alert_type: AlertType::Other,
            severity,
            confidence_score: confidence,
            estimated_recovery: recovery,
            description: format!("generated alert {}", position),
            recommended_action: String::new(),
            data_points: Evidence::new(),
        },
    )
}

/// Strategy for generating a list of alerts spread over a few claims
pub fn alerts_strategy(max_len: usize) -> impl Strategy<Value = Vec<Alert>> {
    prop::collection::vec(
        (0u8..4u8, severity_strategy(), confidence_strategy(), recovery_strategy()),
        0..max_len,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(position, (claim, severity, confidence, recovery))| {
                make_alert(&format!("CLM{:09}", claim), position, severity, confidence, recovery)
            })
            .collect()
    })
}

/// Strategy for generating a policy with the given id and priority
pub fn insurance_strategy(id: String, priority: u32) -> impl Strategy<Value = Insurance> {
    (
        insurance_type_strategy(),
        0i64..2000i64,
        prop::option::of(0i64..2000i64),
    )
        .prop_map(move |(insurance_type, start_offset, length)| {
            let effective = date(2020, 1, 1) + Duration::days(start_offset);
            let termination = length.map(|days| effective + Duration::days(days));
            Insurance::new(
                InsuranceId::new(id.clone()),
                format!("Payer {}", id),
                insurance_type,
                effective,
                termination,
                priority,
            )
            .expect("generated policy is valid")
        })
}

/// Strategy for generating a patient with up to three policies
pub fn patient_strategy() -> impl Strategy<Value = Patient> {
    (
        0i64..30_000i64,
        employment_strategy(),
        prop::option::of(employment_strategy()),
        0usize..=3usize,
    )
        .prop_flat_map(|(age_days, employment, spouse, policies)| {
            let coverage: Vec<_> = (1..=policies as u32)
                .map(|priority| insurance_strategy(format!("INS{}", priority), priority))
                .collect();
            (Just(age_days), Just(employment), Just(spouse), coverage)
        })
        .prop_map(|(age_days, employment, spouse, coverage)| {
            let born: NaiveDate = date(2024, 7, 15) - Duration::days(age_days);
            let mut builder = Patient::builder(PatientId::new("PAT000001"), born)
                .employment_status(employment);
            if let Some(spouse) = spouse {
                builder = builder.spouse_employment(spouse);
            }
            for insurance in coverage {
                builder = builder.add_insurance(insurance);
            }
            builder.build().expect("generated patient is valid")
        })
}

/// Strategy for generating a claim against `PAT000001` billed to one of
/// the `INS1`..`INS3` policies
pub fn claim_strategy() -> impl Strategy<Value = Claim> {
    (
        0i64..2500i64,
        usd_amount_strategy(),
        0u32..=100u32,
        prop::option::of(1u32..=3u32),
        prop::option::of(1u32..=3u32),
        prop_oneof![
            Just(ClaimStatus::Pending),
            Just(ClaimStatus::Paid),
            Just(ClaimStatus::Denied),
        ],
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(offset, billed, paid_percent, primary, secondary, status, wrong_primary, accident, work)| {
                let billed = Money::usd(billed);
                let paid = billed.multiply(Decimal::new(paid_percent as i64, 2));
                let mut builder = Claim::builder(
                    ClaimId::new("CLM000000001"),
                    PatientId::new("PAT000001"),
                    date(2020, 1, 1) + Duration::days(offset),
                )
                .billed(billed)
                .paid(paid)
                .status(status)
                .accident_related(accident)
                .work_related(work);

                if let Some(p) = primary {
                    builder = builder.primary_insurance(InsuranceId::new(format!("INS{}", p)));
                }
                if let Some(s) = secondary.filter(|s| Some(*s) != primary) {
                    builder = builder.secondary_insurance(InsuranceId::new(format!("INS{}", s)));
                }
                if status == ClaimStatus::Denied && wrong_primary {
                    builder = builder
                        .denied(DenialReason::WrongPrimary, None)
                        .carc_code("CO-22");
                }
                builder.build().expect("generated claim is valid")
            },
        )
}
