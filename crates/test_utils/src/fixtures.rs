//! Pre-built Test Fixtures
//!
//! Provides ready-to-use dates, policies and patients for COB tests.
//! Fixtures are consistent and predictable: the standard service date is
//! 15 July 2024 and every policy starts on 1 January 2020 unless stated.

use chrono::NaiveDate;
use core_kernel::{ClaimId, InsuranceId, Money, PatientId};
use domain_coverage::{EmploymentStatus, Insurance, InsuranceType, Patient};
use rust_decimal_macros::dec;

/// Builds a calendar date, panicking on invalid input
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// Fixture for calendar dates
pub struct DateFixtures;

impl DateFixtures {
    /// Standard date of service (Jul 15, 2024)
    pub fn service_date() -> NaiveDate {
        date(2024, 7, 15)
    }

    /// Standard detection date (Sep 1, 2024)
    pub fn detected_on() -> NaiveDate {
        date(2024, 9, 1)
    }

    /// Standard coverage start (Jan 1, 2020)
    pub fn coverage_start() -> NaiveDate {
        date(2020, 1, 1)
    }

    /// Birth date making the patient 67 on the service date
    pub fn working_senior_birth_date() -> NaiveDate {
        date(1957, 3, 1)
    }

    /// Birth date making the patient 39 on the service date
    pub fn adult_birth_date() -> NaiveDate {
        date(1985, 2, 2)
    }

    /// Birth date making the patient 26 on the service date
    pub fn dependent_birth_date() -> NaiveDate {
        date(1998, 4, 10)
    }
}

/// Fixture for identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn patient_id() -> PatientId {
        PatientId::new("PAT000001")
    }

    pub fn claim_id() -> ClaimId {
        ClaimId::new("CLM000000001")
    }

    /// Numbered claim identifier, e.g. `CLM000000042`
    pub fn claim_id_n(n: u32) -> ClaimId {
        ClaimId::new(format!("CLM{:09}", n))
    }

    /// Numbered patient identifier, e.g. `PAT000042`
    pub fn patient_id_n(n: u32) -> PatientId {
        PatientId::new(format!("PAT{:06}", n))
    }
}

/// Fixture for billed amounts
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn usd_5000() -> Money {
        Money::usd(dec!(5000.00))
    }

    pub fn usd_10000() -> Money {
        Money::usd(dec!(10000.00))
    }
}

/// Fixture for insurance policies
pub struct PolicyFixtures;

impl PolicyFixtures {
    /// Open-ended policy starting on the standard coverage start
    pub fn policy(id: &str, payer: &str, insurance_type: InsuranceType, priority: u32) -> Insurance {
        Insurance::new(
            InsuranceId::new(id),
            payer,
            insurance_type,
            DateFixtures::coverage_start(),
            None,
            priority,
        )
        .expect("valid fixture policy")
    }

    /// Policy with a termination date
    pub fn terminated(
        id: &str,
        payer: &str,
        insurance_type: InsuranceType,
        priority: u32,
        termination: NaiveDate,
    ) -> Insurance {
        Insurance::new(
            InsuranceId::new(id),
            payer,
            insurance_type,
            DateFixtures::coverage_start(),
            Some(termination),
            priority,
        )
        .expect("valid fixture policy")
    }

    /// Traditional Medicare, `MCR`
    pub fn medicare(priority: u32) -> Insurance {
        Self::policy("MCR", "Medicare Part B", InsuranceType::Medicare, priority)
    }

    /// Employer group plan, `COM`
    pub fn commercial(priority: u32) -> Insurance {
        Self::policy("COM", "Blue Cross Blue Shield", InsuranceType::Commercial, priority)
    }

    /// State Medicaid, `MCD`
    pub fn medicaid(priority: u32) -> Insurance {
        Self::policy("MCD", "State Medicaid", InsuranceType::Medicaid, priority)
    }

    /// Auto carrier, `AUT`
    pub fn auto(priority: u32) -> Insurance {
        Self::policy("AUT", "State Farm Auto", InsuranceType::AutoInsurance, priority)
    }

    /// Workers compensation carrier, `WC`
    pub fn workers_comp(priority: u32) -> Insurance {
        Self::policy("WC", "State Compensation Fund", InsuranceType::WorkersComp, priority)
    }
}

/// Fixture for patients
pub struct PatientFixtures;

impl PatientFixtures {
    /// Employed 67 year old with Medicare only
    pub fn working_senior_on_medicare() -> Patient {
        Patient::builder(IdFixtures::patient_id(), DateFixtures::working_senior_birth_date())
            .employment_status(EmploymentStatus::Employed)
            .add_insurance(PolicyFixtures::medicare(1))
            .build()
            .expect("valid fixture patient")
    }

    /// Employed adult with a single commercial policy
    pub fn commercial_only() -> Patient {
        Patient::builder(IdFixtures::patient_id(), DateFixtures::adult_birth_date())
            .employment_status(EmploymentStatus::Employed)
            .add_insurance(PolicyFixtures::commercial(1))
            .build()
            .expect("valid fixture patient")
    }

    /// Adult with active commercial primary and commercial secondary
    pub fn dual_commercial() -> Patient {
        Patient::builder(IdFixtures::patient_id(), DateFixtures::adult_birth_date())
            .employment_status(EmploymentStatus::Employed)
            .spouse_employment(EmploymentStatus::Employed)
            .add_insurance(PolicyFixtures::commercial(1))
            .add_insurance(PolicyFixtures::policy(
                "SP",
                "Spouse Employer Plan",
                InsuranceType::Commercial,
                2,
            ))
            .build()
            .expect("valid fixture patient")
    }
}
