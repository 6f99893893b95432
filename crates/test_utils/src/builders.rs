//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use core_kernel::{ClaimId, InsuranceId, Money, PatientId};
use domain_claims::{Claim, ClaimStatus, DenialReason};
use domain_coverage::{EmploymentStatus, Insurance, Patient};
use rust_decimal::Decimal;

use crate::fixtures::{DateFixtures, IdFixtures, MoneyFixtures};

/// Builder for constructing test claims
///
/// Defaults: `CLM000000001` for `PAT000001`, served on the standard
/// service date, $5,000 billed, nothing paid, pending, no payers.
pub struct TestClaimBuilder {
    id: ClaimId,
    patient_id: PatientId,
    service_date: NaiveDate,
    billed: Money,
    paid: Option<Money>,
    primary: Option<InsuranceId>,
    secondary: Option<InsuranceId>,
    status: ClaimStatus,
    denial: Option<(DenialReason, Option<NaiveDate>)>,
    carc_code: Option<String>,
    diagnosis_codes: Vec<String>,
    accident_related: bool,
    work_related: bool,
}

impl Default for TestClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClaimBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: IdFixtures::claim_id(),
            patient_id: IdFixtures::patient_id(),
            service_date: DateFixtures::service_date(),
            billed: MoneyFixtures::usd_5000(),
            paid: None,
            primary: None,
            secondary: None,
            status: ClaimStatus::Pending,
            denial: None,
            carc_code: None,
            diagnosis_codes: Vec::new(),
            accident_related: false,
            work_related: false,
        }
    }

    pub fn with_id(mut self, id: ClaimId) -> Self {
        self.id = id;
        self
    }

    pub fn with_patient(mut self, patient_id: PatientId) -> Self {
        self.patient_id = patient_id;
        self
    }

    pub fn with_service_date(mut self, date: NaiveDate) -> Self {
        self.service_date = date;
        self
    }

    /// Sets the billed amount in USD
    pub fn with_billed(mut self, amount: Decimal) -> Self {
        self.billed = Money::usd(amount);
        self
    }

    /// Marks the claim paid with the given USD amount
    pub fn paid(mut self, amount: Decimal) -> Self {
        self.paid = Some(Money::usd(amount));
        self.status = ClaimStatus::Paid;
        self
    }

    /// Bills the given policy as primary
    pub fn billed_to(mut self, insurance_id: &str) -> Self {
        self.primary = Some(InsuranceId::new(insurance_id));
        self
    }

    pub fn with_secondary(mut self, insurance_id: &str) -> Self {
        self.secondary = Some(InsuranceId::new(insurance_id));
        self
    }

    pub fn denied(mut self, reason: DenialReason, on: Option<NaiveDate>) -> Self {
        self.denial = Some((reason, on));
        self
    }

    pub fn with_carc_code(mut self, code: impl Into<String>) -> Self {
        self.carc_code = Some(code.into());
        self
    }

    pub fn with_diagnosis(mut self, code: impl Into<String>) -> Self {
        self.diagnosis_codes.push(code.into());
        self
    }

    pub fn accident_related(mut self) -> Self {
        self.accident_related = true;
        self
    }

    pub fn work_related(mut self) -> Self {
        self.work_related = true;
        self
    }

    /// Builds the claim, panicking if the test data is invalid
    pub fn build(self) -> Claim {
        let mut builder = Claim::builder(self.id, self.patient_id, self.service_date)
            .billed(self.billed)
            .status(self.status)
            .accident_related(self.accident_related)
            .work_related(self.work_related);

        if let Some(paid) = self.paid {
            builder = builder.paid(paid);
        }
        if let Some(primary) = self.primary {
            builder = builder.primary_insurance(primary);
        }
        if let Some(secondary) = self.secondary {
            builder = builder.secondary_insurance(secondary);
        }
        if let Some((reason, on)) = self.denial {
            builder = builder.denied(reason, on);
        }
        if let Some(code) = self.carc_code {
            builder = builder.carc_code(code);
        }
        for code in self.diagnosis_codes {
            builder = builder.diagnosis_code(code);
        }

        builder.build().expect("valid test claim")
    }
}

/// Builder for constructing test patients
///
/// Defaults: `PAT000001`, 39 years old on the service date, employed, no
/// spouse employment on file and no coverage.
pub struct TestPatientBuilder {
    id: PatientId,
    date_of_birth: NaiveDate,
    employment: EmploymentStatus,
    spouse_employment: Option<EmploymentStatus>,
    coverage: Vec<Insurance>,
}

impl Default for TestPatientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPatientBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: IdFixtures::patient_id(),
            date_of_birth: DateFixtures::adult_birth_date(),
            employment: EmploymentStatus::Employed,
            spouse_employment: None,
            coverage: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: PatientId) -> Self {
        self.id = id;
        self
    }

    pub fn born_on(mut self, date_of_birth: NaiveDate) -> Self {
        self.date_of_birth = date_of_birth;
        self
    }

    pub fn with_employment(mut self, status: EmploymentStatus) -> Self {
        self.employment = status;
        self
    }

    pub fn with_spouse_employment(mut self, status: EmploymentStatus) -> Self {
        self.spouse_employment = Some(status);
        self
    }

    pub fn with_policy(mut self, insurance: Insurance) -> Self {
        self.coverage.push(insurance);
        self
    }

    /// Builds the patient, panicking if the test data is invalid
    pub fn build(self) -> Patient {
        let mut builder = Patient::builder(self.id, self.date_of_birth)
            .employment_status(self.employment);
        if let Some(spouse) = self.spouse_employment {
            builder = builder.spouse_employment(spouse);
        }
        for insurance in self.coverage {
            builder = builder.add_insurance(insurance);
        }
        builder.build().expect("valid test patient")
    }
}
