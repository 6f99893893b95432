//! Patient demographics and coverage

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use core_kernel::{age_on, CoveragePeriod, InsuranceId, PatientId};
use crate::error::CoverageError;
use crate::insurance::{Insurance, InsuranceType};

/// Employment status as reported at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Unemployed,
    Retired,
    Unknown,
}

impl EmploymentStatus {
    /// Returns true only for current employment with an employer
    pub fn is_employed(&self) -> bool {
        matches!(self, EmploymentStatus::Employed)
    }
}

impl Default for EmploymentStatus {
    fn default() -> Self {
        EmploymentStatus::Unknown
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EmploymentStatus::Employed => "Employed",
            EmploymentStatus::SelfEmployed => "Self-Employed",
            EmploymentStatus::Unemployed => "Unemployed",
            EmploymentStatus::Retired => "Retired",
            EmploymentStatus::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// A patient and the policies on file for them
///
/// Coverage is held in billing priority order and is read-only once built.
/// Deserialization goes through [`PatientBuilder`], so a decoded record is
/// held to the same coverage checks as one built in code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PatientRecord")]
pub struct Patient {
    id: PatientId,
    date_of_birth: NaiveDate,
    employment_status: EmploymentStatus,
    spouse_employment: Option<EmploymentStatus>,
    coverage: Vec<Insurance>,
}

impl Patient {
    /// Starts building a patient record
    pub fn builder(id: PatientId, date_of_birth: NaiveDate) -> PatientBuilder {
        PatientBuilder::new(id, date_of_birth)
    }

    pub fn id(&self) -> &PatientId {
        &self.id
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    pub fn employment_status(&self) -> EmploymentStatus {
        self.employment_status
    }

    pub fn spouse_employment(&self) -> Option<EmploymentStatus> {
        self.spouse_employment
    }

    /// Returns true if the patient is currently employed
    pub fn is_employed(&self) -> bool {
        self.employment_status.is_employed()
    }

    /// Returns true if the spouse is reported as employed
    pub fn has_employed_spouse(&self) -> bool {
        self.spouse_employment.map_or(false, |s| s.is_employed())
    }

    /// All policies on file, in priority order
    pub fn coverage(&self) -> &[Insurance] {
        &self.coverage
    }

    /// Age in completed years on the given date
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        age_on(self.date_of_birth, date)
    }

    /// Policies covering the given date, in priority order
    pub fn active_coverage_on(&self, date: NaiveDate) -> Vec<&Insurance> {
        self.coverage.iter().filter(|ins| ins.is_active_on(date)).collect()
    }

    /// The first policy in priority order, regardless of dates
    pub fn primary_coverage(&self) -> Option<&Insurance> {
        self.coverage.first()
    }

    /// Looks up a policy by identifier
    pub fn insurance(&self, id: &InsuranceId) -> Option<&Insurance> {
        self.coverage.iter().find(|ins| &ins.id == id)
    }

    /// Returns true if any policy on file has the given type
    pub fn has_coverage_type(&self, insurance_type: InsuranceType) -> bool {
        self.coverage
            .iter()
            .any(|ins| ins.insurance_type == insurance_type)
    }
}

/// Wire shape of a patient before coverage is validated
#[derive(Deserialize)]
struct PatientRecord {
    id: PatientId,
    date_of_birth: NaiveDate,
    #[serde(default)]
    employment_status: EmploymentStatus,
    #[serde(default)]
    spouse_employment: Option<EmploymentStatus>,
    #[serde(default)]
    coverage: Vec<Insurance>,
}

impl TryFrom<PatientRecord> for Patient {
    type Error = CoverageError;

    fn try_from(record: PatientRecord) -> Result<Self, Self::Error> {
        let builder = PatientBuilder {
            id: record.id,
            date_of_birth: record.date_of_birth,
            employment_status: record.employment_status,
            spouse_employment: record.spouse_employment,
            coverage: record.coverage,
        };
        builder.build()
    }
}

/// Builder for [`Patient`] records
pub struct PatientBuilder {
    id: PatientId,
    date_of_birth: NaiveDate,
    employment_status: EmploymentStatus,
    spouse_employment: Option<EmploymentStatus>,
    coverage: Vec<Insurance>,
}

impl PatientBuilder {
    pub fn new(id: PatientId, date_of_birth: NaiveDate) -> Self {
        Self {
            id,
            date_of_birth,
            employment_status: EmploymentStatus::Unknown,
            spouse_employment: None,
            coverage: Vec::new(),
        }
    }

    pub fn employment_status(mut self, status: EmploymentStatus) -> Self {
        self.employment_status = status;
        self
    }

    pub fn spouse_employment(mut self, status: EmploymentStatus) -> Self {
        self.spouse_employment = Some(status);
        self
    }

    pub fn add_insurance(mut self, insurance: Insurance) -> Self {
        self.coverage.push(insurance);
        self
    }

    /// Validates coverage and builds the patient
    ///
    /// Policies are ordered by `priority_order`; duplicate priorities or
    /// duplicate policy identifiers are rejected. The primary flag is
    /// re-derived from the priority.
    pub fn build(mut self) -> Result<Patient, CoverageError> {
        let mut priorities = HashSet::new();
        let mut ids = HashSet::new();

        for ins in &mut self.coverage {
            if ins.priority_order == 0 {
                return Err(CoverageError::InvalidPriorityOrder(ins.id.to_string()));
            }
            CoveragePeriod::new(ins.period.effective_date, ins.period.termination_date)?;
            ins.is_primary = ins.priority_order == 1;
            if !priorities.insert(ins.priority_order) {
                return Err(CoverageError::DuplicatePriorityOrder {
                    patient_id: self.id.to_string(),
                    priority: ins.priority_order,
                });
            }
            if !ids.insert(ins.id.clone()) {
                return Err(CoverageError::DuplicateInsurance {
                    patient_id: self.id.to_string(),
                    insurance_id: ins.id.to_string(),
                });
            }
        }

        self.coverage.sort_by_key(|ins| ins.priority_order);

        Ok(Patient {
            id: self.id,
            date_of_birth: self.date_of_birth,
            employment_status: self.employment_status,
            spouse_employment: self.spouse_employment,
            coverage: self.coverage,
        })
    }
}
