//! Insurance policies held by a patient

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{CoveragePeriod, InsuranceId};
use crate::error::CoverageError;

/// Kind of payer behind a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsuranceType {
    /// Employer-sponsored or individual commercial plan
    Commercial,
    /// Traditional Medicare
    Medicare,
    /// State Medicaid
    Medicaid,
    /// Medicare Advantage (Part C) plan
    MedicareAdvantage,
    /// Auto or liability carrier
    AutoInsurance,
    /// Workers compensation carrier
    WorkersComp,
}

impl InsuranceType {
    /// Returns true for plans that pay ahead of Medicare under MSP rules
    pub fn is_group_health_plan(&self) -> bool {
        matches!(self, InsuranceType::Commercial | InsuranceType::MedicareAdvantage)
    }

    /// Returns the wire code
    pub fn code(&self) -> &'static str {
        match self {
            InsuranceType::Commercial => "COMMERCIAL",
            InsuranceType::Medicare => "MEDICARE",
            InsuranceType::Medicaid => "MEDICAID",
            InsuranceType::MedicareAdvantage => "MEDICARE_ADVANTAGE",
            InsuranceType::AutoInsurance => "AUTO_INSURANCE",
            InsuranceType::WorkersComp => "WORKERS_COMP",
        }
    }
}

impl fmt::Display for InsuranceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single insurance policy on file for a patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insurance {
    /// Upstream policy identifier
    pub id: InsuranceId,
    /// Payer display name
    pub payer_name: String,
    /// Payer type
    pub insurance_type: InsuranceType,
    /// Covered date span
    pub period: CoveragePeriod,
    /// Derived from `priority_order == 1`; the billing rank is authoritative
    pub is_primary: bool,
    /// Billing rank (1 bills first)
    pub priority_order: u32,
}

impl Insurance {
    /// Creates a policy, validating its period and priority
    pub fn new(
        id: InsuranceId,
        payer_name: impl Into<String>,
        insurance_type: InsuranceType,
        effective_date: NaiveDate,
        termination_date: Option<NaiveDate>,
        priority_order: u32,
    ) -> Result<Self, CoverageError> {
        if priority_order == 0 {
            return Err(CoverageError::InvalidPriorityOrder(id.to_string()));
        }
        let period = CoveragePeriod::new(effective_date, termination_date)?;

        Ok(Self {
            id,
            payer_name: payer_name.into(),
            insurance_type,
            period,
            is_primary: priority_order == 1,
            priority_order,
        })
    }

    /// First covered day
    pub fn effective_date(&self) -> NaiveDate {
        self.period.effective_date
    }

    /// Last covered day, if terminated
    pub fn termination_date(&self) -> Option<NaiveDate> {
        self.period.termination_date
    }

    /// Returns true if the policy covers the given date
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.period.contains(date)
    }
}
