//! Claim aggregate

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ClaimId, Currency, InsuranceId, Money, PatientId};
use crate::error::ClaimError;

/// Claim status as of the latest remittance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    /// Submitted, no remittance yet
    Pending,
    /// Paid by the billed payer
    Paid,
    /// Denied by the billed payer
    Denied,
    /// Denial under appeal
    Appealed,
}

impl ClaimStatus {
    pub fn code(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "PENDING",
            ClaimStatus::Paid => "PAID",
            ClaimStatus::Denied => "DENIED",
            ClaimStatus::Appealed => "APPEALED",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Normalized reason behind a payer denial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenialReason {
    /// Another payer is primary
    WrongPrimary,
    /// Medicare secondary payer rules apply
    MspViolation,
    /// Dependent no longer eligible
    DependentEligibility,
    /// Auto/liability carrier is responsible
    AutoLiability,
    /// Coverage not in force on the service date
    CoverageTerminated,
    /// Any other denial
    Other,
}

/// A healthcare claim and its remittance outcome
///
/// Claims are produced by ingestion and treated as read-only by review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Upstream claim identifier
    pub id: ClaimId,
    /// Patient the service was rendered to
    pub patient_id: PatientId,
    /// Date of service
    pub service_date: NaiveDate,
    /// Charges billed
    pub billed_amount: Money,
    /// Amount paid by payers so far
    pub paid_amount: Money,
    /// Policy billed as primary
    pub primary_insurance_id: Option<InsuranceId>,
    /// Policy billed as secondary
    pub secondary_insurance_id: Option<InsuranceId>,
    /// Latest remittance status
    pub status: ClaimStatus,
    /// Normalized denial reason
    pub denial_reason: Option<DenialReason>,
    /// Claim Adjustment Reason Code reported by the payer
    pub carc_code: Option<String>,
    /// Date of the denial
    pub denial_date: Option<NaiveDate>,
    /// ICD-10 diagnosis codes in claim order
    pub diagnosis_codes: Vec<String>,
    /// Service relates to an accident
    pub is_accident_related: bool,
    /// Service relates to a workplace injury
    pub is_work_related: bool,
}

impl Claim {
    /// Starts building a claim
    pub fn builder(id: ClaimId, patient_id: PatientId, service_date: NaiveDate) -> ClaimBuilder {
        ClaimBuilder::new(id, patient_id, service_date)
    }

    /// Billed charges not covered by payments (billed − paid)
    ///
    /// May be negative when a payer overpaid.
    pub fn patient_responsibility(&self) -> Money {
        // Currencies are checked when the claim is built
        self.billed_amount
            .checked_sub(&self.paid_amount)
            .unwrap_or_else(|_| Money::zero(self.currency()))
    }

    /// Currency the claim was billed in
    pub fn currency(&self) -> Currency {
        self.billed_amount.currency()
    }

    pub fn is_paid(&self) -> bool {
        self.status == ClaimStatus::Paid
    }

    /// Returns true if a secondary payer was billed
    pub fn has_secondary(&self) -> bool {
        self.secondary_insurance_id.is_some()
    }
}

/// Builder for [`Claim`]
pub struct ClaimBuilder {
    id: ClaimId,
    patient_id: PatientId,
    service_date: NaiveDate,
    billed_amount: Option<Money>,
    paid_amount: Option<Money>,
    primary_insurance_id: Option<InsuranceId>,
    secondary_insurance_id: Option<InsuranceId>,
    status: ClaimStatus,
    denial_reason: Option<DenialReason>,
    carc_code: Option<String>,
    denial_date: Option<NaiveDate>,
    diagnosis_codes: Vec<String>,
    is_accident_related: bool,
    is_work_related: bool,
}

impl ClaimBuilder {
    pub fn new(id: ClaimId, patient_id: PatientId, service_date: NaiveDate) -> Self {
        Self {
            id,
            patient_id,
            service_date,
            billed_amount: None,
            paid_amount: None,
            primary_insurance_id: None,
            secondary_insurance_id: None,
            status: ClaimStatus::Pending,
            denial_reason: None,
            carc_code: None,
            denial_date: None,
            diagnosis_codes: Vec::new(),
            is_accident_related: false,
            is_work_related: false,
        }
    }

    pub fn billed(mut self, amount: Money) -> Self {
        self.billed_amount = Some(amount);
        self
    }

    pub fn paid(mut self, amount: Money) -> Self {
        self.paid_amount = Some(amount);
        self
    }

    pub fn primary_insurance(mut self, id: InsuranceId) -> Self {
        self.primary_insurance_id = Some(id);
        self
    }

    pub fn secondary_insurance(mut self, id: InsuranceId) -> Self {
        self.secondary_insurance_id = Some(id);
        self
    }

    pub fn status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    /// Marks the claim denied for the given reason
    pub fn denied(mut self, reason: DenialReason, on: Option<NaiveDate>) -> Self {
        self.status = ClaimStatus::Denied;
        self.denial_reason = Some(reason);
        self.denial_date = on;
        self
    }

    pub fn carc_code(mut self, code: impl Into<String>) -> Self {
        self.carc_code = Some(code.into());
        self
    }

    pub fn diagnosis_code(mut self, code: impl Into<String>) -> Self {
        self.diagnosis_codes.push(code.into());
        self
    }

    pub fn accident_related(mut self, flag: bool) -> Self {
        self.is_accident_related = flag;
        self
    }

    pub fn work_related(mut self, flag: bool) -> Self {
        self.is_work_related = flag;
        self
    }

    /// Validates amounts and payer references and builds the claim
    ///
    /// A missing paid amount defaults to zero in the billed currency.
    pub fn build(self) -> Result<Claim, ClaimError> {
        let billed = self
            .billed_amount
            .ok_or_else(|| ClaimError::MissingRequiredField("billed_amount".to_string()))?;
        let paid = self.paid_amount.unwrap_or_else(|| Money::zero(billed.currency()));

        if billed.currency() != paid.currency() {
            return Err(ClaimError::CurrencyMismatch {
                billed: billed.currency().to_string(),
                paid: paid.currency().to_string(),
            });
        }
        for (field, amount) in [("billed_amount", &billed), ("paid_amount", &paid)] {
            if amount.is_negative() {
                return Err(ClaimError::NegativeAmount {
                    field: field.to_string(),
                    amount: amount.to_string(),
                });
            }
        }
        if let (Some(primary), Some(secondary)) =
            (&self.primary_insurance_id, &self.secondary_insurance_id)
        {
            if primary == secondary {
                return Err(ClaimError::SecondaryMatchesPrimary(secondary.to_string()));
            }
        }

        Ok(Claim {
            id: self.id,
            patient_id: self.patient_id,
            service_date: self.service_date,
            billed_amount: billed,
            paid_amount: paid,
            primary_insurance_id: self.primary_insurance_id,
            secondary_insurance_id: self.secondary_insurance_id,
            status: self.status,
            denial_reason: self.denial_reason,
            carc_code: self.carc_code,
            denial_date: self.denial_date,
            diagnosis_codes: self.diagnosis_codes,
            is_accident_related: self.is_accident_related,
            is_work_related: self.is_work_related,
        })
    }
}
