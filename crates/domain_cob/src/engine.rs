//! Detection Engine
//!
//! Runs the rule catalog over a batch of claims. Each claim is reviewed
//! independently against its patient; a claim whose patient is not in the
//! directory is skipped and recorded, never treated as an error.
//!
//! Claim ids key alert ids, so only the first occurrence of a claim id in a
//! batch is reviewed. Later repeats are recorded as duplicates.
//!
//! With the `parallel` feature claims are reviewed on rayon's pool. Output
//! order is the same as a sequential scan: claim order, then rule order.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::hash::BuildHasher;
use tracing::{debug, info, warn};

use core_kernel::{ClaimId, PatientId};
use domain_claims::Claim;
use domain_coverage::Patient;

use crate::alert::Alert;
use crate::config::DetectionConfig;
use crate::ids::{AlertIdSource, ContentDerivedIds};
use crate::rules::RuleCatalog;

/// Looks up patients by identifier
pub trait PatientDirectory: Sync {
    fn patient(&self, id: &PatientId) -> Option<&Patient>;
}

impl<S: BuildHasher + Sync> PatientDirectory for HashMap<PatientId, Patient, S> {
    fn patient(&self, id: &PatientId) -> Option<&Patient> {
        self.get(id)
    }
}

impl PatientDirectory for BTreeMap<PatientId, Patient> {
    fn patient(&self, id: &PatientId) -> Option<&Patient> {
        self.get(id)
    }
}

/// Result of scanning a batch of claims
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutcome {
    /// Alerts in claim order, then rule order
    pub alerts: Vec<Alert>,
    /// Claims reviewed against their patient
    pub scanned: Vec<ClaimId>,
    /// Claims whose patient was not found
    pub skipped: Vec<ClaimId>,
    /// Repeated claim ids, one entry per repeat
    pub duplicates: Vec<ClaimId>,
}

impl ScanOutcome {
    /// Number of claims submitted
    pub fn total_claims(&self) -> usize {
        self.scanned.len() + self.skipped.len() + self.duplicates.len()
    }
}

enum ClaimReview {
    Reviewed(ClaimId, Vec<Alert>),
    Skipped(ClaimId),
}

/// Reviews claims for coordination-of-benefits problems
pub struct CobDetector {
    catalog: RuleCatalog,
    ids: Box<dyn AlertIdSource>,
}

impl CobDetector {
    /// Creates a detector over the given catalog with content-derived ids
    pub fn new(catalog: RuleCatalog) -> Self {
        Self {
            catalog,
            ids: Box::new(ContentDerivedIds),
        }
    }

    /// Creates a detector running the standard catalog
    pub fn with_config(config: &DetectionConfig) -> Self {
        Self::new(RuleCatalog::standard(config))
    }

    /// Replaces the alert identifier source
    pub fn with_id_source<I>(mut self, ids: I) -> Self
    where
        I: AlertIdSource + 'static,
    {
        self.ids = Box::new(ids);
        self
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Runs every rule against one claim, in rule order
    pub fn analyze_claim(&self, claim: &Claim, patient: &Patient, detected_on: NaiveDate) -> Vec<Alert> {
        let alerts: Vec<Alert> = self
            .catalog
            .evaluate(claim, patient)
            .into_iter()
            .map(|draft| {
                let id = self.ids.next_id(&draft.claim_id, &draft.rule_id);
                Alert::issue(id, detected_on, draft)
            })
            .collect();

        debug!(claim_id = %claim.id, alerts = alerts.len(), "claim analyzed");
        alerts
    }

    /// Scans a batch of claims
    ///
    /// A claim id seen earlier in the batch is not reviewed again, so every
    /// issued alert id is unique within the outcome.
    pub fn scan<D>(&self, claims: &[Claim], patients: &D, detected_on: NaiveDate) -> ScanOutcome
    where
        D: PatientDirectory + ?Sized,
    {
        let mut seen = HashSet::new();
        let (unique, repeated): (Vec<&Claim>, Vec<&Claim>) =
            claims.iter().partition(|claim| seen.insert(claim.id.clone()));

        let mut outcome = ScanOutcome::default();
        for claim in repeated {
            warn!(claim_id = %claim.id, "duplicate claim id in batch, claim not reviewed");
            outcome.duplicates.push(claim.id.clone());
        }

        let reviews = self.review_all(&unique, patients, detected_on);
        for review in reviews {
            match review {
                ClaimReview::Reviewed(id, alerts) => {
                    outcome.scanned.push(id);
                    outcome.alerts.extend(alerts);
                }
                ClaimReview::Skipped(id) => outcome.skipped.push(id),
            }
        }

        info!(
            claims_scanned = outcome.scanned.len(),
            claims_skipped = outcome.skipped.len(),
            duplicate_claims = outcome.duplicates.len(),
            alerts = outcome.alerts.len(),
            "COB scan complete"
        );
        outcome
    }

    /// Scans a batch of claims and returns only the alerts
    pub fn scan_claims<D>(&self, claims: &[Claim], patients: &D, detected_on: NaiveDate) -> Vec<Alert>
    where
        D: PatientDirectory + ?Sized,
    {
        self.scan(claims, patients, detected_on).alerts
    }

    fn review<D>(&self, claim: &Claim, patients: &D, detected_on: NaiveDate) -> ClaimReview
    where
        D: PatientDirectory + ?Sized,
    {
        match patients.patient(&claim.patient_id) {
            Some(patient) => {
                ClaimReview::Reviewed(claim.id.clone(), self.analyze_claim(claim, patient, detected_on))
            }
            None => {
                debug!(claim_id = %claim.id, patient_id = %claim.patient_id, "patient not found, claim skipped");
                ClaimReview::Skipped(claim.id.clone())
            }
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn review_all<D>(&self, claims: &[&Claim], patients: &D, detected_on: NaiveDate) -> Vec<ClaimReview>
    where
        D: PatientDirectory + ?Sized,
    {
        claims
            .iter()
            .map(|claim| self.review(claim, patients, detected_on))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn review_all<D>(&self, claims: &[&Claim], patients: &D, detected_on: NaiveDate) -> Vec<ClaimReview>
    where
        D: PatientDirectory + ?Sized,
    {
        use rayon::prelude::*;

        claims
            .par_iter()
            .map(|claim| self.review(claim, patients, detected_on))
            .collect()
    }
}

impl Default for CobDetector {
    fn default() -> Self {
        Self::with_config(&DetectionConfig::default())
    }
}

impl fmt::Debug for CobDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CobDetector")
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}
