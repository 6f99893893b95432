//! Alert identifier sources

use std::sync::atomic::{AtomicU64, Ordering};

use core_kernel::{AlertId, ClaimId};
use crate::rules::RuleId;

/// Supplies identifiers for issued alerts
pub trait AlertIdSource: Send + Sync {
    fn next_id(&self, claim_id: &ClaimId, rule_id: &RuleId) -> AlertId;
}

/// Derives each identifier from the claim and rule that produced the alert
///
/// Re-running a scan yields the same identifiers, whether or not it runs
/// in parallel. Identifiers are unique as long as claim ids are, which
/// `CobDetector::scan` enforces per batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentDerivedIds;

impl AlertIdSource for ContentDerivedIds {
    fn next_id(&self, claim_id: &ClaimId, rule_id: &RuleId) -> AlertId {
        AlertId::derive(claim_id, rule_id.as_str())
    }
}

/// Numbers alerts from a counter
///
/// Numbering follows issue order, which is only deterministic for
/// sequential scans.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    /// Starts numbering at `first`
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl AlertIdSource for SequentialIds {
    fn next_id(&self, _claim_id: &ClaimId, _rule_id: &RuleId) -> AlertId {
        AlertId::from_sequence(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
