//! Outcome of one sync run.

use std::fmt;

use crate::error::SyncItemError;

/// Process exit status when every campaign synced (including `0/0`).
pub const EXIT_OK: u8 = 0;
/// Process exit status when a phase-level error aborted the run.
pub const EXIT_FATAL: u8 = 1;
/// Process exit status when at least one campaign was skipped.
pub const EXIT_PARTIAL: u8 = 2;

/// A campaign that was not synced, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    pub campaign_id: String,
    pub reason: String,
}

/// Aggregate result of the per-campaign sync phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub total: usize,
    pub succeeded: usize,
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, campaign_id: &str, error: &SyncItemError) {
        self.failures.push(SyncFailure {
            campaign_id: campaign_id.to_string(),
            reason: error.to_string(),
        });
    }

    /// True when nothing was skipped.
    pub fn is_complete(&self) -> bool {
        self.succeeded == self.total
    }

    pub fn failed_ids(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|f| f.campaign_id.as_str())
    }

    /// Exit status for the binary: partial failure is not success.
    pub fn exit_code(&self) -> u8 {
        if self.is_complete() {
            EXIT_OK
        } else {
            EXIT_PARTIAL
        }
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.succeeded, self.total)
    }
}
