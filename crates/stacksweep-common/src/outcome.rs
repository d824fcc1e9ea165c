//! Per-resource delete outcomes and the sweep report
//!
//! Every delete attempt records an outcome instead of disappearing into log
//! text, so callers and tests can inspect exactly what happened to each
//! resource after a run.

use crate::resource_kind::ResourceKind;

/// Result of a single resource delete attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Resource was deleted (and reached its terminal state where waited on)
    Deleted,
    /// Resource was already gone when the delete was attempted
    AlreadyGone,
    /// Resource was intentionally not deleted (provider default, attached, ...)
    Skipped,
    /// Delete failed; the error is recorded on the record
    Failed,
}

/// One attempted resource with its outcome
#[derive(Debug, Clone)]
pub struct ResourceRecord {
    pub kind: ResourceKind,
    pub display_name: String,
    pub identifier: String,
    pub outcome: DeleteOutcome,
    /// Underlying error message for `Failed` outcomes
    pub error: Option<String>,
}

/// Accumulated outcomes of one sweep run
#[derive(Debug, Default)]
pub struct SweepReport {
    records: Vec<ResourceRecord>,
}

impl SweepReport {
    pub fn record(
        &mut self,
        kind: ResourceKind,
        display_name: impl Into<String>,
        identifier: impl Into<String>,
        outcome: DeleteOutcome,
        error: Option<String>,
    ) {
        self.records.push(ResourceRecord {
            kind,
            display_name: display_name.into(),
            identifier: identifier.into(),
            outcome,
            error,
        });
    }

    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    /// Records for one resource kind, in attempt order
    pub fn records_of(&self, kind: ResourceKind) -> Vec<&ResourceRecord> {
        self.records.iter().filter(|r| r.kind == kind).collect()
    }

    pub fn deleted(&self) -> usize {
        self.count(DeleteOutcome::Deleted)
    }

    pub fn already_gone(&self) -> usize {
        self.count(DeleteOutcome::AlreadyGone)
    }

    pub fn skipped(&self) -> usize {
        self.count(DeleteOutcome::Skipped)
    }

    pub fn failed(&self) -> usize {
        self.count(DeleteOutcome::Failed)
    }

    /// All failed records, for end-of-run inspection
    pub fn failures(&self) -> Vec<&ResourceRecord> {
        self.records
            .iter()
            .filter(|r| r.outcome == DeleteOutcome::Failed)
            .collect()
    }

    fn count(&self, outcome: DeleteOutcome) -> usize {
        self.records.iter().filter(|r| r.outcome == outcome).count()
    }
}
