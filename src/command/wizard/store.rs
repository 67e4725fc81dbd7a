// src/command/wizard/store.rs

use crate::types::{FormRecord, StepId, StepValues};

/// Accumulates validated step values. The store trusts its caller: the
/// state machine only commits after step validation passed.
#[derive(Clone, Debug, Default)]
pub struct FormStore {
    record: FormRecord,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomic per step: the whole entry is replaced, never merged.
    /// Returning to an earlier step and re-advancing overwrites the
    /// previous commit (last write wins).
    pub fn commit_step(&mut self, step: StepId, values: StepValues) {
        self.record.insert(step, values);
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn reset(&mut self) {
        self.record.clear();
    }

    /// Applicant email from the committed personal step, if present.
    /// The notification dispatch needs it after finalization.
    pub fn applicant_email(&self) -> Option<&str> {
        self.record
            .get(&StepId::Personal)
            .and_then(|values| values.get("email"))
            .and_then(|v| v.as_text())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

// ======================================================
// Unit Tests
// ======================================================
