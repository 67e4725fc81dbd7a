// src/types.rs

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::command::submit::Submission;
use crate::command::wizard::WizardSession;
use crate::event_log::EventLog;

/// Number of form steps. The state machine is written against this
/// constant, not against the literal 3.
pub const TOTAL_STEPS: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StepId {
    Personal,
    Formation,
    Documents,
}

impl StepId {
    pub const ALL: [StepId; TOTAL_STEPS as usize] =
        [StepId::Personal, StepId::Formation, StepId::Documents];

    /// Stable record key, also used in event-log entries.
    pub fn as_str(self) -> &'static str {
        match self {
            StepId::Personal => "personal",
            StepId::Formation => "formation",
            StepId::Documents => "documents",
        }
    }

    /// 1-based position in the wizard.
    pub fn number(self) -> u32 {
        match self {
            StepId::Personal => 1,
            StepId::Formation => 2,
            StepId::Documents => 3,
        }
    }

    pub fn from_number(n: u32) -> Option<StepId> {
        StepId::ALL.iter().copied().find(|s| s.number() == n)
    }

    /// Heading shown above the step in the form panel.
    pub fn title(self) -> &'static str {
        match self {
            StepId::Personal => "Informations personnelles",
            StepId::Formation => "Formation choisie",
            StepId::Documents => "Documents et conditions",
        }
    }
}

/// A captured field value. Text covers inputs, selects and textareas;
/// Flag covers checkboxes; Files covers attachment slots (file names
/// only, the wizard never reads file contents).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Files(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_files(&self) -> Option<&[String]> {
        match self {
            FieldValue::Files(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Emptiness in the sense of the Required rule: blank text or no
    /// files. A checkbox is a presence value and never counts as empty
    /// here; the `conditions` flag is enforced at submit time instead.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Flag(_) => false,
            FieldValue::Files(v) => v.is_empty(),
        }
    }
}

/// Values of one step, keyed by stable field id.
pub type StepValues = BTreeMap<String, FieldValue>;

/// Accumulated validated input across steps. Grows as steps are
/// committed; a re-commit of a step replaces that step's entry whole.
pub type FormRecord = BTreeMap<StepId, StepValues>;

pub struct AppState {
    pub session: Mutex<WizardSession>,
    pub submission: Mutex<Submission>,

    // persistent + in-memory session event log
    pub event_log: Mutex<EventLog>,
}

impl AppState {
    pub fn new_for_tests(app_data_dir: &std::path::Path) -> Result<Self, String> {
        crate::init_state(app_data_dir)
    }
}

// ======================================================
// Unit Tests
// ======================================================
