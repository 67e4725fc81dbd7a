// src/event_log/model.rs

use serde::{Deserialize, Serialize};

pub const LOG_FILE_NAME: &str = "session.log.jsonl";
pub const LOG_BACKUP_NAME: &str = "session.log.jsonl.1";

pub const MAX_LOG_BYTES: u64 = 2 * 1024 * 1024;
pub const MAX_LOG_EVENTS: usize = 200;
pub const LOAD_TAIL_LINES: usize = 400;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEventClass {
    /// Normal wizard lifecycle: step changes, submission phases,
    /// notification dispatches.
    Transition,
    /// Programming/integration faults (missing widget, render failure)
    /// that were logged and swallowed rather than crashing the session.
    Fault,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionEvent {
    pub id: u64,
    pub ts_ms: u64,
    pub class: SessionEventClass,
    /// Short machine-readable tag, e.g. "step_advanced".
    pub kind: String,
    /// Where it happened, e.g. "wizard_nav" or "submission".
    pub context: String,
    pub msg: String,
}
