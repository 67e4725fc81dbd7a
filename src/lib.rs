// src/lib.rs

pub mod command;
pub mod context;
pub mod error;
pub mod event_log;
pub mod fields;
pub mod notify;
pub mod render;
pub mod types;

use std::path::Path;
use std::sync::Mutex;

use command::submit::{Submission, DEFAULT_PROCESSING_DELAY};
use command::wizard::WizardSession;
use event_log::EventLog;
use types::AppState;

/// Builds the shared state the whole app runs on. Creates the data
/// directory and opens the session event log under it.
pub fn init_state(app_data_dir: &Path) -> Result<AppState, String> {
    std::fs::create_dir_all(app_data_dir)
        .map_err(|e| format!("app data dir create {}: {e}", app_data_dir.display()))?;

    let event_log = EventLog::init(app_data_dir)?;

    Ok(AppState {
        session: Mutex::new(WizardSession::new()),
        submission: Mutex::new(Submission::new(DEFAULT_PROCESSING_DELAY)),
        event_log: Mutex::new(event_log),
    })
}
