// src/event_log/store.rs

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::model::{
    SessionEvent, SessionEventClass, LOAD_TAIL_LINES, LOG_BACKUP_NAME, LOG_FILE_NAME,
    MAX_LOG_BYTES, MAX_LOG_EVENTS,
};

/// Persistent + in-memory session event log: a bounded ring buffer
/// mirrored into an append-only JSONL file with size rotation. Logging
/// is best effort; it never fails the action being logged.
pub struct EventLog {
    path: PathBuf,
    buf: VecDeque<SessionEvent>,
    next_id: u64,
    fault_pending: bool,
}

impl EventLog {
    pub fn init(app_data_dir: &Path) -> Result<Self, String> {
        let path = app_data_dir.join(LOG_FILE_NAME);
        fs::create_dir_all(app_data_dir).map_err(|e| format!("event log dir create: {e}"))?;

        let mut log = Self {
            path,
            buf: VecDeque::with_capacity(MAX_LOG_EVENTS),
            next_id: 1,
            fault_pending: false,
        };

        log.load_tail_best_effort();
        log.next_id = log.compute_next_id();

        Ok(log)
    }

    pub fn record(&mut self, class: SessionEventClass, kind: &str, context: &str, msg: &str) {
        let ev = SessionEvent {
            id: self.alloc_id(),
            ts_ms: now_ms(),
            class,
            kind: kind.to_string(),
            context: context.to_string(),
            msg: msg.to_string(),
        };

        if self.buf.len() >= MAX_LOG_EVENTS {
            self.buf.pop_front();
        }
        self.buf.push_back(ev.clone());

        if matches!(class, SessionEventClass::Fault) {
            self.fault_pending = true;
        }

        let _ = self.rotate_if_needed_best_effort();
        let _ = self.append_jsonl_best_effort(&ev);
    }

    pub fn record_transition(&mut self, kind: &str, context: &str, msg: &str) {
        self.record(SessionEventClass::Transition, kind, context, msg);
    }

    pub fn record_fault(&mut self, kind: &str, context: &str, msg: &str) {
        self.record(SessionEventClass::Fault, kind, context, msg);
    }

    pub fn recent(&self) -> Vec<SessionEvent> {
        self.buf.iter().cloned().collect()
    }

    /// One-shot flag: a fault was logged since the last check. The UI
    /// uses it to show a discreet warning banner.
    pub fn take_fault_pending(&mut self) -> bool {
        let was = self.fault_pending;
        self.fault_pending = false;
        was
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    fn compute_next_id(&self) -> u64 {
        self.buf
            .iter()
            .map(|e| e.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1)
    }

    fn rotate_if_needed_best_effort(&self) -> Result<(), String> {
        let meta = match fs::metadata(&self.path) {
            Ok(m) => m,
            Err(_) => return Ok(()),
        };

        if meta.len() <= MAX_LOG_BYTES {
            return Ok(());
        }

        let backup = self.path.with_file_name(LOG_BACKUP_NAME);
        let _ = fs::remove_file(&backup);
        fs::rename(&self.path, &backup).map_err(|e| format!("event log rotate: {e}"))?;
        Ok(())
    }

    fn append_jsonl_best_effort(&self, ev: &SessionEvent) -> Result<(), String> {
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| format!("event log open: {e}"))?;

        let line = serde_json::to_string(ev).map_err(|e| format!("event log json: {e}"))?;
        f.write_all(line.as_bytes())
            .and_then(|_| f.write_all(b"\n"))
            .map_err(|e| format!("event log write: {e}"))?;

        let _ = f.flush();
        Ok(())
    }

    fn load_tail_best_effort(&mut self) {
        let Ok(file) = File::open(&self.path) else {
            return;
        };
        let reader = BufReader::new(file);

        let mut tail: VecDeque<String> = VecDeque::with_capacity(LOAD_TAIL_LINES);
        for line in reader.lines().map_while(Result::ok) {
            if tail.len() >= LOAD_TAIL_LINES {
                tail.pop_front();
            }
            tail.push_back(line);
        }

        for line in tail {
            if let Ok(ev) = serde_json::from_str::<SessionEvent>(&line) {
                if self.buf.len() >= MAX_LOG_EVENTS {
                    self.buf.pop_front();
                }
                self.buf.push_back(ev);
            }
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// ======================================================
// Unit Tests
// ======================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_kept_in_memory_and_on_disk() {
        let td = tempfile::tempdir().expect("tempdir");
        let mut log = EventLog::init(td.path()).unwrap();

        log.record_transition("step_advanced", "wizard_nav", "1 -> 2");
        log.record_fault("missing_ui_element", "fields", "niveau");

        let recent = log.recent();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].kind, "step_advanced");
        assert_eq!(recent[1].class, SessionEventClass::Fault);

        let raw = fs::read_to_string(td.path().join(LOG_FILE_NAME)).unwrap();
        assert_eq!(raw.lines().count(), 2);
    }

    #[test]
    fn fault_pending_is_one_shot() {
        let td = tempfile::tempdir().expect("tempdir");
        let mut log = EventLog::init(td.path()).unwrap();

        assert!(!log.take_fault_pending());
        log.record_fault("render_failed", "submission", "x");
        assert!(log.take_fault_pending());
        assert!(!log.take_fault_pending());
    }

    #[test]
    fn reinit_resumes_ids_from_the_persisted_tail() {
        let td = tempfile::tempdir().expect("tempdir");
        {
            let mut log = EventLog::init(td.path()).unwrap();
            log.record_transition("step_advanced", "wizard_nav", "1 -> 2");
            log.record_transition("step_advanced", "wizard_nav", "2 -> 3");
        }

        let mut log = EventLog::init(td.path()).unwrap();
        assert_eq!(log.recent().len(), 2);
        log.record_transition("submission_confirmed", "submission", "ok");
        assert_eq!(log.recent().last().unwrap().id, 3);
    }

    #[test]
    fn oversized_log_file_rotates_to_a_backup() {
        let td = tempfile::tempdir().expect("tempdir");
        let mut log = EventLog::init(td.path()).unwrap();

        let live = td.path().join(LOG_FILE_NAME);
        let filler = "x".repeat(64 * 1024);
        while fs::metadata(&live).map(|m| m.len()).unwrap_or(0) <= MAX_LOG_BYTES {
            log.record_transition("step_advanced", "wizard_nav", &filler);
        }

        // The next write moves the oversized file aside and appending
        // resumes on a fresh one.
        log.record_transition("submission_confirmed", "submission", "ok");

        let backup = td.path().join(LOG_BACKUP_NAME);
        assert!(fs::metadata(&backup).unwrap().len() > MAX_LOG_BYTES);

        let raw = fs::read_to_string(&live).unwrap();
        assert_eq!(raw.lines().count(), 1);
        assert!(raw.contains("submission_confirmed"));
    }

    #[test]
    fn ring_buffer_is_bounded() {
        let td = tempfile::tempdir().expect("tempdir");
        let mut log = EventLog::init(td.path()).unwrap();

        for i in 0..(MAX_LOG_EVENTS + 10) {
            log.record_transition("step_advanced", "wizard_nav", &i.to_string());
        }
        assert_eq!(log.recent().len(), MAX_LOG_EVENTS);
    }
}
