// src/event_log/api.rs

use crate::types::AppState;

/// Logging must never make an action fail: a poisoned lock here means
/// the event is silently dropped.
pub fn record_transition(state: &AppState, kind: &str, context: &str, msg: &str) {
    if let Ok(mut log) = state.event_log.lock() {
        log.record_transition(kind, context, msg);
    }
}

pub fn record_fault(state: &AppState, kind: &str, context: &str, msg: &str) {
    if let Ok(mut log) = state.event_log.lock() {
        log.record_fault(kind, context, msg);
    }
}

pub fn take_fault_pending(state: &AppState) -> bool {
    match state.event_log.lock() {
        Ok(mut log) => log.take_fault_pending(),
        Err(_) => false,
    }
}
