// src/notify.rs

use crate::types::FormRecord;

/// Fire-and-forget confirmation dispatch. Delivery outcome is not
/// surfaced to the wizard (known gap; the event log records the
/// dispatch so a real transport can be audited later).
pub trait Notifier {
    fn dispatch(&mut self, email: &str, record: &FormRecord);
}

/// Simulates delivery by remembering the addresses it was asked to
/// notify. Stands in for a real mail transport.
#[derive(Clone, Debug, Default)]
pub struct SimulatedMailer {
    dispatched: Vec<String>,
}

impl SimulatedMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatched(&self) -> &[String] {
        &self.dispatched
    }
}

impl Notifier for SimulatedMailer {
    fn dispatch(&mut self, email: &str, _record: &FormRecord) {
        self.dispatched.push(email.to_string());
    }
}

// ======================================================
// Unit Tests
// ======================================================
