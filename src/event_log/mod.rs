// src/event_log/mod.rs

mod api;
mod model;
mod store;

pub use api::{record_fault, record_transition, take_fault_pending};
pub use model::{SessionEvent, SessionEventClass};
pub use store::EventLog;
