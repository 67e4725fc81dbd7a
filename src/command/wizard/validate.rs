// src/command/wizard/validate.rs

use crate::error::FieldError;
use crate::types::{StepId, StepValues};

use super::rules::{step_rules, validate_field, FieldRule};

trait ValidationSink {
    fn rule_failed(&mut self, rule: &FieldRule, message: &'static str);

    fn stop_early(&self) -> bool;
}

/// Collects every failure so the caller can flag all invalid fields in
/// one pass. Step advancement uses this mode.
struct CollectAllSink {
    errors: Vec<FieldError>,
}

impl CollectAllSink {
    fn new() -> Self {
        Self { errors: Vec::new() }
    }
}

impl ValidationSink for CollectAllSink {
    fn rule_failed(&mut self, rule: &FieldRule, message: &'static str) {
        self.errors.push(FieldError {
            field: rule.field.to_string(),
            message,
        });
    }

    fn stop_early(&self) -> bool {
        false
    }
}

/// Pass/fail only, for callers that do not report per-field.
struct FirstFailSink {
    failed: bool,
}

impl FirstFailSink {
    fn new() -> Self {
        Self { failed: false }
    }
}

impl ValidationSink for FirstFailSink {
    fn rule_failed(&mut self, _rule: &FieldRule, _message: &'static str) {
        self.failed = true;
    }

    fn stop_early(&self) -> bool {
        true
    }
}

fn apply_rules(rules: &[FieldRule], values: &StepValues, sink: &mut impl ValidationSink) {
    for rule in rules {
        let result = validate_field(rule, values.get(rule.field));
        if !result.valid {
            sink.rule_failed(rule, result.message.unwrap_or(rule.message));
            if sink.stop_early() {
                return;
            }
        }
    }
}

/// Validate one step against its static rule table. Every rule is
/// evaluated; the error carries all failures in rule order.
pub fn validate_step(step: StepId, values: &StepValues) -> Result<(), Vec<FieldError>> {
    let mut sink = CollectAllSink::new();
    apply_rules(step_rules(step), values, &mut sink);

    if sink.errors.is_empty() {
        Ok(())
    } else {
        Err(sink.errors)
    }
}

/// Cheap gate for callers that only need a bool (e.g. enabling the
/// advance button live).
pub fn step_is_valid(step: StepId, values: &StepValues) -> bool {
    let mut sink = FirstFailSink::new();
    apply_rules(step_rules(step), values, &mut sink);
    !sink.failed
}

// ======================================================
// Unit Tests
// ======================================================
