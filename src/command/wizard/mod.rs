// src/command/wizard/mod.rs

mod nav;
mod rules;
mod store;
mod types;
mod validate;

pub use nav::{advance, current_step_id, progress_fraction, retreat, Advance};
pub use rules::{
    is_valid_email, is_valid_phone, step_rules, validate_field, FieldRule, RuleKind,
    ValidationResult, MSG_EMAIL, MSG_PHONE, MSG_REQUIRED,
};
pub use store::FormStore;
pub use types::{state_in_bounds, WizardError, WizardSession, WizardState};
pub use validate::{step_is_valid, validate_step};
