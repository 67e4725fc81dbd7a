// src/command/wizard/types.rs

use crate::error::FieldError;
use crate::types::TOTAL_STEPS;

use super::store::FormStore;

/// Wizard position. `current_step` stays within `1..=TOTAL_STEPS` at all
/// times; a rejected transition leaves it untouched. Completion is the
/// separate `confirmed` flag — it is never reached by stepping past the
/// last step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WizardState {
    pub current_step: u32,
    pub confirmed: bool,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            current_step: 1,
            confirmed: false,
        }
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

/// One registration session: position plus the accumulated record.
/// Owned by the app state; reset only by an explicit new registration.
#[derive(Clone, Debug, Default)]
pub struct WizardSession {
    pub state: WizardState,
    pub store: FormStore,
}

impl WizardSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to step 1 with an empty record and the confirmation flag
    /// cleared. Navigation never calls this.
    pub fn reset(&mut self) {
        self.state = WizardState::new();
        self.store.reset();
    }
}

#[derive(Clone, Debug)]
pub enum WizardError {
    /// Aggregate of every failed field in the step, in rule order.
    StepInvalid(Vec<FieldError>),
    /// Final submit with the general-conditions checkbox unchecked.
    ConditionsNotAccepted,
    InvalidState(String),
}

impl WizardError {
    pub fn user_short(&self) -> &'static str {
        match self {
            WizardError::StepInvalid(_) => {
                "Veuillez corriger les erreurs dans le formulaire avant de continuer."
            }
            WizardError::ConditionsNotAccepted => {
                "Veuillez accepter les conditions générales avant de soumettre."
            }
            WizardError::InvalidState(_) => "Erreur interne de l'application.",
        }
    }
}

impl std::fmt::Display for WizardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardError::StepInvalid(errs) => {
                write!(f, "step invalid: ")?;
                for (i, e) in errs.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{e}")?;
                }
                Ok(())
            }
            WizardError::ConditionsNotAccepted => write!(f, "conditions not accepted"),
            WizardError::InvalidState(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for WizardError {}

/// Invariant check used in debug assertions and tests.
pub fn state_in_bounds(state: &WizardState) -> bool {
    (1..=TOTAL_STEPS).contains(&state.current_step)
}

// ======================================================
// Unit Tests
// ======================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_starts_at_step_one_unconfirmed() {
        let s = WizardSession::new();
        assert_eq!(s.state.current_step, 1);
        assert!(!s.state.confirmed);
        assert!(s.store.record().is_empty());
        assert!(state_in_bounds(&s.state));
    }

    #[test]
    fn reset_clears_position_record_and_confirmation() {
        let mut s = WizardSession::new();
        s.state.current_step = 3;
        s.state.confirmed = true;
        s.store.commit_step(crate::types::StepId::Personal, Default::default());

        s.reset();
        assert_eq!(s.state, WizardState::new());
        assert!(s.store.record().is_empty());
    }
}
