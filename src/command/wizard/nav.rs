// src/command/wizard/nav.rs

use crate::types::{StepId, StepValues, TOTAL_STEPS};

use super::types::{WizardError, WizardSession, WizardState};
use super::validate::validate_step;

/// Outcome of a successful `advance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Moved forward; carries the new current step number.
    MovedTo(u32),
    /// Already on the last step: advancing is a submission trigger, not
    /// a state transition. The caller hands off to the submission
    /// orchestrator, which validates and commits the final step itself.
    SubmitRequested,
}

pub fn current_step_id(state: &WizardState) -> StepId {
    // current_step is in bounds at all times
    StepId::from_number(state.current_step).unwrap_or(StepId::Personal)
}

/// Validate the current step and, on success, commit its values and
/// move forward. On failure the session is untouched and the error
/// carries every invalid field.
pub fn advance(session: &mut WizardSession, values: StepValues) -> Result<Advance, WizardError> {
    if session.state.confirmed {
        return Err(WizardError::InvalidState(
            "session already confirmed".to_string(),
        ));
    }

    if session.state.current_step >= TOTAL_STEPS {
        return Ok(Advance::SubmitRequested);
    }

    let step = current_step_id(&session.state);
    validate_step(step, &values).map_err(WizardError::StepInvalid)?;

    session.store.commit_step(step, values);
    session.state.current_step += 1;

    Ok(Advance::MovedTo(session.state.current_step))
}

/// Unconditional back navigation, floored at step 1 (retreating from
/// step 1 is a no-op). Returns the resulting step number.
pub fn retreat(session: &mut WizardSession) -> u32 {
    if session.state.current_step > 1 {
        session.state.current_step -= 1;
    }
    session.state.current_step
}

/// `(current_step - 1) / TOTAL_STEPS`; exactly 1.0 once confirmed. The
/// fraction never reaches 1.0 through navigation alone.
pub fn progress_fraction(state: &WizardState) -> f32 {
    if state.confirmed {
        return 1.0;
    }
    (state.current_step - 1) as f32 / TOTAL_STEPS as f32
}

// ======================================================
// Unit Tests
// ======================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldValue;

    fn step_values(pairs: &[(&str, &str)]) -> StepValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), FieldValue::Text(v.to_string())))
            .collect()
    }

    fn personal() -> StepValues {
        step_values(&[
            ("nom", "Dupont"),
            ("prenom", "Jean"),
            ("email", "jean@exemple.cd"),
            ("telephone", "+243123456789"),
            ("date-naissance", "2001-04-12"),
            ("nationalite", "Congolaise"),
            ("adresse", "12 avenue du Port, Matadi"),
        ])
    }

    fn formation() -> StepValues {
        step_values(&[
            ("faculte", "mecanique"),
            ("niveau", "licence"),
            ("annee", "2025-2026"),
        ])
    }

    #[test]
    fn advance_moves_iff_step_validates() {
        let mut s = WizardSession::new();

        // Invalid: untouched state, all errors reported.
        let err = advance(&mut s, StepValues::new()).unwrap_err();
        assert!(matches!(err, WizardError::StepInvalid(_)));
        assert_eq!(s.state.current_step, 1);
        assert!(s.store.record().is_empty());

        // Valid: committed and moved.
        let got = advance(&mut s, personal()).unwrap();
        assert_eq!(got, Advance::MovedTo(2));
        assert_eq!(s.state.current_step, 2);
        assert!(s.store.record().contains_key(&crate::types::StepId::Personal));
    }

    #[test]
    fn rejected_advance_is_idempotent() {
        let mut s = WizardSession::new();
        for _ in 0..3 {
            let _ = advance(&mut s, StepValues::new()).unwrap_err();
            assert_eq!(s.state.current_step, 1);
        }
    }

    #[test]
    fn advance_on_last_step_requests_submission() {
        let mut s = WizardSession::new();
        advance(&mut s, personal()).unwrap();
        advance(&mut s, formation()).unwrap();
        assert_eq!(s.state.current_step, 3);

        // Delegation: no validation, no commit, no transition.
        let got = advance(&mut s, StepValues::new()).unwrap();
        assert_eq!(got, Advance::SubmitRequested);
        assert_eq!(s.state.current_step, 3);
        assert!(!s.store.record().contains_key(&crate::types::StepId::Documents));
    }

    #[test]
    fn retreat_decrements_and_floors_at_one() {
        let mut s = WizardSession::new();
        advance(&mut s, personal()).unwrap();
        advance(&mut s, formation()).unwrap();

        assert_eq!(retreat(&mut s), 2);
        assert_eq!(retreat(&mut s), 1);
        // No-op at step 1.
        assert_eq!(retreat(&mut s), 1);
    }

    #[test]
    fn revisiting_a_step_overwrites_on_readvance() {
        let mut s = WizardSession::new();
        advance(&mut s, personal()).unwrap();

        retreat(&mut s);
        let mut second = personal();
        second.insert(
            "nom".to_string(),
            FieldValue::Text("Kabila".to_string()),
        );
        advance(&mut s, second).unwrap();

        let nom = s.store.record()[&crate::types::StepId::Personal]["nom"].clone();
        assert_eq!(nom, FieldValue::Text("Kabila".to_string()));
    }

    #[test]
    fn progress_is_monotone_forward_and_one_only_when_confirmed() {
        let mut s = WizardSession::new();
        let p1 = progress_fraction(&s.state);
        advance(&mut s, personal()).unwrap();
        let p2 = progress_fraction(&s.state);
        advance(&mut s, formation()).unwrap();
        let p3 = progress_fraction(&s.state);

        assert!(p1 < p2 && p2 < p3);
        assert!(p3 < 1.0);

        s.state.confirmed = true;
        assert_eq!(progress_fraction(&s.state), 1.0);
    }

    #[test]
    fn advance_after_confirmation_is_rejected() {
        let mut s = WizardSession::new();
        s.state.confirmed = true;
        let err = advance(&mut s, personal()).unwrap_err();
        assert!(matches!(err, WizardError::InvalidState(_)));
    }
}
