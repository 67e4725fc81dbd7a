// src/command/mod.rs

//! Actions the UI invokes. Every function here takes the shared
//! [`AppState`], does its own locking, and records what happened in the
//! session event log before returning.

pub mod submit;
pub mod wizard;

use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use crate::error::{AppError, AppResult};
use crate::event_log;
use crate::fields::{collect_step_values, FieldSource};
use crate::notify::Notifier;
use crate::render::{Artifact, Renderer};
use crate::types::{AppState, StepId};

use submit::SubmitPhase;
use wizard::{current_step_id, progress_fraction, Advance, WizardError};

fn lock<'a, T>(m: &'a Mutex<T>) -> AppResult<MutexGuard<'a, T>> {
    m.lock().map_err(|_| AppError::InternalStateLockFailed)
}

/// What the UI needs to draw the wizard chrome, read under one lock.
#[derive(Clone, Copy, Debug)]
pub struct WizardSnapshot {
    pub current_step: u32,
    pub step_id: StepId,
    pub progress: f32,
    pub confirmed: bool,
    pub phase: SubmitPhase,
}

pub fn snapshot(state: &AppState) -> AppResult<WizardSnapshot> {
    let session = lock(&state.session)?;
    let submission = lock(&state.submission)?;

    Ok(WizardSnapshot {
        current_step: session.state.current_step,
        step_id: current_step_id(&session.state),
        progress: progress_fraction(&session.state),
        confirmed: session.state.confirmed,
        phase: submission.phase(),
    })
}

/// "Suivant": validate the current step against the captured values and
/// move forward. On the last step this only signals that a submit is
/// wanted; the caller follows up with [`request_submit`].
pub fn advance_current_step(state: &AppState, source: &dyn FieldSource) -> AppResult<Advance> {
    let mut session = lock(&state.session)?;
    let step = current_step_id(&session.state);

    let values = match collect_step_values(source, step) {
        Ok(v) => v,
        Err(e) => {
            drop(session);
            event_log::record_fault(state, "missing_ui_element", "wizard_nav", &e.to_string());
            return Err(e);
        }
    };

    match wizard::advance(&mut session, values) {
        Ok(Advance::MovedTo(n)) => {
            let msg = format!("{} -> {}", step.number(), n);
            drop(session);
            event_log::record_transition(state, "step_advanced", "wizard_nav", &msg);
            Ok(Advance::MovedTo(n))
        }
        Ok(Advance::SubmitRequested) => Ok(Advance::SubmitRequested),
        Err(e) => {
            drop(session);
            if let WizardError::StepInvalid(ref errs) = e {
                let msg = format!("step {} rejected ({} field(s))", step.number(), errs.len());
                event_log::record_transition(state, "step_rejected", "wizard_nav", &msg);
            }
            Err(AppError::Wizard(e))
        }
    }
}

/// "Précédent": unconditional, floored at step 1.
pub fn retreat_current_step(state: &AppState) -> AppResult<u32> {
    let mut session = lock(&state.session)?;
    let from = session.state.current_step;
    let to = wizard::retreat(&mut session);
    drop(session);

    if to != from {
        event_log::record_transition(
            state,
            "step_retreated",
            "wizard_nav",
            &format!("{from} -> {to}"),
        );
    }
    Ok(to)
}

/// "Soumettre": collect the documents step and hand it to the
/// submission orchestrator.
pub fn request_submit(state: &AppState, source: &dyn FieldSource) -> AppResult<()> {
    let values = match collect_step_values(source, StepId::Documents) {
        Ok(v) => v,
        Err(e) => {
            event_log::record_fault(state, "missing_ui_element", "submission", &e.to_string());
            return Err(e);
        }
    };

    let mut session = lock(&state.session)?;
    let mut submission = lock(&state.submission)?;

    match submission.request_submit(Instant::now(), &mut session, values) {
        Ok(()) => {
            drop(submission);
            drop(session);
            event_log::record_transition(state, "submit_accepted", "submission", "processing");
            Ok(())
        }
        Err(e) => {
            drop(submission);
            drop(session);
            event_log::record_transition(state, "submit_rejected", "submission", &e.to_string());
            Err(e)
        }
    }
}

/// Called every frame while a submission is in flight. Returns the
/// artifact exactly once, on the poll that completes the pipeline.
pub fn poll_submission(
    state: &AppState,
    renderer: &mut dyn Renderer,
    notifier: &mut dyn Notifier,
) -> AppResult<Option<Artifact>> {
    let mut session = lock(&state.session)?;
    let mut submission = lock(&state.submission)?;

    let out = submission.poll(Instant::now(), &mut session, renderer, notifier);

    drop(submission);
    drop(session);

    match out {
        Ok(Some(artifact)) => {
            let email = lock(&state.session)?
                .store
                .applicant_email()
                .map(str::to_string);
            if let Some(email) = email {
                event_log::record_transition(state, "notification_dispatched", "submission", &email);
            }
            event_log::record_transition(
                state,
                "submission_confirmed",
                "submission",
                &artifact.file_name,
            );
            Ok(Some(artifact))
        }
        Ok(None) => Ok(None),
        Err(e) => {
            event_log::record_fault(state, "render_failed", "submission", &e.to_string());
            Err(e)
        }
    }
}

pub fn acknowledge_rejection(state: &AppState) -> AppResult<()> {
    let mut submission = lock(&state.submission)?;
    submission.acknowledge_rejection();
    Ok(())
}

/// "Nouvelle inscription": fresh session, fresh submission.
pub fn reset_registration(state: &AppState) -> AppResult<()> {
    let mut session = lock(&state.session)?;
    let mut submission = lock(&state.submission)?;

    session.reset();
    submission.reset();

    drop(submission);
    drop(session);

    event_log::record_transition(state, "session_reset", "wizard_nav", "new registration");
    Ok(())
}

// ======================================================
// Unit Tests
// ======================================================
