// src/command/submit.rs

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::context::AppCtx;
use crate::error::{AppError, AppResult};
use crate::notify::Notifier;
use crate::render::{Artifact, Renderer};
use crate::types::{FieldValue, StepId, StepValues};

use super::wizard::{validate_step, WizardError, WizardSession};

/// Visible processing delay between a valid submit and the artifact,
/// so the user sees the "Traitement en cours..." state.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_secs(2);

/// Lifecycle of the final submit. One submission at a time: a new
/// request is refused while one is in flight. An unacknowledged
/// rejection does not block; the next request displaces it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    /// Accepted and committed; waiting out the processing delay.
    Validating,
    Rendering,
    Notifying,
    Confirmed,
    /// Refused with a user-correctable error; the form stays editable.
    Rejected,
}

impl SubmitPhase {
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            SubmitPhase::Validating | SubmitPhase::Rendering | SubmitPhase::Notifying
        )
    }
}

/// Drives a submit request through validation, the processing delay,
/// rendering and notification. Owns no wizard data itself; it mutates
/// the session it is handed and hands back the rendered artifact.
pub struct Submission {
    phase: SubmitPhase,
    delay: Duration,
    deadline: Option<Instant>,
    rejection: Option<WizardError>,
}

impl Submission {
    pub fn new(delay: Duration) -> Self {
        Self {
            phase: SubmitPhase::Idle,
            delay,
            deadline: None,
            rejection: None,
        }
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// Between a successful request and confirmation. The UI disables
    /// every wizard control while this holds.
    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    pub fn rejection(&self) -> Option<&WizardError> {
        self.rejection.as_ref()
    }

    /// Validates and commits the final step. On success the phase moves
    /// to Validating and the processing deadline starts; on a field or
    /// conditions failure the phase moves to Rejected and the session is
    /// left untouched.
    pub fn request_submit(
        &mut self,
        now: Instant,
        session: &mut WizardSession,
        values: StepValues,
    ) -> AppResult<()> {
        // A lingering rejection is not in flight; a new request
        // displaces it.
        self.acknowledge_rejection();
        if self.phase != SubmitPhase::Idle {
            return Err(AppError::SubmissionBusy);
        }
        if session.state.confirmed {
            return Err(AppError::Wizard(WizardError::InvalidState(
                "session already confirmed".to_string(),
            )));
        }

        if let Err(errs) = validate_step(StepId::Documents, &values) {
            let err = WizardError::StepInvalid(errs);
            self.reject(err.clone());
            return Err(AppError::Wizard(err));
        }

        let accepted = matches!(values.get("conditions"), Some(FieldValue::Flag(true)));
        if !accepted {
            self.reject(WizardError::ConditionsNotAccepted);
            return Err(AppError::Wizard(WizardError::ConditionsNotAccepted));
        }

        session.store.commit_step(StepId::Documents, values);
        self.phase = SubmitPhase::Validating;
        self.deadline = Some(now + self.delay);
        Ok(())
    }

    /// Advances an in-flight submission. Returns the artifact exactly
    /// once, on the poll that completes the pipeline. A render failure
    /// drops back to Idle with the record intact so the user can retry.
    pub fn poll(
        &mut self,
        now: Instant,
        session: &mut WizardSession,
        renderer: &mut dyn Renderer,
        notifier: &mut dyn Notifier,
    ) -> AppResult<Option<Artifact>> {
        if self.phase != SubmitPhase::Validating {
            return Ok(None);
        }
        match self.deadline {
            Some(d) if now >= d => {}
            _ => return Ok(None),
        }

        self.phase = SubmitPhase::Rendering;
        self.deadline = None;

        let artifact = match renderer.render(session.store.record()) {
            Ok(a) => a,
            Err(e) => {
                self.phase = SubmitPhase::Idle;
                return Err(AppError::RenderFailed(e.to_string()));
            }
        };

        self.phase = SubmitPhase::Notifying;
        if let Some(email) = session.store.applicant_email() {
            notifier.dispatch(&email, session.store.record());
        }

        self.phase = SubmitPhase::Confirmed;
        session.state.confirmed = true;
        Ok(Some(artifact))
    }

    /// User dismissed the rejection notice; the form is editable again.
    pub fn acknowledge_rejection(&mut self) {
        if self.phase == SubmitPhase::Rejected {
            self.phase = SubmitPhase::Idle;
            self.rejection = None;
        }
    }

    pub fn reset(&mut self) {
        self.phase = SubmitPhase::Idle;
        self.deadline = None;
        self.rejection = None;
    }

    fn reject(&mut self, err: WizardError) {
        self.phase = SubmitPhase::Rejected;
        self.rejection = Some(err);
    }
}

impl Default for Submission {
    fn default() -> Self {
        Self::new(DEFAULT_PROCESSING_DELAY)
    }
}

/// Saves the artifact under the app's artifacts directory and returns
/// the full path.
pub fn write_artifact(ctx: &AppCtx, artifact: &Artifact) -> AppResult<PathBuf> {
    let dir = ctx.artifacts_dir();
    std::fs::create_dir_all(&dir)
        .map_err(|e| AppError::ArtifactWriteFailed(format!("create {}: {e}", dir.display())))?;

    let path = dir.join(&artifact.file_name);
    std::fs::write(&path, &artifact.bytes)
        .map_err(|e| AppError::ArtifactWriteFailed(format!("write {}: {e}", path.display())))?;

    Ok(path)
}

// ======================================================
// Unit Tests
// ======================================================
