// src/error.rs

use std::fmt;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserMsgKind {
    Success,
    Warn,
    Error,
    Info,
}

#[derive(Clone, Debug)]
pub struct UserMsg {
    pub kind: UserMsgKind,
    pub short: &'static str,
    pub detail: Option<String>,
}

/// One failed rule for one field. The `message` is the fixed French
/// string owned by the rule table, suitable for inline display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug)]
pub enum AppError {
    // --------------------------------------------------
    // generic / plumbing
    // --------------------------------------------------
    Io(std::io::Error),
    Msg(String),
    InternalStateLockFailed,

    // --------------------------------------------------
    // wizard / submission (recoverable, user-correctable)
    // --------------------------------------------------
    Wizard(crate::command::wizard::WizardError),
    SubmissionBusy,

    // --------------------------------------------------
    // rendering / artifact
    // --------------------------------------------------
    RenderFailed(String),
    ArtifactWriteFailed(String),

    // --------------------------------------------------
    // integration faults (programming errors, not user errors)
    // --------------------------------------------------
    MissingUiElement(String),
}

impl AppError {
    pub fn user_msg(&self) -> UserMsg {
        use AppError::*;

        let kind = UserMsgKind::Error;
        let detail = Some(self.to_string());

        let short: &'static str = match self {
            Io(_) => "Opération sur fichier échouée.",
            Msg(_) => "Opération échouée.",
            InternalStateLockFailed => "Erreur interne de l'application.",

            Wizard(e) => e.user_short(),
            SubmissionBusy => "Traitement en cours, veuillez patienter.",

            // Deliberately generic: render internals are not the user's
            // problem. Detail stays available for the event log.
            RenderFailed(_) => "Erreur lors de la génération du PDF. Veuillez réessayer.",
            ArtifactWriteFailed(_) => "Impossible d'enregistrer le document.",

            MissingUiElement(_) => "Erreur interne de l'application.",
        };

        UserMsg {
            kind,
            short,
            detail,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AppError::*;

        match self {
            Io(e) => write!(f, "io error: {e}"),
            Msg(s) => write!(f, "{s}"),
            InternalStateLockFailed => write!(f, "internal state lock failed"),

            Wizard(e) => write!(f, "{e}"),
            SubmissionBusy => write!(f, "submission already in flight"),

            RenderFailed(s) => write!(f, "render failed: {s}"),
            ArtifactWriteFailed(s) => write!(f, "artifact write failed: {s}"),

            MissingUiElement(id) => write!(f, "missing ui element: {id}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}

impl From<crate::command::wizard::WizardError> for AppError {
    fn from(e: crate::command::wizard::WizardError) -> Self {
        AppError::Wizard(e)
    }
}
