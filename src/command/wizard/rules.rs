// src/command/wizard/rules.rs

use std::sync::OnceLock;

use regex::Regex;

use crate::types::{FieldValue, StepId};

pub const MSG_REQUIRED: &str = "Ce champ est obligatoire";
pub const MSG_EMAIL: &str = "Veuillez entrer une adresse email valide";
pub const MSG_PHONE: &str = "Veuillez entrer un numéro de téléphone valide";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleKind {
    Required,
    Email,
    Phone,
}

/// One validation constraint on one field. Defined statically per step;
/// never built at runtime.
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub field: &'static str,
    pub kind: RuleKind,
    pub message: &'static str,
}

const fn rule(field: &'static str, kind: RuleKind, message: &'static str) -> FieldRule {
    FieldRule {
        field,
        kind,
        message,
    }
}

const fn required(field: &'static str) -> FieldRule {
    rule(field, RuleKind::Required, MSG_REQUIRED)
}

static PERSONAL_RULES: [FieldRule; 9] = [
    required("nom"),
    required("prenom"),
    required("email"),
    rule("email", RuleKind::Email, MSG_EMAIL),
    required("telephone"),
    rule("telephone", RuleKind::Phone, MSG_PHONE),
    required("date-naissance"),
    required("nationalite"),
    required("adresse"),
];

static FORMATION_RULES: [FieldRule; 3] = [
    required("faculte"),
    required("niveau"),
    required("annee"),
];

static DOCUMENTS_RULES: [FieldRule; 3] = [
    required("diplome"),
    required("releve-notes"),
    required("photo"),
];

/// The ordered rule table active for one step.
pub fn step_rules(step: StepId) -> &'static [FieldRule] {
    match step {
        StepId::Personal => &PERSONAL_RULES,
        StepId::Formation => &FORMATION_RULES,
        StepId::Documents => &DOCUMENTS_RULES,
    }
}

/// Produced fresh per check; never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: Option<&'static str>,
}

impl ValidationResult {
    fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    fn fail(message: &'static str) -> Self {
        Self {
            valid: false,
            message: Some(message),
        }
    }
}

/// Check a single field's value against one rule. Pure: surfacing the
/// message and marking the widget is the caller's job.
///
/// `None` means the field produced no value at all. The field registry
/// treats that as an integration fault before validation ever runs, so
/// here it simply fails Required and passes the shape rules.
pub fn validate_field(rule: &FieldRule, value: Option<&FieldValue>) -> ValidationResult {
    match rule.kind {
        RuleKind::Required => match value {
            None => ValidationResult::fail(rule.message),
            Some(v) if v.is_empty() => ValidationResult::fail(rule.message),
            Some(_) => ValidationResult::pass(),
        },

        // Shape rules only apply to non-empty text; emptiness is the
        // Required rule's concern.
        RuleKind::Email => match value.and_then(|v| v.as_text()) {
            Some(s) if !s.trim().is_empty() && !is_valid_email(s) => {
                ValidationResult::fail(rule.message)
            }
            _ => ValidationResult::pass(),
        },

        RuleKind::Phone => match value.and_then(|v| v.as_text()) {
            Some(s) if !s.trim().is_empty() && !is_valid_phone(s) => {
                ValidationResult::fail(rule.message)
            }
            _ => ValidationResult::pass(),
        },
    }
}

pub fn is_valid_email(s: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex")
    });
    re.is_match(s)
}

/// Whitespace, hyphens and parentheses are presentation noise and are
/// stripped before the digit check.
pub fn is_valid_phone(s: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("phone regex"));

    let cleaned: String = s
        .chars()
        .filter(|c| !(c.is_whitespace() || matches!(c, '-' | '(' | ')')))
        .collect();
    re.is_match(&cleaned)
}

// ======================================================
// Unit Tests
// ======================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn email_shape_basic() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("jean.dupont@univ-matadi.cd"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn phone_shape_basic() {
        assert!(is_valid_phone("+243123456789"));
        assert!(is_valid_phone("(0243) 123-456"));
        assert!(is_valid_phone("0243 123 456 7"));
        // Pasted numbers carry tabs and non-breaking spaces.
        assert!(is_valid_phone("+243\t123\u{a0}456 789"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("+12345678901234567"));
        assert!(!is_valid_phone("06-ab-12-34-56"));
    }

    #[test]
    fn required_fails_on_blank_text_only() {
        let r = required("nom");
        assert!(!validate_field(&r, Some(&text(""))).valid);
        assert!(!validate_field(&r, Some(&text("   "))).valid);
        assert!(!validate_field(&r, None).valid);

        let ok = validate_field(&r, Some(&text("Dupont")));
        assert!(ok.valid);
        assert_eq!(ok.message, None);
    }

    #[test]
    fn required_accepts_flags_and_nonempty_file_lists() {
        let r = required("conditions");
        assert!(validate_field(&r, Some(&FieldValue::Flag(false))).valid);
        assert!(validate_field(&r, Some(&FieldValue::Flag(true))).valid);

        let r = required("diplome");
        assert!(!validate_field(&r, Some(&FieldValue::Files(vec![]))).valid);
        assert!(validate_field(&r, Some(&FieldValue::Files(vec!["d.pdf".into()]))).valid);
    }

    #[test]
    fn email_rule_skips_empty_values() {
        let r = rule("email", RuleKind::Email, MSG_EMAIL);
        // Empty is Required's concern, not the shape rule's.
        assert!(validate_field(&r, Some(&text(""))).valid);
        assert!(validate_field(&r, None).valid);

        assert!(validate_field(&r, Some(&text("a@b.c"))).valid);
        let bad = validate_field(&r, Some(&text("a@b")));
        assert!(!bad.valid);
        assert_eq!(bad.message, Some(MSG_EMAIL));
    }

    #[test]
    fn phone_rule_cleans_before_checking() {
        let r = rule("telephone", RuleKind::Phone, MSG_PHONE);
        assert!(validate_field(&r, Some(&text("(0243) 123-456"))).valid);
        assert!(!validate_field(&r, Some(&text("12345"))).valid);
    }

    #[test]
    fn every_step_has_a_rule_table() {
        for step in StepId::ALL {
            assert!(!step_rules(step).is_empty());
        }
    }
}
