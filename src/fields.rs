// src/fields.rs

//! Field registry: the wizard core reads user input as named values
//! through this interface and never touches widgets directly.

use crate::error::{AppError, AppResult};
use crate::types::{FieldValue, StepId, StepValues};

/// Key-value view over whatever captures input (the egui panel in the
/// shipped app, plain maps in tests).
///
/// `None` means the backing element for a *registered* id does not
/// exist — an integration fault, distinct from an empty value
/// (`Some(Text(""))`).
pub trait FieldSource {
    fn get(&self, field_id: &str) -> Option<FieldValue>;
}

static PERSONAL_FIELDS: [&str; 7] = [
    "nom",
    "prenom",
    "email",
    "telephone",
    "date-naissance",
    "nationalite",
    "adresse",
];

static FORMATION_FIELDS: [&str; 5] = ["faculte", "niveau", "annee", "formation", "motivation"];

static DOCUMENTS_FIELDS: [&str; 6] = [
    "diplome",
    "releve-notes",
    "photo",
    "cv",
    "autres-documents",
    "conditions",
];

/// Stable ids registered for one step, in capture order.
pub fn step_field_ids(step: StepId) -> &'static [&'static str] {
    match step {
        StepId::Personal => &PERSONAL_FIELDS,
        StepId::Formation => &FORMATION_FIELDS,
        StepId::Documents => &DOCUMENTS_FIELDS,
    }
}

/// Gather every registered field of a step from the source. A missing
/// backing element aborts the whole collection — the caller logs the
/// fault and abandons the triggering action.
pub fn collect_step_values(source: &dyn FieldSource, step: StepId) -> AppResult<StepValues> {
    let mut values = StepValues::new();
    for id in step_field_ids(step) {
        let v = source
            .get(id)
            .ok_or_else(|| AppError::MissingUiElement(id.to_string()))?;
        values.insert(id.to_string(), v);
    }
    Ok(values)
}

// ======================================================
// Unit Tests
// ======================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    struct MapSource(BTreeMap<String, FieldValue>);

    impl FieldSource for MapSource {
        fn get(&self, field_id: &str) -> Option<FieldValue> {
            self.0.get(field_id).cloned()
        }
    }

    fn full_formation_source() -> MapSource {
        let mut m = BTreeMap::new();
        for id in step_field_ids(StepId::Formation) {
            m.insert(id.to_string(), FieldValue::Text(String::new()));
        }
        MapSource(m)
    }

    #[test]
    fn collects_every_registered_id() {
        let src = full_formation_source();
        let values = collect_step_values(&src, StepId::Formation).unwrap();
        assert_eq!(values.len(), step_field_ids(StepId::Formation).len());
    }

    #[test]
    fn missing_backing_element_is_an_integration_fault() {
        let mut src = full_formation_source();
        src.0.remove("niveau");

        let err = collect_step_values(&src, StepId::Formation).unwrap_err();
        assert!(matches!(err, AppError::MissingUiElement(id) if id == "niveau"));
    }

    #[test]
    fn step_field_ids_are_disjoint_across_steps() {
        let mut seen = std::collections::BTreeSet::new();
        for step in StepId::ALL {
            for id in step_field_ids(step) {
                assert!(seen.insert(*id), "field id {id} registered twice");
            }
        }
    }
}
