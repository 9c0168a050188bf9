//! Form-state reducer.
//!
//! A [`FormState`] tracks the current value and validity of every field of
//! one editing session. It changes only through [`transition`], which applies
//! a single [`FieldUpdateEvent`] and recomputes the whole-form validity flag
//! from the complete validity map.
//!
//! The reducer does not judge field values itself: each event carries an
//! `is_valid` flag computed by field-local rules (see [`crate::validate`]).

use std::collections::BTreeMap;

/// One field edit coming from the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdateEvent {
    pub field_id: String,
    pub value: String,
    pub is_valid: bool,
}

impl FieldUpdateEvent {
    pub fn new(field_id: impl Into<String>, value: impl Into<String>, is_valid: bool) -> Self {
        FieldUpdateEvent {
            field_id: field_id.into(),
            value: value.into(),
            is_valid,
        }
    }
}

/// Values and validities of every tracked field, plus the derived
/// whole-form flag.
///
/// `values` and `validities` always share one key set; `is_valid` is the
/// logical AND over `validities` (true when there are no fields).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    values: BTreeMap<String, String>,
    validities: BTreeMap<String, bool>,
    is_valid: bool,
}

impl Default for FormState {
    fn default() -> Self {
        FormState::empty()
    }
}

impl FormState {
    /// A form with no tracked fields. Vacuously valid.
    pub fn empty() -> Self {
        FormState {
            values: BTreeMap::new(),
            validities: BTreeMap::new(),
            is_valid: true,
        }
    }

    /// Build the initial snapshot of an editing session.
    ///
    /// Each entry is `(field_id, initial value, initially valid)`. A repeated
    /// field id keeps the last entry.
    pub fn with_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V, bool)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut values = BTreeMap::new();
        let mut validities = BTreeMap::new();
        for (field_id, value, valid) in fields {
            let field_id = field_id.into();
            values.insert(field_id.clone(), value.into());
            validities.insert(field_id, valid);
        }
        let is_valid = aggregate(&validities);
        FormState {
            values,
            validities,
            is_valid,
        }
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn validities(&self) -> &BTreeMap<String, bool> {
        &self.validities
    }

    /// Whole-form validity flag. Submission is gated on this.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn value(&self, field_id: &str) -> Option<&str> {
        self.values.get(field_id).map(String::as_str)
    }

    pub fn is_field_valid(&self, field_id: &str) -> Option<bool> {
        self.validities.get(field_id).copied()
    }

    /// Field ids whose validity flag is currently false, in key order.
    pub fn invalid_fields(&self) -> Vec<&str> {
        self.validities
            .iter()
            .filter(|(_, valid)| !**valid)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// True when `values` and `validities` carry exactly the same keys.
    pub fn keys_consistent(&self) -> bool {
        self.values.keys().eq(self.validities.keys())
    }
}

/// Apply one field update and return the new state.
///
/// Unknown fields are added rather than rejected. The whole-form flag is
/// always recomputed over the full validity map.
pub fn transition(state: &FormState, event: &FieldUpdateEvent) -> FormState {
    let mut values = state.values.clone();
    values.insert(event.field_id.clone(), event.value.clone());

    let mut validities = state.validities.clone();
    validities.insert(event.field_id.clone(), event.is_valid);

    let is_valid = aggregate(&validities);
    FormState {
        values,
        validities,
        is_valid,
    }
}

fn aggregate(validities: &BTreeMap<String, bool>) -> bool {
    validities.values().all(|valid| *valid)
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
