//! Field-local validation rules.
//!
//! These produce the `is_valid` flag carried by a
//! [`FieldUpdateEvent`](crate::form::FieldUpdateEvent). The form reducer only
//! aggregates the flags; it never re-runs the rules.

use crate::form::FieldUpdateEvent;

/// Rules configured for one input. Every configured rule must pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldRules {
    /// Value must be non-blank.
    pub required: bool,
    /// Value must look like an e-mail address.
    pub email: bool,
    /// Value must parse as a number no smaller than this.
    pub min: Option<f64>,
    /// Value must parse as a number no larger than this.
    pub max: Option<f64>,
    /// Minimum length in characters.
    pub min_length: Option<usize>,
}

impl FieldRules {
    pub fn required() -> Self {
        FieldRules {
            required: true,
            ..FieldRules::default()
        }
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn with_email(mut self) -> Self {
        self.email = true;
        self
    }

    /// Check `value` against every configured rule.
    pub fn validate(&self, value: &str) -> bool {
        if self.required && value.trim().is_empty() {
            return false;
        }
        if self.email && !looks_like_email(value) {
            return false;
        }
        if self.min.is_some() || self.max.is_some() {
            let number = match value.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => n,
                _ => return false,
            };
            if self.min.is_some_and(|min| number < min) {
                return false;
            }
            if self.max.is_some_and(|max| number > max) {
                return false;
            }
        }
        if let Some(min_length) = self.min_length {
            if value.chars().count() < min_length {
                return false;
            }
        }
        true
    }
}

impl FieldUpdateEvent {
    /// Build an update whose validity flag comes from `rules`.
    pub fn validated(field_id: impl Into<String>, value: impl Into<String>, rules: &FieldRules) -> Self {
        let value = value.into();
        let is_valid = rules.validate(&value);
        FieldUpdateEvent::new(field_id, value, is_valid)
    }
}

/// `local@domain.tld`, no whitespace, no empty domain labels.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
