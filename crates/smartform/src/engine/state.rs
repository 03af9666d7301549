//! Mutable per-form state.

use std::collections::BTreeMap;

use tracing::debug;

use super::submit::{FormValues, SubmitPhase};
use crate::error::ValidationErrors;
use crate::field::{FieldConfig, FieldValue};
use crate::validator::validate_field;

/// Values, touched flags, errors and submission phase of one form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub values: FormValues,
    pub errors: ValidationErrors,
    pub touched: BTreeMap<String, bool>,
    pub phase: SubmitPhase,
}

impl FormState {
    /// Creates the state for a freshly mounted form.
    pub fn new(fields: &[FieldConfig]) -> Self {
        Self {
            values: fields
                .iter()
                .map(|f| (f.name.clone(), f.default_value()))
                .collect(),
            errors: ValidationErrors::new(),
            touched: fields.iter().map(|f| (f.name.clone(), false)).collect(),
            phase: SubmitPhase::Idle,
        }
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.get(name).copied().unwrap_or(false)
    }

    /// Validates the field's current value and records the result.
    pub fn validate(&mut self, field: &FieldConfig) -> Option<String> {
        let fallback = FieldValue::default();
        let value = self.values.get(&field.name).unwrap_or(&fallback);
        let Some(message) = validate_field(field, value) else {
            debug!(field = %field.name, "field valid");
            self.errors.clear(&field.name);
            return None;
        };
        debug!(field = %field.name, %message, "field invalid");
        self.errors.set(&field.name, message.clone());
        Some(message)
    }

    /// Percentage of required fields that are filled and error-free.
    pub fn completion(&self, fields: &[FieldConfig]) -> u8 {
        let required: Vec<&FieldConfig> = fields.iter().filter(|f| f.required).collect();
        if required.is_empty() {
            return 100;
        }
        let complete = required
            .iter()
            .filter(|f| {
                self.values.get(&f.name).is_some_and(|v| !v.is_empty())
                    && !self.errors.contains(&f.name)
            })
            .count();
        let percent = (complete * 100 + required.len() / 2) / required.len();
        u8::try_from(percent).unwrap_or(100)
    }

    pub fn snapshot(&self, fields: &[FieldConfig]) -> FormSnapshot {
        FormSnapshot {
            values: self.values.clone(),
            errors: self.errors.clone(),
            touched: self.touched.clone(),
            phase: self.phase.clone(),
            completion: self.completion(fields),
        }
    }
}

/// Point-in-time copy of a form's state, used for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    /// Current values of every declared field.
    pub values: FormValues,
    /// Active errors, shown or not.
    pub errors: ValidationErrors,
    /// Touched flag of every declared field.
    pub touched: BTreeMap<String, bool>,
    /// Submission phase.
    pub phase: SubmitPhase,
    /// Completion percentage.
    pub completion: u8,
}

impl FormSnapshot {
    /// Returns whether the field has been blurred.
    #[must_use]
    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.get(name).copied().unwrap_or(false)
    }

    /// Returns the field's error if it may be shown.
    #[must_use]
    pub fn visible_error(&self, name: &str) -> Option<&str> {
        if self.is_touched(name) {
            self.errors.get(name)
        } else {
            None
        }
    }

    /// Returns the field's current value.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }
}
