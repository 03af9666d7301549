//! Error types for forms.

use std::collections::BTreeMap;
use thiserror::Error;

/// Form-specific errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// The field name is not declared on the form.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Two fields share the same name.
    #[error("duplicate field name: {0}")]
    DuplicateField(String),

    /// A field configuration is not usable.
    #[error("invalid configuration for field {field}: {message}")]
    InvalidConfig { field: String, message: String },

    /// A pattern rule carries a malformed regex.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The form definition could not be parsed.
    #[error("failed to parse form definition: {0}")]
    Definition(#[from] serde_json::Error),

    /// Reading a form definition failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Debounced validation was requested outside a tokio runtime.
    #[error("no tokio runtime available to schedule validation")]
    NoRuntime,

    /// The form has been disposed.
    #[error("form has been disposed")]
    Disposed,
}

/// Failure reported by the submit handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The handler returned an error.
    #[error("submission failed: {0}")]
    Handler(String),

    /// The handler panicked.
    #[error("submission handler panicked")]
    Panicked,
}

/// Active validation errors, one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Errors keyed by field name.
    pub errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    /// Creates a new empty ValidationErrors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Sets the error for a field, replacing any previous one.
    pub fn set(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field.to_string(), message.into());
    }

    /// Clears the error for a field.
    pub fn clear(&mut self, field: &str) {
        self.errors.remove(field);
    }

    /// Returns whether there are any errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the error for a specific field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Returns whether the field has an active error.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Iterates over `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (field, message) in &self.errors {
            writeln!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
