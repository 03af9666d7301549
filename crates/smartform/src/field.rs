//! Field configuration and values.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::validation::{SharedRule, ValidationRule};

/// The kind of input a field collects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line text.
    #[default]
    Text,
    /// Email address.
    Email,
    /// Password, masked unless revealed.
    Password,
    /// Dropdown of fixed options.
    Select,
    /// Multi-line text.
    Textarea,
    /// Numeric input.
    Number,
    /// Telephone number.
    Tel,
}

impl FieldType {
    /// Returns the lowercase name used in definitions and HTML.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Select => "select",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Tel => "tel",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The current value of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Checkbox-like boolean.
    Bool(bool),
    /// Parsed number.
    Number(f64),
    /// Raw text.
    Text(String),
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl FieldValue {
    /// Parses raw input text the way a field of `field_type` stores it.
    ///
    /// Number fields keep unparsable input as text so that rules still see
    /// what was typed.
    #[must_use]
    pub fn from_input(field_type: FieldType, raw: &str) -> Self {
        match field_type {
            FieldType::Number => raw
                .trim()
                .parse::<f64>()
                .map_or_else(|_| Self::Text(raw.to_string()), Self::Number),
            _ => Self::Text(raw.to_string()),
        }
    }

    /// Returns whether the value counts as empty for required checks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Bool(b) => !b,
            Self::Number(n) => n.is_nan(),
        }
    }

    /// Returns the text that validation rules and widgets see.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Bool(b) => Cow::Owned(b.to_string()),
            Self::Number(n) => Cow::Owned(n.to_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// One choice of a select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Displayed label.
    pub label: String,
}

impl SelectOption {
    /// Creates a new option.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Configuration of a form field.
#[derive(Clone)]
pub struct FieldConfig {
    /// Field name, unique within a form.
    pub name: String,
    /// Field label.
    pub label: String,
    /// Input kind.
    pub field_type: FieldType,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Whether the field is required.
    pub required: bool,
    /// Rules, evaluated in order.
    pub validation: Vec<SharedRule>,
    /// Choices for select fields.
    pub options: Vec<SelectOption>,
    /// Row count for textarea fields.
    pub rows: Option<usize>,
    /// Autocomplete hint.
    pub autocomplete: Option<String>,
    /// Debounce override for validate-on-change.
    pub debounce: Option<Duration>,
    /// Initial value.
    pub initial: Option<FieldValue>,
    /// Help text.
    pub help_text: Option<String>,
}

impl fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldConfig")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("field_type", &self.field_type)
            .field("required", &self.required)
            .field("rules", &self.validation.len())
            .field("options", &self.options)
            .field("debounce", &self.debounce)
            .finish_non_exhaustive()
    }
}

impl FieldConfig {
    /// Creates a new field configuration.
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field_type,
            placeholder: None,
            required: false,
            validation: Vec::new(),
            options: Vec::new(),
            rows: None,
            autocomplete: None,
            debounce: None,
            initial: None,
            help_text: None,
        }
    }

    /// Makes the field required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Appends a rule.
    #[must_use]
    pub fn rule(mut self, rule: impl ValidationRule + 'static) -> Self {
        self.validation.push(Arc::new(rule));
        self
    }

    /// Appends a rule instance shared with other fields.
    #[must_use]
    pub fn shared_rule(mut self, rule: SharedRule) -> Self {
        self.validation.push(rule);
        self
    }

    /// Adds a select option.
    #[must_use]
    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(SelectOption::new(value, label));
        self
    }

    /// Sets the textarea row count.
    #[must_use]
    pub const fn rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Sets the autocomplete hint.
    #[must_use]
    pub fn autocomplete(mut self, hint: impl Into<String>) -> Self {
        self.autocomplete = Some(hint.into());
        self
    }

    /// Overrides the form's debounce delay for this field.
    #[must_use]
    pub const fn debounce(mut self, delay: Duration) -> Self {
        self.debounce = Some(delay);
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn initial(mut self, value: impl Into<FieldValue>) -> Self {
        self.initial = Some(value.into());
        self
    }

    /// Sets help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Returns the value the field holds before any input.
    #[must_use]
    pub fn default_value(&self) -> FieldValue {
        self.initial.clone().unwrap_or_default()
    }
}
