//! Form definitions loaded from JSON.
//!
//! A definition carries the form options and the declared fields. Rules are
//! tagged objects:
//!
//! ```json
//! {
//!   "options": { "submit_label": "Request access", "debounce_ms": 250 },
//!   "fields": [
//!     {
//!       "name": "email",
//!       "label": "Work Email",
//!       "type": "email",
//!       "required": true,
//!       "validation": [{ "kind": "email" }]
//!     },
//!     {
//!       "name": "team_size",
//!       "label": "Team size",
//!       "type": "select",
//!       "options": [{ "value": "1-10", "label": "1-10" }]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};
use crate::field::{FieldConfig, FieldType, FieldValue, SelectOption};
use crate::options::FormOptions;
use crate::validation::{
    EmailRule, MaxLengthRule, MinLengthRule, PatternRule, PhoneRule, RangeRule, SharedRule,
    StrongPasswordRule, UrlRule,
};

/// A validation rule as written in a definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleDef {
    /// Email format.
    Email {
        /// Replaces the default message.
        #[serde(default)]
        message: Option<String>,
    },
    /// Minimum length in characters.
    MinLength {
        /// Smallest accepted length.
        length: usize,
        /// Replaces the default message.
        #[serde(default)]
        message: Option<String>,
    },
    /// Maximum length in characters.
    MaxLength {
        /// Largest accepted length.
        length: usize,
        /// Replaces the default message.
        #[serde(default)]
        message: Option<String>,
    },
    /// Strong password.
    StrongPassword {
        /// Replaces the default message.
        #[serde(default)]
        message: Option<String>,
    },
    /// Phone number.
    Phone {
        /// Replaces the default message.
        #[serde(default)]
        message: Option<String>,
    },
    /// URL.
    Url {
        /// Replaces the default message.
        #[serde(default)]
        message: Option<String>,
    },
    /// Custom regex.
    Pattern {
        /// Regex the value must match.
        pattern: String,
        /// Message shown when it does not.
        message: String,
    },
    /// Numeric range.
    Range {
        /// Inclusive lower bound.
        #[serde(default)]
        min: Option<f64>,
        /// Inclusive upper bound.
        #[serde(default)]
        max: Option<f64>,
        /// Replaces the default message.
        #[serde(default)]
        message: Option<String>,
    },
}

impl RuleDef {
    /// Builds the rule this definition describes.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidPattern`] for a malformed regex.
    pub fn build(&self) -> Result<SharedRule> {
        let rule: SharedRule = match self {
            Self::Email { message } => Arc::new(
                message
                    .clone()
                    .map_or_else(EmailRule::new, EmailRule::with_message),
            ),
            Self::MinLength { length, message } => Arc::new(message.as_ref().map_or_else(
                || MinLengthRule::new(*length),
                |m| MinLengthRule::with_message(*length, m.clone()),
            )),
            Self::MaxLength { length, message } => Arc::new(message.as_ref().map_or_else(
                || MaxLengthRule::new(*length),
                |m| MaxLengthRule::with_message(*length, m.clone()),
            )),
            Self::StrongPassword { message } => Arc::new(
                message
                    .clone()
                    .map_or_else(StrongPasswordRule::new, StrongPasswordRule::with_message),
            ),
            Self::Phone { message } => Arc::new(
                message
                    .clone()
                    .map_or_else(PhoneRule::new, PhoneRule::with_message),
            ),
            Self::Url { message } => Arc::new(
                message
                    .clone()
                    .map_or_else(UrlRule::new, UrlRule::with_message),
            ),
            Self::Pattern { pattern, message } => {
                Arc::new(PatternRule::new(pattern, message.clone())?)
            }
            Self::Range { min, max, message } => Arc::new(message.as_ref().map_or_else(
                || RangeRule::new(*min, *max),
                |m| RangeRule::with_message(*min, *max, m.clone()),
            )),
        };
        Ok(rule)
    }
}

/// A field as written in a definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name, unique within the form.
    pub name: String,
    /// Label shown next to the input and used in the required message.
    pub label: String,
    /// Input kind, `text` when omitted.
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    /// Placeholder text.
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Whether an empty value is an error.
    #[serde(default)]
    pub required: bool,
    /// Rules, evaluated in order.
    #[serde(default)]
    pub validation: Vec<RuleDef>,
    /// Choices for select fields.
    #[serde(default)]
    pub options: Vec<SelectOption>,
    /// Row count for textarea fields.
    #[serde(default)]
    pub rows: Option<usize>,
    /// Autocomplete hint.
    #[serde(default)]
    pub autocomplete: Option<String>,
    /// Debounce override in milliseconds.
    #[serde(default)]
    pub debounce_ms: Option<u64>,
    /// Initial value.
    #[serde(default)]
    pub initial: Option<FieldValue>,
    /// Help text shown under the input.
    #[serde(default)]
    pub help_text: Option<String>,
}

impl FieldDef {
    /// Builds the field configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidConfig`] naming this field when one of its
    /// rules cannot be built.
    pub fn build(&self) -> Result<FieldConfig> {
        let validation = self
            .validation
            .iter()
            .map(RuleDef::build)
            .collect::<Result<Vec<_>>>()
            .map_err(|err| match err {
                FormError::InvalidPattern(e) => FormError::InvalidConfig {
                    field: self.name.clone(),
                    message: e.to_string(),
                },
                other => other,
            })?;

        Ok(FieldConfig {
            name: self.name.clone(),
            label: self.label.clone(),
            field_type: self.field_type,
            placeholder: self.placeholder.clone(),
            required: self.required,
            validation,
            options: self.options.clone(),
            rows: self.rows,
            autocomplete: self.autocomplete.clone(),
            debounce: self.debounce_ms.map(Duration::from_millis),
            initial: self.initial.clone(),
            help_text: self.help_text.clone(),
        })
    }
}

/// A complete form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    /// Form-wide options; defaults apply when omitted.
    #[serde(default)]
    pub options: FormOptions,
    /// Declared fields in display order.
    pub fields: Vec<FieldDef>,
}

impl FormDefinition {
    /// Parses a definition from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Definition`] when the text is not a valid
    /// definition.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a definition file.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Io`] when the file cannot be read, otherwise as
    /// [`from_json`](Self::from_json).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Builds the field configurations in declared order.
    ///
    /// # Errors
    ///
    /// Fails on the first field that [`FieldDef::build`] rejects.
    pub fn build_fields(&self) -> Result<Vec<FieldConfig>> {
        self.fields.iter().map(FieldDef::build).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::validate_field;

    const WAITLIST: &str = r#"{
        "options": { "submit_label": "Request access", "debounce_ms": 250 },
        "fields": [
            {
                "name": "email",
                "label": "Work Email",
                "type": "email",
                "required": true,
                "validation": [{ "kind": "email" }]
            },
            {
                "name": "handle",
                "label": "Handle",
                "validation": [
                    { "kind": "min_length", "length": 3 },
                    { "kind": "pattern", "pattern": "^[a-z0-9_]+$", "message": "Lowercase only" }
                ],
                "debounce_ms": 500
            },
            {
                "name": "team_size",
                "label": "Team size",
                "type": "select",
                "options": [
                    { "value": "1-10", "label": "1-10" },
                    { "value": "11-50", "label": "11-50" }
                ],
                "initial": "1-10"
            }
        ]
    }"#;

    #[test]
    fn test_parse_definition() {
        let def = FormDefinition::from_json(WAITLIST).unwrap();
        assert_eq!(def.options.submit_label, "Request access");
        assert_eq!(def.options.debounce_ms, 250);
        assert!(def.options.validate_on_change);
        assert_eq!(def.fields.len(), 3);
        assert_eq!(def.fields[1].field_type, FieldType::Text);
    }

    #[test]
    fn test_build_fields() {
        let fields = FormDefinition::from_json(WAITLIST)
            .unwrap()
            .build_fields()
            .unwrap();
        let handle = &fields[1];
        assert_eq!(handle.debounce, Some(Duration::from_millis(500)));
        assert_eq!(
            validate_field(handle, &FieldValue::from("ab")),
            Some("Must be at least 3 characters".to_string())
        );
        assert_eq!(
            validate_field(handle, &FieldValue::from("Abc")),
            Some("Lowercase only".to_string())
        );
        assert_eq!(fields[2].default_value(), FieldValue::from("1-10"));
    }

    #[test]
    fn test_custom_messages() {
        let rule = RuleDef::Email {
            message: Some("Use your work address".to_string()),
        }
        .build()
        .unwrap();
        assert_eq!(rule.message(), "Use your work address");
    }

    #[test]
    fn test_bad_pattern_names_field() {
        let def = FormDefinition::from_json(
            r#"{"fields": [{"name": "code", "label": "Code",
                "validation": [{"kind": "pattern", "pattern": "(", "message": "x"}]}]}"#,
        )
        .unwrap();
        let err = def.build_fields().unwrap_err();
        assert!(matches!(err, FormError::InvalidConfig { field, .. } if field == "code"));
    }

    #[test]
    fn test_unknown_rule_kind_is_rejected() {
        let err = FormDefinition::from_json(
            r#"{"fields": [{"name": "a", "label": "A", "validation": [{"kind": "zip"}]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, FormError::Definition(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = FormDefinition::from_path("/nonexistent/form.json").unwrap_err();
        assert!(matches!(err, FormError::Io(_)));
    }
}
