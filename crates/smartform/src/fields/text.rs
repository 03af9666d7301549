//! Text-like field types.

use crate::field::{FieldConfig, FieldType};
use crate::validation::{
    EmailRule, MaxLengthRule, MinLengthRule, PhoneRule, RangeRule, StrongPasswordRule, UrlRule,
};

/// Creates a text field with a maximum length.
#[must_use]
pub fn char_field(name: &str, label: &str, max_length: usize, required: bool) -> FieldConfig {
    let field =
        FieldConfig::new(name, label, FieldType::Text).rule(MaxLengthRule::new(max_length));
    if required {
        field.required()
    } else {
        field
    }
}

/// Creates a multi-line text field.
#[must_use]
pub fn textarea_field(name: &str, label: &str, rows: usize, required: bool) -> FieldConfig {
    let field = FieldConfig::new(name, label, FieldType::Textarea).rows(rows);
    if required {
        field.required()
    } else {
        field
    }
}

/// Creates an email field.
#[must_use]
pub fn email_field(name: &str, label: &str, required: bool) -> FieldConfig {
    let field = FieldConfig::new(name, label, FieldType::Email)
        .rule(EmailRule::new())
        .autocomplete("email");
    if required {
        field.required()
    } else {
        field
    }
}

/// Creates a required password field.
///
/// `strong` adds the strong-password rule; otherwise `min_length`, if any, is
/// the only check.
#[must_use]
pub fn password_field(
    name: &str,
    label: &str,
    min_length: Option<usize>,
    strong: bool,
) -> FieldConfig {
    let mut field = FieldConfig::new(name, label, FieldType::Password)
        .required()
        .autocomplete("new-password");

    if let Some(min) = min_length {
        field = field.rule(MinLengthRule::new(min));
    }
    if strong {
        field = field.rule(StrongPasswordRule::new());
    }

    field
}

/// Creates a telephone field.
#[must_use]
pub fn phone_field(name: &str, label: &str, required: bool) -> FieldConfig {
    let field = FieldConfig::new(name, label, FieldType::Tel)
        .rule(PhoneRule::new())
        .autocomplete("tel");
    if required {
        field.required()
    } else {
        field
    }
}

/// Creates a URL field.
#[must_use]
pub fn url_field(name: &str, label: &str, required: bool) -> FieldConfig {
    let field = FieldConfig::new(name, label, FieldType::Text)
        .rule(UrlRule::new())
        .placeholder("https://");
    if required {
        field.required()
    } else {
        field
    }
}

/// Creates a number field with optional bounds.
#[must_use]
pub fn number_field(
    name: &str,
    label: &str,
    min: Option<f64>,
    max: Option<f64>,
    required: bool,
) -> FieldConfig {
    let mut field = FieldConfig::new(name, label, FieldType::Number);
    if min.is_some() || max.is_some() {
        field = field.rule(RangeRule::new(min, max));
    }
    if required {
        field.required()
    } else {
        field
    }
}
