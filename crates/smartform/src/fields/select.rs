//! Select field types.

use crate::field::{FieldConfig, FieldType, SelectOption};

/// Creates a select (dropdown) field from `(value, label)` pairs.
#[must_use]
pub fn select_field(
    name: &str,
    label: &str,
    choices: Vec<(&str, &str)>,
    required: bool,
) -> FieldConfig {
    let mut field = FieldConfig::new(name, label, FieldType::Select);
    field.options = choices
        .into_iter()
        .map(|(value, label)| SelectOption::new(value, label))
        .collect();

    if required {
        field = field.required();
    }

    field
}
