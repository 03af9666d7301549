//! Field and form rendering.
//!
//! Every [`FieldType`] maps to a [`RenderStrategy`], which picks the widget
//! that draws the input. The surrounding markup (label, status icon, inline
//! error, help text) is shared by all strategies. Password visibility is
//! display-only state and lives in [`PasswordVisibility`], outside the engine.

mod bootstrap;

pub use bootstrap::{
    render_field, render_form, BootstrapPasswordInput, BootstrapSelect, BootstrapTextInput,
    BootstrapTextarea,
};

use std::collections::{BTreeMap, HashSet};

use crate::field::{FieldConfig, FieldType};

/// Default textarea row count.
pub const DEFAULT_TEXTAREA_ROWS: usize = 4;

/// How a field's input is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    /// A plain `<input>` of the given type.
    Input { input_type: &'static str },
    /// A password input with a visibility toggle.
    Password { revealed: bool },
    /// A dropdown with a blank prompt.
    Select,
    /// A multi-line text area.
    Textarea { rows: usize },
}

impl RenderStrategy {
    /// Picks the strategy for a field.
    #[must_use]
    pub fn for_field(field: &FieldConfig, visibility: &PasswordVisibility) -> Self {
        match field.field_type {
            FieldType::Text => Self::Input { input_type: "text" },
            FieldType::Email => Self::Input {
                input_type: "email",
            },
            FieldType::Number => Self::Input {
                input_type: "number",
            },
            FieldType::Tel => Self::Input { input_type: "tel" },
            FieldType::Password => Self::Password {
                revealed: visibility.is_revealed(&field.name),
            },
            FieldType::Select => Self::Select,
            FieldType::Textarea => Self::Textarea {
                rows: field.rows.unwrap_or(DEFAULT_TEXTAREA_ROWS),
            },
        }
    }

    /// Builds the widget for this strategy.
    #[must_use]
    pub fn widget(self, field: &FieldConfig) -> Box<dyn Widget> {
        match self {
            Self::Input { input_type } => Box::new(BootstrapTextInput {
                input_type: input_type.to_string(),
                placeholder: field.placeholder.clone(),
            }),
            Self::Password { revealed } => Box::new(BootstrapPasswordInput {
                revealed,
                placeholder: field.placeholder.clone(),
            }),
            Self::Select => Box::new(BootstrapSelect::new(
                field
                    .options
                    .iter()
                    .map(|o| (o.value.clone(), o.label.clone()))
                    .collect(),
            )),
            Self::Textarea { rows } => Box::new(BootstrapTextarea {
                rows,
                placeholder: field.placeholder.clone(),
            }),
        }
    }
}

/// Inline validation status shown next to an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    /// Nothing to show.
    None,
    /// Touched, filled and error-free.
    Valid,
    /// Touched with an error.
    Invalid,
}

impl StatusIcon {
    /// Derives the icon from the field's state.
    #[must_use]
    pub const fn from_state(has_value: bool, has_error: bool, touched: bool) -> Self {
        match (touched, has_error, has_value) {
            (true, true, _) => Self::Invalid,
            (true, false, true) => Self::Valid,
            _ => Self::None,
        }
    }

    /// Returns the Bootstrap Icons class, if any.
    #[must_use]
    pub const fn icon_class(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Valid => Some("bi bi-check-circle-fill text-success"),
            Self::Invalid => Some("bi bi-exclamation-circle-fill text-danger"),
        }
    }

    /// Returns the input state class, if any.
    #[must_use]
    pub const fn input_class(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Valid => Some("is-valid"),
            Self::Invalid => Some("is-invalid"),
        }
    }
}

/// Which password fields currently show their text.
#[derive(Debug, Clone, Default)]
pub struct PasswordVisibility {
    revealed: HashSet<String>,
}

impl PasswordVisibility {
    /// Creates an empty set; every password starts masked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips a field's visibility and returns the new state.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.revealed.remove(name) {
            false
        } else {
            self.revealed.insert(name.to_string());
            true
        }
    }

    /// Shows a field's text.
    pub fn reveal(&mut self, name: &str) {
        self.revealed.insert(name.to_string());
    }

    /// Masks a field's text.
    pub fn hide(&mut self, name: &str) {
        self.revealed.remove(name);
    }

    /// Returns whether the field's text is shown.
    #[must_use]
    pub fn is_revealed(&self, name: &str) -> bool {
        self.revealed.contains(name)
    }
}

/// Attributes that can be applied to a widget.
#[derive(Debug, Clone, Default)]
pub struct WidgetAttrs {
    /// HTML attributes, rendered in key order.
    pub attrs: BTreeMap<String, String>,
}

impl WidgetAttrs {
    /// Creates new empty widget attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Gets an attribute.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&String> {
        self.attrs.get(key)
    }

    /// Renders the attributes except `class` and `id` as ` key="value"` pairs.
    #[must_use]
    pub fn extra_html(&self) -> String {
        self.attrs
            .iter()
            .filter(|(k, _)| k.as_str() != "class" && k.as_str() != "id")
            .map(|(k, v)| format!(r#" {k}="{}""#, html_escape(v)))
            .collect()
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }
}

/// Trait for widgets that render HTML inputs.
pub trait Widget: Send + Sync {
    /// Renders the widget as HTML.
    ///
    /// # Arguments
    /// * `name` - The field name (used for the name attribute)
    /// * `value` - The current value (if any)
    /// * `attrs` - Additional HTML attributes
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String;

    /// Returns the HTML input type.
    fn input_type(&self) -> &str {
        "text"
    }
}

/// Escapes HTML special characters.
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
