//! Bootstrap 5 widgets and form layout.

use ironhtml::html;
use ironhtml_elements::{Button, Div, Span, I};

use super::{html_escape, PasswordVisibility, RenderStrategy, StatusIcon, Widget, WidgetAttrs};
use crate::engine::{FormEngine, FormSnapshot, SubmitPhase};
use crate::field::FieldConfig;

fn widget_id(name: &str, attrs: &WidgetAttrs) -> String {
    attrs
        .get("id")
        .cloned()
        .unwrap_or_else(|| format!("id_{name}"))
}

fn widget_class(base: &str, attrs: &WidgetAttrs) -> String {
    attrs
        .get("class")
        .map_or_else(|| base.to_string(), |extra| format!("{base} {extra}"))
}

fn placeholder_attr(placeholder: Option<&String>) -> String {
    placeholder
        .map(|p| format!(r#" placeholder="{}""#, html_escape(p)))
        .unwrap_or_default()
}

/// Bootstrap 5 text input widget (text, email, number, tel).
#[derive(Debug, Clone)]
pub struct BootstrapTextInput {
    /// The HTML input type.
    pub input_type: String,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl Default for BootstrapTextInput {
    fn default() -> Self {
        Self {
            input_type: "text".to_string(),
            placeholder: None,
        }
    }
}

impl Widget for BootstrapTextInput {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let value_attr = value
            .map(|v| format!(r#" value="{}""#, html_escape(v)))
            .unwrap_or_default();

        format!(
            r#"<input type="{}" class="{}" id="{}" name="{}"{}{}{}>"#,
            self.input_type,
            widget_class("form-control", attrs),
            widget_id(name, attrs),
            name,
            value_attr,
            placeholder_attr(self.placeholder.as_ref()),
            attrs.extra_html()
        )
    }

    fn input_type(&self) -> &str {
        &self.input_type
    }
}

/// Bootstrap 5 password input with a show/hide toggle button.
#[derive(Debug, Clone, Default)]
pub struct BootstrapPasswordInput {
    /// Whether the text is shown in clear.
    pub revealed: bool,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl Widget for BootstrapPasswordInput {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let id = widget_id(name, attrs);
        let value_attr = value
            .map(|v| format!(r#" value="{}""#, html_escape(v)))
            .unwrap_or_default();
        let (icon, toggle_label) = if self.revealed {
            ("bi bi-eye-slash", "Hide password")
        } else {
            ("bi bi-eye", "Show password")
        };

        format!(
            r#"<input type="{}" class="{}" id="{id}" name="{name}"{value_attr}{}{}><button type="button" class="btn btn-outline-secondary" data-toggle-password="{id}" aria-label="{toggle_label}" aria-pressed="{}"><i class="{icon}"></i></button>"#,
            self.input_type(),
            widget_class("form-control", attrs),
            placeholder_attr(self.placeholder.as_ref()),
            attrs.extra_html(),
            self.revealed
        )
    }

    fn input_type(&self) -> &str {
        if self.revealed {
            "text"
        } else {
            "password"
        }
    }
}

/// Bootstrap 5 textarea widget.
#[derive(Debug, Clone)]
pub struct BootstrapTextarea {
    /// Number of rows.
    pub rows: usize,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl Default for BootstrapTextarea {
    fn default() -> Self {
        Self {
            rows: super::DEFAULT_TEXTAREA_ROWS,
            placeholder: None,
        }
    }
}

impl Widget for BootstrapTextarea {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let content = value.map(html_escape).unwrap_or_default();

        format!(
            r#"<textarea class="{}" id="{}" name="{}" rows="{}"{}{}>{}</textarea>"#,
            widget_class("form-control", attrs),
            widget_id(name, attrs),
            name,
            self.rows,
            placeholder_attr(self.placeholder.as_ref()),
            attrs.extra_html(),
            content
        )
    }

    fn input_type(&self) -> &str {
        "textarea"
    }
}

/// Bootstrap 5 select widget.
#[derive(Debug, Clone)]
pub struct BootstrapSelect {
    /// Available choices (value, label).
    pub choices: Vec<(String, String)>,
    /// Label for the blank prompt option.
    pub blank_label: String,
}

impl BootstrapSelect {
    /// Creates a new select with the given choices.
    #[must_use]
    pub fn new(choices: Vec<(String, String)>) -> Self {
        Self {
            choices,
            blank_label: "Select an option".to_string(),
        }
    }

    /// Sets the blank label.
    #[must_use]
    pub fn blank_label(mut self, label: impl Into<String>) -> Self {
        self.blank_label = label.into();
        self
    }
}

impl Widget for BootstrapSelect {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let mut options = format!(
            r#"<option value="">{}</option>"#,
            html_escape(&self.blank_label)
        );

        for (opt_value, label) in &self.choices {
            let selected = value.is_some_and(|v| v == opt_value);
            let selected_attr = if selected { " selected" } else { "" };
            options.push_str(&format!(
                r#"<option value="{}"{selected_attr}>{}</option>"#,
                html_escape(opt_value),
                html_escape(label)
            ));
        }

        format!(
            r#"<select class="{}" id="{}" name="{}"{}>{}</select>"#,
            widget_class("form-select", attrs),
            widget_id(name, attrs),
            name,
            attrs.extra_html(),
            options
        )
    }

    fn input_type(&self) -> &str {
        "select"
    }
}

/// Renders one field: label, input, status icon, inline error and help text.
///
/// Errors are only shown for touched fields.
#[must_use]
pub fn render_field(
    field: &FieldConfig,
    snapshot: &FormSnapshot,
    visibility: &PasswordVisibility,
    disabled: bool,
) -> String {
    let id = format!("id_{}", field.name);
    let value = snapshot
        .value(&field.name)
        .map(|v| v.as_text().into_owned())
        .unwrap_or_default();
    let has_value = snapshot.value(&field.name).is_some_and(|v| !v.is_empty());
    let error = snapshot.visible_error(&field.name).map(str::to_string);
    let status = StatusIcon::from_state(has_value, error.is_some(), snapshot.is_touched(&field.name));

    let required_marker = if field.required { " *" } else { "" };
    let label_text = format!("{}{}", field.label, required_marker);

    let mut attrs = WidgetAttrs::new();
    attrs.set("id", &id);
    if let Some(class) = status.input_class() {
        attrs.set("class", class);
    }
    if field.required {
        attrs.set("required", "required");
    }
    if let Some(hint) = &field.autocomplete {
        attrs.set("autocomplete", hint);
    }
    let error_id = format!("{id}_error");
    if error.is_some() {
        attrs.set("aria-invalid", "true");
        attrs.set("aria-describedby", &error_id);
    }
    if disabled {
        attrs.set("disabled", "disabled");
    }

    let widget = RenderStrategy::for_field(field, visibility).widget(field);
    let widget_html = widget.render(&field.name, Some(&value), &attrs);

    let label_el = html! {
        label.for_(#&id).class("form-label") { #label_text }
    };

    let icon_class = status.icon_class();
    let help_text = field.help_text.clone();

    html! { div.class("mb-3") }
        .raw(label_el.render())
        .child::<Div, _>(|group| {
            group
                .class("input-group has-validation")
                .raw(&widget_html)
                .when(icon_class.is_some(), |g| {
                    g.child::<Span, _>(|s| {
                        s.class("input-group-text")
                            .child::<I, _>(|i| i.class(icon_class.unwrap_or("")))
                    })
                })
                .when(error.is_some(), |g| {
                    g.child::<Div, _>(|e| {
                        e.class("invalid-feedback")
                            .attr("id", &error_id)
                            .text(error.as_deref().unwrap_or(""))
                    })
                })
        })
        .when(help_text.is_some(), |d| {
            d.child::<Div, _>(|h| {
                h.class("form-text")
                    .text(help_text.as_deref().unwrap_or(""))
            })
        })
        .render()
}

/// Renders a complete form with Bootstrap 5 styling.
///
/// Includes the completion bar when `show_progress` is on, a banner for the
/// last submission result, and a submit button that is disabled while a
/// submission runs.
#[must_use]
pub fn render_form(
    form: &FormEngine,
    visibility: &PasswordVisibility,
    action: &str,
    method: &str,
) -> String {
    let snapshot = form.snapshot();
    let options = form.options();
    let submitting = snapshot.phase.is_submitting();

    let mut el = html! {
        form.action(#action).method(#method)
    }
    .attr("novalidate", "novalidate");

    if options.show_progress {
        let percent = snapshot.completion.to_string();
        let width = format!("width: {percent}%");
        let label = format!("{percent}% complete");
        el = el.child::<Div, _>(|d| {
            d.class("progress mb-3")
                .attr("role", "progressbar")
                .attr("aria-valuenow", &percent)
                .attr("aria-valuemin", "0")
                .attr("aria-valuemax", "100")
                .child::<Div, _>(|bar| bar.class("progress-bar").attr("style", &width).text(&label))
        });
    }

    match &snapshot.phase {
        SubmitPhase::SubmitFailed { message } => {
            el = el.child::<Div, _>(|d| {
                d.class("alert alert-danger")
                    .attr("role", "alert")
                    .text(message.as_str())
            });
        }
        SubmitPhase::SubmitSucceeded => {
            el = el.child::<Div, _>(|d| {
                d.class("alert alert-success")
                    .attr("role", "status")
                    .text("Thanks! Your submission was received.")
            });
        }
        SubmitPhase::Idle | SubmitPhase::Validating | SubmitPhase::Submitting => {}
    }

    for field in form.fields() {
        let field_html = render_field(field, &snapshot, visibility, submitting);
        el = el.child::<Div, _>(|d| d.raw(&field_html));
    }

    let label = if submitting {
        "Submitting..."
    } else {
        options.submit_label.as_str()
    };
    el = el.child::<Div, _>(|d| {
        d.child::<Button, _>(|b| {
            let b = b.attr("type", "submit").class("btn btn-primary").text(label);
            if submitting {
                b.attr("disabled", "disabled").attr("aria-busy", "true")
            } else {
                b
            }
        })
    });

    el.render()
}
