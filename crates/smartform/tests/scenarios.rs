//! End-to-end form scenarios.

mod common;
use common::*;

use std::sync::Arc;

use tokio::sync::Notify;

use smartform::fields::{email_field, password_field, select_field};
use smartform::validation::{MaxLengthRule, MinLengthRule, PatternRule};
use smartform::{
    render_form, BoxError, FieldConfig, FieldType, FieldValue, FormBuilder, FormDefinition,
    FormError, PasswordVisibility, SubmitError, SubmitOutcome,
};

#[tokio::test]
async fn email_field_from_error_to_complete() {
    let subs = Submissions::new();
    let form = {
        let subs = subs.clone();
        email_only()
            .on_submit(move |values| {
                let subs = subs.clone();
                async move {
                    subs.record(values);
                    Ok::<(), BoxError>(())
                }
            })
            .build()
            .unwrap()
    };

    form.set_value("email", "not-an-email").unwrap();
    form.set_touched("email").unwrap();
    assert_eq!(
        form.visible_error("email").as_deref(),
        Some("Please enter a valid email address")
    );
    assert_eq!(form.completion_percentage(), 0);

    form.set_value("email", "a@b.com").unwrap();
    form.set_touched("email").unwrap();
    assert_eq!(form.error("email"), None);
    assert_eq!(form.completion_percentage(), 100);

    assert_eq!(form.submit().await, SubmitOutcome::Submitted);
    assert_eq!(
        subs.last().unwrap()["email"],
        FieldValue::from("a@b.com")
    );
}

#[tokio::test]
async fn completion_counts_valid_required_fields() {
    let form = FormBuilder::new()
        .field(email_field("email", "Email", true))
        .field(FieldConfig::new("name", "Name", FieldType::Text).required())
        .field(FieldConfig::new("company", "Company", FieldType::Text))
        .build()
        .unwrap();
    assert_eq!(form.completion_percentage(), 0);

    form.set_value("name", "Ada").unwrap();
    form.set_touched("name").unwrap();
    assert_eq!(form.completion_percentage(), 50);

    form.set_value("company", "Analytical Engines").unwrap();
    assert_eq!(form.completion_percentage(), 50);

    form.set_value("email", "ada@example.com").unwrap();
    assert_eq!(form.completion_percentage(), 100);
}

#[tokio::test]
async fn first_failing_rule_reports() {
    let form = FormBuilder::new()
        .field(
            FieldConfig::new("handle", "Handle", FieldType::Text)
                .required()
                .rule(MinLengthRule::new(3))
                .rule(PatternRule::new("^[a-z]+$", "Lowercase letters only").unwrap())
                .rule(MaxLengthRule::new(8)),
        )
        .build()
        .unwrap();

    let cases = [
        ("", Some("Handle is required")),
        ("AB", Some("Must be at least 3 characters")),
        ("ABC", Some("Lowercase letters only")),
        ("abcdefghij", Some("Must be no more than 8 characters")),
        ("ada", None),
    ];
    for (input, expected) in cases {
        form.set_value("handle", input).unwrap();
        assert_eq!(
            form.validate_field("handle").unwrap().as_deref(),
            expected,
            "input {input:?}"
        );
    }
}

#[tokio::test]
async fn optional_empty_field_skips_rules() {
    let form = FormBuilder::new()
        .field(FieldConfig::new("bio", "Bio", FieldType::Textarea).rule(MinLengthRule::new(20)))
        .build()
        .unwrap();
    form.set_touched("bio").unwrap();
    assert_eq!(form.error("bio"), None);
    assert_eq!(form.submit().await, SubmitOutcome::Submitted);
}

#[tokio::test]
async fn definition_drives_a_signup_form() {
    let definition = FormDefinition::from_json(
        r#"{
            "options": { "submit_label": "Create account", "show_progress": true },
            "fields": [
                {
                    "name": "email",
                    "label": "Email",
                    "type": "email",
                    "required": true,
                    "validation": [{ "kind": "email" }]
                },
                {
                    "name": "password",
                    "label": "Password",
                    "type": "password",
                    "required": true,
                    "validation": [{ "kind": "strong_password" }]
                },
                {
                    "name": "seats",
                    "label": "Seats",
                    "type": "number",
                    "validation": [{ "kind": "range", "min": 1, "max": 50 }]
                }
            ]
        }"#,
    )
    .unwrap();
    let form = FormBuilder::new()
        .fields(definition.build_fields().unwrap())
        .options(definition.options.clone())
        .build()
        .unwrap();

    form.set_value("email", "ada@example.com").unwrap();
    form.set_value("password", "weak").unwrap();
    form.set_value("seats", FieldValue::from_input(FieldType::Number, "80"))
        .unwrap();

    let SubmitOutcome::Invalid(errors) = form.submit().await else {
        panic!("expected validation failure");
    };
    assert_eq!(errors.len(), 2);
    assert!(errors.contains("password"));
    assert_eq!(errors.get("seats"), Some("Must be between 1 and 50"));

    form.set_value("password", "Str0ng!pass").unwrap();
    form.set_value("seats", FieldValue::from_input(FieldType::Number, "12"))
        .unwrap();
    assert_eq!(form.submit().await, SubmitOutcome::Submitted);

    let html = render_form(&form, &PasswordVisibility::new(), "/signup", "post");
    assert!(html.contains("Create account"));
    assert!(html.contains("width: 100%"));
    assert!(html.contains("alert-success"));
}

#[test]
fn definition_with_bad_pattern_names_the_field() {
    let definition = FormDefinition::from_json(
        r#"{ "fields": [{
            "name": "zip",
            "label": "Zip",
            "validation": [{ "kind": "pattern", "pattern": "([0-9", "message": "Bad zip" }]
        }] }"#,
    )
    .unwrap();
    let err = definition.build_fields().unwrap_err();
    assert!(matches!(err, FormError::InvalidConfig { field, .. } if field == "zip"));
}

#[test]
fn rendered_form_reflects_password_visibility() {
    let form = FormBuilder::new()
        .field(password_field("password", "Password", Some(10), false))
        .field(select_field(
            "plan",
            "Plan",
            vec![("free", "Free"), ("pro", "Pro")],
            true,
        ))
        .build()
        .unwrap();

    let mut visibility = PasswordVisibility::new();
    let hidden = render_form(&form, &visibility, "/", "post");
    assert!(hidden.contains(r#"type="password""#));

    visibility.toggle("password");
    let shown = render_form(&form, &visibility, "/", "post");
    assert!(!shown.contains(r#"type="password""#));
    assert!(shown.contains("Hide password"));
    assert!(shown.contains(r#"value="pro""#));
}

#[tokio::test]
async fn rendered_form_tracks_submission_phase() {
    let gate = Arc::new(Notify::new());
    let form = {
        let gate = Arc::clone(&gate);
        email_only()
            .submit_label("Join")
            .on_submit(move |_| {
                let gate = Arc::clone(&gate);
                async move {
                    gate.notified().await;
                    Err::<(), BoxError>("quota <exceeded>".into())
                }
            })
            .build()
            .unwrap()
    };
    form.set_value("email", "a@b.com").unwrap();

    let idle = render_form(&form, &PasswordVisibility::new(), "/join", "post");
    assert!(idle.contains("Join"));
    assert!(!idle.contains(r#"disabled="disabled""#));

    let pending = tokio::spawn({
        let form = form.clone();
        async move { form.submit().await }
    });
    until_submitting(&form).await;

    let busy = render_form(&form, &PasswordVisibility::new(), "/join", "post");
    assert!(busy.contains("Submitting..."));
    assert!(busy.contains(r#"disabled="disabled""#));
    assert!(busy.contains(r#"aria-busy="true""#));
    assert!(!busy.contains("alert-danger"));

    gate.notify_one();
    assert_eq!(
        pending.await.unwrap(),
        SubmitOutcome::Failed(SubmitError::Handler("quota <exceeded>".to_string()))
    );

    let failed = render_form(&form, &PasswordVisibility::new(), "/join", "post");
    assert!(failed.contains("alert-danger"));
    assert!(failed.contains("submission failed: quota &lt;exceeded&gt;"));
    assert!(!failed.contains("quota <exceeded>"));
    assert!(!failed.contains("Submitting..."));
    assert!(failed.contains("Join"));
}
