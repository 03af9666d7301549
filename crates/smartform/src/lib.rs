//! # smartform
//!
//! Declarative forms with field-level validation, debounced
//! validate-on-change, completion tracking and gated async submission.
//!
//! This crate provides:
//! - Reusable validation rules (email, length bounds, strong password,
//!   phone, URL, regex, numeric range, custom predicates)
//! - A field validator with required-first, short-circuit rule evaluation
//! - A form engine owning values, touched flags, errors and submission phase
//! - Bootstrap 5 rendering with status icons and password toggles
//! - JSON form definitions
//!
//! ## Quick Start
//!
//! ```rust
//! use smartform::{FieldConfig, FieldType, FormBuilder};
//! use smartform::validation::{EmailRule, MinLengthRule};
//!
//! let form = FormBuilder::new()
//!     .field(
//!         FieldConfig::new("name", "Full name", FieldType::Text)
//!             .required()
//!             .rule(MinLengthRule::new(2)),
//!     )
//!     .field(
//!         FieldConfig::new("email", "Email", FieldType::Email)
//!             .required()
//!             .rule(EmailRule::new()),
//!     )
//!     .build()
//!     .unwrap();
//!
//! form.set_value("name", "Ada").unwrap();
//! form.set_touched("name").unwrap();
//! assert_eq!(form.completion_percentage(), 50);
//! ```
//!
//! ## Using Field Helpers
//!
//! ```rust
//! use smartform::fields::{email_field, password_field, select_field};
//!
//! let fields = vec![
//!     email_field("email", "Work email", true),
//!     password_field("password", "Password", None, true),
//!     select_field("plan", "Plan", vec![
//!         ("starter", "Starter"),
//!         ("enterprise", "Enterprise"),
//!     ], true),
//! ];
//! assert_eq!(fields.len(), 3);
//! ```
//!
//! ## Validation
//!
//! ```rust
//! use smartform::{validate_field, FieldConfig, FieldType, FieldValue};
//! use smartform::validation::{MaxLengthRule, MinLengthRule};
//!
//! let field = FieldConfig::new("handle", "Handle", FieldType::Text)
//!     .required()
//!     .rule(MinLengthRule::new(3))
//!     .rule(MaxLengthRule::new(15));
//!
//! assert_eq!(
//!     validate_field(&field, &FieldValue::from("")),
//!     Some("Handle is required".to_string())
//! );
//! assert_eq!(
//!     validate_field(&field, &FieldValue::from("ab")),
//!     Some("Must be at least 3 characters".to_string())
//! );
//! assert_eq!(validate_field(&field, &FieldValue::from("ada")), None);
//! ```
//!
//! ## Rendering
//!
//! ```rust
//! use smartform::{render_form, FormBuilder, PasswordVisibility};
//! use smartform::fields::email_field;
//!
//! let form = FormBuilder::new()
//!     .field(email_field("email", "Email", true))
//!     .submit_label("Join the waitlist")
//!     .build()
//!     .unwrap();
//! let html = render_form(&form, &PasswordVisibility::new(), "/waitlist", "post");
//! assert!(html.contains("Join the waitlist"));
//! ```

pub mod definition;
mod engine;
mod error;
mod field;
pub mod fields;
mod options;
pub mod render;
pub mod validation;
mod validator;

pub use definition::FormDefinition;
pub use engine::{
    handler, BoxError, FormBuilder, FormEngine, FormSnapshot, FormValues, SubmitHandler,
    SubmitOutcome, SubmitPhase,
};
pub use error::{FormError, Result, SubmitError, ValidationErrors};
pub use field::{FieldConfig, FieldType, FieldValue, SelectOption};
pub use options::{FormOptions, DEFAULT_DEBOUNCE_MS};
pub use render::{render_field, render_form, PasswordVisibility, RenderStrategy, StatusIcon};
pub use validator::validate_field;
