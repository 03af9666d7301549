//! Single-field validation.

use crate::field::{FieldConfig, FieldValue};

/// Validates one value against a field's configuration.
///
/// The required check runs first and wins over every rule. An empty value on
/// a field that is not required is valid and skips the rules. Otherwise the
/// rules run in declared order and the first failure's message is returned.
#[must_use]
pub fn validate_field(field: &FieldConfig, value: &FieldValue) -> Option<String> {
    if value.is_empty() {
        return field
            .required
            .then(|| format!("{} is required", field.label));
    }

    let text = value.as_text();
    field
        .validation
        .iter()
        .find(|rule| !rule.test(&text))
        .map(|rule| rule.message().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;
    use crate::validation::{EmailRule, MaxLengthRule, MinLengthRule, PredicateRule};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn username() -> FieldConfig {
        FieldConfig::new("username", "Username", FieldType::Text)
            .required()
            .rule(MinLengthRule::new(3))
            .rule(MaxLengthRule::new(8))
    }

    #[test]
    fn test_required_message_uses_label() {
        assert_eq!(
            validate_field(&username(), &FieldValue::from("  ")),
            Some("Username is required".to_string())
        );
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let field = FieldConfig::new("code", "Code", FieldType::Text)
            .rule(MinLengthRule::with_message(4, "first"))
            .rule(MaxLengthRule::with_message(2, "second"));
        // "abc" fails both rules; only the first message is reported.
        assert_eq!(
            validate_field(&field, &FieldValue::from("abc")),
            Some("first".to_string())
        );
    }

    #[test]
    fn test_later_rule_reported_when_earlier_pass() {
        assert_eq!(
            validate_field(&username(), &FieldValue::from("much-too-long")),
            Some("Must be no more than 8 characters".to_string())
        );
        assert_eq!(validate_field(&username(), &FieldValue::from("alice")), None);
    }

    #[test]
    fn test_optional_empty_skips_rules() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let field = FieldConfig::new("website", "Website", FieldType::Text).rule(
            PredicateRule::new("never", move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                false
            }),
        );

        assert_eq!(validate_field(&field, &FieldValue::from("")), None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_required_precedes_rules() {
        let field = FieldConfig::new("email", "Email", FieldType::Email)
            .required()
            .rule(EmailRule::new());
        assert_eq!(
            validate_field(&field, &FieldValue::default()),
            Some("Email is required".to_string())
        );
    }

    #[test]
    fn test_rules_see_number_text() {
        let field = FieldConfig::new("pin", "PIN", FieldType::Number).rule(MinLengthRule::new(4));
        assert!(validate_field(&field, &FieldValue::Number(123.0)).is_some());
        assert!(validate_field(&field, &FieldValue::Number(1234.0)).is_none());
    }
}
