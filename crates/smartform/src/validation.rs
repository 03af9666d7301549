//! Reusable field validation rules.
//!
//! A rule is a predicate over a field's text value paired with the message
//! shown when the predicate fails. Rules are stateless, so a single instance
//! can be shared between any number of fields through [`SharedRule`].

use std::sync::{Arc, LazyLock};

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s\-()]+$").expect("phone pattern compiles"));

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^\s/?#]+\.[^\s/?#]+(?:[/?#]\S*)?$").expect("url pattern compiles")
});

/// Trait for field validation rules.
pub trait ValidationRule: Send + Sync {
    /// Returns whether the value passes this rule.
    fn test(&self, value: &str) -> bool;

    /// Returns the error message for this rule.
    fn message(&self) -> &str;

    /// Validates a value and returns the error message if invalid.
    fn validate(&self, value: &str) -> Result<(), String> {
        if self.test(value) {
            Ok(())
        } else {
            Err(self.message().to_string())
        }
    }
}

/// A rule instance that can be attached to many fields.
pub type SharedRule = Arc<dyn ValidationRule>;

/// Rule for email addresses.
#[derive(Debug, Clone)]
pub struct EmailRule {
    message: String,
}

impl EmailRule {
    /// Creates a new `EmailRule` with default message.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: "Please enter a valid email address".to_string(),
        }
    }

    /// Creates a new `EmailRule` with custom message.
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for EmailRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationRule for EmailRule {
    fn test(&self, value: &str) -> bool {
        EMAIL_PATTERN.is_match(value)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Rule that enforces a minimum length in characters.
#[derive(Debug, Clone)]
pub struct MinLengthRule {
    min_length: usize,
    message: String,
}

impl MinLengthRule {
    /// Creates a new `MinLengthRule`.
    #[must_use]
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            message: format!("Must be at least {min_length} characters"),
        }
    }

    /// Creates a new `MinLengthRule` with custom message.
    #[must_use]
    pub fn with_message(min_length: usize, message: impl Into<String>) -> Self {
        Self {
            min_length,
            message: message.into(),
        }
    }
}

impl ValidationRule for MinLengthRule {
    fn test(&self, value: &str) -> bool {
        value.chars().count() >= self.min_length
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Rule that enforces a maximum length in characters.
#[derive(Debug, Clone)]
pub struct MaxLengthRule {
    max_length: usize,
    message: String,
}

impl MaxLengthRule {
    /// Creates a new `MaxLengthRule`.
    #[must_use]
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            message: format!("Must be no more than {max_length} characters"),
        }
    }

    /// Creates a new `MaxLengthRule` with custom message.
    #[must_use]
    pub fn with_message(max_length: usize, message: impl Into<String>) -> Self {
        Self {
            max_length,
            message: message.into(),
        }
    }
}

impl ValidationRule for MaxLengthRule {
    fn test(&self, value: &str) -> bool {
        value.chars().count() <= self.max_length
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Rule requiring lowercase, uppercase, digit and symbol, eight characters
/// or more.
#[derive(Debug, Clone)]
pub struct StrongPasswordRule {
    message: String,
}

impl StrongPasswordRule {
    /// Minimum accepted password length.
    pub const MIN_LENGTH: usize = 8;

    /// Creates a new `StrongPasswordRule` with default message.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: "Password must contain at least 8 characters, including uppercase, \
                      lowercase, number and special character"
                .to_string(),
        }
    }

    /// Creates a new `StrongPasswordRule` with custom message.
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for StrongPasswordRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationRule for StrongPasswordRule {
    fn test(&self, value: &str) -> bool {
        value.chars().count() >= Self::MIN_LENGTH
            && value.chars().any(char::is_lowercase)
            && value.chars().any(char::is_uppercase)
            && value.chars().any(|c| c.is_ascii_digit())
            && value
                .chars()
                .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Permissive phone number rule: optional leading `+`, then digits, spaces,
/// dashes and parentheses.
#[derive(Debug, Clone)]
pub struct PhoneRule {
    message: String,
}

impl PhoneRule {
    /// Creates a new `PhoneRule` with default message.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: "Please enter a valid phone number".to_string(),
        }
    }

    /// Creates a new `PhoneRule` with custom message.
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for PhoneRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationRule for PhoneRule {
    fn test(&self, value: &str) -> bool {
        PHONE_PATTERN.is_match(value) && value.chars().any(|c| c.is_ascii_digit())
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Rule for `http`/`https` URLs with a dotted host.
#[derive(Debug, Clone)]
pub struct UrlRule {
    message: String,
}

impl UrlRule {
    /// Creates a new `UrlRule` with default message.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: "Please enter a valid URL".to_string(),
        }
    }

    /// Creates a new `UrlRule` with custom message.
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for UrlRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationRule for UrlRule {
    fn test(&self, value: &str) -> bool {
        URL_PATTERN.is_match(value)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Rule using a custom regex pattern.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pattern: Regex,
    message: String,
}

impl PatternRule {
    /// Creates a new `PatternRule`.
    ///
    /// # Errors
    ///
    /// Returns the regex error when `pattern` does not compile.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            message: message.into(),
        })
    }
}

impl ValidationRule for PatternRule {
    fn test(&self, value: &str) -> bool {
        self.pattern.is_match(value)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Rule for a numeric range. Values that do not parse as numbers fail.
#[derive(Debug, Clone)]
pub struct RangeRule {
    min: Option<f64>,
    max: Option<f64>,
    message: String,
}

impl RangeRule {
    /// Creates a new `RangeRule` with min and max bounds.
    #[must_use]
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        let message = match (min, max) {
            (Some(min), Some(max)) => format!("Must be between {min} and {max}"),
            (Some(min), None) => format!("Must be at least {min}"),
            (None, Some(max)) => format!("Must be at most {max}"),
            (None, None) => "Please enter a valid number".to_string(),
        };
        Self { min, max, message }
    }

    /// Creates a new `RangeRule` with custom message.
    #[must_use]
    pub fn with_message(min: Option<f64>, max: Option<f64>, message: impl Into<String>) -> Self {
        Self {
            min,
            max,
            message: message.into(),
        }
    }
}

impl ValidationRule for RangeRule {
    fn test(&self, value: &str) -> bool {
        let Ok(num) = value.trim().parse::<f64>() else {
            return false;
        };
        if num.is_nan() {
            return false;
        }
        self.min.is_none_or(|min| num >= min) && self.max.is_none_or(|max| num <= max)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Rule backed by a caller-supplied predicate.
pub struct PredicateRule {
    predicate: Box<dyn Fn(&str) -> bool + Send + Sync>,
    message: String,
}

impl PredicateRule {
    /// Creates a new `PredicateRule`.
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            message: message.into(),
        }
    }
}

impl std::fmt::Debug for PredicateRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredicateRule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl ValidationRule for PredicateRule {
    fn test(&self, value: &str) -> bool {
        (self.predicate)(value)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Shared instance of [`EmailRule`].
#[must_use]
pub fn email() -> SharedRule {
    Arc::new(EmailRule::new())
}

/// Shared instance of [`MinLengthRule`].
#[must_use]
pub fn min_length(n: usize) -> SharedRule {
    Arc::new(MinLengthRule::new(n))
}

/// Shared instance of [`MaxLengthRule`].
#[must_use]
pub fn max_length(n: usize) -> SharedRule {
    Arc::new(MaxLengthRule::new(n))
}

/// Shared instance of [`StrongPasswordRule`].
#[must_use]
pub fn strong_password() -> SharedRule {
    Arc::new(StrongPasswordRule::new())
}

/// Shared instance of [`PhoneRule`].
#[must_use]
pub fn phone() -> SharedRule {
    Arc::new(PhoneRule::new())
}

/// Shared instance of [`UrlRule`].
#[must_use]
pub fn url() -> SharedRule {
    Arc::new(UrlRule::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_rule() {
        let r = EmailRule::new();
        assert!(r.validate("user@example.com").is_ok());
        assert!(r.validate("user.name@domain.co.uk").is_ok());
        assert!(r.validate("a@b.com").is_ok());
        assert!(r.validate("not-an-email").is_err());
        assert!(r.validate("@example.com").is_err());
        assert!(r.validate("user@example").is_err());
        assert!(r.validate("us er@example.com").is_err());
        assert_eq!(
            r.validate("nope").unwrap_err(),
            "Please enter a valid email address"
        );
    }

    #[test]
    fn test_min_length_rule() {
        let r = MinLengthRule::new(5);
        assert!(r.validate("hello").is_ok());
        assert!(r.validate("hello world").is_ok());
        assert_eq!(r.validate("hi").unwrap_err(), "Must be at least 5 characters");
    }

    #[test]
    fn test_max_length_rule() {
        let r = MaxLengthRule::new(5);
        assert!(r.validate("hello").is_ok());
        assert!(r.validate("hi").is_ok());
        assert_eq!(
            r.validate("hello world").unwrap_err(),
            "Must be no more than 5 characters"
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let r = MaxLengthRule::new(3);
        assert!(r.validate("äöü").is_ok());
        assert!(MinLengthRule::new(3).validate("äö").is_err());
    }

    #[test]
    fn test_strong_password_rule() {
        let r = StrongPasswordRule::new();
        assert!(r.validate("Sup3r$ecret").is_ok());
        assert!(r.validate("Aa1!aaaa").is_ok());
        assert!(r.validate("Aa1!aaa").is_err(), "too short");
        assert!(r.validate("aa1!aaaa").is_err(), "no uppercase");
        assert!(r.validate("AA1!AAAA").is_err(), "no lowercase");
        assert!(r.validate("Aab!aaaa").is_err(), "no digit");
        assert!(r.validate("Aa1aaaaa").is_err(), "no symbol");
    }

    #[test]
    fn test_phone_rule() {
        let r = PhoneRule::new();
        assert!(r.validate("+1 (555) 123-4567").is_ok());
        assert!(r.validate("0301234567").is_ok());
        assert!(r.validate("555-CALL-NOW").is_err());
        assert!(r.validate("()- ").is_err());
    }

    #[test]
    fn test_url_rule() {
        let r = UrlRule::new();
        assert!(r.validate("https://example.com").is_ok());
        assert!(r.validate("http://example.com/path?q=1").is_ok());
        assert!(r.validate("example.com").is_err());
        assert!(r.validate("ftp://example.com").is_err());
        assert!(r.validate("https://localhost").is_err());
    }

    #[test]
    fn test_pattern_rule() {
        let r = PatternRule::new(r"^\d{4}-\d{2}-\d{2}$", "Enter a valid date").unwrap();
        assert!(r.validate("2024-01-15").is_ok());
        assert_eq!(r.validate("not a date").unwrap_err(), "Enter a valid date");
        assert!(PatternRule::new("(", "broken").is_err());
    }

    #[test]
    fn test_range_rule() {
        let r = RangeRule::new(Some(0.0), Some(100.0));
        assert!(r.validate("50").is_ok());
        assert!(r.validate("0").is_ok());
        assert!(r.validate("100").is_ok());
        assert!(r.validate("-1").is_err());
        assert!(r.validate("101").is_err());
        assert!(r.validate("abc").is_err());
        assert!(r.validate("NaN").is_err());
    }

    #[test]
    fn test_predicate_rule() {
        let r = PredicateRule::new("Must start with a capital", |v| {
            v.chars().next().is_some_and(char::is_uppercase)
        });
        assert!(r.validate("Alice").is_ok());
        assert_eq!(r.validate("bob").unwrap_err(), "Must start with a capital");
    }

    #[test]
    fn test_shared_rule_is_reusable() {
        let shared = email();
        let other = Arc::clone(&shared);
        assert!(shared.test("a@b.com"));
        assert!(!other.test("a@b"));
    }
}
