#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use smartform::validation::{EmailRule, PredicateRule};
use smartform::{FieldConfig, FieldType, FormBuilder, FormValues};

/// Records every value a rule is evaluated against.
#[derive(Clone, Default)]
pub struct Probe {
    seen: Arc<Mutex<Vec<String>>>,
}

impl Probe {
    pub fn new() -> Self {
        Self::default()
    }

    /// A rule that records its input and passes when `accept` does.
    pub fn rule(&self, message: &str, accept: fn(&str) -> bool) -> PredicateRule {
        let seen = Arc::clone(&self.seen);
        PredicateRule::new(message, move |value| {
            seen.lock().unwrap().push(value.to_string());
            accept(value)
        })
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

/// Counts submit handler calls and remembers the last values.
#[derive(Clone, Default)]
pub struct Submissions {
    calls: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<FormValues>>>,
}

impl Submissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, values: FormValues) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(values);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> Option<FormValues> {
        self.last.lock().unwrap().clone()
    }
}

pub fn email_only() -> FormBuilder {
    FormBuilder::new().field(
        FieldConfig::new("email", "Email", FieldType::Email)
            .required()
            .rule(EmailRule::new()),
    )
}

/// Lets spawned tasks run without advancing the clock much.
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

pub async fn wait(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Yields until the form reports a running submission.
pub async fn until_submitting(form: &smartform::FormEngine) {
    for _ in 0..100 {
        if form.is_submitting() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("submission never started");
}
