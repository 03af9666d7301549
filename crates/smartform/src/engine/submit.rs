//! Submission handler plumbing and outcomes.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::{SubmitError, ValidationErrors};
use crate::field::FieldValue;

/// Values handed to the submit handler, keyed by every declared field.
pub type FormValues = BTreeMap<String, FieldValue>;

/// Error type a submit handler may return.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A boxed async submit handler.
pub type SubmitHandler =
    Arc<dyn Fn(FormValues) -> BoxFuture<'static, Result<(), BoxError>> + Send + Sync>;

/// Boxes a closure returning a future into a [`SubmitHandler`].
#[must_use]
pub fn handler<F, Fut>(f: F) -> SubmitHandler
where
    F: Fn(FormValues) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
{
    Arc::new(move |values| Box::pin(f(values)))
}

/// Where a form is in its submission lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    /// No submission in progress.
    #[default]
    Idle,
    /// Fields are being validated ahead of a submission.
    ///
    /// Validation runs synchronously while the engine lock is held, so this
    /// phase is never returned by [`FormEngine::phase`](super::FormEngine::phase)
    /// or seen in a snapshot. It leads to `Idle` when a field is invalid and
    /// to `Submitting` otherwise.
    Validating,
    /// The submit handler is running.
    Submitting,
    /// The last submission failed.
    SubmitFailed {
        /// Reason reported by the handler.
        message: String,
    },
    /// The last submission succeeded.
    SubmitSucceeded,
}

impl SubmitPhase {
    /// Returns whether the submit handler is running.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

/// Result of a call to [`FormEngine::submit`](super::FormEngine::submit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The handler ran and succeeded.
    Submitted,
    /// Validation blocked the submission; the handler was not called.
    Invalid(ValidationErrors),
    /// The handler ran and failed.
    Failed(SubmitError),
    /// A submission was already running; the handler was not called.
    AlreadySubmitting,
    /// The form was disposed before the submission could start.
    Disposed,
}

impl SubmitOutcome {
    /// Returns whether the handler ran successfully.
    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}
