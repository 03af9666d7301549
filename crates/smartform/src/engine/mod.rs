//! The form engine.
//!
//! [`FormEngine`] owns one mounted form: the value of every declared field,
//! which fields were touched (blurred), the active validation errors and the
//! submission phase. Validation runs in three places:
//!
//! - while typing, debounced per field, once the field was touched and
//!   `validate_on_change` is on,
//! - on blur, synchronously,
//! - on submit, for every field, before the submit handler may run.
//!
//! Debounce timers are tokio tasks that hold only a weak reference to the
//! engine, so they never keep a disposed form alive or mutate it.
//!
//! ```rust
//! use smartform::{BoxError, FieldConfig, FieldType, FormBuilder, SubmitOutcome};
//! use smartform::validation::EmailRule;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let form = FormBuilder::new()
//!     .field(
//!         FieldConfig::new("email", "Email", FieldType::Email)
//!             .required()
//!             .rule(EmailRule::new()),
//!     )
//!     .on_submit(|values| async move {
//!         println!("{values:?}");
//!         Ok::<(), BoxError>(())
//!     })
//!     .build()
//!     .unwrap();
//!
//! form.set_value("email", "not-an-email").unwrap();
//! form.set_touched("email").unwrap();
//! assert_eq!(
//!     form.visible_error("email").as_deref(),
//!     Some("Please enter a valid email address")
//! );
//!
//! form.set_value("email", "a@b.com").unwrap();
//! form.set_touched("email").unwrap();
//! assert_eq!(form.completion_percentage(), 100);
//! assert_eq!(form.submit().await, SubmitOutcome::Submitted);
//! # }
//! ```

mod debounce;
mod state;
mod submit;

pub use state::FormSnapshot;
pub use submit::{handler, BoxError, FormValues, SubmitHandler, SubmitOutcome, SubmitPhase};

use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::FutureExt;
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};

use self::debounce::Debouncer;
use self::state::FormState;
use crate::error::{FormError, Result, SubmitError};
use crate::field::{FieldConfig, FieldType, FieldValue};
use crate::options::FormOptions;

struct Inner {
    state: FormState,
    timers: Debouncer,
    disposed: bool,
}

struct Shared {
    fields: Vec<FieldConfig>,
    index: HashMap<String, usize>,
    options: FormOptions,
    handler: SubmitHandler,
    inner: Mutex<Inner>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn field(&self, name: &str) -> Result<&FieldConfig> {
        self.index
            .get(name)
            .map(|&i| &self.fields[i])
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    fn fire(&self, name: &str, generation: u64) {
        let Ok(field) = self.field(name) else {
            return;
        };
        let mut inner = self.lock();
        if inner.disposed || !inner.timers.take_if_current(name, generation) {
            debug!(field = name, generation, "stale validation timer ignored");
            return;
        }
        debug!(field = name, generation, "debounced validation fired");
        inner.state.validate(field);
    }
}

/// Resets the phase if a submit future is dropped while the handler runs.
struct SubmittingGuard<'a> {
    shared: &'a Shared,
    armed: bool,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.shared.lock();
        if !inner.disposed && inner.state.phase.is_submitting() {
            warn!("submission abandoned before the handler finished");
            inner.state.phase = SubmitPhase::Idle;
        }
    }
}

/// Handle to one mounted form. Clones share the same form.
#[derive(Clone)]
pub struct FormEngine {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for FormEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormEngine")
            .field("fields", &self.shared.fields)
            .field("options", &self.shared.options)
            .finish_non_exhaustive()
    }
}

impl FormEngine {
    /// Mounts a form.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::DuplicateField`] when two fields share a name and
    /// [`FormError::InvalidConfig`] when a field has no name or a select field
    /// has no options.
    pub fn new(
        fields: Vec<FieldConfig>,
        options: FormOptions,
        handler: SubmitHandler,
    ) -> Result<Self> {
        let mut index = HashMap::with_capacity(fields.len());
        for (i, field) in fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(FormError::InvalidConfig {
                    field: format!("#{i}"),
                    message: "field name is empty".to_string(),
                });
            }
            if field.field_type == FieldType::Select && field.options.is_empty() {
                return Err(FormError::InvalidConfig {
                    field: field.name.clone(),
                    message: "select field has no options".to_string(),
                });
            }
            if index.insert(field.name.clone(), i).is_some() {
                return Err(FormError::DuplicateField(field.name.clone()));
            }
        }

        let state = FormState::new(&fields);
        debug!(fields = fields.len(), "form mounted");
        Ok(Self {
            shared: Arc::new(Shared {
                fields,
                index,
                options,
                handler,
                inner: Mutex::new(Inner {
                    state,
                    timers: Debouncer::default(),
                    disposed: false,
                }),
            }),
        })
    }

    /// Returns the declared fields in order.
    #[must_use]
    pub fn fields(&self) -> &[FieldConfig] {
        &self.shared.fields
    }

    /// Returns a declared field by name.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] for undeclared names.
    pub fn field(&self, name: &str) -> Result<&FieldConfig> {
        self.shared.field(name)
    }

    /// Returns the form options.
    #[must_use]
    pub fn options(&self) -> &FormOptions {
        &self.shared.options
    }

    /// Stores a new value for a field.
    ///
    /// The value is stored immediately. If `validate_on_change` is on and the
    /// field was touched, a validation is scheduled after the field's debounce
    /// delay, replacing any validation still pending for that field.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] for undeclared names and
    /// [`FormError::Disposed`] after [`dispose`](Self::dispose). Scheduling
    /// needs a tokio runtime; without one [`FormError::NoRuntime`] is returned
    /// and the value is left unchanged.
    pub fn set_value(&self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        let field = self.shared.field(name)?;
        let mut inner = self.shared.lock();
        if inner.disposed {
            return Err(FormError::Disposed);
        }

        let runtime = if self.shared.options.validate_on_change && inner.state.is_touched(name) {
            Some(Handle::try_current().map_err(|_| FormError::NoRuntime)?)
        } else {
            None
        };
        inner.state.values.insert(field.name.clone(), value.into());

        if let Some(runtime) = runtime {
            let delay = field
                .debounce
                .unwrap_or_else(|| self.shared.options.debounce());
            self.schedule(&runtime, &mut inner, name, delay);
        }
        Ok(())
    }

    fn schedule(&self, runtime: &Handle, inner: &mut Inner, name: &str, delay: Duration) {
        let generation = inner.timers.next_generation();
        let shared = Arc::downgrade(&self.shared);
        let field = name.to_string();

        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(shared) = shared.upgrade() {
                shared.fire(&field, generation);
            }
        });
        inner.timers.insert(name, generation, task.abort_handle());
        debug!(
            field = name,
            generation,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "validation scheduled"
        );
    }

    /// Marks a field as touched (blurred).
    ///
    /// With `validate_on_change` on, the field is validated right away and any
    /// pending debounced validation for it is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] for undeclared names and
    /// [`FormError::Disposed`] after [`dispose`](Self::dispose).
    pub fn set_touched(&self, name: &str) -> Result<()> {
        let field = self.shared.field(name)?;
        let mut inner = self.shared.lock();
        if inner.disposed {
            return Err(FormError::Disposed);
        }
        inner.state.touched.insert(field.name.clone(), true);

        if self.shared.options.validate_on_change {
            inner.timers.cancel(name);
            inner.state.validate(field);
        }
        Ok(())
    }

    /// Validates a field now, regardless of touched state, and returns its
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] for undeclared names and
    /// [`FormError::Disposed`] after [`dispose`](Self::dispose).
    pub fn validate_field(&self, name: &str) -> Result<Option<String>> {
        let field = self.shared.field(name)?;
        let mut inner = self.shared.lock();
        if inner.disposed {
            return Err(FormError::Disposed);
        }
        inner.timers.cancel(name);
        Ok(inner.state.validate(field))
    }

    /// Submits the form.
    ///
    /// Every field is marked touched and validated. Only when no field has an
    /// error is the submit handler called, once, with the current values.
    /// Handler errors and panics are caught and reported in the outcome and
    /// the phase; they never become field errors.
    pub async fn submit(&self) -> SubmitOutcome {
        let values = {
            let mut inner = self.shared.lock();
            if inner.disposed {
                return SubmitOutcome::Disposed;
            }
            if inner.state.phase.is_submitting() {
                debug!("submit ignored, a submission is already running");
                return SubmitOutcome::AlreadySubmitting;
            }

            let Inner { state, timers, .. } = &mut *inner;
            state.phase = SubmitPhase::Validating;
            timers.cancel_all();
            for field in &self.shared.fields {
                state.touched.insert(field.name.clone(), true);
                state.validate(field);
            }

            if !state.errors.is_empty() {
                info!(invalid = state.errors.len(), "submission blocked by validation");
                state.phase = SubmitPhase::Idle;
                return SubmitOutcome::Invalid(state.errors.clone());
            }
            state.phase = SubmitPhase::Submitting;
            state.values.clone()
        };

        info!(fields = values.len(), "submitting form");
        let mut guard = SubmittingGuard {
            shared: &self.shared,
            armed: true,
        };
        let handler = Arc::clone(&self.shared.handler);
        let result = AssertUnwindSafe(async move { handler(values).await })
            .catch_unwind()
            .await;
        guard.armed = false;

        let (outcome, phase) = match result {
            Ok(Ok(())) => {
                info!("form submitted");
                (SubmitOutcome::Submitted, SubmitPhase::SubmitSucceeded)
            }
            Ok(Err(err)) => {
                error!(error = %err, "form submission failed");
                let err = SubmitError::Handler(err.to_string());
                let message = err.to_string();
                (
                    SubmitOutcome::Failed(err),
                    SubmitPhase::SubmitFailed { message },
                )
            }
            Err(_) => {
                error!("form submission handler panicked");
                let err = SubmitError::Panicked;
                let message = err.to_string();
                (
                    SubmitOutcome::Failed(err),
                    SubmitPhase::SubmitFailed { message },
                )
            }
        };

        {
            let mut inner = self.shared.lock();
            if inner.disposed {
                debug!("form disposed during submission, state left untouched");
            } else {
                inner.state.phase = phase;
            }
        }
        outcome
    }

    /// Percentage of required fields that are filled and error-free.
    ///
    /// A form without required fields reports 100.
    #[must_use]
    pub fn completion_percentage(&self) -> u8 {
        self.shared.lock().state.completion(&self.shared.fields)
    }

    /// Returns a field's current value.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<FieldValue> {
        self.shared.lock().state.values.get(name).cloned()
    }

    /// Returns the current values of every declared field.
    #[must_use]
    pub fn values(&self) -> FormValues {
        self.shared.lock().state.values.clone()
    }

    /// Returns a field's active error, whether or not it may be shown yet.
    #[must_use]
    pub fn error(&self, name: &str) -> Option<String> {
        self.shared.lock().state.errors.get(name).map(str::to_string)
    }

    /// Returns a field's error only once the field has been touched.
    #[must_use]
    pub fn visible_error(&self, name: &str) -> Option<String> {
        let inner = self.shared.lock();
        if inner.state.is_touched(name) {
            inner.state.errors.get(name).map(str::to_string)
        } else {
            None
        }
    }

    /// Returns whether a field has been touched.
    #[must_use]
    pub fn is_touched(&self, name: &str) -> bool {
        self.shared.lock().state.is_touched(name)
    }

    /// Returns the submission phase.
    #[must_use]
    pub fn phase(&self) -> SubmitPhase {
        self.shared.lock().state.phase.clone()
    }

    /// Returns whether the submit handler is running.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.shared.lock().state.phase.is_submitting()
    }

    /// Returns whether a new submission may start.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        let inner = self.shared.lock();
        !inner.disposed && !inner.state.phase.is_submitting()
    }

    /// Returns the number of debounced validations waiting to fire.
    #[must_use]
    pub fn pending_validations(&self) -> usize {
        self.shared.lock().timers.len()
    }

    /// Returns whether a debounced validation is waiting for `name`.
    #[must_use]
    pub fn has_pending_validation(&self, name: &str) -> bool {
        self.shared.lock().timers.is_pending(name)
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        self.shared.lock().state.snapshot(&self.shared.fields)
    }

    /// Unmounts the form.
    ///
    /// Pending validations are cancelled and later calls that would change
    /// state fail with [`FormError::Disposed`]. A submission already running
    /// completes, but its result no longer updates the form; the phase is
    /// reset to `Idle` here instead.
    pub fn dispose(&self) {
        let mut inner = self.shared.lock();
        if inner.disposed {
            return;
        }
        inner.disposed = true;
        inner.timers.cancel_all();
        if inner.state.phase.is_submitting() {
            inner.state.phase = SubmitPhase::Idle;
        }
        debug!("form disposed");
    }

    /// Returns whether the form was disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.shared.lock().disposed
    }
}

/// A builder for mounting forms programmatically.
#[derive(Default)]
pub struct FormBuilder {
    fields: Vec<FieldConfig>,
    options: FormOptions,
    handler: Option<SubmitHandler>,
}

impl std::fmt::Debug for FormBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormBuilder")
            .field("fields", &self.fields)
            .field("options", &self.options)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

impl FormBuilder {
    /// Creates a new form builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field to the form.
    #[must_use]
    pub fn field(mut self, field: FieldConfig) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds several fields to the form.
    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldConfig>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Replaces all options.
    #[must_use]
    pub fn options(mut self, options: FormOptions) -> Self {
        self.options = options;
        self
    }

    /// Enables or disables validate-on-change.
    #[must_use]
    pub const fn validate_on_change(mut self, enabled: bool) -> Self {
        self.options.validate_on_change = enabled;
        self
    }

    /// Enables or disables the progress bar.
    #[must_use]
    pub const fn show_progress(mut self, enabled: bool) -> Self {
        self.options.show_progress = enabled;
        self
    }

    /// Sets the submit button label.
    #[must_use]
    pub fn submit_label(mut self, label: impl Into<String>) -> Self {
        self.options.submit_label = label.into();
        self
    }

    /// Sets the default debounce window.
    #[must_use]
    pub fn debounce(mut self, delay: Duration) -> Self {
        self.options.debounce_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the async submit handler.
    #[must_use]
    pub fn on_submit<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(FormValues) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<(), BoxError>> + Send + 'static,
    {
        self.handler = Some(handler(f));
        self
    }

    /// Mounts the form. Without a handler, submissions succeed without effect.
    ///
    /// # Errors
    ///
    /// Fails for the same field configurations [`FormEngine::new`] rejects.
    pub fn build(self) -> Result<FormEngine> {
        let on_submit = self
            .handler
            .unwrap_or_else(|| handler(|_| async { Ok::<(), BoxError>(()) }));
        FormEngine::new(self.fields, self.options, on_submit)
    }
}
