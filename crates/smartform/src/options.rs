//! Form-wide behavior flags.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default debounce window for validate-on-change, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Options applying to a whole form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormOptions {
    /// Validate touched fields while typing and on blur.
    pub validate_on_change: bool,
    /// Render a completion progress bar.
    pub show_progress: bool,
    /// Label of the submit button.
    pub submit_label: String,
    /// Debounce window for fields without an override.
    pub debounce_ms: u64,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            validate_on_change: true,
            show_progress: true,
            submit_label: "Submit".to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl FormOptions {
    /// Returns the default debounce window.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
