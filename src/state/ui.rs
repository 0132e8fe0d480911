//! UI State
//!
//! Toast and loading signals shared by all components.

use leptos::*;

/// Global UI state provided to the whole component tree.
#[derive(Clone, Copy)]
pub struct UiState {
    /// Global loading flag.
    pub loading: RwSignal<bool>,
    /// Success message (auto-clears).
    pub success: RwSignal<Option<String>>,
    /// Error message (auto-clears).
    pub error: RwSignal<Option<String>>,
    /// Warning message (auto-clears).
    pub warning: RwSignal<Option<String>>,
    /// Info message (auto-clears).
    pub info: RwSignal<Option<String>>,
}

pub fn provide_ui_state() {
    let state = UiState {
        loading: create_rw_signal(false),
        success: create_rw_signal(None),
        error: create_rw_signal(None),
        warning: create_rw_signal(None),
        info: create_rw_signal(None),
    };
    provide_context(state);
}

impl UiState {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        Self::flash(self.success, message, 3000);
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        Self::flash(self.error, message, 6000);
    }

    pub fn show_warning(&self, message: &str) {
        Self::flash(self.warning, message, 5000);
    }

    pub fn show_info(&self, message: &str) {
        Self::flash(self.info, message, 5000);
    }

    fn flash(signal: RwSignal<Option<String>>, message: &str, timeout_ms: u32) {
        signal.set(Some(message.to_string()));
        gloo_timers::callback::Timeout::new(timeout_ms, move || {
            signal.set(None);
        })
        .forget();
    }
}
