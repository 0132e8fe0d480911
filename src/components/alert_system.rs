//! Alert System
//!
//! Invisible component that re-runs the alert evaluator whenever bin state
//! changes and routes the results into toasts. Evaluation is held off for
//! two seconds after mount so the seed state does not greet the user with a
//! wall of notifications.

use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::alerts::{AlertEvaluator, AlertSeverity};
use crate::state::bins::now_ms;
use crate::state::{BinData, SettingsState, UiState};

const STARTUP_DELAY_MS: u32 = 2000;

#[component]
pub fn AlertSystem() -> impl IntoView {
    let data = use_context::<BinData>().expect("BinData not found");
    let settings = use_context::<SettingsState>().expect("SettingsState not found");
    let ui = use_context::<UiState>().expect("UiState not found");

    let armed = create_rw_signal(false);
    gloo_timers::callback::Timeout::new(STARTUP_DELAY_MS, move || {
        armed.set(true);
    })
    .forget();

    let evaluator = Rc::new(RefCell::new(AlertEvaluator::new()));

    create_effect(move |_| {
        let prefs = settings.notification_prefs();
        let alerts = data.store.with(|s| {
            if !armed.get() {
                return Vec::new();
            }
            evaluator.borrow_mut().evaluate(
                s.bins(),
                s.thresholds(),
                s.alerts_configured(),
                prefs,
                now_ms(),
            )
        });

        for alert in alerts {
            let message = format!("{}: {}", alert.title, alert.body);
            match alert.severity {
                AlertSeverity::Error => ui.show_error(&message),
                AlertSeverity::Warning => ui.show_warning(&message),
                AlertSeverity::Info => ui.show_info(&message),
            }
        }
    });

    view! {}
}
