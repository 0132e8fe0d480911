//! Settings State
//!
//! Session-local user settings: profile fields, notification toggles, and
//! system switches. Nothing here persists across reloads; only the language
//! preference (handled in `i18n`) is durable.

use leptos::*;

use crate::domain::alerts::NotificationPrefs;

#[derive(Clone, Copy)]
pub struct SettingsState {
    // Profile
    pub display_name: RwSignal<String>,
    pub phone: RwSignal<String>,
    // Notifications
    pub notify_bin_full: RwSignal<bool>,
    pub notify_system_alerts: RwSignal<bool>,
    pub notify_collection_reminder: RwSignal<bool>,
    // System
    pub dark_mode: RwSignal<bool>,
    pub auto_refresh: RwSignal<bool>,
}

pub fn provide_settings() {
    let state = SettingsState {
        display_name: create_rw_signal(String::new()),
        phone: create_rw_signal(String::new()),
        notify_bin_full: create_rw_signal(true),
        notify_system_alerts: create_rw_signal(true),
        notify_collection_reminder: create_rw_signal(true),
        dark_mode: create_rw_signal(false),
        auto_refresh: create_rw_signal(true),
    };
    provide_context(state);
}

impl SettingsState {
    /// Snapshot the notification toggles for the alert evaluator.
    pub fn notification_prefs(&self) -> NotificationPrefs {
        NotificationPrefs {
            bin_full: self.notify_bin_full.get(),
            system_alerts: self.notify_system_alerts.get(),
            collection_reminder: self.notify_collection_reminder.get(),
        }
    }

    /// Restore defaults. The dark-mode flag survives a reset.
    pub fn reset(&self) {
        self.display_name.set(String::new());
        self.phone.set(String::new());
        self.notify_bin_full.set(true);
        self.notify_system_alerts.set(true);
        self.notify_collection_reminder.set(true);
        self.auto_refresh.set(true);
    }
}
