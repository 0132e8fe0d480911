//! Settings Page
//!
//! Profile, notification toggles, project connection, language and the
//! factory reset.

use leptos::*;

use crate::i18n::{I18n, Language};
use crate::state::{BinData, SessionState, SettingsState, UiState};
use crate::supabase::client::{get_project_config, set_project_config};

/// Settings page component
#[component]
pub fn Settings() -> impl IntoView {
    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Settings"</h1>
                <p class="text-gray-400 mt-1">"Profile, notifications and system configuration"</p>
            </div>

            <ProfileSection />
            <NotificationSection />
            <BinConfigSection />
            <SystemSection />
            <ConnectionSection />
            <LanguageSection />
            <DangerZone />
        </div>
    }
}

#[component]
fn ProfileSection() -> impl IntoView {
    let session = use_context::<SessionState>().expect("SessionState not found");
    let settings = use_context::<SettingsState>().expect("SettingsState not found");
    let ui = use_context::<UiState>().expect("UiState not found");

    let save = move |_| {
        ui.show_success("Profile saved");
    };

    let sign_out = move |_| {
        spawn_local(async move {
            session.sign_out().await;
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Profile"</h2>

            <div class="space-y-4 max-w-md">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Email"</label>
                    <div class="bg-gray-700 rounded-lg px-4 py-3 text-gray-300">
                        {move || {
                            session
                                .user
                                .get()
                                .and_then(|u| u.email)
                                .unwrap_or_else(|| "-".to_string())
                        }}
                    </div>
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Display name"</label>
                    <input
                        type="text"
                        prop:value=move || settings.display_name.get()
                        on:input=move |ev| settings.display_name.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3 border
                               border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Phone"</label>
                    <input
                        type="tel"
                        prop:value=move || settings.phone.get()
                        on:input=move |ev| settings.phone.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3 border
                               border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <div class="flex space-x-2">
                    <button
                        on:click=save
                        class="px-4 py-2 bg-primary-600 hover:bg-primary-700
                               rounded-lg font-medium transition-colors"
                    >
                        "Save"
                    </button>
                    <button
                        on:click=sign_out
                        class="px-4 py-2 bg-gray-700 hover:bg-gray-600
                               rounded-lg font-medium transition-colors"
                    >
                        "Sign Out"
                    </button>
                </div>
            </div>
        </section>
    }
}

#[component]
fn NotificationSection() -> impl IntoView {
    let settings = use_context::<SettingsState>().expect("SettingsState not found");

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Notifications"</h2>

            <div class="space-y-3">
                <ToggleRow
                    label="Bin full alerts"
                    detail="Critical and threshold notifications per bin"
                    value=settings.notify_bin_full
                />
                <ToggleRow
                    label="System alerts"
                    detail="Warnings and multiple-critical notifications"
                    value=settings.notify_system_alerts
                />
                <ToggleRow
                    label="Collection reminders"
                    detail="Remind when bins have not been emptied in 6+ hours"
                    value=settings.notify_collection_reminder
                />
            </div>
        </section>
    }
}

#[component]
fn ToggleRow(
    label: &'static str,
    detail: &'static str,
    value: RwSignal<bool>,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between p-4 bg-gray-700 rounded-lg">
            <div>
                <h3 class="font-medium">{label}</h3>
                <p class="text-sm text-gray-400">{detail}</p>
            </div>
            <button
                on:click=move |_| value.update(|v| *v = !*v)
                class=move || {
                    let base = "px-4 py-2 rounded-lg text-sm font-medium transition-colors";
                    if value.get() {
                        format!("{} bg-green-700 hover:bg-green-600", base)
                    } else {
                        format!("{} bg-gray-600 hover:bg-gray-500", base)
                    }
                }
            >
                {move || if value.get() { "On" } else { "Off" }}
            </button>
        </div>
    }
}

/// Compact per-bin threshold and alert configuration.
#[component]
fn BinConfigSection() -> impl IntoView {
    let data = use_context::<BinData>().expect("BinData not found");
    let ui = use_context::<UiState>().expect("UiState not found");

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Bin Configuration"</h2>

            <div class="space-y-3">
                {move || {
                    let bins: Vec<(u32, String, u8, bool)> = data.store.with(|s| {
                        s.bins()
                            .iter()
                            .map(|b| {
                                (
                                    b.id,
                                    b.name.clone(),
                                    s.threshold(b.id),
                                    s.alerts_configured().get(&b.id).copied().unwrap_or(false),
                                )
                            })
                            .collect()
                    });

                    bins.into_iter().map(|(id, name, threshold, alerts_on)| view! {
                        <div class="flex flex-wrap items-center justify-between gap-3
                                    p-4 bg-gray-700 rounded-lg">
                            <span class="font-medium">{name}</span>
                            <div class="flex items-center gap-3">
                                <label class="text-sm text-gray-400">"Threshold"</label>
                                <input
                                    type="number"
                                    min="50"
                                    max="100"
                                    prop:value=threshold.to_string()
                                    on:change=move |ev| {
                                        match event_target_value(&ev).parse::<u8>() {
                                            Ok(pct) if (50..=100).contains(&pct) => {
                                                data.set_threshold(id, pct);
                                            }
                                            _ => ui.show_error(
                                                "Threshold must be between 50 and 100",
                                            ),
                                        }
                                    }
                                    class="w-20 bg-gray-600 rounded-lg px-3 py-2 border
                                           border-gray-500 focus:border-primary-500
                                           focus:outline-none"
                                />
                                <button
                                    on:click=move |_| data.set_alerts_configured(id, !alerts_on)
                                    class=move || {
                                        let base = "px-3 py-2 rounded-lg text-sm font-medium \
                                                    transition-colors";
                                        if alerts_on {
                                            format!("{} bg-green-700 hover:bg-green-600", base)
                                        } else {
                                            format!("{} bg-gray-600 hover:bg-gray-500", base)
                                        }
                                    }
                                >
                                    {if alerts_on { "Alerts On" } else { "Alerts Off" }}
                                </button>
                            </div>
                        </div>
                    }).collect_view()
                }}
            </div>
        </section>
    }
}

#[component]
fn SystemSection() -> impl IntoView {
    let settings = use_context::<SettingsState>().expect("SettingsState not found");

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"System"</h2>

            <div class="space-y-3">
                <ToggleRow
                    label="Dark mode"
                    detail="Kept across factory resets"
                    value=settings.dark_mode
                />
                <ToggleRow
                    label="Auto refresh"
                    detail="Keep periodic trend sampling running"
                    value=settings.auto_refresh
                />
            </div>
        </section>
    }
}

/// Project URL / key override, stored in local storage.
#[component]
fn ConnectionSection() -> impl IntoView {
    let ui = use_context::<UiState>().expect("UiState not found");

    let config = get_project_config();
    let (url, set_url) = create_signal(config.url);
    let (key, set_key) = create_signal(config.anon_key);

    let save = move |_| {
        set_project_config(&url.get(), &key.get());
        ui.show_success("Project connection saved. Reload to reconnect.");
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Project Connection"</h2>

            <div class="space-y-4 max-w-md">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Project URL"</label>
                    <input
                        type="text"
                        prop:value=move || url.get()
                        on:input=move |ev| set_url.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3 border
                               border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Anon key"</label>
                    <input
                        type="password"
                        prop:value=move || key.get()
                        on:input=move |ev| set_key.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3 border
                               border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>
                <button
                    on:click=save
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700
                           rounded-lg font-medium transition-colors"
                >
                    "Save"
                </button>
            </div>
        </section>
    }
}

#[component]
fn LanguageSection() -> impl IntoView {
    let i18n = use_context::<I18n>().expect("I18n not found");
    let ui = use_context::<UiState>().expect("UiState not found");

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Language"</h2>

            <div class="flex flex-wrap gap-2">
                {Language::ALL.into_iter().map(|lang| view! {
                    <button
                        on:click=move |_| {
                            i18n.set_language(lang);
                            ui.show_success(&format!("Language set to {}", lang.label()));
                        }
                        class=move || {
                            let base = "px-4 py-2 rounded-lg text-sm font-medium transition-colors";
                            if i18n.language.get() == lang {
                                format!("{} bg-primary-600 text-white", base)
                            } else {
                                format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                            }
                        }
                    >
                        {lang.label()}
                    </button>
                }).collect_view()}
            </div>
        </section>
    }
}

#[component]
fn DangerZone() -> impl IntoView {
    let data = use_context::<BinData>().expect("BinData not found");
    let settings = use_context::<SettingsState>().expect("SettingsState not found");
    let ui = use_context::<UiState>().expect("UiState not found");

    let (confirming, set_confirming) = create_signal(false);

    let reset = move |_| {
        if !confirming.get_untracked() {
            set_confirming.set(true);
            return;
        }
        data.reset();
        settings.reset();
        set_confirming.set(false);
        ui.show_success("Factory reset complete");
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 border border-red-900">
            <h2 class="text-xl font-semibold mb-4 text-red-400">"Danger Zone"</h2>

            <div class="flex items-center justify-between p-4 bg-gray-700 rounded-lg">
                <div>
                    <h3 class="font-medium">"Factory Reset"</h3>
                    <p class="text-sm text-gray-400">
                        "Restore bins, history, trend and settings to their defaults"
                    </p>
                </div>
                <button
                    on:click=reset
                    class="px-4 py-2 bg-red-600 hover:bg-red-700 rounded-lg
                           font-medium transition-colors"
                >
                    {move || if confirming.get() { "Click again to confirm" } else { "Reset" }}
                </button>
            </div>
        </section>
    }
}
