//! Bin Status Page
//!
//! Per-bin detail with the empty commands, threshold configuration, alert
//! toggles and collection scheduling.

use leptos::*;

use crate::domain::bins::{BinEntity, BinStatus};
use crate::state::{BinData, UiState};

/// Bin status page component
#[component]
pub fn BinStatusPage() -> impl IntoView {
    let data = use_context::<BinData>().expect("BinData not found");
    let ui = use_context::<UiState>().expect("UiState not found");

    let empty_all = move |_| {
        data.empty_all_bins();
        ui.show_success("All bins emptied");
    };

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Bin Status"</h1>
                    <p class="text-gray-400 mt-1">"Manage each compartment"</p>
                </div>
                <button
                    on:click=empty_all
                    class="px-4 py-2 bg-red-600 hover:bg-red-700 rounded-lg
                           font-medium transition-colors"
                >
                    "Empty All Bins"
                </button>
            </div>

            <ScheduleSection />

            <div class="grid md:grid-cols-2 gap-6">
                {move || {
                    let bins: Vec<BinEntity> =
                        data.store.with(|s| s.bins().to_vec());
                    bins.into_iter().map(|bin| view! {
                        <BinCard bin />
                    }).collect_view()
                }}
            </div>
        </div>
    }
}

#[component]
fn BinCard(bin: BinEntity) -> impl IntoView {
    let data = use_context::<BinData>().expect("BinData not found");
    let ui = use_context::<UiState>().expect("UiState not found");

    let id = bin.id;
    let (show_threshold, set_show_threshold) = create_signal(false);
    let threshold_input =
        create_rw_signal(data.store.with_untracked(|s| s.threshold(id)).to_string());

    let alerts_on = create_memo(move |_| {
        data.store
            .with(|s| s.alerts_configured().get(&id).copied().unwrap_or(false))
    });

    let empty = move |_| match data.empty_bin(id) {
        Ok(()) => ui.show_success("Bin emptied"),
        Err(e) => ui.show_error(&e.to_string()),
    };

    let toggle_alerts = move |_| {
        let next = !alerts_on.get_untracked();
        data.set_alerts_configured(id, next);
        if next {
            ui.show_success("Alerts enabled for this bin");
        } else {
            ui.show_info("Alerts disabled for this bin");
        }
    };

    let save_threshold = move |_| {
        match threshold_input.get().parse::<u8>() {
            Ok(pct) if (50..=100).contains(&pct) => {
                data.set_threshold(id, pct);
                set_show_threshold.set(false);
                ui.show_success(&format!("Threshold set to {}%", pct));
            }
            _ => ui.show_error("Threshold must be between 50 and 100"),
        }
    };

    let status_class = move || {
        data.store.with(|s| {
            match s.bin(id).map(|b| b.status()) {
                Some(BinStatus::Critical) => "text-red-400",
                Some(BinStatus::Warning) => "text-yellow-400",
                _ => "text-green-400",
            }
        })
    };

    view! {
        <div class="bg-gray-800 rounded-xl p-6">
            <div class="flex items-center justify-between mb-4">
                <h3 class="text-lg font-semibold">{bin.name.clone()}</h3>
                <span class=move || format!("text-sm font-medium {}", status_class())>
                    {move || {
                        data.store.with(|s| {
                            s.bin(id).map(|b| b.status().label()).unwrap_or("Unknown")
                        })
                    }}
                </span>
            </div>

            <div class="w-full bg-gray-700 rounded-full h-3 mb-3">
                <div
                    class="h-3 rounded-full transition-all"
                    style=move || {
                        data.store.with(|s| {
                            let level = s.bin(id).map(|b| b.fill_level).unwrap_or(0);
                            format!(
                                "width: {}%; background-color: {}",
                                level,
                                bin.waste_type.color()
                            )
                        })
                    }
                />
            </div>

            <div class="grid grid-cols-2 gap-2 text-sm text-gray-400 mb-4">
                <div>
                    "Fill: "
                    {move || data.store.with(|s| {
                        s.bin(id).map(|b| format!("{}%", b.fill_level)).unwrap_or_default()
                    })}
                </div>
                <div>
                    "Volume: "
                    {move || data.store.with(|s| {
                        s.bin(id).map(|b| b.volume_label()).unwrap_or_default()
                    })}
                </div>
                <div>
                    "Last emptied: "
                    {move || data.store.with(|s| {
                        s.bin(id).map(|b| b.last_emptied.label()).unwrap_or_default()
                    })}
                </div>
                <div>
                    "Threshold: "
                    {move || data.store.with(|s| format!("{}%", s.threshold(id)))}
                </div>
            </div>

            <div class="flex flex-wrap gap-2">
                <button
                    on:click=empty
                    class="px-3 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg
                           text-sm font-medium transition-colors"
                >
                    "Empty"
                </button>
                <button
                    on:click=move |_| set_show_threshold.update(|v| *v = !*v)
                    class="px-3 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg
                           text-sm font-medium transition-colors"
                >
                    "Set Threshold"
                </button>
                <button
                    on:click=toggle_alerts
                    class=move || {
                        let base = "px-3 py-2 rounded-lg text-sm font-medium transition-colors";
                        if alerts_on.get() {
                            format!("{} bg-green-700 hover:bg-green-600", base)
                        } else {
                            format!("{} bg-gray-700 hover:bg-gray-600", base)
                        }
                    }
                >
                    {move || if alerts_on.get() { "Alerts On" } else { "Alerts Off" }}
                </button>
            </div>

            {move || {
                if show_threshold.get() {
                    view! {
                        <div class="mt-4 flex items-center gap-2">
                            <input
                                type="number"
                                min="50"
                                max="100"
                                prop:value=move || threshold_input.get()
                                on:input=move |ev| threshold_input.set(event_target_value(&ev))
                                class="w-24 bg-gray-700 rounded-lg px-3 py-2 border
                                       border-gray-600 focus:border-primary-500 focus:outline-none"
                            />
                            <span class="text-gray-400 text-sm">"% (50-100)"</span>
                            <button
                                on:click=save_threshold
                                class="px-3 py-2 bg-primary-600 hover:bg-primary-700
                                       rounded-lg text-sm font-medium transition-colors"
                            >
                                "Save"
                            </button>
                        </div>
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}
        </div>
    }
}

/// Collection scheduling for all bins.
#[component]
fn ScheduleSection() -> impl IntoView {
    let data = use_context::<BinData>().expect("BinData not found");
    let ui = use_context::<UiState>().expect("UiState not found");

    let schedule = move |ev: web_sys::Event| {
        match event_target_value(&ev).parse::<u32>() {
            Ok(0) => {
                data.clear_schedule();
                ui.show_info("Collection schedule cleared");
            }
            Ok(hours) => {
                data.set_schedule_all(hours);
                ui.show_success(&format!("Collection scheduled every {} hours", hours));
            }
            Err(_) => {}
        }
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <div class="flex flex-wrap items-center justify-between gap-4">
                <div>
                    <h2 class="text-lg font-semibold">"Scheduled Collection"</h2>
                    <p class="text-sm text-gray-400 mt-1">
                        {move || {
                            data.store.with(|s| {
                                let schedule = s.scheduled_collections();
                                match schedule.values().next() {
                                    Some(hours) => {
                                        format!("All bins emptied every {} hours", hours)
                                    }
                                    None => "No collection scheduled".to_string(),
                                }
                            })
                        }}
                    </p>
                </div>
                <select
                    on:change=schedule
                    class="bg-gray-700 rounded-lg px-4 py-2 border border-gray-600
                           focus:border-primary-500 focus:outline-none"
                >
                    <option value="0">"No schedule"</option>
                    <option value="6">"Every 6 hours"</option>
                    <option value="12">"Every 12 hours"</option>
                    <option value="24">"Every 24 hours"</option>
                </select>
            </div>
        </section>
    }
}
