//! Overview Page
//!
//! Summary cards, the fill-level trend, per-bin quick cards, waste breakdown
//! and the recent collection history.

use leptos::*;

use crate::components::TrendChart;
use crate::domain::bins::{format_volume, BinStatus};
use crate::domain::history::HistoryEntry;
use crate::state::{BinData, UiState};

/// Overview page component
#[component]
pub fn Overview() -> impl IntoView {
    let data = use_context::<BinData>().expect("BinData not found");
    let ui = use_context::<UiState>().expect("UiState not found");

    let simulate = move |_| {
        // Random 2-11% rise per bin.
        let deltas: Vec<(u32, u8)> = data
            .store
            .with_untracked(|s| s.bins().iter().map(|b| b.id).collect::<Vec<_>>())
            .into_iter()
            .map(|id| (id, (js_sys::Math::random() * 10.0) as u8 + 2))
            .collect();
        data.simulate_fill(&deltas);
        ui.show_info("Simulated waste accumulation");
    };

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Overview"</h1>
                    <p class="text-gray-400 mt-1">"Your smart bins at a glance"</p>
                </div>
                <button
                    on:click=simulate
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg
                           font-medium transition-colors"
                >
                    "Simulate Fill"
                </button>
            </div>

            <section class="grid grid-cols-2 md:grid-cols-4 gap-4">
                <SummaryCard
                    label="Today's Waste"
                    value=Signal::derive(move || {
                        data.store.with(|s| format_volume(s.daily_waste().accumulated_today))
                    })
                    icon="🗑"
                />
                <SummaryCard
                    label="Waste in Bins"
                    value=Signal::derive(move || {
                        data.store.with(|s| format_volume(s.current_waste_liters()))
                    })
                    icon="⚖"
                />
                <SummaryCard
                    label="Active Bins"
                    value=Signal::derive(move || {
                        data.store.with(|s| s.bins().len().to_string())
                    })
                    icon="♻"
                />
                <SummaryCard
                    label="Average Fill"
                    value=Signal::derive(move || {
                        data.store.with(|s| format!("{}%", s.average_fill_level()))
                    })
                    icon="📈"
                />
            </section>

            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Fill Level Trend"</h2>
                <TrendChart />
            </section>

            <section>
                <h2 class="text-lg font-semibold mb-4">"Bins"</h2>
                <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                    {move || {
                        data.store.with(|s| {
                            s.bins().iter().map(|bin| {
                                let status = bin.status();
                                view! {
                                    <QuickBinCard
                                        name=bin.name.clone()
                                        fill_level=bin.fill_level
                                        volume=bin.volume_label()
                                        status
                                        color=bin.waste_type.color()
                                    />
                                }
                            }).collect_view()
                        })
                    }}
                </div>
            </section>

            <div class="grid md:grid-cols-2 gap-8">
                <WasteBreakdown />
                <RecentHistory />
            </div>
        </div>
    }
}

#[component]
fn SummaryCard(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    icon: &'static str,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-4">
            <div class="flex items-center justify-between mb-2">
                <span class="text-sm text-gray-400">{label}</span>
                <span class="text-xl">{icon}</span>
            </div>
            <div class="text-2xl font-bold">{move || value.get()}</div>
        </div>
    }
}

#[component]
fn QuickBinCard(
    #[prop(into)] name: String,
    fill_level: u8,
    #[prop(into)] volume: String,
    status: BinStatus,
    color: &'static str,
) -> impl IntoView {
    let status_class = match status {
        BinStatus::Critical => "text-red-400",
        BinStatus::Warning => "text-yellow-400",
        BinStatus::Normal => "text-green-400",
    };

    view! {
        <div class="bg-gray-800 rounded-xl p-4">
            <div class="flex items-center justify-between mb-2">
                <span class="font-medium">{name}</span>
                <span class=format!("text-xs {}", status_class)>{status.label()}</span>
            </div>
            <div class="w-full bg-gray-700 rounded-full h-2 mb-2">
                <div
                    class="h-2 rounded-full"
                    style=format!(
                        "width: {}%; background-color: {}",
                        fill_level, color
                    )
                />
            </div>
            <div class="flex justify-between text-sm text-gray-400">
                <span>{format!("{}%", fill_level)}</span>
                <span>{volume}</span>
            </div>
        </div>
    }
}

/// Current volume held per waste type.
#[component]
fn WasteBreakdown() -> impl IntoView {
    let data = use_context::<BinData>().expect("BinData not found");

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Waste Breakdown"</h2>
            <div class="space-y-3">
                {move || {
                    data.store.with(|s| {
                        let total: f64 = s.current_waste_liters();
                        s.bins().iter().map(|bin| {
                            let share = if total > 0.0 {
                                bin.volume_liters() / total * 100.0
                            } else {
                                0.0
                            };
                            view! {
                                <div>
                                    <div class="flex justify-between text-sm mb-1">
                                        <span>{bin.waste_type.label()}</span>
                                        <span class="text-gray-400">
                                            {format!("{} ({:.0}%)", bin.volume_label(), share)}
                                        </span>
                                    </div>
                                    <div class="w-full bg-gray-700 rounded-full h-2">
                                        <div
                                            class="h-2 rounded-full"
                                            style=format!(
                                                "width: {:.0}%; background-color: {}",
                                                share,
                                                bin.waste_type.color()
                                            )
                                        />
                                    </div>
                                </div>
                            }
                        }).collect_view()
                    })
                }}
            </div>
        </section>
    }
}

#[component]
fn RecentHistory() -> impl IntoView {
    let data = use_context::<BinData>().expect("BinData not found");

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Recent Collections"</h2>
            <div class="space-y-2">
                {move || {
                    let recent: Vec<HistoryEntry> = data
                        .store
                        .with(|s| s.history().iter().take(5).cloned().collect());

                    if recent.is_empty() {
                        view! {
                            <p class="text-gray-400 text-sm">"No collections yet"</p>
                        }.into_view()
                    } else {
                        recent.into_iter().map(|entry| {
                            let time = chrono::DateTime::from_timestamp_millis(entry.timestamp_ms)
                                .map(|dt| dt.format("%b %d, %H:%M").to_string())
                                .unwrap_or_default();
                            view! {
                                <div class="flex items-center justify-between py-2 border-b
                                            border-gray-700 last:border-0">
                                    <div>
                                        <span>{entry.bin_name}</span>
                                        <span class="text-gray-400 text-sm ml-2">{time}</span>
                                    </div>
                                    <span class="font-semibold">{entry.volume_label}</span>
                                </div>
                            }
                        }).collect_view()
                    }
                }}
            </div>
        </section>
    }
}
