//! Records Page
//!
//! Live table over the remote BinStatus rows: bulk fetch plus the realtime
//! feed, with a LIVE/Offline badge, filtering, sorting and aggregate stats.

use leptos::*;

use crate::components::Loading;
use crate::domain::records::{
    fill_level_color, BinStatusRecord, RecordFilter, RecordStats, SortColumn, SortDirection,
};
use crate::state::{LiveRecords, SessionState};

/// Records page component
#[component]
pub fn Records() -> impl IntoView {
    let session = use_context::<SessionState>().expect("SessionState not found");
    let live = LiveRecords::new();

    let filter = create_rw_signal(RecordFilter::default());

    // Bulk fetch and subscribe on mount; the feed and the fetch race on
    // purpose, last write wins.
    {
        let live = live.clone();
        let token = session.access_token.get_untracked();
        spawn_local(async move {
            live.refresh(token.as_deref()).await;
        });
    }
    live.connect_feed();

    {
        let live = live.clone();
        on_cleanup(move || live.disconnect());
    }

    let refresh = {
        let live = live.clone();
        move |_| {
            let live = live.clone();
            let token = session.access_token.get_untracked();
            spawn_local(async move {
                live.refresh(token.as_deref()).await;
            });
        }
    };

    let records = live.records;
    let connected = live.connected;
    let loading = live.loading;
    let last_updated = live.last_updated;

    let visible = create_memo(move |_| records.with(|list| filter.get().apply(list)));
    let stats = create_memo(move |_| records.with(|list| RecordStats::compute(list)));

    let sort_by = move |column: SortColumn| {
        filter.update(|f| {
            if f.sort_column == column {
                f.sort_direction = f.sort_direction.toggled();
            } else {
                f.sort_column = column;
                f.sort_direction = SortDirection::Descending;
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Records"</h1>
                    <p class="text-gray-400 mt-1">"Live readings from deployed bins"</p>
                </div>
                <div class="flex items-center space-x-3">
                    {move || {
                        if connected.get() {
                            view! {
                                <span class="px-3 py-1 bg-green-900 text-green-400
                                             rounded-full text-sm font-medium">
                                    "● LIVE"
                                </span>
                            }.into_view()
                        } else {
                            view! {
                                <span class="px-3 py-1 bg-gray-700 text-gray-400
                                             rounded-full text-sm font-medium">
                                    "○ Offline"
                                </span>
                            }.into_view()
                        }
                    }}
                    <button
                        on:click=refresh
                        disabled=move || loading.get()
                        class="px-4 py-2 bg-gray-700 hover:bg-gray-600 disabled:bg-gray-800
                               rounded-lg text-sm font-medium transition-colors"
                    >
                        {move || if loading.get() { "Refreshing..." } else { "Refresh" }}
                    </button>
                </div>
            </div>

            <section class="grid grid-cols-2 md:grid-cols-5 gap-4">
                <StatCard label="Total" value=Signal::derive(move || stats.get().total.to_string()) />
                <StatCard label="Active" value=Signal::derive(move || stats.get().active.to_string()) />
                <StatCard label="Full" value=Signal::derive(move || stats.get().full.to_string()) />
                <StatCard label="Critical" value=Signal::derive(move || stats.get().critical.to_string()) />
                <StatCard label="Avg Fill" value=Signal::derive(move || format!("{}%", stats.get().avg_fill)) />
            </section>

            <section class="flex flex-wrap items-center gap-3">
                <input
                    type="text"
                    placeholder="Search bin, user or version..."
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        filter.update(|f| f.search = value);
                    }
                    class="flex-1 min-w-48 bg-gray-700 rounded-lg px-4 py-2 border
                           border-gray-600 focus:border-primary-500 focus:outline-none"
                />
                <select
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        filter.update(|f| {
                            f.status = if value == "all" { None } else { Some(value) };
                        });
                    }
                    class="bg-gray-700 rounded-lg px-4 py-2 border border-gray-600
                           focus:border-primary-500 focus:outline-none"
                >
                    <option value="all">"All statuses"</option>
                    <option value="ACTIVE">"Active"</option>
                    <option value="FULL">"Full"</option>
                    <option value="ERROR">"Error"</option>
                </select>
            </section>

            <section class="bg-gray-800 rounded-xl overflow-x-auto">
                <table class="w-full text-sm">
                    <thead>
                        <tr class="border-b border-gray-700 text-left text-gray-400">
                            <SortHeader label="ID" column=SortColumn::Id sort_by />
                            <SortHeader label="Bin" column=SortColumn::BinId sort_by />
                            <th class="px-4 py-3">"Version"</th>
                            <SortHeader label="Status" column=SortColumn::BinStatus sort_by />
                            <th class="px-4 py-3">"Sub-bins"</th>
                            <SortHeader label="Fill" column=SortColumn::TotalFill sort_by />
                            <th class="px-4 py-3">"Errors"</th>
                            <SortHeader label="Created" column=SortColumn::CreatedAt sort_by />
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let rows = visible.get();
                            if rows.is_empty() {
                                view! {
                                    <tr>
                                        <td colspan="8" class="px-4 py-8 text-center text-gray-400">
                                            {move || if loading.get() {
                                                view! { <Loading /> }.into_view()
                                            } else {
                                                view! { "No records" }.into_view()
                                            }}
                                        </td>
                                    </tr>
                                }.into_view()
                            } else {
                                rows.into_iter().map(|record| view! {
                                    <RecordRow record />
                                }).collect_view()
                            }
                        }}
                    </tbody>
                </table>
            </section>

            <div class="text-sm text-gray-500">
                {move || {
                    match last_updated.get() {
                        Some(ts) => {
                            let stamp = chrono::DateTime::from_timestamp_millis(ts)
                                .map(|dt| dt.format("%H:%M:%S").to_string())
                                .unwrap_or_default();
                            format!("Last updated {}", stamp)
                        }
                        None => "Not yet updated".to_string(),
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn StatCard(label: &'static str, #[prop(into)] value: Signal<String>) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-4">
            <div class="text-sm text-gray-400">{label}</div>
            <div class="text-2xl font-bold mt-1">{move || value.get()}</div>
        </div>
    }
}

#[component]
fn SortHeader<F>(label: &'static str, column: SortColumn, sort_by: F) -> impl IntoView
where
    F: Fn(SortColumn) + Copy + 'static,
{
    view! {
        <th
            on:click=move |_| sort_by(column)
            class="px-4 py-3 cursor-pointer hover:text-white transition-colors select-none"
        >
            {label}
        </th>
    }
}

#[component]
fn RecordRow(record: BinStatusRecord) -> impl IntoView {
    let status_class = match record.bin_status.to_uppercase().as_str() {
        "ACTIVE" => "text-green-400",
        "FULL" => "text-red-400",
        "ERROR" => "text-yellow-400",
        _ => "text-gray-400",
    };
    let created = record
        .created_at
        .get(..16)
        .unwrap_or(&record.created_at)
        .replace('T', " ");

    view! {
        <tr class="border-b border-gray-700 last:border-0 hover:bg-gray-700/50">
            <td class="px-4 py-3 text-gray-400">{record.id}</td>
            <td class="px-4 py-3 font-medium">{record.bin_id}</td>
            <td class="px-4 py-3 text-gray-400">{record.bin_version}</td>
            <td class=format!("px-4 py-3 {}", status_class)>{record.bin_status}</td>
            <td class="px-4 py-3 text-gray-400">
                {format!(
                    "{} / {} / {} / {}",
                    record.sub_bin1, record.sub_bin2, record.sub_bin3, record.sub_bin4
                )}
            </td>
            <td class=format!("px-4 py-3 {}", fill_level_color(record.total_fill_level))>
                {format!("{}%", record.total_fill_level)}
            </td>
            <td class="px-4 py-3 text-gray-400">
                {record.error_codes.unwrap_or_else(|| "-".to_string())}
            </td>
            <td class="px-4 py-3 text-gray-400">{created}</td>
        </tr>
    }
}
