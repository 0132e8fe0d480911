//! Analytics Page
//!
//! Collection statistics derived from the history log: collections per day,
//! waste volume by type, and a CSV export of the selected window.

use leptos::*;
use std::collections::BTreeMap;
use wasm_bindgen::JsCast;

use crate::components::BarChart;
use crate::domain::bins::BIN_CAPACITY_LITERS;
use crate::domain::history::{HistoryEntry, HistoryWindow};
use crate::state::bins::now_ms;
use crate::state::{BinData, UiState};

/// Analytics page component
#[component]
pub fn Analytics() -> impl IntoView {
    let data = use_context::<BinData>().expect("BinData not found");
    let ui = use_context::<UiState>().expect("UiState not found");

    let window = create_rw_signal(HistoryWindow::Week);

    let windowed = create_memo(move |_| {
        let w = window.get();
        data.store.with(|s| {
            w.filter(s.history(), now_ms())
                .into_iter()
                .cloned()
                .collect::<Vec<HistoryEntry>>()
        })
    });

    let per_day = Signal::derive(move || collections_per_day(&windowed.get()));
    let by_type = Signal::derive(move || waste_by_type(&windowed.get()));

    let export = move |_| {
        let entries = windowed.get_untracked();
        if entries.is_empty() {
            ui.show_warning("Nothing to export for this window");
            return;
        }
        match download_csv(&entries) {
            Ok(()) => ui.show_success("History exported"),
            Err(e) => ui.show_error(&e),
        }
    };

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Analytics"</h1>
                    <p class="text-gray-400 mt-1">"Collection statistics from the history log"</p>
                </div>
                <button
                    on:click=export
                    class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg
                           font-medium transition-colors"
                >
                    "Export CSV"
                </button>
            </div>

            <div class="flex space-x-2">
                {HistoryWindow::ALL.into_iter().map(|w| view! {
                    <WindowButton w window />
                }).collect_view()}
            </div>

            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Collections per Day"</h2>
                <BarChart series=per_day />
            </section>

            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Waste by Type (liters)"</h2>
                <BarChart series=by_type />
            </section>

            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Entries"</h2>
                <div class="space-y-2">
                    {move || {
                        let entries = windowed.get();
                        if entries.is_empty() {
                            view! {
                                <p class="text-gray-400 text-sm">"No entries in this window"</p>
                            }.into_view()
                        } else {
                            entries.into_iter().map(|entry| {
                                let time = chrono::DateTime::from_timestamp_millis(entry.timestamp_ms)
                                    .map(|dt| dt.format("%b %d, %H:%M").to_string())
                                    .unwrap_or_default();
                                view! {
                                    <div class="flex items-center justify-between py-2 border-b
                                                border-gray-700 last:border-0 text-sm">
                                        <div>
                                            <span class="text-gray-400 mr-2">{time}</span>
                                            <span>{entry.bin_name}</span>
                                            <span class="text-gray-400 ml-2">
                                                {entry.action.label()}
                                            </span>
                                        </div>
                                        <span class="font-semibold">{entry.volume_label}</span>
                                    </div>
                                }
                            }).collect_view()
                        }
                    }}
                </div>
            </section>
        </div>
    }
}

#[component]
fn WindowButton(w: HistoryWindow, window: RwSignal<HistoryWindow>) -> impl IntoView {
    view! {
        <button
            on:click=move |_| window.set(w)
            class=move || {
                let base = "px-4 py-2 rounded-lg text-sm font-medium transition-colors";
                if window.get() == w {
                    format!("{} bg-primary-600 text-white", base)
                } else {
                    format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                }
            }
        >
            {w.label()}
        </button>
    }
}

/// Count entries per calendar day, oldest day first.
fn collections_per_day(entries: &[HistoryEntry]) -> Vec<(String, f64)> {
    let mut days: BTreeMap<String, f64> = BTreeMap::new();
    for entry in entries {
        let day = chrono::DateTime::from_timestamp_millis(entry.timestamp_ms)
            .map(|dt| dt.format("%m/%d").to_string())
            .unwrap_or_default();
        *days.entry(day).or_insert(0.0) += 1.0;
    }
    days.into_iter().collect()
}

/// Sum collected liters per bin name.
fn waste_by_type(entries: &[HistoryEntry]) -> Vec<(String, f64)> {
    let mut types: BTreeMap<String, f64> = BTreeMap::new();
    for entry in entries {
        let liters = f64::from(entry.fill_level) / 100.0 * BIN_CAPACITY_LITERS;
        *types.entry(entry.bin_name.clone()).or_insert(0.0) += liters;
    }
    types.into_iter().collect()
}

fn to_csv(entries: &[HistoryEntry]) -> String {
    let mut csv = String::from("id,timestamp,action,bin,fill_level,volume\n");
    for entry in entries {
        let stamp = chrono::DateTime::from_timestamp_millis(entry.timestamp_ms)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default();
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            entry.id,
            stamp,
            entry.action.label(),
            entry.bin_name,
            entry.fill_level,
            entry.volume_label
        ));
    }
    csv
}

/// Hand the CSV to the browser as a file download.
fn download_csv(entries: &[HistoryEntry]) -> Result<(), String> {
    let csv = to_csv(entries);
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let blob = web_sys::Blob::new_with_str_sequence(&js_sys::Array::of1(&csv.into()))
        .map_err(|e| format!("{:?}", e))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| format!("{:?}", e))?;

    let a = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?;
    let _ = a.set_attribute("href", &url);
    let _ = a.set_attribute("download", "smartbin-history.csv");
    a.dyn_ref::<web_sys::HtmlElement>()
        .ok_or("not an element")?
        .click();
    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::history::seed_history;

    #[test]
    fn per_day_groups_and_counts() {
        let log = seed_history();
        let days = collections_per_day(&log);
        let total: f64 = days.iter().map(|(_, n)| n).sum();
        assert_eq!(total, log.len() as f64);
    }

    #[test]
    fn waste_by_type_sums_volumes() {
        let log = seed_history();
        let types = waste_by_type(&log);
        assert_eq!(types.len(), 4);
        // 3 organic entries at 95, 78, 91 percent of 5L.
        let organic = types
            .iter()
            .find(|(name, _)| name == "Organic Waste")
            .unwrap();
        assert!((organic.1 - (4.75 + 3.90 + 4.55)).abs() < 1e-9);
    }

    #[test]
    fn csv_has_header_and_one_row_per_entry() {
        let log = seed_history();
        let csv = to_csv(&log);
        assert_eq!(csv.lines().count(), log.len() + 1);
        assert!(csv.starts_with("id,timestamp,action,bin,fill_level,volume"));
        assert!(csv.contains("Organic Waste"));
    }
}
