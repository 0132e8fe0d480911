//! Location Page
//!
//! Static installation coordinates with the connectivity readouts and a
//! simulated refresh.

use leptos::*;

use crate::state::UiState;

const LATITUDE: f64 = 3.139;
const LONGITUDE: f64 = 101.6869;
const SITE_NAME: &str = "Jalan Ampang Collection Point";

/// Location page component
#[component]
pub fn Location() -> impl IntoView {
    let ui = use_context::<UiState>().expect("UiState not found");

    let (refreshing, set_refreshing) = create_signal(false);
    let (last_check, set_last_check) = create_signal(None::<i64>);

    let refresh = move |_| {
        set_refreshing.set(true);
        // Simulated GPS fix; the hardware refresh takes about a second.
        gloo_timers::callback::Timeout::new(1200, move || {
            set_refreshing.set(false);
            set_last_check.set(Some(chrono::Utc::now().timestamp_millis()));
            ui.show_success("Location refreshed");
        })
        .forget();
    };

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Location"</h1>
                    <p class="text-gray-400 mt-1">"Installation site and connectivity"</p>
                </div>
                <button
                    on:click=refresh
                    disabled=move || refreshing.get()
                    class="px-4 py-2 bg-gray-700 hover:bg-gray-600 disabled:bg-gray-800
                           rounded-lg font-medium transition-colors"
                >
                    {move || if refreshing.get() { "Refreshing..." } else { "Refresh" }}
                </button>
            </div>

            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">{SITE_NAME}</h2>
                <div class="grid md:grid-cols-2 gap-4 text-sm">
                    <div class="p-4 bg-gray-700 rounded-lg">
                        <div class="text-gray-400 mb-1">"Coordinates"</div>
                        <div class="font-mono">
                            {format!("{:.4}, {:.4}", LATITUDE, LONGITUDE)}
                        </div>
                    </div>
                    <div class="p-4 bg-gray-700 rounded-lg">
                        <div class="text-gray-400 mb-1">"Last position check"</div>
                        <div>
                            {move || {
                                match last_check.get() {
                                    Some(ts) => chrono::DateTime::from_timestamp_millis(ts)
                                        .map(|dt| dt.format("%H:%M:%S").to_string())
                                        .unwrap_or_default(),
                                    None => "On boot".to_string(),
                                }
                            }}
                        </div>
                    </div>
                </div>
            </section>

            <section class="grid md:grid-cols-2 gap-4">
                <StatusCard label="GPS" detail="Fix acquired (8 satellites)" online=true />
                <StatusCard label="WiFi" detail="Connected to gateway" online=true />
            </section>
        </div>
    }
}

#[component]
fn StatusCard(label: &'static str, detail: &'static str, online: bool) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-6 flex items-center justify-between">
            <div>
                <h3 class="font-semibold">{label}</h3>
                <p class="text-sm text-gray-400 mt-1">{detail}</p>
            </div>
            {if online {
                view! { <span class="text-green-400">"🟢 Online"</span> }.into_view()
            } else {
                view! { <span class="text-red-400">"🔴 Offline"</span> }.into_view()
            }}
        </div>
    }
}
