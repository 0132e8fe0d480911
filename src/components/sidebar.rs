//! Sidebar Navigation
//!
//! In-dashboard view switching. The tabs are an exhaustive enum rather than
//! routed paths; only the auth flow uses the router.

use leptos::*;

/// The dashboard views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    BinStatus,
    Records,
    Location,
    Analytics,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Overview,
        Tab::BinStatus,
        Tab::Records,
        Tab::Location,
        Tab::Analytics,
        Tab::Settings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::BinStatus => "Bin Status",
            Tab::Records => "Records",
            Tab::Location => "Location",
            Tab::Analytics => "Analytics",
            Tab::Settings => "Settings",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tab::Overview => "🏠",
            Tab::BinStatus => "🗑",
            Tab::Records => "📡",
            Tab::Location => "📍",
            Tab::Analytics => "📊",
            Tab::Settings => "⚙",
        }
    }
}

/// Sidebar navigation component
#[component]
pub fn Sidebar(active_tab: RwSignal<Tab>) -> impl IntoView {
    view! {
        <aside class="bg-gray-800 border-r border-gray-700 w-56 min-h-screen p-4">
            <div class="flex items-center space-x-3 mb-8">
                <span class="text-2xl">"♻"</span>
                <span class="text-xl font-bold text-white">"SmartBin"</span>
            </div>

            <nav class="space-y-1">
                {Tab::ALL.into_iter().map(|tab| view! {
                    <SidebarLink tab active_tab />
                }).collect_view()}
            </nav>
        </aside>
    }
}

#[component]
fn SidebarLink(tab: Tab, active_tab: RwSignal<Tab>) -> impl IntoView {
    let is_active = create_memo(move |_| active_tab.get() == tab);

    view! {
        <button
            on:click=move |_| active_tab.set(tab)
            class=move || {
                let base = "w-full flex items-center space-x-3 px-4 py-2 rounded-lg \
                            text-left transition-colors";
                if is_active.get() {
                    format!("{} bg-gray-700 text-white", base)
                } else {
                    format!("{} text-gray-300 hover:text-white hover:bg-gray-700", base)
                }
            }
        >
            <span>{tab.icon()}</span>
            <span class="text-sm font-medium">{tab.label()}</span>
        </button>
    }
}
