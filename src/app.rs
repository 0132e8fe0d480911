//! App Root Component
//!
//! Providers, the auth routes, and the tabbed dashboard shown once a
//! session exists.

use leptos::*;
use leptos_router::*;

use crate::components::{AlertSystem, Sidebar, Tab, Toast};
use crate::i18n::provide_i18n;
use crate::pages::{
    Analytics, AuthCallback, BinStatusPage, EmailVerified, Location, Login, Overview, Records,
    Register, Settings,
};
use crate::state::{
    provide_bin_data, provide_session, provide_settings, provide_ui_state, SessionState,
};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_ui_state();
    provide_session();
    provide_settings();
    provide_bin_data();
    provide_i18n();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white">
                <Routes>
                    <Route path="/" view=Gate />
                    <Route path="/register" view=Register />
                    <Route path="/auth/callback" view=AuthCallback />
                    <Route path="/email-verified" view=EmailVerified />
                    <Route path="/*any" view=NotFound />
                </Routes>

                <Toast />
            </div>
        </Router>
    }
}

/// Login screen until a session exists, then the dashboard.
#[component]
fn Gate() -> impl IntoView {
    let session = use_context::<SessionState>().expect("SessionState not found");

    view! {
        {move || {
            if session.user.get().is_some() {
                view! { <Dashboard /> }.into_view()
            } else {
                view! { <Login /> }.into_view()
            }
        }}
    }
}

/// The tabbed dashboard. Tabs are an enum, not routes.
#[component]
fn Dashboard() -> impl IntoView {
    let active_tab = create_rw_signal(Tab::default());

    view! {
        <div class="flex">
            <Sidebar active_tab />

            <div class="flex-1 flex flex-col min-h-screen">
                <main class="flex-1 px-6 py-8 pb-24">
                    {move || match active_tab.get() {
                        Tab::Overview => view! { <Overview /> }.into_view(),
                        Tab::BinStatus => view! { <BinStatusPage /> }.into_view(),
                        Tab::Records => view! { <Records /> }.into_view(),
                        Tab::Location => view! { <Location /> }.into_view(),
                        Tab::Analytics => view! { <Analytics /> }.into_view(),
                        Tab::Settings => view! { <Settings /> }.into_view(),
                    }}
                </main>

                <Footer />
            </div>
        </div>

        <AlertSystem />
    }
}

/// Footer showing the simulated system status.
#[component]
fn Footer() -> impl IntoView {
    let data = use_context::<crate::state::BinData>().expect("BinData not found");

    view! {
        <footer class="fixed bottom-0 left-56 right-0 bg-gray-800 border-t
                       border-gray-700 py-3 px-6">
            <div class="flex items-center justify-between text-sm">
                {move || {
                    if data.store.with(|s| s.system_online()) {
                        view! {
                            <span class="flex items-center space-x-1 text-green-400">
                                <span class="w-2 h-2 bg-green-400 rounded-full pulse" />
                                <span>"System online"</span>
                            </span>
                        }.into_view()
                    } else {
                        view! {
                            <span class="flex items-center space-x-1 text-red-400">
                                <span class="w-2 h-2 bg-red-400 rounded-full" />
                                <span>"System offline"</span>
                            </span>
                        }.into_view()
                    }
                }}

                <div class="text-gray-400">
                    {move || {
                        data.store.with(|s| {
                            format!(
                                "{} bins · {}% average fill",
                                s.bins().len(),
                                s.average_fill_level()
                            )
                        })
                    }}
                </div>
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg
                       font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}
