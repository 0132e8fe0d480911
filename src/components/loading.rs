//! Loading Component
//!
//! Loading spinners and overlay states.

use leptos::*;

/// Full-page loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <div class="loading-spinner w-8 h-8" />
        </div>
    }
}

/// Loading overlay for forms
#[component]
pub fn LoadingOverlay(
    #[prop(into)]
    loading: Signal<bool>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="relative">
            {children()}

            {move || {
                if loading.get() {
                    view! {
                        <div class="absolute inset-0 bg-gray-900/50 flex items-center justify-center rounded-lg">
                            <div class="loading-spinner w-8 h-8" />
                        </div>
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}
        </div>
    }
}
