//! Toast Notification Component
//!
//! Stacks the auto-clearing messages from `UiState`. Four variants, one per
//! alert severity plus success.

use leptos::*;

use crate::state::UiState;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let ui = use_context::<UiState>().expect("UiState not found");

    view! {
        <div class="fixed bottom-20 right-4 z-50 space-y-2">
            {move || {
                ui.success.get().map(|msg| view! {
                    <ToastMessage message=msg variant=ToastVariant::Success />
                })
            }}

            {move || {
                ui.error.get().map(|msg| view! {
                    <ToastMessage message=msg variant=ToastVariant::Error />
                })
            }}

            {move || {
                ui.warning.get().map(|msg| view! {
                    <ToastMessage message=msg variant=ToastVariant::Warning />
                })
            }}

            {move || {
                ui.info.get().map(|msg| view! {
                    <ToastMessage message=msg variant=ToastVariant::Info />
                })
            }}
        </div>
    }
}

#[derive(Clone, Copy)]
enum ToastVariant {
    Success,
    Error,
    Warning,
    Info,
}

#[component]
fn ToastMessage(
    #[prop(into)]
    message: String,
    variant: ToastVariant,
) -> impl IntoView {
    let (icon, bg_class) = match variant {
        ToastVariant::Success => ("✓", "bg-green-600"),
        ToastVariant::Error => ("✕", "bg-red-600"),
        ToastVariant::Warning => ("⚠", "bg-yellow-600"),
        ToastVariant::Info => ("ℹ", "bg-blue-600"),
    };

    view! {
        <div class=format!(
            "flex items-center space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg \
             transform transition-all duration-300 ease-out animate-slide-in",
            bg_class
        )>
            <span class="text-lg">{icon}</span>
            <span class="text-sm font-medium">{message}</span>
        </div>
    }
}
