//! Login and Register Pages
//!
//! Email/password and Google OAuth sign-in with inline error messages.

use leptos::*;
use leptos_router::A;

use crate::components::LoadingOverlay;
use crate::state::SessionState;
use crate::supabase::client;

/// Login page component
#[component]
pub fn Login() -> impl IntoView {
    let session = use_context::<SessionState>().expect("SessionState not found");

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (resent, set_resent) = create_signal(false);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let email = email.get_untracked();
        let password = password.get_untracked();
        if email.is_empty() || password.is_empty() {
            set_error.set(Some("Email and password are required".to_string()));
            return;
        }

        set_error.set(None);
        session.loading.set(true);
        spawn_local(async move {
            match client::sign_in(&email, &password).await {
                Ok(auth) => session.apply(auth),
                Err(e) => set_error.set(Some(e)),
            }
            session.loading.set(false);
        });
    };

    let resend = move |_| {
        let email = email.get_untracked();
        spawn_local(async move {
            match client::resend_verification(&email).await {
                Ok(()) => set_resent.set(true),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let google = move |_| {
        if let Some(window) = web_sys::window() {
            if let Ok(origin) = window.location().origin() {
                let _ = window.location().set_href(&client::google_oauth_url(&origin));
            }
        }
    };

    view! {
        <AuthShell title="Sign In">
            <LoadingOverlay loading=Signal::derive(move || session.loading.get())>
            <form on:submit=submit class="space-y-4">
                <AuthInput
                    label="Email"
                    input_type="email"
                    on_input=set_email
                />
                <AuthInput
                    label="Password"
                    input_type="password"
                    on_input=set_password
                />

                {move || error.get().map(|e| {
                    let needs_verification = e.contains("verify your email");
                    view! {
                        <div class="text-sm text-red-400 bg-red-900/30 rounded-lg p-3">
                            <p>{e}</p>
                            {needs_verification.then(|| view! {
                                <button
                                    type="button"
                                    on:click=resend
                                    class="mt-2 underline hover:text-red-300"
                                >
                                    {move || if resent.get() {
                                        "Verification email sent"
                                    } else {
                                        "Resend verification email"
                                    }}
                                </button>
                            })}
                        </div>
                    }
                })}

                <button
                    type="submit"
                    disabled=move || session.loading.get()
                    class="w-full px-4 py-3 bg-primary-600 hover:bg-primary-700
                           disabled:bg-gray-600 rounded-lg font-medium transition-colors"
                >
                    {move || if session.loading.get() { "Signing in..." } else { "Sign In" }}
                </button>
            </form>

            <div class="my-4 flex items-center">
                <div class="flex-1 border-t border-gray-700" />
                <span class="px-3 text-sm text-gray-500">"or"</span>
                <div class="flex-1 border-t border-gray-700" />
            </div>

            <button
                on:click=google
                class="w-full px-4 py-3 bg-gray-700 hover:bg-gray-600 rounded-lg
                       font-medium transition-colors"
            >
                "Continue with Google"
            </button>
            </LoadingOverlay>

            <p class="mt-6 text-sm text-gray-400 text-center">
                "No account? "
                <A href="/register" class="text-primary-400 hover:underline">
                    "Register"
                </A>
            </p>
        </AuthShell>
    }
}

/// Register page component
#[component]
pub fn Register() -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (confirm, set_confirm) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);
    let (registered, set_registered) = create_signal(false);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let email = email.get_untracked();
        let password = password.get_untracked();

        if password.len() < 6 {
            set_error.set(Some("Password must be at least 6 characters".to_string()));
            return;
        }
        if password != confirm.get_untracked() {
            set_error.set(Some("Passwords do not match".to_string()));
            return;
        }

        set_error.set(None);
        set_submitting.set(true);
        spawn_local(async move {
            match client::sign_up(&email, &password).await {
                Ok(_) => set_registered.set(true),
                Err(e) => set_error.set(Some(e)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <AuthShell title="Register">
            {move || {
                if registered.get() {
                    view! {
                        <div class="text-center space-y-4">
                            <p class="text-green-400 text-lg">"✓ Account created"</p>
                            <p class="text-gray-400 text-sm">
                                "Check your inbox for the verification link, then sign in."
                            </p>
                            <A href="/" class="text-primary-400 hover:underline">
                                "Back to sign in"
                            </A>
                        </div>
                    }.into_view()
                } else {
                    view! {
                        <form on:submit=submit class="space-y-4">
                            <AuthInput
                                label="Email"
                                input_type="email"
                                on_input=set_email
                            />
                            <AuthInput
                                label="Password"
                                input_type="password"
                                on_input=set_password
                            />
                            <AuthInput
                                label="Confirm password"
                                input_type="password"
                                on_input=set_confirm
                            />

                            {move || error.get().map(|e| view! {
                                <div class="text-sm text-red-400 bg-red-900/30 rounded-lg p-3">
                                    {e}
                                </div>
                            })}

                            <button
                                type="submit"
                                disabled=move || submitting.get()
                                class="w-full px-4 py-3 bg-primary-600 hover:bg-primary-700
                                       disabled:bg-gray-600 rounded-lg font-medium
                                       transition-colors"
                            >
                                {move || if submitting.get() {
                                    "Creating account..."
                                } else {
                                    "Create Account"
                                }}
                            </button>

                            <p class="text-sm text-gray-400 text-center">
                                "Already registered? "
                                <A href="/" class="text-primary-400 hover:underline">
                                    "Sign in"
                                </A>
                            </p>
                        </form>
                    }.into_view()
                }
            }}
        </AuthShell>
    }
}

/// Centered card shared by the auth pages.
#[component]
fn AuthShell(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-900 px-4">
            <div class="w-full max-w-md bg-gray-800 rounded-xl p-8">
                <div class="flex items-center justify-center space-x-3 mb-6">
                    <span class="text-3xl">"♻"</span>
                    <span class="text-2xl font-bold">"SmartBin"</span>
                </div>
                <h1 class="text-xl font-semibold mb-6 text-center">{title}</h1>
                {children()}
            </div>
        </div>
    }
}

#[component]
fn AuthInput(
    label: &'static str,
    input_type: &'static str,
    on_input: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2">{label}</label>
            <input
                type=input_type
                on:input=move |ev| on_input.set(event_target_value(&ev))
                class="w-full bg-gray-700 rounded-lg px-4 py-3 border border-gray-600
                       focus:border-primary-500 focus:outline-none"
            />
        </div>
    }
}
