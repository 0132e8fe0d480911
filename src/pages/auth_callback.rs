//! OAuth Callback Pages
//!
//! `/auth/callback` receives the provider redirect with the access token in
//! the URL fragment; `/email-verified` is the landing page after a signup
//! verification link.

use leptos::*;
use leptos_router::{use_navigate, A};

use crate::state::SessionState;

/// Pull a value out of a `#key=value&...` fragment.
fn fragment_param(fragment: &str, key: &str) -> Option<String> {
    fragment
        .trim_start_matches('#')
        .split('&')
        .find_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            (k == key).then(|| v.to_string())
        })
}

/// OAuth callback page component
#[component]
pub fn AuthCallback() -> impl IntoView {
    let session = use_context::<SessionState>().expect("SessionState not found");
    let (error, set_error) = create_signal(None::<String>);

    let token = web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .and_then(|hash| fragment_param(&hash, "access_token"));

    match token {
        Some(token) => {
            let navigate = use_navigate();
            spawn_local(async move {
                match session.verify_token(token).await {
                    Ok(()) => navigate("/", Default::default()),
                    Err(e) => set_error.set(Some(e)),
                }
            });
        }
        None => set_error.set(Some("No access token in the callback URL".to_string())),
    }

    view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-900 px-4">
            <div class="w-full max-w-md bg-gray-800 rounded-xl p-8 text-center">
                {move || {
                    match error.get() {
                        Some(e) => view! {
                            <div class="space-y-4">
                                <p class="text-red-400">{e}</p>
                                <A href="/" class="text-primary-400 hover:underline">
                                    "Back to sign in"
                                </A>
                            </div>
                        }.into_view(),
                        None => view! {
                            <div class="space-y-4">
                                <div class="loading-spinner w-8 h-8 mx-auto" />
                                <p class="text-gray-400">"Completing sign in..."</p>
                            </div>
                        }.into_view(),
                    }
                }}
            </div>
        </div>
    }
}

/// Landing page for the signup verification link.
#[component]
pub fn EmailVerified() -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-900 px-4">
            <div class="w-full max-w-md bg-gray-800 rounded-xl p-8 text-center space-y-4">
                <p class="text-4xl">"✓"</p>
                <h1 class="text-xl font-semibold">"Email verified"</h1>
                <p class="text-gray-400 text-sm">
                    "Your account is ready. Sign in to open the dashboard."
                </p>
                <A
                    href="/"
                    class="inline-block px-4 py-2 bg-primary-600 hover:bg-primary-700
                           rounded-lg font-medium transition-colors"
                >
                    "Sign In"
                </A>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_param_finds_the_token() {
        let hash = "#access_token=abc123&token_type=bearer&expires_in=3600";
        assert_eq!(fragment_param(hash, "access_token"), Some("abc123".to_string()));
        assert_eq!(fragment_param(hash, "refresh_token"), None);
        assert_eq!(fragment_param("", "access_token"), None);
    }
}
