//! Session State
//!
//! The authenticated identity and a loading flag gating the protected
//! views. Sessions are memory-only: a reload returns to the login screen,
//! matching the one-persisted-key policy (language preference only).

use leptos::*;

use crate::supabase::client::{self, AuthSession, User};

#[derive(Clone, Copy)]
pub struct SessionState {
    pub user: RwSignal<Option<User>>,
    pub access_token: RwSignal<Option<String>>,
    /// True while a sign-in or token verification is in flight.
    pub loading: RwSignal<bool>,
}

pub fn provide_session() {
    let state = SessionState {
        user: create_rw_signal(None),
        access_token: create_rw_signal(None),
        loading: create_rw_signal(false),
    };
    provide_context(state);
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.get().is_some()
    }

    /// Install a freshly issued session.
    pub fn apply(&self, session: AuthSession) {
        self.access_token.set(Some(session.access_token));
        self.user.set(Some(session.user));
    }

    /// Resolve a token from the OAuth callback and install the session.
    /// On failure the session stays signed out and the message is returned.
    pub async fn verify_token(&self, token: String) -> Result<(), String> {
        self.loading.set(true);
        let result = client::verify_session(&token).await;
        self.loading.set(false);

        match result {
            Ok(user) => {
                self.access_token.set(Some(token));
                self.user.set(Some(user));
                Ok(())
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Token verification failed: {}", e).into());
                Err(e)
            }
        }
    }

    /// Sign out remotely (best effort) and clear the local session.
    pub async fn sign_out(&self) {
        if let Some(token) = self.access_token.get_untracked() {
            if let Err(e) = client::sign_out(&token).await {
                web_sys::console::error_1(&format!("Sign out failed: {}", e).into());
            }
        }
        self.access_token.set(None);
        self.user.set(None);
    }
}
