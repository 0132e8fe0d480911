//! HTTP Client
//!
//! REST reads and auth calls against the Supabase project, in the same
//! Request/`Result<T, String>` style the rest of the app uses.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use crate::domain::records::{BinStatusRecord, RECORD_CAP};

/// Default project endpoint; both values can be overridden via local storage
/// for staging projects.
pub const DEFAULT_PROJECT_URL: &str = "https://smartbin-demo.supabase.co";
pub const DEFAULT_ANON_KEY: &str = "sb-anon-demo-key";

const URL_STORAGE_KEY: &str = "smartbin_project_url";
const KEY_STORAGE_KEY: &str = "smartbin_anon_key";

/// Project URL + anon key pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectConfig {
    pub url: String,
    pub anon_key: String,
}

fn storage_item(key: &str) -> Option<String> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    storage.get_item(key).ok()?
}

/// Get the project config from local storage or fall back to the defaults.
pub fn get_project_config() -> ProjectConfig {
    ProjectConfig {
        url: storage_item(URL_STORAGE_KEY)
            .unwrap_or_else(|| DEFAULT_PROJECT_URL.to_string())
            .trim_end_matches('/')
            .to_string(),
        anon_key: storage_item(KEY_STORAGE_KEY).unwrap_or_else(|| DEFAULT_ANON_KEY.to_string()),
    }
}

/// Persist a project override in local storage.
pub fn set_project_config(url: &str, anon_key: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(URL_STORAGE_KEY, url);
            let _ = storage.set_item(KEY_STORAGE_KEY, anon_key);
        }
    }
}

// ============ Session types ============

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_confirmed_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Map an auth error body to the inline message shown to the user.
fn map_auth_error(body: AuthErrorBody) -> String {
    let raw = body
        .error_description
        .or(body.msg)
        .or(body.message)
        .unwrap_or_else(|| "Authentication failed".to_string());

    if raw.contains("Email not confirmed") {
        "Please verify your email before logging in. Check your inbox for the verification link."
            .to_string()
    } else if raw.contains("Invalid login credentials") {
        "Invalid email or password. Please try again.".to_string()
    } else {
        raw
    }
}

async fn auth_error(response: gloo_net::http::Response) -> String {
    match response.json::<AuthErrorBody>().await {
        Ok(body) => map_auth_error(body),
        Err(_) => "Authentication failed".to_string(),
    }
}

// ============ REST reads ============

/// Bulk read of the BinStatus table, most recent first.
pub async fn fetch_bin_status(token: Option<&str>) -> Result<Vec<BinStatusRecord>, String> {
    let config = get_project_config();
    let url = format!(
        "{}/rest/v1/BinStatus?select=*&order=created_at.desc&limit={}",
        config.url, RECORD_CAP
    );

    let bearer = token.unwrap_or(&config.anon_key);
    let response = Request::get(&url)
        .header("apikey", &config.anon_key)
        .header("Authorization", &format!("Bearer {}", bearer))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("BinStatus read failed: HTTP {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

// ============ Auth operations ============

#[derive(Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Sign in with email + password.
pub async fn sign_in(email: &str, password: &str) -> Result<AuthSession, String> {
    let config = get_project_config();
    let url = format!("{}/auth/v1/token?grant_type=password", config.url);

    let response = Request::post(&url)
        .header("apikey", &config.anon_key)
        .json(&CredentialsRequest { email, password })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(auth_error(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Register a new account. Returns the created user; a verification email
/// is sent before sign-in is possible.
pub async fn sign_up(email: &str, password: &str) -> Result<User, String> {
    let config = get_project_config();
    let url = format!("{}/auth/v1/signup", config.url);

    let response = Request::post(&url)
        .header("apikey", &config.anon_key)
        .json(&CredentialsRequest { email, password })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(auth_error(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

pub async fn sign_out(token: &str) -> Result<(), String> {
    let config = get_project_config();
    let url = format!("{}/auth/v1/logout", config.url);

    let response = Request::post(&url)
        .header("apikey", &config.anon_key)
        .header("Authorization", &format!("Bearer {}", token))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("Sign out failed: HTTP {}", response.status()));
    }
    Ok(())
}

#[derive(Serialize)]
struct ResendRequest<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    email: &'a str,
}

/// Re-send the signup verification email.
pub async fn resend_verification(email: &str) -> Result<(), String> {
    let config = get_project_config();
    let url = format!("{}/auth/v1/resend", config.url);

    let response = Request::post(&url)
        .header("apikey", &config.anon_key)
        .json(&ResendRequest {
            kind: "signup",
            email,
        })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(auth_error(response).await);
    }
    Ok(())
}

/// Resolve a token (e.g. from the OAuth callback fragment) to its user.
pub async fn verify_session(access_token: &str) -> Result<User, String> {
    let config = get_project_config();
    let url = format!("{}/auth/v1/user", config.url);

    let response = Request::get(&url)
        .header("apikey", &config.anon_key)
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err("Session is invalid or expired".to_string());
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Provider-authorize URL for the Google OAuth flow. Navigating to it hands
/// control to the provider, which redirects back to `/auth/callback`.
pub fn google_oauth_url(origin: &str) -> String {
    let config = get_project_config();
    format!(
        "{}/auth/v1/authorize?provider=google&redirect_to={}/auth/callback",
        config.url, origin
    )
}
