//! Language Preference
//!
//! The one durable piece of client state. Everything else resets on reload;
//! the selected language is written to local storage and restored at boot.
//! Full translation tables are out of scope; views consume the enum where a
//! localized label exists.

use leptos::*;

const LANGUAGE_STORAGE_KEY: &str = "smartbin_language";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Malay,
    Chinese,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Malay, Language::Chinese];

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Malay => "ms",
            Language::Chinese => "zh",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Malay => "Bahasa Melayu",
            Language::Chinese => "中文",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::English),
            "ms" => Some(Language::Malay),
            "zh" => Some(Language::Chinese),
            _ => None,
        }
    }
}

fn stored_language() -> Language {
    let read = || -> Option<Language> {
        let storage = web_sys::window()?.local_storage().ok()??;
        let code = storage.get_item(LANGUAGE_STORAGE_KEY).ok()??;
        Language::from_code(&code)
    };
    read().unwrap_or_default()
}

fn store_language(language: Language) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(LANGUAGE_STORAGE_KEY, language.code());
        }
    }
}

#[derive(Clone, Copy)]
pub struct I18n {
    pub language: RwSignal<Language>,
}

pub fn provide_i18n() {
    provide_context(I18n {
        language: create_rw_signal(stored_language()),
    });
}

impl I18n {
    /// Switch language and persist the choice.
    pub fn set_language(&self, language: Language) {
        self.language.set(language);
        store_language(language);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code("fr"), None);
    }
}
