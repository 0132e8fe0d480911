//! State Management
//!
//! Reactive signal wrappers over the domain core, plus session, settings,
//! and the live record reconciler.

pub mod bins;
pub mod live;
pub mod session;
pub mod settings;
pub mod ui;

pub use bins::{provide_bin_data, BinData};
pub use live::LiveRecords;
pub use session::{provide_session, SessionState};
pub use settings::{provide_settings, SettingsState};
pub use ui::{provide_ui_state, UiState};
