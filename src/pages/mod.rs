//! Dashboard Views

pub mod analytics;
pub mod auth_callback;
pub mod bin_status;
pub mod location;
pub mod login;
pub mod overview;
pub mod records;
pub mod settings;

pub use analytics::Analytics;
pub use auth_callback::{AuthCallback, EmailVerified};
pub use bin_status::BinStatusPage;
pub use location::Location;
pub use login::{Login, Register};
pub use overview::Overview;
pub use records::Records;
pub use settings::Settings;
