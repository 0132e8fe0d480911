//! Reusable Components

pub mod alert_system;
pub mod chart;
pub mod loading;
pub mod sidebar;
pub mod toast;

pub use alert_system::AlertSystem;
pub use chart::{BarChart, TrendChart};
pub use loading::{Loading, LoadingOverlay};
pub use sidebar::{Sidebar, Tab};
pub use toast::Toast;
