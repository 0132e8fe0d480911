//! Domain Core
//!
//! Pure simulation and reconciliation logic for the bin dashboard. Nothing in
//! this tree touches the DOM, timers, or the network: callers pass the current
//! time in and apply the returned state, which keeps every rule unit-testable
//! with plain `cargo test`.

pub mod alerts;
pub mod bins;
pub mod history;
pub mod records;
pub mod store;
pub mod trend;

pub use bins::{BinEntity, BinStatus, LastEmptied, WasteType, BIN_CAPACITY_LITERS};
pub use history::{CollectionAction, HistoryEntry, HistoryWindow};
pub use records::{apply_change, BinStatusRecord, ChangeEvent, RecordFilter, RecordStats};
pub use store::{BinStore, DailyWaste, StoreError};
pub use trend::{TrendPoint, TrendSeries};
