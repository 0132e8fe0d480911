//! Collection History
//!
//! Append-only log of empty/collect operations, newest first. The log is
//! owned by the store and only ever grows; display windows filter it.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionAction {
    Emptied,
    Collected,
}

impl CollectionAction {
    pub fn label(&self) -> &'static str {
        match self {
            CollectionAction::Emptied => "Emptied",
            CollectionAction::Collected => "Collected",
        }
    }
}

/// One immutable log row, captured at the moment a bin was emptied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    /// Unix milliseconds.
    pub timestamp_ms: i64,
    pub action: CollectionAction,
    pub bin_name: String,
    pub bin_id: u32,
    /// Fill level before the bin was reset.
    pub fill_level: u8,
    /// Volume label before the reset, e.g. "4.25L".
    pub volume_label: String,
}

/// Display window for the history view. Entries outside the window are
/// hidden, never deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryWindow {
    Day,
    Week,
    HalfMonth,
    Month,
}

impl HistoryWindow {
    pub const ALL: [HistoryWindow; 4] = [
        HistoryWindow::Day,
        HistoryWindow::Week,
        HistoryWindow::HalfMonth,
        HistoryWindow::Month,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HistoryWindow::Day => "24h",
            HistoryWindow::Week => "1 week",
            HistoryWindow::HalfMonth => "15 days",
            HistoryWindow::Month => "1 month",
        }
    }

    pub fn duration_ms(&self) -> i64 {
        const DAY: i64 = 24 * 60 * 60 * 1000;
        match self {
            HistoryWindow::Day => DAY,
            HistoryWindow::Week => 7 * DAY,
            HistoryWindow::HalfMonth => 15 * DAY,
            HistoryWindow::Month => 30 * DAY,
        }
    }

    /// Entries within the window ending at `now_ms`, preserving order.
    pub fn filter<'a>(&self, entries: &'a [HistoryEntry], now_ms: i64) -> Vec<&'a HistoryEntry> {
        let cutoff = now_ms - self.duration_ms();
        entries.iter().filter(|e| e.timestamp_ms >= cutoff).collect()
    }
}

fn seed_entry(
    id: i64,
    timestamp_ms: i64,
    action: CollectionAction,
    bin_name: &str,
    bin_id: u32,
    fill_level: u8,
    volume_label: &str,
) -> HistoryEntry {
    HistoryEntry {
        id,
        timestamp_ms,
        action,
        bin_name: bin_name.to_string(),
        bin_id,
        fill_level,
        volume_label: volume_label.to_string(),
    }
}

/// The fixed demo log the store starts with, newest first.
pub fn seed_history() -> Vec<HistoryEntry> {
    use CollectionAction::{Collected, Emptied};
    vec![
        seed_entry(1, 1_705_314_720_000, Emptied, "Organic Waste", 1, 95, "4.75L"),
        seed_entry(2, 1_705_314_600_000, Emptied, "Plastic Waste", 2, 88, "4.40L"),
        seed_entry(3, 1_705_220_700_000, Collected, "Paper Waste", 3, 85, "4.25L"),
        seed_entry(4, 1_705_203_700_000, Emptied, "Metal Waste", 4, 92, "4.60L"),
        seed_entry(5, 1_705_155_600_000, Collected, "Organic Waste", 1, 78, "3.90L"),
        seed_entry(6, 1_705_057_800_000, Emptied, "Plastic Waste", 2, 96, "4.80L"),
        seed_entry(7, 1_704_961_800_000, Collected, "Paper Waste", 3, 82, "4.10L"),
        seed_entry(8, 1_704_901_500_000, Emptied, "Metal Waste", 4, 89, "4.45L"),
        seed_entry(9, 1_704_715_200_000, Collected, "Organic Waste", 1, 91, "4.55L"),
        seed_entry(10, 1_704_449_700_000, Emptied, "Plastic Waste", 2, 87, "4.35L"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_newest_first() {
        let log = seed_history();
        assert_eq!(log.len(), 10);
        for pair in log.windows(2) {
            assert!(pair[0].timestamp_ms >= pair[1].timestamp_ms);
        }
    }

    #[test]
    fn window_filters_without_deleting() {
        let log = seed_history();
        let now = log[0].timestamp_ms + 1;

        let day = HistoryWindow::Day.filter(&log, now);
        // Entries 1 and 2 fall within 24h of the newest timestamp.
        assert_eq!(day.len(), 2);

        let month = HistoryWindow::Month.filter(&log, now);
        assert_eq!(month.len(), log.len());

        // The underlying log is untouched.
        assert_eq!(log.len(), 10);
    }
}
