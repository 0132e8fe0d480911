//! Live Status Records
//!
//! The remote `BinStatus` table rows mirrored by the live reconciler, plus
//! the pure merge/filter/sort helpers the records view runs over them. Field
//! names and casing match the remote schema exactly; values are mirrored
//! verbatim and only formatted at display time.

use serde::{Deserialize, Serialize};

/// Maximum number of records retained locally.
pub const RECORD_CAP: usize = 200;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinStatusRecord {
    pub id: i64,
    pub created_at: String,
    #[serde(rename = "BinId")]
    pub bin_id: String,
    #[serde(rename = "BinVersion")]
    pub bin_version: String,
    #[serde(rename = "BinStatus")]
    pub bin_status: String,
    #[serde(rename = "SubBin1")]
    pub sub_bin1: i64,
    #[serde(rename = "SubBin2")]
    pub sub_bin2: i64,
    #[serde(rename = "SubBin3")]
    pub sub_bin3: i64,
    #[serde(rename = "SubBin4")]
    pub sub_bin4: i64,
    #[serde(rename = "ErrorCodes", default)]
    pub error_codes: Option<String>,
    #[serde(rename = "User_id")]
    pub user_id: String,
    #[serde(rename = "Total_fill_level")]
    pub total_fill_level: i64,
}

/// One row-level change delivered by the remote feed.
#[derive(Clone, Debug, PartialEq)]
pub enum ChangeEvent {
    Insert(BinStatusRecord),
    Update(BinStatusRecord),
    Delete { id: i64 },
}

/// Merge a change into the locally held list.
///
/// Inserts prepend (the list stays most-recent-first) and truncate to `cap`;
/// updates replace in place by id and are silently dropped when no match
/// exists; deletes remove by id and no-op when absent.
pub fn apply_change(records: &mut Vec<BinStatusRecord>, event: ChangeEvent, cap: Option<usize>) {
    match event {
        ChangeEvent::Insert(record) => {
            records.insert(0, record);
            if let Some(cap) = cap {
                records.truncate(cap);
            }
        }
        ChangeEvent::Update(record) => {
            if let Some(existing) = records.iter_mut().find(|r| r.id == record.id) {
                *existing = record;
            }
        }
        ChangeEvent::Delete { id } => {
            records.retain(|r| r.id != id);
        }
    }
}

// ---- view helpers ----

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    BinId,
    BinStatus,
    TotalFill,
    CreatedAt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Filter/sort settings for the records table.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordFilter {
    /// Status filter; `None` means all.
    pub status: Option<String>,
    /// Case-insensitive search over BinId, User_id, and BinVersion.
    pub search: String,
    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,
}

impl Default for RecordFilter {
    fn default() -> Self {
        Self {
            status: None,
            search: String::new(),
            sort_column: SortColumn::CreatedAt,
            sort_direction: SortDirection::Descending,
        }
    }
}

impl RecordFilter {
    /// Apply the filter and sort to a snapshot of the record list.
    pub fn apply(&self, records: &[BinStatusRecord]) -> Vec<BinStatusRecord> {
        let needle = self.search.to_lowercase();
        let mut out: Vec<BinStatusRecord> = records
            .iter()
            .filter(|r| {
                self.status
                    .as_ref()
                    .map_or(true, |s| r.bin_status.eq_ignore_ascii_case(s))
            })
            .filter(|r| {
                needle.is_empty()
                    || r.bin_id.to_lowercase().contains(&needle)
                    || r.user_id.to_lowercase().contains(&needle)
                    || r.bin_version.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        out.sort_by(|a, b| {
            let ord = match self.sort_column {
                SortColumn::Id => a.id.cmp(&b.id),
                SortColumn::BinId => a.bin_id.to_lowercase().cmp(&b.bin_id.to_lowercase()),
                SortColumn::BinStatus => a
                    .bin_status
                    .to_lowercase()
                    .cmp(&b.bin_status.to_lowercase()),
                SortColumn::TotalFill => a.total_fill_level.cmp(&b.total_fill_level),
                SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            match self.sort_direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
        out
    }
}

/// Aggregate counters shown above the records table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct RecordStats {
    pub total: usize,
    pub active: usize,
    pub full: usize,
    pub critical: usize,
    pub avg_fill: i64,
}

impl RecordStats {
    pub fn compute(records: &[BinStatusRecord]) -> Self {
        let total = records.len();
        let active = records
            .iter()
            .filter(|r| r.bin_status.eq_ignore_ascii_case("ACTIVE"))
            .count();
        let full = records
            .iter()
            .filter(|r| r.bin_status.eq_ignore_ascii_case("FULL"))
            .count();
        let critical = records.iter().filter(|r| r.total_fill_level >= 90).count();
        let avg_fill = if total > 0 {
            let sum: i64 = records.iter().map(|r| r.total_fill_level).sum();
            (sum as f64 / total as f64).round() as i64
        } else {
            0
        };
        Self {
            total,
            active,
            full,
            critical,
            avg_fill,
        }
    }
}

/// Color class bucket for a fill percentage, shared by table and cards.
pub fn fill_level_color(level: i64) -> &'static str {
    if level >= 90 {
        "text-red-600 font-bold"
    } else if level >= 75 {
        "text-yellow-600 font-semibold"
    } else if level >= 50 {
        "text-blue-600"
    } else {
        "text-green-600"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn record(id: i64, status: &str, fill: i64) -> BinStatusRecord {
        BinStatusRecord {
            id,
            created_at: format!("2026-08-0{}T10:00:00+00:00", id.min(9)),
            bin_id: format!("BIN-{:03}", id),
            bin_version: "mark3".to_string(),
            bin_status: status.to_string(),
            sub_bin1: fill,
            sub_bin2: fill,
            sub_bin3: fill,
            sub_bin4: fill,
            error_codes: None,
            user_id: format!("user-{}", id),
            total_fill_level: fill,
        }
    }

    #[test]
    fn update_replaces_in_place_preserving_order() {
        let mut records = vec![
            record(1, "ACTIVE", 40),
            record(2, "ACTIVE", 50),
            record(3, "ACTIVE", 60),
        ];

        let mut updated = record(2, "FULL", 95);
        updated.error_codes = Some("E42".to_string());
        apply_change(&mut records, ChangeEvent::Update(updated), None);

        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(records[1].bin_status, "FULL");
        assert_eq!(records[1].error_codes.as_deref(), Some("E42"));
    }

    #[test]
    fn delete_then_insert_matches_feed_semantics() {
        let mut records = vec![
            record(1, "ACTIVE", 40),
            record(2, "FULL", 95),
            record(3, "ACTIVE", 60),
        ];

        apply_change(&mut records, ChangeEvent::Delete { id: 1 }, None);
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);

        apply_change(&mut records, ChangeEvent::Insert(record(4, "ACTIVE", 10)), None);
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![4, 2, 3]);
    }

    #[test]
    fn update_without_match_is_dropped() {
        let mut records = vec![record(1, "ACTIVE", 40)];
        apply_change(&mut records, ChangeEvent::Update(record(9, "FULL", 99)), None);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 1);
    }

    #[test]
    fn delete_of_absent_record_is_a_noop() {
        let mut records = vec![record(1, "ACTIVE", 40)];
        apply_change(&mut records, ChangeEvent::Delete { id: 9 }, None);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn insert_respects_the_cap() {
        let mut records: Vec<BinStatusRecord> = (1..=3).map(|i| record(i, "ACTIVE", 40)).collect();
        apply_change(&mut records, ChangeEvent::Insert(record(4, "ACTIVE", 10)), Some(3));
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![4, 1, 2]);
    }

    #[test]
    fn exact_column_names_round_trip() {
        let json = serde_json::json!({
            "id": 7,
            "created_at": "2026-08-30T09:00:00+00:00",
            "BinId": "BIN-007",
            "BinVersion": "mark3",
            "BinStatus": "ACTIVE",
            "SubBin1": 10,
            "SubBin2": 20,
            "SubBin3": 30,
            "SubBin4": 40,
            "ErrorCodes": null,
            "User_id": "user-7",
            "Total_fill_level": 25
        });
        let rec: BinStatusRecord = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(rec.bin_id, "BIN-007");
        assert_eq!(rec.total_fill_level, 25);

        let back = serde_json::to_value(&rec).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn filter_and_sort() {
        let records = vec![
            record(1, "ACTIVE", 40),
            record(2, "FULL", 95),
            record(3, "active", 60),
        ];

        let filter = RecordFilter {
            status: Some("ACTIVE".to_string()),
            ..Default::default()
        };
        let out = filter.apply(&records);
        assert_eq!(out.len(), 2);

        let filter = RecordFilter {
            search: "user-2".to_string(),
            ..Default::default()
        };
        let out = filter.apply(&records);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 2);

        let filter = RecordFilter {
            sort_column: SortColumn::TotalFill,
            sort_direction: SortDirection::Ascending,
            ..Default::default()
        };
        let fills: Vec<i64> = filter.apply(&records).iter().map(|r| r.total_fill_level).collect();
        assert_eq!(fills, vec![40, 60, 95]);
    }

    #[test]
    fn stats_aggregate_the_snapshot() {
        let records = vec![
            record(1, "ACTIVE", 40),
            record(2, "FULL", 95),
            record(3, "ACTIVE", 91),
        ];
        let stats = RecordStats::compute(&records);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.full, 1);
        assert_eq!(stats.critical, 2);
        // (40 + 95 + 91) / 3 = 75.33 -> 75
        assert_eq!(stats.avg_fill, 75);
    }
}
