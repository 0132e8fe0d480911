//! Bin Entities
//!
//! The four simulated waste compartments and the rules deriving their
//! status and volume from the fill level.

use serde::{Deserialize, Serialize};

/// Capacity of each compartment in liters.
pub const BIN_CAPACITY_LITERS: f64 = 5.0;

/// Health of a single bin, derived from its fill level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinStatus {
    Normal,
    Warning,
    Critical,
}

impl BinStatus {
    /// Status is a pure function of the fill level: >=90 critical,
    /// >=75 warning, otherwise normal.
    pub fn from_fill_level(level: u8) -> Self {
        if level >= 90 {
            BinStatus::Critical
        } else if level >= 75 {
            BinStatus::Warning
        } else {
            BinStatus::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BinStatus::Normal => "Normal",
            BinStatus::Warning => "Warning",
            BinStatus::Critical => "Critical",
        }
    }
}

/// Waste category handled by a compartment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WasteType {
    Organic,
    Plastic,
    Paper,
    Metal,
}

impl WasteType {
    pub fn label(&self) -> &'static str {
        match self {
            WasteType::Organic => "Organic",
            WasteType::Plastic => "Plastic",
            WasteType::Paper => "Paper",
            WasteType::Metal => "Metal",
        }
    }

    /// Accent color used by gauges and breakdown charts.
    pub fn color(&self) -> &'static str {
        match self {
            WasteType::Organic => "#10b981",
            WasteType::Plastic => "#3b82f6",
            WasteType::Paper => "#f59e0b",
            WasteType::Metal => "#6b7280",
        }
    }
}

/// When a bin was last emptied, rendered as a relative label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LastEmptied {
    JustNow,
    HoursAgo(u32),
}

impl LastEmptied {
    pub fn label(&self) -> String {
        match self {
            LastEmptied::JustNow => "Just now".to_string(),
            LastEmptied::HoursAgo(1) => "1 hour ago".to_string(),
            LastEmptied::HoursAgo(h) => format!("{} hours ago", h),
        }
    }

    /// Hours since the bin was emptied, for the collection reminder rule.
    pub fn hours(&self) -> u32 {
        match self {
            LastEmptied::JustNow => 0,
            LastEmptied::HoursAgo(h) => *h,
        }
    }
}

/// One simulated waste compartment. The set of bins is fixed at store
/// initialization; entities are reset in place, never created or destroyed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinEntity {
    pub id: u32,
    pub name: String,
    pub waste_type: WasteType,
    pub fill_level: u8,
    pub last_emptied: LastEmptied,
}

impl BinEntity {
    fn new(id: u32, name: &str, waste_type: WasteType, fill_level: u8, hours_ago: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            waste_type,
            fill_level,
            last_emptied: LastEmptied::HoursAgo(hours_ago),
        }
    }

    pub fn status(&self) -> BinStatus {
        BinStatus::from_fill_level(self.fill_level)
    }

    /// Current contents in liters: fill-level fraction of the 5 L capacity.
    pub fn volume_liters(&self) -> f64 {
        f64::from(self.fill_level) / 100.0 * BIN_CAPACITY_LITERS
    }

    pub fn volume_label(&self) -> String {
        format_volume(self.volume_liters())
    }

    /// Reset after an empty operation.
    pub(crate) fn mark_emptied(&mut self) {
        self.fill_level = 0;
        self.last_emptied = LastEmptied::JustNow;
    }

    /// Raise the fill level by `delta` percentage points, clamped to 100.
    pub(crate) fn accumulate(&mut self, delta: u8) {
        self.fill_level = self.fill_level.saturating_add(delta).min(100);
    }
}

/// Format a volume for display. An exactly empty bin reads "0.0L".
pub fn format_volume(liters: f64) -> String {
    if liters == 0.0 {
        "0.0L".to_string()
    } else {
        format!("{:.2}L", liters)
    }
}

/// The fixed four-compartment seed.
pub fn seed_bins() -> Vec<BinEntity> {
    vec![
        BinEntity::new(1, "Organic Waste", WasteType::Organic, 85, 2),
        BinEntity::new(2, "Plastic Waste", WasteType::Plastic, 95, 4),
        BinEntity::new(3, "Paper Waste", WasteType::Paper, 60, 1),
        BinEntity::new(4, "Metal Waste", WasteType::Metal, 78, 3),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_matches_fill_level_bands() {
        for level in 0..=100u8 {
            let status = BinStatus::from_fill_level(level);
            if level >= 90 {
                assert_eq!(status, BinStatus::Critical, "level {}", level);
            } else if level >= 75 {
                assert_eq!(status, BinStatus::Warning, "level {}", level);
            } else {
                assert_eq!(status, BinStatus::Normal, "level {}", level);
            }
        }
    }

    #[test]
    fn volume_is_fraction_of_capacity() {
        let mut bin = seed_bins().remove(0);
        bin.fill_level = 85;
        assert!((bin.volume_liters() - 4.25).abs() < 1e-9);
        assert_eq!(bin.volume_label(), "4.25L");

        bin.fill_level = 60;
        assert_eq!(bin.volume_label(), "3.00L");

        bin.mark_emptied();
        assert_eq!(bin.volume_label(), "0.0L");
        assert_eq!(bin.last_emptied, LastEmptied::JustNow);
    }

    #[test]
    fn accumulate_clamps_at_full() {
        let mut bin = seed_bins().remove(1);
        assert_eq!(bin.fill_level, 95);
        bin.accumulate(20);
        assert_eq!(bin.fill_level, 100);
        assert_eq!(bin.status(), BinStatus::Critical);
    }

    #[test]
    fn seed_is_four_fixed_bins() {
        let bins = seed_bins();
        assert_eq!(bins.len(), 4);
        let levels: Vec<u8> = bins.iter().map(|b| b.fill_level).collect();
        assert_eq!(levels, vec![85, 95, 60, 78]);
        assert_eq!(bins[0].status(), BinStatus::Warning);
        assert_eq!(bins[1].status(), BinStatus::Critical);
        assert_eq!(bins[2].status(), BinStatus::Normal);
        assert_eq!(bins[3].status(), BinStatus::Warning);
    }

    #[test]
    fn last_emptied_labels() {
        assert_eq!(LastEmptied::JustNow.label(), "Just now");
        assert_eq!(LastEmptied::HoursAgo(1).label(), "1 hour ago");
        assert_eq!(LastEmptied::HoursAgo(6).label(), "6 hours ago");
    }
}
