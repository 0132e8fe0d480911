//! Bin Store
//!
//! Single source of truth for the simulated bin state and every metric
//! derived from it. All operations are pure state transitions over a passed-in
//! clock; the periodic behaviors are exposed as `tick_*` reducers so the
//! interval adapters in the state layer stay trivial.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bins::{self, BinEntity};
use super::history::{self, CollectionAction, HistoryEntry};
use super::trend::{self, TrendSeries};

/// How often the state layer runs the daily-reset check.
pub const DAILY_CHECK_INTERVAL_MS: u32 = 60 * 1000;

/// How often the state layer samples the trend.
pub const TREND_SAMPLE_INTERVAL_MS: u32 = 5 * 60 * 1000;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("bin {0} not found")]
    NotFound(u32),
}

/// Cumulative and rolling-24h waste counters. `accumulated_today` zeroes
/// when a check tick observes that a day has elapsed; the reset can lag by
/// up to the check interval but never fires early.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyWaste {
    pub total_liters: f64,
    pub accumulated_today: f64,
    pub last_reset_ms: i64,
}

impl DailyWaste {
    fn seeded(now_ms: i64) -> Self {
        Self {
            total_liters: 156.8,
            accumulated_today: 15.4,
            last_reset_ms: now_ms,
        }
    }

    fn add(&mut self, liters: f64) {
        self.total_liters += liters;
        self.accumulated_today += liters;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinStore {
    bins: Vec<BinEntity>,
    thresholds: HashMap<u32, u8>,
    alerts_configured: HashMap<u32, bool>,
    /// Bin id -> scheduled interval in hours.
    scheduled_collections: HashMap<u32, u32>,
    history: Vec<HistoryEntry>,
    next_history_id: i64,
    trend: TrendSeries,
    daily_waste: DailyWaste,
    system_online: bool,
}

impl BinStore {
    /// Build the fixed seed state.
    pub fn seeded(now_ms: i64) -> Self {
        let history = history::seed_history();
        let next_history_id = history.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self {
            bins: bins::seed_bins(),
            thresholds: HashMap::from([(1, 85), (2, 90), (3, 80), (4, 85)]),
            alerts_configured: HashMap::from([(1, false), (2, false), (3, false), (4, false)]),
            scheduled_collections: HashMap::new(),
            history,
            next_history_id,
            trend: trend::seed_trend(now_ms),
            daily_waste: DailyWaste::seeded(now_ms),
            system_online: true,
        }
    }

    // ---- reads ----

    pub fn bins(&self) -> &[BinEntity] {
        &self.bins
    }

    pub fn bin(&self, id: u32) -> Option<&BinEntity> {
        self.bins.iter().find(|b| b.id == id)
    }

    pub fn thresholds(&self) -> &HashMap<u32, u8> {
        &self.thresholds
    }

    pub fn threshold(&self, id: u32) -> u8 {
        self.thresholds.get(&id).copied().unwrap_or(80)
    }

    pub fn alerts_configured(&self) -> &HashMap<u32, bool> {
        &self.alerts_configured
    }

    pub fn scheduled_collections(&self) -> &HashMap<u32, u32> {
        &self.scheduled_collections
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn trend(&self) -> &TrendSeries {
        &self.trend
    }

    pub fn daily_waste(&self) -> &DailyWaste {
        &self.daily_waste
    }

    pub fn system_online(&self) -> bool {
        self.system_online
    }

    /// Unweighted mean fill level across all bins, rounded.
    pub fn average_fill_level(&self) -> u8 {
        if self.bins.is_empty() {
            return 0;
        }
        let sum: u32 = self.bins.iter().map(|b| u32::from(b.fill_level)).sum();
        ((sum as f64 / self.bins.len() as f64).round()) as u8
    }

    /// Liters currently sitting in the bins.
    pub fn current_waste_liters(&self) -> f64 {
        self.bins.iter().map(|b| b.volume_liters()).sum()
    }

    // ---- operations ----

    /// Empty one bin: credit its volume to the daily counters, log a history
    /// entry with the pre-reset readings, reset the bin, and force a trend
    /// point so the dip is visible immediately.
    pub fn empty_bin(&mut self, id: u32, now_ms: i64) -> Result<(), StoreError> {
        let bin = self
            .bins
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let fill_level = bin.fill_level;
        let volume = bin.volume_liters();
        let entry_seed = (bin.name.clone(), bin.volume_label());
        bin.mark_emptied();

        self.daily_waste.add(volume);
        if fill_level > 0 {
            let (bin_name, volume_label) = entry_seed;
            self.push_history(
                now_ms,
                CollectionAction::Emptied,
                bin_name,
                id,
                fill_level,
                volume_label,
            );
        }
        self.record_trend_sample(now_ms);
        Ok(())
    }

    /// Empty every bin holding waste in one state transition. Bins already
    /// at zero are skipped; each affected bin gets its own history entry,
    /// inserted newest-first as a block in bin order.
    pub fn empty_all_bins(&mut self, now_ms: i64) {
        let total: f64 = self.bins.iter().map(|b| b.volume_liters()).sum();
        self.daily_waste.add(total);

        let mut entries = Vec::new();
        for bin in &mut self.bins {
            if bin.fill_level > 0 {
                entries.push((bin.name.clone(), bin.id, bin.fill_level, bin.volume_label()));
            }
            bin.mark_emptied();
        }
        // Reverse so the block lands in bin order after repeated prepends.
        for (name, id, fill, volume) in entries.into_iter().rev() {
            self.push_history(now_ms, CollectionAction::Emptied, name, id, fill, volume);
        }
        self.record_trend_sample(now_ms);
    }

    /// Replace one bin's alert threshold. Keys are the caller's
    /// responsibility; no check against the bin set is made.
    pub fn set_threshold(&mut self, id: u32, percentage: u8) {
        self.thresholds.insert(id, percentage.clamp(50, 100));
    }

    pub fn set_alerts_configured(&mut self, id: u32, configured: bool) {
        self.alerts_configured.insert(id, configured);
    }

    /// Schedule a collection every `hours` for all bins.
    pub fn set_schedule_all(&mut self, hours: u32) {
        self.scheduled_collections = self.bins.iter().map(|b| (b.id, hours)).collect();
    }

    pub fn clear_schedule(&mut self) {
        self.scheduled_collections.clear();
    }

    /// Force-append a trend sample of the current average fill level.
    pub fn record_trend_sample(&mut self, now_ms: i64) {
        let level = self.average_fill_level();
        self.trend.sample(now_ms, level, true);
    }

    /// Raise fill levels by per-bin deltas (simulated accumulation).
    /// Unknown ids are ignored.
    pub fn simulate_fill(&mut self, deltas: &[(u32, u8)], now_ms: i64) {
        for (id, delta) in deltas {
            if let Some(bin) = self.bins.iter_mut().find(|b| b.id == *id) {
                bin.accumulate(*delta);
            }
        }
        self.record_trend_sample(now_ms);
    }

    // ---- periodic reducers ----

    /// Zero the daily accumulator once 24h have passed since the last reset.
    pub fn tick_daily_reset(&mut self, now_ms: i64) {
        if now_ms - self.daily_waste.last_reset_ms >= DAY_MS {
            self.daily_waste.last_reset_ms = now_ms;
            self.daily_waste.accumulated_today = 0.0;
        }
    }

    /// Periodic trend sample with merge-vs-append semantics: a sample taken
    /// within 30 minutes of the newest point amends it in place.
    pub fn tick_trend(&mut self, now_ms: i64) {
        let level = self.average_fill_level();
        self.trend.sample(now_ms, level, false);
    }

    /// Factory reset: every piece of state back to the fixed seeds.
    pub fn reset(&mut self, now_ms: i64) {
        *self = BinStore::seeded(now_ms);
    }

    fn push_history(
        &mut self,
        now_ms: i64,
        action: CollectionAction,
        bin_name: String,
        bin_id: u32,
        fill_level: u8,
        volume_label: String,
    ) {
        let id = self.next_history_id;
        self.next_history_id += 1;
        self.history.insert(
            0,
            HistoryEntry {
                id,
                timestamp_ms: now_ms,
                action,
                bin_name,
                bin_id,
                fill_level,
                volume_label,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bins::BinStatus;

    const T0: i64 = 1_700_000_000_000;

    #[test]
    fn empty_bin_captures_pre_reset_readings() {
        let mut store = BinStore::seeded(T0);
        let total_before = store.daily_waste().total_liters;
        let today_before = store.daily_waste().accumulated_today;
        let history_before = store.history().len();
        let trend_before = store.trend().len();

        // Bin 1 seeds at 85% of 5L.
        store.empty_bin(1, T0 + 1000).unwrap();

        let entry = &store.history()[0];
        assert_eq!(entry.fill_level, 85);
        assert_eq!(entry.volume_label, "4.25L");
        assert_eq!(entry.bin_id, 1);
        assert_eq!(entry.action, CollectionAction::Emptied);
        assert_eq!(store.history().len(), history_before + 1);

        let bin = store.bin(1).unwrap();
        assert_eq!(bin.fill_level, 0);
        assert_eq!(bin.volume_label(), "0.0L");
        assert_eq!(bin.status(), BinStatus::Normal);
        assert_eq!(bin.last_emptied.label(), "Just now");

        assert!((store.daily_waste().total_liters - total_before - 4.25).abs() < 1e-9);
        assert!((store.daily_waste().accumulated_today - today_before - 4.25).abs() < 1e-9);

        // The dip was force-appended.
        assert_eq!(store.trend().len(), trend_before + 1);
    }

    #[test]
    fn empty_bin_unknown_id_is_an_error() {
        let mut store = BinStore::seeded(T0);
        let before = store.clone();
        assert_eq!(store.empty_bin(99, T0), Err(StoreError::NotFound(99)));
        assert_eq!(store, before);
    }

    #[test]
    fn emptying_an_empty_bin_adds_nothing() {
        let mut store = BinStore::seeded(T0);
        store.empty_bin(3, T0).unwrap();
        let total = store.daily_waste().total_liters;
        let history_len = store.history().len();

        // Second empty: accumulator unchanged, no new history entry.
        store.empty_bin(3, T0 + 1000).unwrap();
        assert!((store.daily_waste().total_liters - total).abs() < 1e-9);
        assert_eq!(store.history().len(), history_len);
    }

    #[test]
    fn empty_all_bins_end_to_end() {
        let mut store = BinStore::seeded(T0);
        let total_before = store.daily_waste().total_liters;
        let history_before = store.history().len();

        store.empty_all_bins(T0 + 1000);

        for bin in store.bins() {
            assert_eq!(bin.fill_level, 0);
            assert_eq!(bin.status(), BinStatus::Normal);
        }

        assert_eq!(store.history().len(), history_before + 4);
        let newest: Vec<(u8, String)> = store.history()[..4]
            .iter()
            .map(|e| (e.fill_level, e.volume_label.clone()))
            .collect();
        assert_eq!(
            newest,
            vec![
                (85, "4.25L".to_string()),
                (95, "4.75L".to_string()),
                (60, "3.00L".to_string()),
                (78, "3.90L".to_string()),
            ]
        );

        assert!((store.daily_waste().total_liters - total_before - 15.90).abs() < 1e-9);
    }

    #[test]
    fn empty_all_skips_already_empty_bins() {
        let mut store = BinStore::seeded(T0);
        store.empty_bin(2, T0).unwrap();
        let history_before = store.history().len();

        store.empty_all_bins(T0 + 1000);
        // Bin 2 was already empty, so only three entries.
        assert_eq!(store.history().len(), history_before + 3);
        assert!(store.history()[..3].iter().all(|e| e.bin_id != 2));
    }

    #[test]
    fn daily_reset_fires_only_after_24h() {
        let mut store = BinStore::seeded(T0);
        assert!(store.daily_waste().accumulated_today > 0.0);

        const DAY: i64 = 24 * 60 * 60 * 1000;
        store.tick_daily_reset(T0 + DAY - 1);
        assert!(store.daily_waste().accumulated_today > 0.0);

        store.tick_daily_reset(T0 + DAY);
        assert_eq!(store.daily_waste().accumulated_today, 0.0);
        assert_eq!(store.daily_waste().last_reset_ms, T0 + DAY);
        // Cumulative total survives the reset.
        assert!(store.daily_waste().total_liters > 0.0);
    }

    #[test]
    fn trend_tick_merges_then_appends() {
        let mut store = BinStore::seeded(T0);
        let len = store.trend().len();

        // Within the merge window of the seed's newest point. The merge
        // re-stamps the newest point at +5 min.
        store.tick_trend(T0 + 5 * 60 * 1000);
        assert_eq!(store.trend().len(), len);

        // 31 minutes after the merged point: appends.
        store.tick_trend(T0 + 36 * 60 * 1000);
        assert_eq!(store.trend().len(), len + 1);
    }

    #[test]
    fn threshold_is_clamped_to_valid_range() {
        let mut store = BinStore::seeded(T0);
        store.set_threshold(1, 30);
        assert_eq!(store.threshold(1), 50);
        store.set_threshold(1, 95);
        assert_eq!(store.threshold(1), 95);
    }

    #[test]
    fn reset_restores_the_seed() {
        let mut store = BinStore::seeded(T0);
        store.empty_all_bins(T0 + 1000);
        store.set_threshold(1, 70);
        store.set_alerts_configured(1, true);
        store.set_schedule_all(24);

        store.reset(T0 + 2000);
        assert_eq!(store.bin(1).unwrap().fill_level, 85);
        assert_eq!(store.threshold(1), 85);
        assert_eq!(store.alerts_configured().get(&1), Some(&false));
        assert!(store.scheduled_collections().is_empty());
        assert_eq!(store.history().len(), 10);
    }

    #[test]
    fn average_fill_level_is_unweighted_mean() {
        let store = BinStore::seeded(T0);
        // (85 + 95 + 60 + 78) / 4 = 79.5 -> 80 rounded
        assert_eq!(store.average_fill_level(), 80);
    }
}
