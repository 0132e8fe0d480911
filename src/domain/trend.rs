//! Fill-Level Trend
//!
//! Rolling series of the average fill level across all bins, at most 24
//! points. Periodic samples taken within 30 minutes of the newest point
//! amend it in place instead of appending; user-visible mutations force an
//! append so the dip shows up immediately.

use serde::{Deserialize, Serialize};

/// Minimum age of the newest sample before a periodic sample appends.
pub const MERGE_WINDOW_MS: i64 = 30 * 60 * 1000;

/// Maximum number of retained points.
pub const MAX_POINTS: usize = 24;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// 12-hour clock label, e.g. "3PM".
    pub time_label: String,
    pub level: u8,
    pub timestamp_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendSeries {
    points: Vec<TrendPoint>,
}

impl TrendSeries {
    pub fn new(points: Vec<TrendPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Record a sample. With `force_append` the point is always pushed;
    /// otherwise a sample younger than the merge window overwrites the
    /// newest point in place. Either way the series is capped by evicting
    /// the oldest point.
    pub fn sample(&mut self, now_ms: i64, level: u8, force_append: bool) {
        let point = TrendPoint {
            time_label: hour_label_at(now_ms),
            level,
            timestamp_ms: now_ms,
        };

        match self.points.last_mut() {
            Some(last) if !force_append && now_ms - last.timestamp_ms <= MERGE_WINDOW_MS => {
                *last = point;
            }
            _ => {
                self.points.push(point);
                if self.points.len() > MAX_POINTS {
                    self.points.remove(0);
                }
            }
        }
    }
}

/// 12-hour clock label for an hour-of-day in 0..24.
pub fn hour_label(hour: u32) -> String {
    match hour {
        0 => "12AM".to_string(),
        1..=11 => format!("{}AM", hour),
        12 => "12PM".to_string(),
        _ => format!("{}PM", hour - 12),
    }
}

fn hour_label_at(now_ms: i64) -> String {
    let hour = chrono::DateTime::from_timestamp_millis(now_ms)
        .map(|dt| {
            use chrono::Timelike;
            dt.hour()
        })
        .unwrap_or(0);
    hour_label(hour)
}

/// Nine hourly points ramping up to the present, used as the seed.
pub fn seed_trend(now_ms: i64) -> TrendSeries {
    const HOUR_MS: i64 = 60 * 60 * 1000;
    let points = (0..=8)
        .map(|k| {
            let ts = now_ms - (8 - k) * HOUR_MS;
            TrendPoint {
                time_label: hour_label_at(ts),
                level: (20 + k as u8 * 12).min(95),
                timestamp_ms: ts,
            }
        })
        .collect();
    TrendSeries::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_700_000_000_000;

    #[test]
    fn close_samples_merge_into_one_slot() {
        let mut series = TrendSeries::default();
        series.sample(T0, 40, false);
        assert_eq!(series.len(), 1);

        // 10 minutes later: amend, not append.
        series.sample(T0 + 10 * 60 * 1000, 55, false);
        assert_eq!(series.len(), 1);
        assert_eq!(series.points()[0].level, 55);
        assert_eq!(series.points()[0].timestamp_ms, T0 + 10 * 60 * 1000);
    }

    #[test]
    fn spaced_samples_append() {
        let mut series = TrendSeries::default();
        series.sample(T0, 40, false);
        series.sample(T0 + 31 * 60 * 1000, 55, false);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn forced_samples_always_append() {
        let mut series = TrendSeries::default();
        series.sample(T0, 40, false);
        series.sample(T0 + 1000, 10, true);
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[1].level, 10);
    }

    #[test]
    fn series_is_capped_at_24_points() {
        let mut series = TrendSeries::default();
        for i in 0..30 {
            series.sample(T0 + i * 60 * 60 * 1000, 50, false);
        }
        assert_eq!(series.len(), MAX_POINTS);
        // Oldest points were evicted.
        assert_eq!(series.points()[0].timestamp_ms, T0 + 6 * 60 * 60 * 1000);
    }

    #[test]
    fn hour_labels_use_twelve_hour_clock() {
        assert_eq!(hour_label(0), "12AM");
        assert_eq!(hour_label(1), "1AM");
        assert_eq!(hour_label(11), "11AM");
        assert_eq!(hour_label(12), "12PM");
        assert_eq!(hour_label(13), "1PM");
        assert_eq!(hour_label(23), "11PM");
    }

    #[test]
    fn seed_has_nine_ramping_points() {
        let series = seed_trend(T0);
        assert_eq!(series.len(), 9);
        let levels: Vec<u8> = series.points().iter().map(|p| p.level).collect();
        assert_eq!(levels, vec![20, 32, 44, 56, 68, 80, 92, 95, 95]);
    }
}
