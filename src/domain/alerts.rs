//! Alert Evaluation
//!
//! Scans bin state against thresholds and emits at most one alert per
//! (subject, class) within a cooldown window. The evaluator performs no IO;
//! the component layer turns the returned alerts into toasts.

use std::collections::HashMap;

use super::bins::BinEntity;

const MINUTE_MS: i64 = 60 * 1000;

/// Per-bin alert cooldown.
pub const BIN_COOLDOWN_MS: i64 = 10 * MINUTE_MS;
/// Cooldown for the system-wide multiple-critical alert.
pub const SYSTEM_COOLDOWN_MS: i64 = 15 * MINUTE_MS;
/// Cooldown for the collection reminder.
pub const REMINDER_COOLDOWN_MS: i64 = 2 * 60 * MINUTE_MS;

/// Hours since last empty before the collection reminder applies.
pub const REMINDER_HOURS: u32 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlertClass {
    Critical,
    Threshold,
    Warning,
    MultipleCritical,
    CollectionReminder,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertSeverity {
    Error,
    Warning,
    Info,
}

/// One user-facing notification.
#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    pub class: AlertClass,
    pub severity: AlertSeverity,
    pub title: String,
    pub body: String,
}

/// Which alert classes the user has enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotificationPrefs {
    pub bin_full: bool,
    pub system_alerts: bool,
    pub collection_reminder: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            bin_full: true,
            system_alerts: true,
            collection_reminder: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Subject {
    Bin(u32),
    System,
}

/// Stateful evaluator: remembers when each (subject, class) alert last
/// fired so repeats are suppressed inside the cooldown.
#[derive(Clone, Debug, Default)]
pub struct AlertEvaluator {
    last_fired: HashMap<(Subject, AlertClass), i64>,
}

impl AlertEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate every rule against the current bin state. Per bin the rules
    /// are checked in precedence order and the first match wins.
    pub fn evaluate(
        &mut self,
        bins: &[BinEntity],
        thresholds: &HashMap<u32, u8>,
        alerts_configured: &HashMap<u32, bool>,
        prefs: NotificationPrefs,
        now_ms: i64,
    ) -> Vec<Alert> {
        let mut alerts = Vec::new();

        if prefs.bin_full || prefs.system_alerts {
            for bin in bins {
                if let Some(alert) = self.evaluate_bin(bin, thresholds, alerts_configured, now_ms) {
                    alerts.push(alert);
                }
            }
        }

        if prefs.system_alerts {
            if let Some(alert) = self.evaluate_multiple_critical(bins, now_ms) {
                alerts.push(alert);
            }
        }

        if prefs.collection_reminder {
            if let Some(alert) = self.evaluate_collection_reminder(bins, now_ms) {
                alerts.push(alert);
            }
        }

        alerts
    }

    fn evaluate_bin(
        &mut self,
        bin: &BinEntity,
        thresholds: &HashMap<u32, u8>,
        alerts_configured: &HashMap<u32, bool>,
        now_ms: i64,
    ) -> Option<Alert> {
        let configured = alerts_configured.get(&bin.id).copied().unwrap_or(false);
        let threshold = thresholds.get(&bin.id).copied().unwrap_or(100);

        let (class, severity, title, body) = if bin.fill_level >= 90 {
            (
                AlertClass::Critical,
                AlertSeverity::Error,
                format!("Critical: {}", bin.name),
                format!(
                    "{}% full ({}) - empty immediately",
                    bin.fill_level,
                    bin.volume_label()
                ),
            )
        } else if configured && bin.fill_level >= threshold {
            (
                AlertClass::Threshold,
                AlertSeverity::Warning,
                format!("Threshold reached: {}", bin.name),
                format!(
                    "{}% full - your set threshold of {}% has been reached",
                    bin.fill_level, threshold
                ),
            )
        } else if bin.fill_level >= 75 {
            (
                AlertClass::Warning,
                AlertSeverity::Warning,
                format!("Warning: {}", bin.name),
                format!(
                    "{}% full ({}) - consider emptying soon",
                    bin.fill_level,
                    bin.volume_label()
                ),
            )
        } else {
            return None;
        };

        self.try_fire(Subject::Bin(bin.id), class, BIN_COOLDOWN_MS, now_ms)
            .then(|| Alert {
                class,
                severity,
                title,
                body,
            })
    }

    fn evaluate_multiple_critical(&mut self, bins: &[BinEntity], now_ms: i64) -> Option<Alert> {
        let critical = bins.iter().filter(|b| b.fill_level >= 90).count();
        if critical <= 1 {
            return None;
        }
        self.try_fire(
            Subject::System,
            AlertClass::MultipleCritical,
            SYSTEM_COOLDOWN_MS,
            now_ms,
        )
        .then(|| Alert {
            class: AlertClass::MultipleCritical,
            severity: AlertSeverity::Error,
            title: "Multiple critical bins!".to_string(),
            body: format!("{} bins need immediate attention", critical),
        })
    }

    fn evaluate_collection_reminder(&mut self, bins: &[BinEntity], now_ms: i64) -> Option<Alert> {
        let overdue = bins
            .iter()
            .filter(|b| b.last_emptied.hours() >= REMINDER_HOURS)
            .count();
        if overdue == 0 {
            return None;
        }
        self.try_fire(
            Subject::System,
            AlertClass::CollectionReminder,
            REMINDER_COOLDOWN_MS,
            now_ms,
        )
        .then(|| Alert {
            class: AlertClass::CollectionReminder,
            severity: AlertSeverity::Info,
            title: "Collection reminder".to_string(),
            body: format!("{} bins haven't been emptied in 6+ hours", overdue),
        })
    }

    /// Record the firing if the cooldown allows it.
    fn try_fire(&mut self, subject: Subject, class: AlertClass, cooldown_ms: i64, now_ms: i64) -> bool {
        let key = (subject, class);
        let last = self.last_fired.get(&key).copied();
        if last.is_some_and(|t| now_ms - t < cooldown_ms) {
            return false;
        }
        self.last_fired.insert(key, now_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bins::seed_bins;

    const T0: i64 = 1_700_000_000_000;

    fn fixtures() -> (Vec<BinEntity>, HashMap<u32, u8>, HashMap<u32, bool>) {
        let bins = seed_bins();
        let thresholds = HashMap::from([(1, 85), (2, 90), (3, 80), (4, 85)]);
        let configured = HashMap::from([(1, false), (2, false), (3, false), (4, false)]);
        (bins, thresholds, configured)
    }

    #[test]
    fn critical_takes_precedence_over_threshold() {
        let (mut bins, thresholds, mut configured) = fixtures();
        bins[1].fill_level = 95;
        configured.insert(2, true);

        let mut eval = AlertEvaluator::new();
        let alerts = eval.evaluate(&bins, &thresholds, &configured, NotificationPrefs::default(), T0);
        let bin2: Vec<_> = alerts
            .iter()
            .filter(|a| a.title.contains("Plastic"))
            .collect();
        assert_eq!(bin2.len(), 1);
        assert_eq!(bin2[0].class, AlertClass::Critical);
    }

    #[test]
    fn threshold_fires_only_when_configured() {
        let (mut bins, thresholds, mut configured) = fixtures();
        // 86 >= threshold 85 but below the warning band ceiling: threshold
        // only applies once configured; otherwise this is a plain warning.
        bins[0].fill_level = 86;

        let mut eval = AlertEvaluator::new();
        let alerts = eval.evaluate(&bins, &thresholds, &configured, NotificationPrefs::default(), T0);
        let a = alerts.iter().find(|a| a.title.contains("Organic")).unwrap();
        assert_eq!(a.class, AlertClass::Warning);

        configured.insert(1, true);
        let mut eval = AlertEvaluator::new();
        let alerts = eval.evaluate(&bins, &thresholds, &configured, NotificationPrefs::default(), T0);
        let a = alerts.iter().find(|a| a.title.contains("Organic")).unwrap();
        assert_eq!(a.class, AlertClass::Threshold);
    }

    #[test]
    fn quiet_bins_raise_nothing() {
        let (mut bins, thresholds, configured) = fixtures();
        for bin in &mut bins {
            bin.fill_level = 40;
            bin.last_emptied = crate::domain::bins::LastEmptied::HoursAgo(1);
        }
        let mut eval = AlertEvaluator::new();
        let alerts = eval.evaluate(&bins, &thresholds, &configured, NotificationPrefs::default(), T0);
        assert!(alerts.is_empty());
    }

    #[test]
    fn cooldown_suppresses_then_allows() {
        let (bins, thresholds, configured) = fixtures();
        let mut eval = AlertEvaluator::new();

        let first = eval.evaluate(&bins, &thresholds, &configured, NotificationPrefs::default(), T0);
        assert!(first.iter().any(|a| a.class == AlertClass::Critical));

        // 5 minutes later: suppressed.
        let second = eval.evaluate(
            &bins,
            &thresholds,
            &configured,
            NotificationPrefs::default(),
            T0 + 5 * MINUTE_MS,
        );
        assert!(!second.iter().any(|a| a.class == AlertClass::Critical));

        // 11 minutes later: allowed again.
        let third = eval.evaluate(
            &bins,
            &thresholds,
            &configured,
            NotificationPrefs::default(),
            T0 + 11 * MINUTE_MS,
        );
        assert!(third.iter().any(|a| a.class == AlertClass::Critical));
    }

    #[test]
    fn multiple_critical_fires_above_one() {
        let (mut bins, thresholds, configured) = fixtures();
        let mut eval = AlertEvaluator::new();

        // Seed has a single critical bin: no system alert.
        let alerts = eval.evaluate(&bins, &thresholds, &configured, NotificationPrefs::default(), T0);
        assert!(!alerts.iter().any(|a| a.class == AlertClass::MultipleCritical));

        bins[0].fill_level = 92;
        let mut eval = AlertEvaluator::new();
        let alerts = eval.evaluate(&bins, &thresholds, &configured, NotificationPrefs::default(), T0);
        let sys = alerts
            .iter()
            .find(|a| a.class == AlertClass::MultipleCritical)
            .unwrap();
        assert!(sys.body.contains("2 bins"));
    }

    #[test]
    fn collection_reminder_counts_overdue_bins() {
        let (mut bins, thresholds, configured) = fixtures();
        bins[1].last_emptied = crate::domain::bins::LastEmptied::HoursAgo(7);

        let mut eval = AlertEvaluator::new();
        let alerts = eval.evaluate(&bins, &thresholds, &configured, NotificationPrefs::default(), T0);
        let reminder = alerts
            .iter()
            .find(|a| a.class == AlertClass::CollectionReminder)
            .unwrap();
        assert_eq!(reminder.severity, AlertSeverity::Info);

        // Within the 2h cooldown nothing re-fires.
        let again = eval.evaluate(
            &bins,
            &thresholds,
            &configured,
            NotificationPrefs::default(),
            T0 + 60 * MINUTE_MS,
        );
        assert!(!again.iter().any(|a| a.class == AlertClass::CollectionReminder));
    }

    #[test]
    fn disabled_prefs_silence_their_classes() {
        let (bins, thresholds, configured) = fixtures();
        let prefs = NotificationPrefs {
            bin_full: false,
            system_alerts: false,
            collection_reminder: false,
        };
        let mut eval = AlertEvaluator::new();
        let alerts = eval.evaluate(&bins, &thresholds, &configured, prefs, T0);
        assert!(alerts.is_empty());
    }
}
