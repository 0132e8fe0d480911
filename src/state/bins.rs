//! Bin Data State
//!
//! Reactive wrapper around the simulated bin store. The store itself is a
//! pure reducer over a passed-in clock; this layer owns the clock and the
//! two background intervals that drive the periodic reducers.

use leptos::*;

use crate::domain::store::{
    BinStore, StoreError, DAILY_CHECK_INTERVAL_MS, TREND_SAMPLE_INTERVAL_MS,
};

/// Current wall clock in epoch milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[derive(Clone, Copy)]
pub struct BinData {
    pub store: RwSignal<BinStore>,
}

/// Install the bin store and start the background ticks. Called once from
/// the root component; the intervals live for the life of the page.
pub fn provide_bin_data() {
    let store = create_rw_signal(BinStore::seeded(now_ms()));

    gloo_timers::callback::Interval::new(DAILY_CHECK_INTERVAL_MS, move || {
        store.update(|s| s.tick_daily_reset(now_ms()));
    })
    .forget();

    gloo_timers::callback::Interval::new(TREND_SAMPLE_INTERVAL_MS, move || {
        store.update(|s| s.tick_trend(now_ms()));
    })
    .forget();

    provide_context(BinData { store });
}

impl BinData {
    pub fn empty_bin(&self, id: u32) -> Result<(), StoreError> {
        let mut result = Ok(());
        self.store.update(|s| result = s.empty_bin(id, now_ms()));
        result
    }

    pub fn empty_all_bins(&self) {
        self.store.update(|s| s.empty_all_bins(now_ms()));
    }

    pub fn set_threshold(&self, id: u32, percentage: u8) {
        self.store.update(|s| s.set_threshold(id, percentage));
    }

    pub fn set_alerts_configured(&self, id: u32, configured: bool) {
        self.store.update(|s| s.set_alerts_configured(id, configured));
    }

    pub fn set_schedule_all(&self, hours: u32) {
        self.store.update(|s| s.set_schedule_all(hours));
    }

    pub fn clear_schedule(&self) {
        self.store.update(|s| s.clear_schedule());
    }

    pub fn simulate_fill(&self, deltas: &[(u32, u8)]) {
        self.store.update(|s| s.simulate_fill(deltas, now_ms()));
    }

    pub fn reset(&self) {
        self.store.update(|s| s.reset(now_ms()));
    }
}
