use chrono::NaiveDateTime;

use crate::models::{DerivedMetrics, ShipmentRecord};
use crate::time_utils::{whole_days_between, whole_hours_between};

// ── MetricDeriver ─────────────────────────────────────────────────────────────

/// Stateless collection of the per-record timing calculations.
pub struct MetricDeriver;

impl MetricDeriver {
    /// Whole days from demand to loading; `None` if either date is missing.
    pub fn load_lag_days(record: &ShipmentRecord) -> Option<i64> {
        Self::day_lag(record.demand_date, record.load_date)
    }

    /// Whole days from loading to ETA at the client; `None` if either date is
    /// missing.
    pub fn transit_lag_days(record: &ShipmentRecord) -> Option<i64> {
        Self::day_lag(record.load_date, record.eta_arrival_date)
    }

    /// Whole hours from ETA at the client to departure from it.
    ///
    /// Unlike the two day lags a missing endpoint yields `0`, which later
    /// classifies into band B rather than `Invalid`.
    pub fn dwell_hours(record: &ShipmentRecord) -> i64 {
        match (record.eta_arrival_date, record.client_departure_date) {
            (Some(arrival), Some(departure)) => whole_hours_between(arrival, departure),
            _ => 0,
        }
    }

    /// Compute all three metrics for `record`.
    pub fn derive(record: &ShipmentRecord) -> DerivedMetrics {
        DerivedMetrics {
            load_lag_days: Self::load_lag_days(record),
            transit_lag_days: Self::transit_lag_days(record),
            dwell_hours: Self::dwell_hours(record),
        }
    }

    /// Fill in `metrics` on every record in place.
    pub fn enrich(records: &mut [ShipmentRecord]) {
        for record in records.iter_mut() {
            record.metrics = Self::derive(record);
        }
    }

    fn day_lag(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Option<i64> {
        Some(whole_days_between(start?, end?))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
