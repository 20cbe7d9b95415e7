//! Grouped summaries over a filtered view of shipment records.

use std::collections::{BTreeMap, HashMap};

use frete_core::bands::{Band, ClassifiedRecord};
use frete_core::models::{CategoryField, NumericField, ShipmentRecord, TimingMetric};
use frete_core::time_utils::month_name;
use serde::Serialize;

use crate::filter::records_for_year;

// ── Output rows ───────────────────────────────────────────────────────────────

/// Number of records sharing one categorical value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub key: String,
    pub count: usize,
}

/// Sum of a numeric field for one categorical value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotal {
    pub key: String,
    pub total: f64,
}

/// Number of records in one timing band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandCount {
    pub band: Band,
    pub count: usize,
}

/// Shipped volume for one calendar month of the selected year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyVolume {
    /// 1–12.
    pub month: u32,
    pub month_name: String,
    pub volume: f64,
}

// ── ShipmentAggregator ────────────────────────────────────────────────────────

/// Stateless helper producing the dashboard series.
pub struct ShipmentAggregator;

impl ShipmentAggregator {
    /// Count records per value of `field`, largest group first.
    ///
    /// Groups with equal counts keep the order in which they were first
    /// encountered. Blank values are not counted. With `top_n` the result is
    /// truncated to that many groups.
    pub fn value_counts(
        view: &[&ShipmentRecord],
        field: CategoryField,
        top_n: Option<usize>,
    ) -> Vec<CategoryCount> {
        let mut groups: Vec<(&str, usize)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for record in view {
            let key = field.value(record);
            if key.is_empty() {
                continue;
            }
            match positions.get(key) {
                Some(&idx) => groups[idx].1 += 1,
                None => {
                    positions.insert(key, groups.len());
                    groups.push((key, 1));
                }
            }
        }

        // `sort_by` is stable, so first-seen order survives among ties.
        groups.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(n) = top_n {
            groups.truncate(n);
        }

        groups
            .into_iter()
            .map(|(key, count)| CategoryCount {
                key: key.to_string(),
                count,
            })
            .collect()
    }

    /// Sum `sum_field` per value of `group_field`, largest total first.
    ///
    /// Missing values contribute nothing, so a group whose values are all
    /// missing totals `0.0`. Equal totals are ordered by key.
    pub fn sum_by_group(
        view: &[&ShipmentRecord],
        group_field: CategoryField,
        sum_field: NumericField,
    ) -> Vec<GroupTotal> {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for record in view {
            let key = group_field.value(record);
            if key.is_empty() {
                continue;
            }
            *totals.entry(key).or_insert(0.0) += sum_field.value(record).unwrap_or(0.0);
        }

        let mut rows: Vec<GroupTotal> = totals
            .into_iter()
            .map(|(key, total)| GroupTotal {
                key: key.to_string(),
                total,
            })
            .collect();
        rows.sort_by(|a, b| b.total.total_cmp(&a.total));
        rows
    }

    /// Count records per band of `metric` in the fixed A–G order.
    ///
    /// Every valid band is present, with `0` when no record falls in it.
    /// `Invalid` records are left out.
    pub fn band_distribution(
        view: &[ClassifiedRecord<'_>],
        metric: TimingMetric,
    ) -> Vec<BandCount> {
        let mut counts: HashMap<Band, usize> = HashMap::new();
        for band in view.iter().map(|c| c.band(metric)).filter(Band::is_valid) {
            *counts.entry(band).or_insert(0) += 1;
        }

        Band::ORDERED
            .iter()
            .map(|&band| BandCount {
                band,
                count: counts.get(&band).copied().unwrap_or(0),
            })
            .collect()
    }

    /// Volume per demand month of `year`, in calendar order.
    ///
    /// Takes the full record set and applies only the year filter, so the
    /// result does not depend on any month, client or region selection.
    /// Months without records are absent.
    pub fn monthly_series(records: &[ShipmentRecord], year: i32) -> Vec<MonthlyVolume> {
        let mut by_month: BTreeMap<u32, f64> = BTreeMap::new();
        for record in records_for_year(records, year) {
            if let Some(month) = record.demand_month() {
                *by_month.entry(month).or_insert(0.0) += record.volume.unwrap_or(0.0);
            }
        }

        by_month
            .into_iter()
            .map(|(month, volume)| MonthlyVolume {
                month,
                month_name: month_name(month).unwrap_or_default().to_string(),
                volume,
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
