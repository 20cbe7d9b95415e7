//! Record filtering by demand year, month, client and region.

use std::collections::{BTreeSet, HashSet};

use frete_core::models::{FilterParams, ShipmentRecord};
use serde::Serialize;

/// Return the records of `records` that match every predicate in `params`.
///
/// A record without a demand date never matches. Empty client or region
/// lists keep everything for that dimension. Input order is preserved.
pub fn filter_records<'a>(
    records: &'a [ShipmentRecord],
    params: &FilterParams,
) -> Vec<&'a ShipmentRecord> {
    records.iter().filter(|r| matches(r, params)).collect()
}

/// Whether a single record passes all four predicates.
pub fn matches(record: &ShipmentRecord, params: &FilterParams) -> bool {
    matches_period(record, params)
        && matches_member(&record.client, &params.clients)
        && matches_member(&record.region, &params.regions)
}

/// Year-only view over the full record set.
pub fn records_for_year(records: &[ShipmentRecord], year: i32) -> Vec<&ShipmentRecord> {
    filter_records(records, &FilterParams::for_year(year))
}

fn matches_period(record: &ShipmentRecord, params: &FilterParams) -> bool {
    match (record.demand_year(), record.demand_month()) {
        (Some(year), Some(month)) => year == params.year && params.month.matches(month),
        _ => false,
    }
}

fn matches_member(value: &str, selection: &[String]) -> bool {
    selection.is_empty() || selection.iter().any(|s| s == value)
}

// ── FilterOptions ─────────────────────────────────────────────────────────────

/// Choices available for each filter dimension of a loaded dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Distinct demand years, most recent first.
    pub years: Vec<i32>,
    /// Distinct demand months of the selected year, ascending.
    pub months: Vec<u32>,
    /// Distinct non-empty clients in first-seen order.
    pub clients: Vec<String>,
    /// Distinct non-empty regions in first-seen order.
    pub regions: Vec<String>,
}

impl FilterOptions {
    /// Collect the options from `records`; months are restricted to `year`.
    pub fn from_records(records: &[ShipmentRecord], year: Option<i32>) -> Self {
        let years: BTreeSet<i32> = records.iter().filter_map(|r| r.demand_year()).collect();

        let months: BTreeSet<u32> = records
            .iter()
            .filter(|r| year.is_some() && r.demand_year() == year)
            .filter_map(|r| r.demand_month())
            .collect();

        Self {
            years: years.into_iter().rev().collect(),
            months: months.into_iter().collect(),
            clients: distinct_in_order(records.iter().map(|r| r.client.as_str())),
            regions: distinct_in_order(records.iter().map(|r| r.region.as_str())),
        }
    }
}

/// The most recent demand year present, if any record has a demand date.
pub fn latest_year(records: &[ShipmentRecord]) -> Option<i32> {
    records.iter().filter_map(|r| r.demand_year()).max()
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
