//! Dashboard pipeline for return-freight shipments.
//!
//! Loads and enriches the records once, then builds a [`Dashboard`] for any
//! parameter set: filtered view, band classification and every grouped
//! series, ready for the report renderer or JSON output.

use std::path::Path;
use std::time::Instant;

use chrono::Local;
use frete_core::bands::classify_view;
use frete_core::calculations::MetricDeriver;
use frete_core::error::Result;
use frete_core::formatting::percentage;
use frete_core::models::{
    CategoryField, FilterParams, NumericField, ShipmentRecord, TimingMetric,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregator::{BandCount, CategoryCount, MonthlyVolume, ShipmentAggregator};
use crate::filter::filter_records;
use crate::reader::load_shipments;

/// Number of clients shown in the ranking.
pub const TOP_CLIENTS: usize = 10;

// ── Public types ──────────────────────────────────────────────────────────────

/// Total volume of one product and its share of the view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductVolume {
    pub product: String,
    pub volume: f64,
    /// Percent of the view's total volume, one decimal.
    pub share: f64,
}

/// Metadata produced alongside the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardMetadata {
    /// ISO-8601 timestamp when this dashboard was generated.
    pub generated_at: String,
    /// Records in the loaded dataset.
    pub records_loaded: usize,
    /// Records left after filtering.
    pub records_in_view: usize,
    /// The parameters the view was built with.
    pub params: FilterParams,
    /// Wall-clock seconds spent filtering and aggregating.
    pub build_time_seconds: f64,
}

/// Every series shown for one parameter set.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub total_orders: usize,
    pub product_volume: Vec<ProductVolume>,
    pub top_clients: Vec<CategoryCount>,
    pub load_bases: Vec<CategoryCount>,
    pub sla: Vec<CategoryCount>,
    pub delivery_status: Vec<CategoryCount>,
    pub load_lag_bands: Vec<BandCount>,
    pub transit_lag_bands: Vec<BandCount>,
    pub dwell_bands: Vec<BandCount>,
    /// Full-year trend; unaffected by month, client and region.
    pub monthly_volume: Vec<MonthlyVolume>,
    pub metadata: DashboardMetadata,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Load the table at `path` and derive the timing metrics of every record.
pub fn load_dataset(path: &Path) -> Result<Vec<ShipmentRecord>> {
    let load_start = Instant::now();
    let mut records = load_shipments(path)?;
    let load_time = load_start.elapsed().as_secs_f64();

    MetricDeriver::enrich(&mut records);

    info!(
        "Dataset ready: {} records in {:.3}s",
        records.len(),
        load_time
    );
    Ok(records)
}

/// Build the dashboard for `params` over enriched `records`.
///
/// 1. Filter by year, month, client and region.
/// 2. Classify the view's timing metrics into bands.
/// 3. Aggregate the categorical, band and volume series.
/// 4. Compute the monthly series from the year-only view.
pub fn build_dashboard(records: &[ShipmentRecord], params: &FilterParams) -> Dashboard {
    let build_start = Instant::now();

    // ── Step 1: Filter ────────────────────────────────────────────────────────
    let view = filter_records(records, params);
    debug!(
        "Filtered {} of {} records for {:?}",
        view.len(),
        records.len(),
        params
    );

    // ── Step 2: Classify ──────────────────────────────────────────────────────
    let classified = classify_view(&view);

    // ── Step 3: Aggregate ─────────────────────────────────────────────────────
    let product_volume = product_shares(&view);
    let top_clients =
        ShipmentAggregator::value_counts(&view, CategoryField::Client, Some(TOP_CLIENTS));
    let load_bases = ShipmentAggregator::value_counts(&view, CategoryField::LoadBase, None);
    let sla = ShipmentAggregator::value_counts(&view, CategoryField::SlaFlag, None);
    let delivery_status =
        ShipmentAggregator::value_counts(&view, CategoryField::DeliveryStatus, None);

    let load_lag_bands = ShipmentAggregator::band_distribution(&classified, TimingMetric::LoadLag);
    let transit_lag_bands =
        ShipmentAggregator::band_distribution(&classified, TimingMetric::TransitLag);
    let dwell_bands = ShipmentAggregator::band_distribution(&classified, TimingMetric::Dwell);

    // ── Step 4: Monthly trend ─────────────────────────────────────────────────
    let monthly_volume = ShipmentAggregator::monthly_series(records, params.year);

    let metadata = DashboardMetadata {
        generated_at: Local::now().to_rfc3339(),
        records_loaded: records.len(),
        records_in_view: view.len(),
        params: params.clone(),
        build_time_seconds: build_start.elapsed().as_secs_f64(),
    };

    Dashboard {
        total_orders: view.len(),
        product_volume,
        top_clients,
        load_bases,
        sla,
        delivery_status,
        load_lag_bands,
        transit_lag_bands,
        dwell_bands,
        monthly_volume,
        metadata,
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// Volume per product with each product's share of the total.
fn product_shares(view: &[&ShipmentRecord]) -> Vec<ProductVolume> {
    let totals =
        ShipmentAggregator::sum_by_group(view, CategoryField::Product, NumericField::Volume);
    let grand_total: f64 = totals.iter().map(|t| t.total).sum();

    totals
        .into_iter()
        .map(|t| ProductVolume {
            share: percentage(t.total, grand_total, 1),
            product: t.key,
            volume: t.total,
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
