//! Data layer for the return-freight dashboard.
//!
//! Responsible for reading the shipment table (CSV or spreadsheet), filtering
//! records by period, client and region, aggregating the dashboard series and
//! running the top-level dashboard pipeline.

pub mod aggregator;
pub mod analysis;
pub mod filter;
pub mod reader;

pub use frete_core as core;
