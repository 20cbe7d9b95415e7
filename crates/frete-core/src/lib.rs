//! Domain types and pure calculations for the return-freight dashboard.
//!
//! Holds the shipment model, the timing metrics and their bands, value
//! parsing, locale formatting, CLI settings and the shared error type.

pub mod bands;
pub mod calculations;
pub mod data_processors;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{FreteError, Result};
