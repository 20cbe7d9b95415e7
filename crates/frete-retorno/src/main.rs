mod bootstrap;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use frete_core::error::FreteError;
use frete_core::settings::{Settings, DEFAULT_DATA_FILE};
use frete_data::analysis::{build_dashboard, load_dataset};
use frete_data::filter::{latest_year, FilterOptions};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Frete Retorno v{} starting", env!("CARGO_PKG_VERSION"));

    let file = settings
        .file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
    tracing::info!(
        "File: {}, Month: {}, Format: {}",
        file.display(),
        settings.month,
        settings.format
    );

    let records = load_dataset(&file)
        .with_context(|| format!("could not load shipments from {}", file.display()))?;

    if let Err(e) = settings.save_last_used() {
        tracing::warn!("Could not save last-used settings: {}", e);
    }

    let year = settings.year.or_else(|| latest_year(&records));

    if settings.list_options {
        let options = FilterOptions::from_records(&records, year);
        if settings.format == "json" {
            println!("{}", serde_json::to_string_pretty(&options)?);
        } else {
            print!("{}", render::render_options(&options, year));
        }
        return Ok(());
    }

    let Some(year) = year else {
        return Err(FreteError::Config(format!(
            "no demand dates found in {}; pass --year explicitly",
            file.display()
        ))
        .into());
    };

    let params = settings.filter_params(year);
    let dashboard = build_dashboard(&records, &params);
    tracing::debug!(
        "Dashboard built in {:.3}s",
        dashboard.metadata.build_time_seconds
    );

    match settings.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&dashboard)?),
        _ => print!("{}", render::render_dashboard(&dashboard)),
    }

    Ok(())
}
