//! Plain-text rendering of the dashboard for the terminal.

use frete_core::formatting::{format_count, format_percent, format_volume};
use frete_core::models::{FilterParams, MonthSelection};
use frete_core::time_utils::month_name;
use frete_data::aggregator::{BandCount, CategoryCount};
use frete_data::analysis::Dashboard;
use frete_data::filter::FilterOptions;
use unicode_width::UnicodeWidthStr;

const INDENT: &str = "  ";
const EMPTY_SECTION: &str = "(no data)";

// ── Public API ────────────────────────────────────────────────────────────────

/// Render the whole dashboard as an aligned text report.
pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();

    out.push_str(&title(&dashboard.metadata.params));
    out.push('\n');
    out.push_str(&format!(
        "Total orders: {}\n",
        format_count(dashboard.total_orders)
    ));

    let products: Vec<Vec<String>> = dashboard
        .product_volume
        .iter()
        .map(|p| {
            vec![
                p.product.clone(),
                format_volume(p.volume),
                format_percent(p.share),
            ]
        })
        .collect();
    push_section(&mut out, "Volume by product", &products);

    push_section(&mut out, "Top clients", &count_rows(&dashboard.top_clients));
    push_section(&mut out, "Load bases", &count_rows(&dashboard.load_bases));
    push_section(&mut out, "SLA", &count_rows(&dashboard.sla));
    push_section(
        &mut out,
        "Delivery status",
        &count_rows(&dashboard.delivery_status),
    );

    push_section(
        &mut out,
        "Demand to loading (days)",
        &band_rows(&dashboard.load_lag_bands),
    );
    push_section(
        &mut out,
        "Loading to client ETA (days)",
        &band_rows(&dashboard.transit_lag_bands),
    );
    push_section(
        &mut out,
        "Time at client (hours)",
        &band_rows(&dashboard.dwell_bands),
    );

    let months: Vec<Vec<String>> = dashboard
        .monthly_volume
        .iter()
        .map(|m| vec![m.month_name.clone(), format_volume(m.volume)])
        .collect();
    push_section(
        &mut out,
        &format!("Monthly volume {}", dashboard.metadata.params.year),
        &months,
    );

    out
}

/// Render the values each filter accepts.
pub fn render_options(options: &FilterOptions, year: Option<i32>) -> String {
    let join_or_none = |values: Vec<String>| {
        if values.is_empty() {
            "-".to_string()
        } else {
            values.join(", ")
        }
    };

    let years = join_or_none(options.years.iter().map(|y| y.to_string()).collect());
    let months = join_or_none(
        options
            .months
            .iter()
            .map(|&m| format!("{} ({})", m, month_name(m).unwrap_or_default()))
            .collect(),
    );

    let rows = vec![
        vec!["Years".to_string(), years],
        vec![
            match year {
                Some(y) => format!("Months in {}", y),
                None => "Months".to_string(),
            },
            months,
        ],
        vec!["Clients".to_string(), join_or_none(options.clients.clone())],
        vec!["Regions".to_string(), join_or_none(options.regions.clone())],
    ];

    let mut out = String::new();
    for line in align(&rows, false) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn title(params: &FilterParams) -> String {
    let month = match params.month {
        MonthSelection::All => "all months".to_string(),
        MonthSelection::Month(m) => month_name(m).unwrap_or_default().to_string(),
    };
    let selection = |values: &[String]| {
        if values.is_empty() {
            "all".to_string()
        } else {
            values.join(", ")
        }
    };
    format!(
        "Return freight: {} {}\nClients: {} | Regions: {}\n",
        month,
        params.year,
        selection(&params.clients),
        selection(&params.regions)
    )
}

fn count_rows(counts: &[CategoryCount]) -> Vec<Vec<String>> {
    counts
        .iter()
        .map(|c| vec![c.key.clone(), format_count(c.count)])
        .collect()
}

fn band_rows(bands: &[BandCount]) -> Vec<Vec<String>> {
    bands
        .iter()
        .map(|b| vec![b.band.label().to_string(), format_count(b.count)])
        .collect()
}

fn push_section(out: &mut String, heading: &str, rows: &[Vec<String>]) {
    out.push('\n');
    out.push_str(heading);
    out.push('\n');
    if rows.is_empty() {
        out.push_str(INDENT);
        out.push_str(EMPTY_SECTION);
        out.push('\n');
        return;
    }
    for line in align(rows, true) {
        out.push_str(INDENT);
        out.push_str(&line);
        out.push('\n');
    }
}

/// Pad every column to its widest cell by display width.
///
/// The first column is left-aligned; the others are right-aligned when
/// `numeric` is set.
fn align(rows: &[Vec<String>], numeric: bool) -> Vec<String> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .filter_map(|r| r.get(col))
                .map(|cell| UnicodeWidthStr::width(cell.as_str()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    rows.iter()
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let pad = " ".repeat(widths[col] - UnicodeWidthStr::width(cell.as_str()));
                    if col > 0 && numeric {
                        format!("{}{}", pad, cell)
                    } else {
                        format!("{}{}", cell, pad)
                    }
                })
                .collect();
            cells.join("  ").trim_end().to_string()
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
