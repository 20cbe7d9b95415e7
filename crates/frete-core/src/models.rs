use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timing metrics computed once per record after loading.
///
/// The two day lags stay `None` when either endpoint is missing; dwell time
/// never does (see [`crate::calculations::MetricDeriver`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Whole days between demand and loading.
    pub load_lag_days: Option<i64>,
    /// Whole days between loading and ETA at the client.
    pub transit_lag_days: Option<i64>,
    /// Whole hours spent at the client between arrival and departure.
    pub dwell_hours: i64,
}

/// A single return-freight shipment read from one row of the input table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipmentRecord {
    /// Client group (raw column `Grupo`, aliased to `Cliente`).
    pub client: String,
    /// Transported product.
    pub product: String,
    /// Shipped volume; `None` when the cell could not be read as a number.
    pub volume: Option<f64>,
    /// Region / perimeter (`Perimetro`).
    pub region: String,
    /// Loading base (`Base Carregamento`).
    pub load_base: String,
    /// SLA flag (`SLA 2`).
    pub sla_flag: String,
    /// Delivery status (`Status da Entrega`).
    pub delivery_status: String,
    /// When the freight was requested.
    pub demand_date: Option<NaiveDateTime>,
    /// When the truck was loaded.
    pub load_date: Option<NaiveDateTime>,
    /// Estimated arrival at the client.
    pub eta_arrival_date: Option<NaiveDateTime>,
    /// Departure from the client.
    pub client_departure_date: Option<NaiveDateTime>,
    /// Timing metrics; all defaults until the record has been enriched.
    #[serde(default)]
    pub metrics: DerivedMetrics,
}

impl ShipmentRecord {
    /// Calendar year of the demand date, if present.
    pub fn demand_year(&self) -> Option<i32> {
        self.demand_date.map(|d| d.year())
    }

    /// Calendar month (1–12) of the demand date, if present.
    pub fn demand_month(&self) -> Option<u32> {
        self.demand_date.map(|d| d.month())
    }
}

// ── Field selectors ───────────────────────────────────────────────────────────

/// Categorical columns that aggregations can group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryField {
    Client,
    Product,
    Region,
    LoadBase,
    SlaFlag,
    DeliveryStatus,
}

impl CategoryField {
    /// Borrow the field's value from `record`.
    pub fn value<'a>(&self, record: &'a ShipmentRecord) -> &'a str {
        match self {
            Self::Client => &record.client,
            Self::Product => &record.product,
            Self::Region => &record.region,
            Self::LoadBase => &record.load_base,
            Self::SlaFlag => &record.sla_flag,
            Self::DeliveryStatus => &record.delivery_status,
        }
    }
}

/// Numeric columns that aggregations can sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    Volume,
    LoadLagDays,
    TransitLagDays,
    DwellHours,
}

impl NumericField {
    /// Read the field from `record`; `None` means missing.
    pub fn value(&self, record: &ShipmentRecord) -> Option<f64> {
        match self {
            Self::Volume => record.volume,
            Self::LoadLagDays => record.metrics.load_lag_days.map(|v| v as f64),
            Self::TransitLagDays => record.metrics.transit_lag_days.map(|v| v as f64),
            Self::DwellHours => Some(record.metrics.dwell_hours as f64),
        }
    }
}

/// The three derived timing metrics that get banded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingMetric {
    LoadLag,
    TransitLag,
    Dwell,
}

impl TimingMetric {
    /// Read the metric from an enriched record.
    pub fn value(&self, record: &ShipmentRecord) -> Option<i64> {
        match self {
            Self::LoadLag => record.metrics.load_lag_days,
            Self::TransitLag => record.metrics.transit_lag_days,
            Self::Dwell => Some(record.metrics.dwell_hours),
        }
    }
}

// ── MonthSelection ────────────────────────────────────────────────────────────

/// Month filter: either every month of the year or a single month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthSelection {
    #[default]
    All,
    Month(u32),
}

impl MonthSelection {
    /// Whether a demand month passes this selection.
    pub fn matches(&self, month: u32) -> bool {
        match self {
            Self::All => true,
            Self::Month(m) => *m == month,
        }
    }
}

impl FromStr for MonthSelection {
    type Err = String;

    /// Accepts `all` / `todos` (any case) or a month number 1–12.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("todos") {
            return Ok(Self::All);
        }
        match trimmed.parse::<u32>() {
            Ok(m) if (1..=12).contains(&m) => Ok(Self::Month(m)),
            _ => Err(format!("invalid month \"{}\": expected 'all' or 1-12", s)),
        }
    }
}

impl fmt::Display for MonthSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Month(m) => write!(f, "{}", m),
        }
    }
}

// ── FilterParams ──────────────────────────────────────────────────────────────

/// Everything the record filter needs, passed explicitly on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Demand year to keep.
    pub year: i32,
    /// Demand month to keep, or all of them.
    #[serde(default)]
    pub month: MonthSelection,
    /// Clients to keep; empty keeps every client.
    #[serde(default)]
    pub clients: Vec<String>,
    /// Regions to keep; empty keeps every region.
    #[serde(default)]
    pub regions: Vec<String>,
}

impl FilterParams {
    /// Parameters that only restrict the year.
    pub fn for_year(year: i32) -> Self {
        Self {
            year,
            month: MonthSelection::All,
            clients: Vec::new(),
            regions: Vec::new(),
        }
    }
}
