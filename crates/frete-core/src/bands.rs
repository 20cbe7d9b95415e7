//! Fixed ordered bands for the timing metrics.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::models::{ShipmentRecord, TimingMetric};

/// One of the eight mutually exclusive categories a timing metric falls in.
///
/// Variants are declared in presentation order, so the derived `Ord` is the
/// band order with `Invalid` last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Band {
    /// `< 0`
    A,
    /// `[0, 2]`
    B,
    /// `(2, 4]`
    C,
    /// `(4, 6]`
    D,
    /// `(6, 8]`
    E,
    /// `(8, 10]`
    F,
    /// `> 10`
    G,
    /// Missing value.
    Invalid,
}

impl Band {
    /// The seven valid bands in presentation order; `Invalid` is excluded.
    pub const ORDERED: [Band; 7] = [
        Band::A,
        Band::B,
        Band::C,
        Band::D,
        Band::E,
        Band::F,
        Band::G,
    ];

    /// Display label used by the dashboards.
    pub fn label(&self) -> &'static str {
        match self {
            Band::A => "A - < 0",
            Band::B => "B - [1-2]",
            Band::C => "C - [3-4]",
            Band::D => "D - [5-6]",
            Band::E => "E - [7-8]",
            Band::F => "F - [9-10]",
            Band::G => "G - > 10",
            Band::Invalid => "Inválido",
        }
    }

    /// Whether this is one of the seven bands shown in distributions.
    pub fn is_valid(&self) -> bool {
        *self != Band::Invalid
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Band {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

// ── BandClassifier ────────────────────────────────────────────────────────────

/// Maps metric values onto [`Band`]s.
pub struct BandClassifier;

impl BandClassifier {
    /// Classify a numeric-or-missing value.
    ///
    /// Every band is open below and closed above, except B which is closed on
    /// both ends. `None` and NaN are `Invalid`.
    pub fn classify(value: Option<f64>) -> Band {
        let Some(v) = value else {
            return Band::Invalid;
        };
        if v.is_nan() {
            Band::Invalid
        } else if v < 0.0 {
            Band::A
        } else if v <= 2.0 {
            Band::B
        } else if v <= 4.0 {
            Band::C
        } else if v <= 6.0 {
            Band::D
        } else if v <= 8.0 {
            Band::E
        } else if v <= 10.0 {
            Band::F
        } else {
            Band::G
        }
    }

    /// Classify an integer metric as produced by
    /// [`crate::calculations::MetricDeriver`].
    pub fn classify_whole(value: Option<i64>) -> Band {
        Self::classify(value.map(|v| v as f64))
    }
}

// ── ClassifiedRecord ──────────────────────────────────────────────────────────

/// A record of a filtered view together with its three band labels.
#[derive(Debug, Clone, Copy)]
pub struct ClassifiedRecord<'a> {
    pub record: &'a ShipmentRecord,
    pub load_lag_band: Band,
    pub transit_lag_band: Band,
    pub dwell_band: Band,
}

impl<'a> ClassifiedRecord<'a> {
    /// Classify the three metrics of an enriched record.
    pub fn new(record: &'a ShipmentRecord) -> Self {
        Self {
            record,
            load_lag_band: BandClassifier::classify_whole(TimingMetric::LoadLag.value(record)),
            transit_lag_band: BandClassifier::classify_whole(
                TimingMetric::TransitLag.value(record),
            ),
            dwell_band: BandClassifier::classify_whole(TimingMetric::Dwell.value(record)),
        }
    }

    /// The band assigned to `metric`.
    pub fn band(&self, metric: TimingMetric) -> Band {
        match metric {
            TimingMetric::LoadLag => self.load_lag_band,
            TimingMetric::TransitLag => self.transit_lag_band,
            TimingMetric::Dwell => self.dwell_band,
        }
    }
}

/// Classify every record of a filtered view.
pub fn classify_view<'a>(records: &[&'a ShipmentRecord]) -> Vec<ClassifiedRecord<'a>> {
    records.iter().map(|&r| ClassifiedRecord::new(r)).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
