use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

// ── TimestampProcessor ────────────────────────────────────────────────────────

/// Parses timestamps from the text forms found in exported freight tables.
///
/// Parsing is permissive: anything unrecognised is `None`, never an error.
pub struct TimestampProcessor;

impl TimestampProcessor {
    /// Strftime patterns tried in order after RFC 3339.
    ///
    /// Slash dates are day-first, as the source spreadsheets are Brazilian.
    const FORMATS: &'static [&'static str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
        "%d/%m/%Y",
    ];

    /// Parse a cell's text into a naive timestamp.
    ///
    /// Handles:
    /// * blank text → `None`
    /// * RFC 3339 with `Z` or an offset → the local wall-clock time
    /// * ISO-8601 date or date-time without offset
    /// * `DD/MM/YYYY` with optional `HH:MM[:SS]`
    pub fn parse_str(s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.naive_local());
        }

        for fmt in Self::FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(naive);
            }
            // date-only patterns use NaiveDate.
            if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
                return date.and_hms_opt(0, 0, 0);
            }
        }

        debug!(
            "TimestampProcessor: could not parse timestamp string \"{}\"",
            s
        );
        None
    }
}

// ── DecimalProcessor ──────────────────────────────────────────────────────────

/// Parses numbers written with either `.` or `,` as the decimal separator.
pub struct DecimalProcessor;

impl DecimalProcessor {
    /// Parse `s` into an `f64`.
    ///
    /// When a comma is present it is the decimal separator and every dot is a
    /// thousands separator (`"1.234,5"` → `1234.5`). Otherwise the text is
    /// parsed as-is. Blank or non-numeric text gives `None`.
    pub fn parse_str(s: &str) -> Option<f64> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        let normalised = if s.contains(',') {
            s.replace('.', "").replace(',', ".")
        } else {
            s.to_string()
        };

        match normalised.parse::<f64>() {
            Ok(v) if v.is_finite() => Some(v),
            _ => {
                debug!("DecimalProcessor: could not parse number \"{}\"", s);
                None
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
