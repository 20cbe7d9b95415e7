//! Brazilian-locale number formatting for reports.
//!
//! The pipeline only ever handles plain `f64`/`usize` values; separators are
//! applied here, at presentation time.

const THOUSANDS_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';

/// Format a floating-point number with `.` thousands separators, a `,`
/// decimal separator and a fixed number of decimal places.
///
/// # Examples
///
/// ```
/// use frete_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1.234,5");
/// assert_eq!(format_number(1234567.0, 0), "1.234.567");
/// assert_eq!(format_number(0.0, 2), "0,00");
/// assert_eq!(format_number(-9876.5, 1), "-9.876,5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    // Handle the sign separately so the thousands grouping works on the
    // absolute value.
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Round to the requested decimal places.
    // Add a tiny epsilon (half ULP at the target precision) before rounding
    // to avoid IEEE 754 binary-representation issues at exact midpoints.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        // `frac_str` starts with "0.", e.g. "0.50"; keep only the digits.
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        let digits = frac_str.get(2..).unwrap_or("");
        format!("{}{}{}", grouped, DECIMAL_SEPARATOR, digits)
    };

    if negative && rounded != 0.0 {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a record count the way the order total card shows it.
///
/// # Examples
///
/// ```
/// use frete_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(12_345), "12.345");
/// ```
pub fn format_count(count: usize) -> String {
    group_thousands(&count.to_string())
}

/// Format a shipped volume with two decimals.
pub fn format_volume(volume: f64) -> String {
    format_number(volume, 2)
}

/// Format an already computed percentage with one decimal and a `%` sign.
///
/// ```
/// use frete_core::formatting::format_percent;
///
/// assert_eq!(format_percent(25.0), "25,0%");
/// ```
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_number(value, 1))
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
///
/// # Examples
///
/// ```
/// use frete_core::formatting::percentage;
///
/// assert!((percentage(50.0, 200.0, 1) - 25.0).abs() < 1e-9);
/// assert_eq!(percentage(0.0, 0.0, 2), 0.0);
/// ```
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let raw = (part / whole) * 100.0;
    let factor = 10_f64.powi(decimal_places as i32);
    (raw * factor).round() / factor
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert a separator every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(THOUSANDS_SEPARATOR);
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
