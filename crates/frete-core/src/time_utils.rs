use chrono::{NaiveDateTime, TimeDelta};

const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

/// English month names, January first.
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// ── Whole-unit spans ──────────────────────────────────────────────────────────

/// Floor of `delta` measured in units of `unit_secs` seconds.
///
/// `TimeDelta::num_seconds` truncates toward zero and carries a negative
/// `subsec_nanos` for negative spans, so one extra second is borrowed before
/// the euclidean division to land on the floor.
fn floor_units(delta: TimeDelta, unit_secs: i64) -> i64 {
    let mut secs = delta.num_seconds();
    if delta.subsec_nanos() < 0 {
        secs -= 1;
    }
    secs.div_euclid(unit_secs)
}

/// Whole days from `start` to `end`, rounded toward negative infinity.
pub fn whole_days_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    floor_units(end - start, SECONDS_PER_DAY)
}

/// Whole hours from `start` to `end`, rounded toward negative infinity.
pub fn whole_hours_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    floor_units(end - start, SECONDS_PER_HOUR)
}

// ── Month names ───────────────────────────────────────────────────────────────

/// Full English name for `month` (1–12), or `None` outside that range.
pub fn month_name(month: u32) -> Option<&'static str> {
    let idx = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(idx).copied()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_whole_days_positive() {
        assert_eq!(
            whole_days_between(ts(2024, 1, 1, 0, 0), ts(2024, 1, 5, 0, 0)),
            4
        );
        // 3 days 23 hours still counts as 3.
        assert_eq!(
            whole_days_between(ts(2024, 1, 1, 0, 0), ts(2024, 1, 4, 23, 0)),
            3
        );
    }

    #[test]
    fn test_whole_days_negative_floors() {
        // One hour backwards is day -1, not 0.
        assert_eq!(
            whole_days_between(ts(2024, 1, 5, 1, 0), ts(2024, 1, 5, 0, 0)),
            -1
        );
        assert_eq!(
            whole_days_between(ts(2024, 1, 5, 0, 0), ts(2024, 1, 3, 0, 0)),
            -2
        );
    }

    #[test]
    fn test_whole_days_zero() {
        let t = ts(2024, 1, 5, 12, 0);
        assert_eq!(whole_days_between(t, t), 0);
    }

    #[test]
    fn test_whole_hours_discards_fraction() {
        assert_eq!(
            whole_hours_between(ts(2024, 1, 10, 8, 0), ts(2024, 1, 10, 14, 30)),
            6
        );
    }

    #[test]
    fn test_whole_hours_negative_floors() {
        assert_eq!(
            whole_hours_between(ts(2024, 1, 10, 8, 30), ts(2024, 1, 10, 8, 0)),
            -1
        );
    }

    #[test]
    fn test_whole_hours_sub_second_negative() {
        let start = ts(2024, 1, 10, 8, 0);
        let end = start - TimeDelta::milliseconds(1);
        assert_eq!(whole_hours_between(start, end), -1);
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }
}
