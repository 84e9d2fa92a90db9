//! Conversions between `DateTime<Utc>` and the seconds-since-epoch strings
//! both wire formats carry.
//!
//! Seconds travel as `f64`, so a round trip keeps roughly microsecond
//! precision for present-day dates. Whole seconds render with a trailing
//! `.0` (`1700000000.0`) because the value is formatted with `{:?}`.

use chrono::{DateTime, Utc};

/// Encoded stand-in for an absent date.
pub const DATE_SENTINEL: &str = "0";

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Seconds since the Unix epoch, including the fractional part.
pub fn to_seconds(ts: &DateTime<Utc>) -> f64 {
    ts.timestamp() as f64 + f64::from(ts.timestamp_subsec_nanos()) / NANOS_PER_SEC
}

/// Inverse of [`to_seconds`]. Returns `None` for non-finite values and for
/// values outside the range `chrono` can represent.
pub fn from_seconds(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let mut nanos = ((secs - whole) * NANOS_PER_SEC).round() as u32;
    let mut whole = whole as i64;
    if nanos >= 1_000_000_000 {
        whole = whole.checked_add(1)?;
        nanos -= 1_000_000_000;
    }
    DateTime::from_timestamp(whole, nanos)
}

pub(crate) fn format_seconds(ts: &DateTime<Utc>) -> String {
    format!("{:?}", to_seconds(ts))
}

/// Absent dates encode as [`DATE_SENTINEL`].
pub(crate) fn format_optional(ts: Option<&DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => format_seconds(ts),
        None => DATE_SENTINEL.to_string(),
    }
}

pub(crate) fn parse_seconds(raw: &str) -> Option<DateTime<Utc>> {
    raw.parse::<f64>().ok().and_then(from_seconds)
}

/// True when `raw` is numerically zero (`"0"`, `"0.0"`, `"-0"`, ...).
pub(crate) fn is_sentinel(raw: &str) -> bool {
    raw.parse::<f64>().is_ok_and(|secs| secs == 0.0)
}
