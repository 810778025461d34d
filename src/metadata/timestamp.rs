//! Capture timestamp normalization
//!
//! Some capture devices write the timezone offset without the separating
//! colon (`2024-06-09T12:25:04-0400`). The parser repairs that form to the
//! extended `-04:00` convention before parsing. The offset is kept on the
//! result as data only; date and time stay in the device-local frame.

use chrono::DateTime;

use crate::error::{Result, VerifyError};
use crate::record::{CaptureTimestamp, Field};

/// Parse a vendor creation-timestamp string into date and time-of-day.
///
/// Returns [`Field::Unknown`] for an absent or malformed string; never
/// fails hard.
///
/// # Example
///
/// ```
/// use geofence_verify::parse_timestamp;
///
/// let ts = parse_timestamp(Some("2024-06-09T12:25:04-0400"));
/// let ts = ts.as_known().unwrap();
/// assert_eq!(ts.date.to_string(), "2024-06-09");
/// assert_eq!(ts.time.to_string(), "12:25:04");
/// ```
pub fn parse_timestamp(raw: Option<&str>) -> Field<CaptureTimestamp> {
    match raw {
        Some(s) if !s.is_empty() => parse_timestamp_strict(s).ok().into(),
        _ => Field::Unknown,
    }
}

/// Strict variant: parse a creation-timestamp string or report why not.
///
/// Same repair and format as [`parse_timestamp`], but a failure is
/// returned as [`VerifyError::MalformedTimestamp`] carrying the value.
pub fn parse_timestamp_strict(raw: &str) -> Result<CaptureTimestamp> {
    let repaired = repair_offset(raw);

    DateTime::parse_from_rfc3339(&repaired)
        .map(|dt| CaptureTimestamp {
            date: dt.date_naive(),
            time: dt.time(),
            offset: *dt.offset(),
        })
        .map_err(|_| VerifyError::MalformedTimestamp {
            value: raw.to_string(),
        })
}

/// Insert the missing colon into a trailing `±HHMM` offset.
///
/// Strings already carrying `±HH:MM` (or no offset at all) pass through
/// unchanged; the check requires the sign so a bare trailing digit run
/// (e.g. a basic-format date) is not rewritten.
fn repair_offset(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let n = bytes.len();
    if n >= 5
        && (bytes[n - 5] == b'+' || bytes[n - 5] == b'-')
        && bytes[n - 4..].iter().all(u8::is_ascii_digit)
    {
        format!("{}:{}", &raw[..n - 2], &raw[n - 2..])
    } else {
        raw.to_string()
    }
}
