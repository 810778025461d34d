//! ISO6709-style composite location string parsing
//!
//! Capture devices embed the coordinate as three concatenated signed
//! decimals (latitude, longitude, altitude) with an optional trailing
//! slash, e.g. `+51.5074+000.1278+010.000/`. The whole string must match;
//! a malformed or truncated string yields `Unknown` rather than an error
//! so one bad asset never stops a batch.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, VerifyError};
use crate::record::{Coordinate, Field};

// Three signed decimal groups bound positionally to lat, lon, alt.
// Anchored at both ends: trailing junk invalidates the whole string, and
// two-group strings (no altitude) are rejected wholesale.
static ISO6709: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-]\d+(?:\.\d+)?)([+-]\d+(?:\.\d+)?)([+-]\d+(?:\.\d+)?)/?$")
        .expect("ISO6709 pattern is valid")
});

/// Parse a composite location string into a coordinate.
///
/// Returns [`Field::Unknown`] for an absent, empty, or malformed string;
/// never fails hard.
///
/// # Example
///
/// ```
/// use geofence_verify::{parse_iso6709, Field};
///
/// let coord = parse_iso6709(Some("+51.5074+000.1278+010.000/"));
/// let coord = coord.as_known().unwrap();
/// assert_eq!(coord.latitude, 51.5074);
/// assert_eq!(coord.longitude, 0.1278);
/// assert_eq!(coord.altitude, Some(10.0));
///
/// assert_eq!(parse_iso6709(None), Field::Unknown);
/// ```
pub fn parse_iso6709(raw: Option<&str>) -> Field<Coordinate> {
    match raw {
        Some(s) if !s.is_empty() => parse_iso6709_strict(s).ok().into(),
        _ => Field::Unknown,
    }
}

/// Strict variant: parse a composite location string or report why not.
///
/// Same format as [`parse_iso6709`], but a mismatch is returned as
/// [`VerifyError::MalformedLocationString`] carrying the offending value.
pub fn parse_iso6709_strict(raw: &str) -> Result<Coordinate> {
    let malformed = || VerifyError::MalformedLocationString {
        value: raw.to_string(),
    };

    let caps = ISO6709.captures(raw).ok_or_else(malformed)?;

    // The pattern only admits sign+digits groups, so f64 parsing cannot
    // fail; parse defensively anyway and treat overflow as malformed.
    let mut groups = [0.0f64; 3];
    for (i, slot) in groups.iter_mut().enumerate() {
        match caps[i + 1].parse::<f64>() {
            Ok(v) if v.is_finite() => *slot = v,
            _ => return Err(malformed()),
        }
    }

    Ok(Coordinate::new(groups[0], groups[1], Some(groups[2])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_full_three_group_string() {
        let coord = parse_iso6709(Some("+51.5074+000.1278+010.000/"));
        let coord = coord.as_known().expect("should parse");

        assert_eq!(coord.latitude, 51.5074);
        assert_eq!(coord.longitude, 0.1278);
        assert_eq!(coord.altitude, Some(10.0));
    }

    #[test]
    fn test_parses_without_trailing_slash() {
        let coord = parse_iso6709(Some("+40.7580-073.9855+005.0"));
        let coord = coord.as_known().expect("should parse");

        assert_eq!(coord.latitude, 40.758);
        assert_eq!(coord.longitude, -73.9855);
        assert_eq!(coord.altitude, Some(5.0));
    }

    #[test]
    fn test_parses_integer_groups() {
        let coord = parse_iso6709(Some("-33+151+0/"));
        let coord = coord.as_known().expect("should parse");

        assert_eq!(coord.latitude, -33.0);
        assert_eq!(coord.longitude, 151.0);
        assert_eq!(coord.altitude, Some(0.0));
    }

    #[test]
    fn test_absent_and_empty_are_unknown() {
        assert_eq!(parse_iso6709(None), Field::Unknown);
        assert_eq!(parse_iso6709(Some("")), Field::Unknown);
    }

    #[test]
    fn test_two_group_string_rejected_wholesale() {
        // Devices that omit altitude produce two groups; the strict format
        // rejects these rather than degrading to a lat/lon-only result.
        assert_eq!(parse_iso6709(Some("+51.5074+000.1278/")), Field::Unknown);
        assert_eq!(parse_iso6709(Some("+51.5074+000.1278")), Field::Unknown);
    }

    #[test]
    fn test_trailing_junk_invalidates_whole_string() {
        assert_eq!(
            parse_iso6709(Some("+51.5074+000.1278+010.000/CRS84")),
            Field::Unknown
        );
        assert_eq!(
            parse_iso6709(Some("loc=+51.5074+000.1278+010.000/")),
            Field::Unknown
        );
    }

    #[test]
    fn test_unsigned_groups_rejected() {
        assert_eq!(parse_iso6709(Some("51.5074+000.1278+010.000/")), Field::Unknown);
    }

    #[test]
    fn test_non_numeric_rejected() {
        assert_eq!(parse_iso6709(Some("+lat+lon+alt/")), Field::Unknown);
        assert_eq!(parse_iso6709(Some("+51.50.74+000.1278+010.000/")), Field::Unknown);
    }

    #[test]
    fn test_strict_variant_reports_offending_value() {
        let err = parse_iso6709_strict("+51.5074+000.1278/").unwrap_err();
        match err {
            VerifyError::MalformedLocationString { value } => {
                assert_eq!(value, "+51.5074+000.1278/")
            }
            other => panic!("expected MalformedLocationString, got: {other:?}"),
        }
        assert!(!parse_iso6709_strict("junk").unwrap_err().is_fatal());
    }
}
