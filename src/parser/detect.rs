//! Delimiter and schema detection for delimited-text logs.
//!
//! Consumer drone apps export "CSV" files with inconsistent separators and
//! column names, so both are inferred from a small leading sample before
//! any row is processed. Literal separators are unambiguous and detected
//! from the header alone; whitespace-separated exports need a majority
//! vote over the data lines because their column counts vary line to line.

use crate::error::{ParseError, Result};
use crate::types::{Delimiter, Schema};
use std::collections::HashMap;

/// Number of lines (header included) sampled for delimiter detection.
pub const SAMPLE_LINES: usize = 6;

/// Header tokens recognized as the latitude column.
const LAT_TOKENS: [&str; 3] = ["lat", "latitude", "y"];

/// Header tokens recognized as the longitude column. "longtitude" is a
/// misspelling that ships in real exports.
const LON_TOKENS: [&str; 5] = ["lon", "longitude", "longtitude", "lng", "x"];

/// Infer the field separator from a sample of raw lines.
///
/// The header (first sample line) is scanned for literal delimiters in
/// priority order comma > tab > semicolon > pipe; the first one present
/// wins outright. With no literal present, whitespace-run mode is selected
/// when the most frequent whitespace-split field count among the remaining
/// sample lines lands within two fields of the header's own count
/// (tolerating merged or missing trailing fields). Anything else falls
/// back to comma.
pub fn detect_delimiter(sample: &[String]) -> Delimiter {
    let header = match sample.first() {
        Some(line) => line.as_str(),
        None => return Delimiter::Comma,
    };

    for delimiter in Delimiter::LITERALS {
        if let Some(ch) = delimiter.as_char() {
            if header.contains(ch) {
                return delimiter;
            }
        }
    }

    let header_count = header.split_whitespace().count();
    if header_count < 2 {
        return Delimiter::Comma;
    }

    let mut count_votes: HashMap<usize, usize> = HashMap::new();
    for line in sample.iter().skip(1) {
        let fields = line.split_whitespace().count();
        if fields > 0 {
            *count_votes.entry(fields).or_insert(0) += 1;
        }
    }

    // The larger field count wins a frequency tie.
    let majority = count_votes
        .into_iter()
        .max_by_key(|&(count, votes)| (votes, count))
        .map(|(count, _)| count);

    match majority {
        Some(count) if count <= header_count && count + 2 >= header_count => {
            Delimiter::Whitespace
        }
        _ => Delimiter::Comma,
    }
}

/// Resolve latitude/longitude column positions from a header line.
///
/// Matching is exact-token: each field is trimmed and lower-cased, then
/// compared against the known alias sets. Substring matching is not used
/// (a column named "latency" must not resolve as latitude). The first
/// field satisfying each predicate wins, independently per direction.
pub fn resolve_schema(header: &str, delimiter: Delimiter) -> Result<Schema> {
    let fields = delimiter.split(header);
    let mut lat_index = None;
    let mut lon_index = None;

    for (i, field) in fields.iter().enumerate() {
        let token = field.trim().to_ascii_lowercase();
        if lat_index.is_none() && LAT_TOKENS.contains(&token.as_str()) {
            lat_index = Some(i);
        }
        if lon_index.is_none() && LON_TOKENS.contains(&token.as_str()) {
            lon_index = Some(i);
        }
    }

    match (lat_index, lon_index) {
        (Some(lat_index), Some(lon_index)) => Ok(Schema {
            lat_index,
            lon_index,
            field_count: fields.len(),
        }),
        (lat, lon) => Err(ParseError::MissingColumns {
            latitude_found: lat.is_some(),
            longitude_found: lon.is_some(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_literal_delimiters_detected_from_header() {
        assert_eq!(detect_delimiter(&sample(&["lat,lon"])), Delimiter::Comma);
        assert_eq!(detect_delimiter(&sample(&["lat\tlon"])), Delimiter::Tab);
        assert_eq!(
            detect_delimiter(&sample(&["lat;lon"])),
            Delimiter::Semicolon
        );
        assert_eq!(detect_delimiter(&sample(&["lat|lon"])), Delimiter::Pipe);
    }

    #[test]
    fn test_literal_priority_when_several_present() {
        // Comma outranks everything, tab outranks semicolon and pipe.
        assert_eq!(
            detect_delimiter(&sample(&["lat,lon;alt|speed"])),
            Delimiter::Comma
        );
        assert_eq!(
            detect_delimiter(&sample(&["lat\tlon;alt|speed"])),
            Delimiter::Tab
        );
        assert_eq!(
            detect_delimiter(&sample(&["lat;lon|alt"])),
            Delimiter::Semicolon
        );
    }

    #[test]
    fn test_whitespace_run_selected_on_exact_count_match() {
        let lines = sample(&[
            "time   lat    lon    alt",
            "1   50.0   10.0   100",
            "2   50.1   10.1   101",
            "3   50.2   10.2   102",
        ]);
        assert_eq!(detect_delimiter(&lines), Delimiter::Whitespace);
    }

    #[test]
    fn test_whitespace_run_tolerates_two_missing_trailing_fields() {
        let lines = sample(&[
            "time  lat  lon  alt  speed",
            "1  50.0  10.0",
            "2  50.1  10.1",
            "3  50.2  10.2  102  4.5",
        ]);
        // Majority count 3 is within [5 - 2, 5].
        assert_eq!(detect_delimiter(&lines), Delimiter::Whitespace);
    }

    #[test]
    fn test_whitespace_run_rejected_outside_tolerance() {
        let lines = sample(&[
            "time lat lon alt speed sats",
            "free text here",
            "another note line",
            "more words in here",
        ]);
        // Majority count 3 is below 6 - 2, so the default wins.
        assert_eq!(detect_delimiter(&lines), Delimiter::Comma);
    }

    #[test]
    fn test_whitespace_run_rejected_above_header_count() {
        let lines = sample(&[
            "lat lon",
            "one two three four",
            "five six seven eight",
        ]);
        assert_eq!(detect_delimiter(&lines), Delimiter::Comma);
    }

    #[test]
    fn test_comma_fallback_without_data_lines() {
        assert_eq!(detect_delimiter(&sample(&["lat lon"])), Delimiter::Comma);
        assert_eq!(detect_delimiter(&sample(&["header"])), Delimiter::Comma);
        assert_eq!(detect_delimiter(&[]), Delimiter::Comma);
    }

    #[test]
    fn test_blank_sample_lines_do_not_vote() {
        let lines = sample(&["time lat lon", "", "1 50.0 10.0", "   ", "2 50.1 10.1"]);
        assert_eq!(detect_delimiter(&lines), Delimiter::Whitespace);
    }

    #[test]
    fn test_schema_resolution_comma() {
        let schema = resolve_schema("lat,lon", Delimiter::Comma).unwrap();
        assert_eq!(schema.lat_index, 0);
        assert_eq!(schema.lon_index, 1);
        assert_eq!(schema.field_count, 2);
    }

    #[test]
    fn test_schema_resolution_is_case_insensitive() {
        let schema = resolve_schema("Time;Latitude;Longitude", Delimiter::Semicolon).unwrap();
        assert_eq!(schema.lat_index, 1);
        assert_eq!(schema.lon_index, 2);
        assert_eq!(schema.field_count, 3);
    }

    #[test]
    fn test_schema_xy_aliases() {
        let schema = resolve_schema("time,x,y", Delimiter::Comma).unwrap();
        assert_eq!(schema.lon_index, 1);
        assert_eq!(schema.lat_index, 2);
    }

    #[test]
    fn test_schema_accepts_longtitude_misspelling() {
        let schema = resolve_schema("lat,longtitude", Delimiter::Comma).unwrap();
        assert_eq!(schema.lon_index, 1);
    }

    #[test]
    fn test_schema_first_match_wins_per_direction() {
        let schema = resolve_schema("lat,latitude,lng,lon", Delimiter::Comma).unwrap();
        assert_eq!(schema.lat_index, 0);
        assert_eq!(schema.lon_index, 2);
    }

    #[test]
    fn test_schema_whitespace_mode() {
        let schema = resolve_schema("time   lat   lon", Delimiter::Whitespace).unwrap();
        assert_eq!(schema.lat_index, 1);
        assert_eq!(schema.lon_index, 2);
        assert_eq!(schema.field_count, 3);
    }

    #[test]
    fn test_schema_fields_are_trimmed() {
        let schema = resolve_schema(" lat , lon ", Delimiter::Comma).unwrap();
        assert_eq!(schema.lat_index, 0);
        assert_eq!(schema.lon_index, 1);
    }

    #[test]
    fn test_latency_does_not_match_latitude() {
        match resolve_schema("latency,lon", Delimiter::Comma) {
            Err(ParseError::MissingColumns {
                latitude_found,
                longitude_found,
            }) => {
                assert!(!latitude_found);
                assert!(longitude_found);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_schema_missing_both_columns() {
        match resolve_schema("time,alt,speed", Delimiter::Comma) {
            Err(ParseError::MissingColumns {
                latitude_found,
                longitude_found,
            }) => {
                assert!(!latitude_found);
                assert!(!longitude_found);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }
}
