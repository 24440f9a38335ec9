//! Tabular coordinate extraction.
//!
//! Streams a delimited-text log row by row using the schema detected from
//! the leading sample, converts the indexed fields to coordinates and
//! assembles the flight path. Individual bad values are expected noise
//! (sensor dropouts, blank telemetry) and skip only their row; a row whose
//! width disagrees with the header means the schema assumption is wrong
//! for the whole file and aborts the parse under the strict policy.

use crate::error::{ParseError, Result};
use crate::geometry::{assemble_line_string, MIN_LINE_POINTS};
use crate::observer::{NoopObserver, ParseObserver};
use crate::parser::detect::{detect_delimiter, resolve_schema, SAMPLE_LINES};
use crate::types::{Delimiter, RowPolicy, Schema};
use geo::LineString;
use std::io::BufRead;

/// Parse a delimited-text log under the strict row policy.
pub fn parse_tabular<R: BufRead>(reader: R) -> Result<LineString<f64>> {
    parse_tabular_with(reader, RowPolicy::Strict, &mut NoopObserver)
}

/// Parse a delimited-text log with an explicit row policy and observer.
///
/// The first non-blank line is the header; delimiter and schema are
/// resolved once from a sample of up to [`SAMPLE_LINES`] lines, then every
/// remaining line streams through row processing. Line numbers reported in
/// errors are 1-based physical positions in the input.
pub fn parse_tabular_with<R: BufRead>(
    reader: R,
    policy: RowPolicy,
    observer: &mut dyn ParseObserver,
) -> Result<LineString<f64>> {
    let mut lines = reader.lines();
    let mut line_no: u64 = 0;

    let mut header = None;
    for line in lines.by_ref() {
        let line = line?;
        line_no += 1;
        if !line.trim().is_empty() {
            header = Some(line);
            break;
        }
    }
    let header = header.ok_or(ParseError::MissingColumns {
        latitude_found: false,
        longitude_found: false,
    })?;

    // Buffer the rest of the detection sample; the sampled lines are data
    // rows and go through row processing afterwards.
    let mut sample = vec![header.clone()];
    let mut buffered: Vec<(u64, String)> = Vec::new();
    while sample.len() < SAMPLE_LINES {
        match lines.next() {
            Some(line) => {
                let line = line?;
                line_no += 1;
                sample.push(line.clone());
                buffered.push((line_no, line));
            }
            None => break,
        }
    }

    let delimiter = detect_delimiter(&sample);
    observer.on_delimiter(delimiter);

    let schema = resolve_schema(&header, delimiter)?;
    observer.on_schema(&schema);

    let mut coords = Vec::new();
    for (no, line) in buffered {
        process_row(no, &line, delimiter, &schema, policy, &mut coords, observer)?;
    }
    for line in lines {
        let line = line?;
        line_no += 1;
        process_row(line_no, &line, delimiter, &schema, policy, &mut coords, observer)?;
    }

    let pairs = coords.len() / 2;
    if pairs < MIN_LINE_POINTS {
        return Err(ParseError::InsufficientCoordinates { pairs });
    }

    assemble_line_string(coords)
}

/// Process one physical line: split, validate width, parse the indexed
/// fields and append `(lon, lat)` on success.
fn process_row(
    line_no: u64,
    line: &str,
    delimiter: Delimiter,
    schema: &Schema,
    policy: RowPolicy,
    coords: &mut Vec<f64>,
    observer: &mut dyn ParseObserver,
) -> Result<()> {
    if line.trim().is_empty() {
        return Ok(());
    }

    let fields = delimiter.split(line);
    if fields.len() != schema.field_count {
        match policy {
            RowPolicy::Strict => {
                return Err(ParseError::RowWidth {
                    line: line_no,
                    expected: schema.field_count,
                    found: fields.len(),
                });
            }
            RowPolicy::Lenient => {
                observer.on_row_skipped(line_no, "field count differs from header");
                return Ok(());
            }
        }
    }

    let (lat_field, lon_field) =
        match (fields.get(schema.lat_index), fields.get(schema.lon_index)) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                observer.on_row_skipped(line_no, "row too short for coordinate columns");
                return Ok(());
            }
        };

    let lat = match lat_field.trim().parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            observer.on_row_skipped(line_no, "latitude field is not numeric");
            return Ok(());
        }
    };
    let lon = match lon_field.trim().parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            observer.on_row_skipped(line_no, "longitude field is not numeric");
            return Ok(());
        }
    };

    coords.push(lon);
    coords.push(lat);
    observer.on_row_accepted(line_no, lon, lat);
    Ok(())
}
