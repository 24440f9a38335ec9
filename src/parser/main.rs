use crate::error::{ParseError, Result};
use crate::observer::{NoopObserver, ParseObserver};
use crate::parser::framing::extract_embedded_csv;
use crate::parser::kml::parse_kml_kmz_with;
use crate::parser::tabular::parse_tabular_with;
use crate::types::RowPolicy;
use geo::LineString;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

/// Input framing selected for a log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Delimited text, parsed line by line.
    Tabular,
    /// KML document, possibly zip-wrapped (KMZ), buffered whole.
    Kml,
}

impl LogFormat {
    /// Choose the front end from a file extension (case-insensitive).
    /// Anything that is not kml/kmz is treated as delimited text.
    pub fn from_path(path: &Path) -> LogFormat {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => {
                let ext = ext.to_ascii_lowercase();
                if ext == "kml" || ext == "kmz" {
                    LogFormat::Kml
                } else {
                    LogFormat::Tabular
                }
            }
            None => LogFormat::Tabular,
        }
    }
}

/// Options controlling a parse call.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Row-width handling for the tabular front end.
    pub row_policy: RowPolicy,
    /// Cut a `count(10HZ)` embedded CSV block out of the input before the
    /// tabular parse.
    pub embedded_csv: bool,
}

/// Parse a flight-log file into a path geometry.
pub fn parse_flight_file(path: &Path, options: &ExtractOptions) -> Result<LineString<f64>> {
    parse_flight_file_with(path, options, &mut NoopObserver)
}

/// Parse a flight-log file, reporting parse events to `observer`.
pub fn parse_flight_file_with(
    path: &Path,
    options: &ExtractOptions,
    observer: &mut dyn ParseObserver,
) -> Result<LineString<f64>> {
    match LogFormat::from_path(path) {
        LogFormat::Kml => {
            let data = std::fs::read(path)?;
            parse_kml_kmz_with(&data, observer)
        }
        LogFormat::Tabular if options.embedded_csv => {
            let text = std::fs::read_to_string(path)?;
            parse_embedded_tabular(&text, options, observer)
        }
        LogFormat::Tabular => {
            let file = File::open(path)?;
            parse_tabular_with(BufReader::new(file), options.row_policy, observer)
        }
    }
}

/// Parse in-memory flight-log bytes under an explicit format.
pub fn parse_flight_bytes(
    data: &[u8],
    format: LogFormat,
    options: &ExtractOptions,
) -> Result<LineString<f64>> {
    parse_flight_bytes_with(data, format, options, &mut NoopObserver)
}

/// Parse in-memory flight-log bytes, reporting parse events to `observer`.
pub fn parse_flight_bytes_with(
    data: &[u8],
    format: LogFormat,
    options: &ExtractOptions,
    observer: &mut dyn ParseObserver,
) -> Result<LineString<f64>> {
    match format {
        LogFormat::Kml => parse_kml_kmz_with(data, observer),
        LogFormat::Tabular if options.embedded_csv => {
            let text = std::str::from_utf8(data)?;
            parse_embedded_tabular(text, options, observer)
        }
        LogFormat::Tabular => {
            parse_tabular_with(Cursor::new(data), options.row_policy, observer)
        }
    }
}

fn parse_embedded_tabular(
    text: &str,
    options: &ExtractOptions,
    observer: &mut dyn ParseObserver,
) -> Result<LineString<f64>> {
    match extract_embedded_csv(text) {
        Some(block) => parse_tabular_with(Cursor::new(block), options.row_policy, observer),
        None => Err(ParseError::Parse(
            "embedded CSV start marker not found".to_string(),
        )),
    }
}
