use std::fmt;

/// Custom error types for flight-path extraction
#[derive(Debug)]
pub enum ParseError {
    /// I/O errors
    Io(std::io::Error),
    /// UTF-8 parsing errors
    Utf8(std::str::Utf8Error),
    /// Parse errors with context
    Parse(String),
    /// Header lacks a recognizable latitude or longitude column
    MissingColumns {
        latitude_found: bool,
        longitude_found: bool,
    },
    /// A data row's field count disagrees with the header's
    RowWidth {
        line: u64,
        expected: usize,
        found: usize,
    },
    /// Fewer than two valid coordinate pairs were accumulated
    InsufficientCoordinates { pairs: usize },
    /// KMZ container is not a readable zip archive
    Archive(zip::result::ZipError),
    /// KMZ archive has no .kml entry
    NoKmlEntry,
    /// KML document failed to deserialize
    Xml(quick_xml::DeError),
    /// Export format error
    Export(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Io(err) => write!(f, "I/O error: {}", err),
            ParseError::Utf8(err) => write!(f, "UTF-8 error: {}", err),
            ParseError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ParseError::MissingColumns {
                latitude_found,
                longitude_found,
            } => {
                let missing = match (latitude_found, longitude_found) {
                    (false, false) => "latitude and longitude columns",
                    (false, true) => "latitude column",
                    _ => "longitude column",
                };
                write!(f, "could not find {} in header", missing)
            }
            ParseError::RowWidth {
                line,
                expected,
                found,
            } => write!(
                f,
                "row width mismatch at line {}: header has {} fields, row has {}",
                line, expected, found
            ),
            ParseError::InsufficientCoordinates { pairs } => write!(
                f,
                "not enough valid coordinates to form a line: got {} pair(s), need at least 2",
                pairs
            ),
            ParseError::Archive(err) => write!(f, "KMZ archive error: {}", err),
            ParseError::NoKmlEntry => write!(f, "no KML file found in KMZ archive"),
            ParseError::Xml(err) => write!(f, "KML parse error: {}", err),
            ParseError::Export(msg) => write!(f, "Export error: {}", msg),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(err) => Some(err),
            ParseError::Utf8(err) => Some(err),
            ParseError::Archive(err) => Some(err),
            ParseError::Xml(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::Io(err)
    }
}

impl From<std::str::Utf8Error> for ParseError {
    fn from(err: std::str::Utf8Error) -> Self {
        ParseError::Utf8(err)
    }
}

impl From<zip::result::ZipError> for ParseError {
    fn from(err: zip::result::ZipError) -> Self {
        ParseError::Archive(err)
    }
}

impl From<quick_xml::DeError> for ParseError {
    fn from(err: quick_xml::DeError) -> Self {
        ParseError::Xml(err)
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
