//! Flight-Path Extraction Library
//!
//! A Rust library for extracting a 2-D flight-path polyline from
//! heterogeneous log exports produced by consumer drone-control
//! applications. Two independent front ends feed one output contract:
//! delimited-text logs (unknown separators and column layouts, inferred
//! from a leading sample) and KML/KMZ flight-log archives. The output is
//! an immutable `geo::LineString` with coordinates in (lon, lat) order,
//! or a typed failure describing what went wrong.
//!
//! # Features
//!
//! - **`csv`** (default): export an extracted path as a lon/lat CSV file
//! - **`cli`** (default): build the command-line interface binary
//! - **`geojson`**: export an extracted path as a GeoJSON Feature
//!
//! # Quick Start
//!
//! Parse a log file and inspect the path:
//! ```rust,no_run
//! use flightpath::{parse_flight_file, ExtractOptions};
//! use std::path::Path;
//!
//! let line = parse_flight_file(Path::new("flight.csv"), &ExtractOptions::default()).unwrap();
//! println!("Extracted {} points", line.0.len());
//! ```
//!
//! Parse in-memory KMZ bytes:
//! ```rust,no_run
//! use flightpath::{parse_flight_bytes, ExtractOptions, LogFormat};
//!
//! let data = std::fs::read("flight.kmz").unwrap();
//! let line = parse_flight_bytes(&data, LogFormat::Kml, &ExtractOptions::default()).unwrap();
//! println!("Extracted {} points", line.0.len());
//! ```
//!
//! # Public API
//!
//! ## Parsing Functions
//! - [`parse_flight_file`] / [`parse_flight_file_with`] - Parse a log file,
//!   choosing the front end from its extension
//! - [`parse_flight_bytes`] / [`parse_flight_bytes_with`] - Parse in-memory
//!   data under an explicit [`LogFormat`]
//! - [`parse_tabular`] / [`parse_tabular_with`] - Low-level delimited-text
//!   front end over any `BufRead`
//! - [`parse_kml_kmz`] / [`parse_kml_kmz_with`] - Low-level KML/KMZ front end
//!
//! ## Detection
//! - [`detect_delimiter`] - Infer the field separator from sample lines
//! - [`resolve_schema`] - Locate latitude/longitude columns in a header
//! - [`extract_embedded_csv`] - Optional `count(10HZ)` block framing stage
//!
//! ## Data Types
//! - [`Delimiter`], [`Schema`], [`RowPolicy`] - Detection results and the
//!   row-width policy
//! - [`ExtractOptions`] - Configuration for parse operations
//! - [`ParseError`] - Typed failure taxonomy
//! - [`ParseObserver`] / [`NoopObserver`] - Skip/accept event hooks
//!
//! ## Geometry & Export
//! - [`assemble_line_string`] - Flat lon/lat list to `geo::LineString`
//! - [`ExportOptions`], `export_to_csv`, `export_to_geojson` - Persist an
//!   extracted path (feature-gated)

// Module declarations
pub mod error;
pub mod export;
pub mod geometry;
pub mod observer;
pub mod parser;
pub mod types;

// Re-export everything from modules for convenience
pub use error::*;
pub use export::*;
pub use geometry::*;
pub use observer::*;
pub use parser::*;
pub use types::*;
