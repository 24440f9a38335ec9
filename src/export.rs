//! Export functionality for extracted flight paths
//!
//! Contains functions for persisting an extracted path next to its input
//! file (or under an explicit output directory) as a plain lon/lat CSV or
//! a GeoJSON Feature.

use std::path::{Path, PathBuf};

#[cfg(any(feature = "csv", feature = "geojson"))]
use crate::error::{ParseError, Result};
#[cfg(any(feature = "csv", feature = "geojson"))]
use geo::LineString;

/// Export options for controlling output formats
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub csv: bool,
    pub geojson: bool,
    pub output_dir: Option<String>,
}

/// Compute the output path for an export of `input_path` with `extension`.
///
/// The output keeps the input's stem and lands next to it unless an output
/// directory is set.
pub fn compute_export_path(
    input_path: &Path,
    output_dir: Option<&str>,
    extension: &str,
) -> PathBuf {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("flight");
    let file_name = format!("{stem}.path.{extension}");
    match output_dir {
        Some(dir) => Path::new(dir).join(file_name),
        None => input_path.with_file_name(file_name),
    }
}

/// Create the parent directory of an export target when it is missing.
#[cfg(any(feature = "csv", feature = "geojson"))]
fn ensure_parent_dir(out_path: &Path) -> Result<()> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Export a flight path as a lon/lat CSV file.
#[cfg(feature = "csv")]
pub fn export_to_csv(
    line: &LineString<f64>,
    input_path: &Path,
    options: &ExportOptions,
) -> Result<PathBuf> {
    let out_path = compute_export_path(input_path, options.output_dir.as_deref(), "csv");
    ensure_parent_dir(&out_path)?;

    let mut writer = csv::Writer::from_path(&out_path).map_err(csv_error)?;
    writer.write_record(["lon", "lat"]).map_err(csv_error)?;
    for coord in line.coords() {
        writer
            .write_record([coord.x.to_string(), coord.y.to_string()])
            .map_err(csv_error)?;
    }
    writer.flush()?;

    Ok(out_path)
}

#[cfg(feature = "csv")]
fn csv_error(err: csv::Error) -> ParseError {
    ParseError::Export(format!("CSV export failed: {err}"))
}

/// Export a flight path as a GeoJSON LineString Feature.
#[cfg(feature = "geojson")]
pub fn export_to_geojson(
    line: &LineString<f64>,
    input_path: &Path,
    options: &ExportOptions,
) -> Result<PathBuf> {
    let out_path = compute_export_path(input_path, options.output_dir.as_deref(), "geojson");
    ensure_parent_dir(&out_path)?;

    let coordinates: Vec<[f64; 2]> = line.coords().map(|c| [c.x, c.y]).collect();
    let feature = serde_json::json!({
        "type": "Feature",
        "properties": {},
        "geometry": {
            "type": "LineString",
            "coordinates": coordinates,
        }
    });
    let payload = serde_json::to_string_pretty(&feature)
        .map_err(|err| ParseError::Export(format!("GeoJSON export failed: {err}")))?;
    std::fs::write(&out_path, payload)?;

    Ok(out_path)
}
