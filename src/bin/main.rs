//! CLI binary for the flight-path extractor
//!
//! This provides the command-line interface for the flightpath library.

use anyhow::Result;
use clap::{Arg, Command};
use flightpath::{
    parse_flight_file_with, Delimiter, ExportOptions, ExtractOptions, ParseObserver, RowPolicy,
    Schema,
};
use geo::{BoundingRect, HaversineLength, LineString};
use glob::glob;
use std::path::Path;

/// Observer that prints per-event diagnostics and tallies row outcomes.
#[derive(Default)]
struct VerboseObserver {
    accepted: u64,
    skipped: u64,
    verbose: bool,
}

impl ParseObserver for VerboseObserver {
    fn on_delimiter(&mut self, delimiter: Delimiter) {
        if self.verbose {
            println!("Detected delimiter: {delimiter}");
        }
    }

    fn on_schema(&mut self, schema: &Schema) {
        if self.verbose {
            println!(
                "Resolved schema: lat column {}, lon column {}, {} field(s)",
                schema.lat_index, schema.lon_index, schema.field_count
            );
        }
    }

    fn on_row_accepted(&mut self, _line: u64, _lon: f64, _lat: f64) {
        self.accepted += 1;
    }

    fn on_row_skipped(&mut self, line: u64, reason: &str) {
        self.skipped += 1;
        if self.verbose {
            println!("Skipped line {line}: {reason}");
        }
    }

    fn on_placemark(&mut self, name: &str, matched: bool) {
        if self.verbose {
            let outcome = if matched { "flight segment" } else { "ignored" };
            println!("Placemark '{name}': {outcome}");
        }
    }

    fn on_point_dropped(&mut self, point: &str) {
        self.skipped += 1;
        if self.verbose {
            println!("Dropped malformed point '{point}'");
        }
    }
}

fn main() -> Result<()> {
    let matches = Command::new("Flightpath")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract flight-path geometry from drone-app log exports (CSV-like text, KML, KMZ).")
        .arg(
            Arg::new("files")
                .help("Log files to parse (.csv/.txt/.log/.kml/.kmz, case-insensitive, supports globbing)")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Print per-row and per-placemark parsing diagnostics")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("lenient")
                .long("lenient")
                .help("Skip rows whose field count differs from the header instead of failing")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("embedded-csv")
                .long("embedded-csv")
                .help("Cut a count(10HZ)-delimited embedded CSV block out of the input before parsing")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Export the extracted path as a lon/lat CSV file next to the input")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("geojson")
                .long("geojson")
                .help("Export the extracted path as a GeoJSON Feature next to the input")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for export output files (default: same as input file)")
                .value_name("DIR"),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    let lenient = matches.get_flag("lenient");
    let embedded_csv = matches.get_flag("embedded-csv");
    let output_dir = matches.get_one::<String>("output-dir").cloned();
    let file_patterns: Vec<&String> = matches.get_many::<String>("files").unwrap().collect();

    let extract_options = ExtractOptions {
        row_policy: if lenient {
            RowPolicy::Lenient
        } else {
            RowPolicy::Strict
        },
        embedded_csv,
    };
    let export_options = ExportOptions {
        csv: matches.get_flag("csv"),
        geojson: matches.get_flag("geojson"),
        output_dir,
    };

    // Collect all valid file paths
    let mut valid_paths = Vec::new();
    for pattern in &file_patterns {
        let paths: Vec<_> = if pattern.contains('*') || pattern.contains('?') {
            match glob(pattern) {
                Ok(glob_iter) => match glob_iter.collect::<Result<Vec<_>, _>>() {
                    Ok(paths) => paths,
                    Err(e) => {
                        eprintln!("Error expanding glob pattern '{pattern}': {e}");
                        continue;
                    }
                },
                Err(e) => {
                    eprintln!("Invalid glob pattern '{pattern}': {e}");
                    continue;
                }
            }
        } else {
            vec![Path::new(pattern).to_path_buf()]
        };

        for path in paths {
            if !path.exists() {
                eprintln!("Warning: File does not exist: {path:?}");
                continue;
            }

            let valid_extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| {
                    let ext_lower = ext.to_ascii_lowercase();
                    matches!(ext_lower.as_str(), "csv" | "txt" | "log" | "kml" | "kmz")
                })
                .unwrap_or(false);

            if !valid_extension {
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("none");
                eprintln!("Warning: Skipping file with unsupported extension '{ext}': {path:?}");
                continue;
            }

            valid_paths.push(path);
        }
    }

    if valid_paths.is_empty() {
        eprintln!("Error: No valid files found to process.");
        eprintln!("Supported extensions: .csv, .txt, .log, .kml, .kmz (case-insensitive)");
        eprintln!("Input patterns were: {file_patterns:?}");
        std::process::exit(1);
    }

    let mut processed_files = 0;

    for (index, path) in valid_paths.iter().enumerate() {
        if index > 0 {
            println!();
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");
        println!("Processing: {filename}");

        let mut observer = VerboseObserver {
            verbose,
            ..Default::default()
        };

        match parse_flight_file_with(path, &extract_options, &mut observer) {
            Ok(line) => {
                print_summary(&line, &observer);
                run_exports(&line, path, &export_options);
                processed_files += 1;
            }
            Err(e) => {
                eprintln!("Error processing {filename}: {e}");
                eprintln!("Continuing with next file...");
            }
        }
    }

    if processed_files == 0 {
        eprintln!(
            "Error: No files were successfully processed out of {} files found.",
            valid_paths.len()
        );
        eprintln!("This could be due to:");
        eprintln!("  - Missing or unrecognizable latitude/longitude columns");
        eprintln!("  - Rows whose width contradicts the header (try --lenient)");
        eprintln!("  - Fewer than two valid coordinate pairs in the file");
        eprintln!("Use --verbose for more detailed parsing information.");
        std::process::exit(1);
    }

    Ok(())
}

/// Print read-only geometry facts for an extracted path.
fn print_summary(line: &LineString<f64>, observer: &VerboseObserver) {
    println!("Geometry: LineString with {} points", line.0.len());
    if observer.skipped > 0 {
        println!(
            "Rows/points: {} accepted, {} skipped",
            observer.accepted, observer.skipped
        );
    }
    if let Some(rect) = line.bounding_rect() {
        println!(
            "Envelope: lon [{:.6}, {:.6}], lat [{:.6}, {:.6}]",
            rect.min().x,
            rect.max().x,
            rect.min().y,
            rect.max().y
        );
    }
    println!("Length: {:.1} m (haversine)", line.haversine_length());
    if let (Some(start), Some(end)) = (line.points().next(), line.points().last()) {
        println!(
            "Start: ({:.6}, {:.6})  End: ({:.6}, {:.6})",
            start.x(),
            start.y(),
            end.x(),
            end.y()
        );
    }
}

/// Run the requested exports, reporting per-format outcomes.
fn run_exports(line: &LineString<f64>, path: &Path, options: &ExportOptions) {
    if options.csv {
        #[cfg(feature = "csv")]
        match flightpath::export_to_csv(line, path, options) {
            Ok(out) => println!("CSV written to: {}", out.display()),
            Err(e) => eprintln!("CSV export failed: {e}"),
        }
        #[cfg(not(feature = "csv"))]
        eprintln!("CSV export requires the 'csv' feature");
    }

    if options.geojson {
        #[cfg(feature = "geojson")]
        match flightpath::export_to_geojson(line, path, options) {
            Ok(out) => println!("GeoJSON written to: {}", out.display()),
            Err(e) => eprintln!("GeoJSON export failed: {e}"),
        }
        #[cfg(not(feature = "geojson"))]
        eprintln!("GeoJSON export requires the 'geojson' feature");
    }
}
