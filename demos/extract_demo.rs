//! Minimal file-extraction walkthrough.
//!
//! Usage: cargo run --example extract_demo -- <logfile>

use anyhow::{Context, Result};
use flightpath::{parse_flight_file, ExtractOptions};
use std::path::Path;

fn main() -> Result<()> {
    let arg = std::env::args()
        .nth(1)
        .context("usage: extract_demo <logfile>")?;
    let path = Path::new(&arg);

    let line = parse_flight_file(path, &ExtractOptions::default())
        .with_context(|| format!("failed to extract a flight path from {path:?}"))?;

    println!("Extracted {} points", line.0.len());
    for coord in line.coords().take(5) {
        println!("  ({:.6}, {:.6})", coord.x, coord.y);
    }
    if line.0.len() > 5 {
        println!("  ...");
    }

    Ok(())
}
