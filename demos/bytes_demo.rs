//! In-memory parsing with a custom observer.
//!
//! Usage: cargo run --example bytes_demo

use anyhow::Result;
use flightpath::{parse_flight_bytes_with, ExtractOptions, LogFormat, ParseObserver};

struct StdoutObserver;

impl ParseObserver for StdoutObserver {
    fn on_delimiter(&mut self, delimiter: flightpath::Delimiter) {
        println!("delimiter: {delimiter}");
    }

    fn on_row_skipped(&mut self, line: u64, reason: &str) {
        println!("line {line} skipped: {reason}");
    }
}

fn main() -> Result<()> {
    let log = b"time;lat;lon\n1;50.736;7.098\n2;bad;7.099\n3;50.738;7.100\n";

    let line = parse_flight_bytes_with(
        log,
        LogFormat::Tabular,
        &ExtractOptions::default(),
        &mut StdoutObserver,
    )?;

    println!("{} points:", line.0.len());
    for coord in line.coords() {
        println!("  ({:.3}, {:.3})", coord.x, coord.y);
    }

    Ok(())
}
