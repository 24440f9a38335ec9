//! Parse-progress observation hooks
//!
//! The extractors report accept/skip events through this trait instead of
//! printing diagnostics inline. Observers receive notifications only; the
//! parse result never depends on what an observer does with them.

use crate::types::{Delimiter, Schema};

/// Receives notifications while a log is being parsed.
///
/// Every method has an empty default implementation so observers implement
/// only the hooks they care about.
pub trait ParseObserver {
    /// A delimiter was chosen for the file.
    fn on_delimiter(&mut self, _delimiter: Delimiter) {}

    /// Latitude/longitude columns were resolved from the header.
    fn on_schema(&mut self, _schema: &Schema) {}

    /// A data row yielded a coordinate pair.
    fn on_row_accepted(&mut self, _line: u64, _lon: f64, _lat: f64) {}

    /// A data row was skipped; `reason` is human-readable.
    fn on_row_skipped(&mut self, _line: u64, _reason: &str) {}

    /// A placemark was examined; `matched` is true when its points will be
    /// used.
    fn on_placemark(&mut self, _name: &str, _matched: bool) {}

    /// A point inside a coordinate string was dropped.
    fn on_point_dropped(&mut self, _point: &str) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl ParseObserver for NoopObserver {}
