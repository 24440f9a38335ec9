//! Geometry assembly over the external `geo` line primitive.
//!
//! Both front ends accumulate a flat interleaved lon/lat list and convert
//! it exactly once, here. The `geo` crate supplies the immutable line type
//! and the read-only accessors consumed downstream (point count, bounding
//! rectangle, length); this module only guards the constructor's
//! precondition of at least two points.

use crate::error::{ParseError, Result};
use geo::{Coord, LineString};

/// Minimum number of coordinate pairs for a valid line.
pub const MIN_LINE_POINTS: usize = 2;

/// Build a line geometry from a flat interleaved `[lon, lat, lon, lat, ..]`
/// list.
///
/// Fails on an odd-length list (a caller defect, the extractors always push
/// whole pairs) and when fewer than two points are present.
pub fn assemble_line_string(coords: Vec<f64>) -> Result<LineString<f64>> {
    if coords.len() % 2 != 0 {
        return Err(ParseError::Parse(format!(
            "flat coordinate list has odd length {}",
            coords.len()
        )));
    }

    let pairs = coords.len() / 2;
    if pairs < MIN_LINE_POINTS {
        return Err(ParseError::InsufficientCoordinates { pairs });
    }

    let points: Vec<Coord<f64>> = coords
        .chunks_exact(2)
        .map(|pair| Coord {
            x: pair[0],
            y: pair[1],
        })
        .collect();

    Ok(LineString::new(points))
}
