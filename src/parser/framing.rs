//! Optional input framing for logs that embed a CSV block inside a larger
//! text document.
//!
//! One drone-logging app wraps its telemetry table between a `count(10HZ)`
//! header marker and a closing document tag. This stage cuts that block
//! out ahead of the general tabular parse; it is opt-in and never applied
//! implicitly by the detector.

/// Marker that opens the embedded CSV block. The line carrying it is the
/// table's header line and is part of the block.
pub const EMBEDDED_CSV_START: &str = "count(10HZ)";

/// Marker line that terminates the embedded block.
pub const EMBEDDED_CSV_END: &str = "</document_content>";

/// Extract the embedded CSV block from a wrapping document.
///
/// Returns the lines from the first line containing the start marker up
/// to, but excluding, the first subsequent line containing the end marker
/// (or end of input). `None` when the start marker does not occur.
pub fn extract_embedded_csv(text: &str) -> Option<String> {
    let mut block = String::new();
    let mut capturing = false;

    for line in text.lines() {
        if !capturing {
            if line.contains(EMBEDDED_CSV_START) {
                capturing = true;
                block.push_str(line);
                block.push('\n');
            }
            continue;
        }
        if line.contains(EMBEDDED_CSV_END) {
            break;
        }
        block.push_str(line);
        block.push('\n');
    }

    if capturing {
        Some(block)
    } else {
        None
    }
}
