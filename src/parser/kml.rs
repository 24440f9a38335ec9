//! KML/KMZ flight-log extraction.
//!
//! A KMZ is a zip-wrapped KML; container framing is detected from the zip
//! local-file-header signature and unwrapped before the XML is bound to
//! the fixed flight-log document shape. Only placemarks whose name carries
//! the "Flight Mode" convention contribute points (a habit of the source
//! logging app, not a general KML rule). This path buffers the whole input
//! up front: both the zip directory and the XML document need whole-stream
//! access.

use crate::error::{ParseError, Result};
use crate::geometry::assemble_line_string;
use crate::observer::{NoopObserver, ParseObserver};
use crate::types::Kml;
use geo::LineString;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

/// Substring a placemark name must contain for its points to count.
/// Matching is case-sensitive.
pub const FLIGHT_MODE_MARKER: &str = "Flight Mode";

/// Parse a KML or KMZ payload into a flight path.
pub fn parse_kml_kmz(data: &[u8]) -> Result<LineString<f64>> {
    parse_kml_kmz_with(data, &mut NoopObserver)
}

/// Parse a KML or KMZ payload, reporting placemark and point events.
pub fn parse_kml_kmz_with(
    data: &[u8],
    observer: &mut dyn ParseObserver,
) -> Result<LineString<f64>> {
    let unwrapped;
    let kml_data = if is_kmz(data) {
        unwrapped = extract_kml_from_kmz(data)?;
        unwrapped.as_slice()
    } else {
        data
    };

    let text = std::str::from_utf8(kml_data)?;
    let kml: Kml = quick_xml::de::from_str(text)?;

    let mut coords = Vec::new();
    for placemark in &kml.document.folder.placemarks {
        let matched = placemark.name.contains(FLIGHT_MODE_MARKER);
        observer.on_placemark(&placemark.name, matched);
        if !matched {
            continue;
        }
        if let Some(line_string) = &placemark.line_string {
            parse_coordinate_string(&line_string.coordinates, &mut coords, observer);
        }
    }

    assemble_line_string(coords)
}

/// True when the payload starts with the zip local-file-header signature.
pub fn is_kmz(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == 0x50 && data[1] == 0x4B
}

/// Unwrap the first `.kml` entry from a KMZ (zip) payload.
///
/// Entry names are matched case-sensitively, as stored; only the first
/// matching entry is read even when several exist.
fn extract_kml_from_kmz(data: &[u8]) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let is_kml = Path::new(entry.name())
            .extension()
            .map(|ext| ext == "kml")
            .unwrap_or(false);
        if is_kml {
            let mut contents = Vec::new();
            entry.read_to_end(&mut contents)?;
            return Ok(contents);
        }
    }

    Err(ParseError::NoKmlEntry)
}

/// Split a whitespace-separated coordinate string into lon/lat pairs.
///
/// Each point is comma-separated `lon,lat[,alt]`. A point with fewer than
/// two components or a non-numeric component is dropped; later points in
/// the same string are unaffected.
fn parse_coordinate_string(
    coordinates: &str,
    coords: &mut Vec<f64>,
    observer: &mut dyn ParseObserver,
) {
    for point in coordinates.split_whitespace() {
        let mut parts = point.split(',');
        let lon = parts.next().and_then(|p| p.trim().parse::<f64>().ok());
        let lat = parts.next().and_then(|p| p.trim().parse::<f64>().ok());
        match (lon, lat) {
            (Some(lon), Some(lat)) => {
                coords.push(lon);
                coords.push(lat);
            }
            _ => observer.on_point_dropped(point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    const FLIGHT_KML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Folder>
      <Placemark>
        <name>Takeoff Point</name>
        <description>home</description>
        <LineString>
          <coordinates>99.0,99.0 98.0,98.0</coordinates>
        </LineString>
      </Placemark>
      <Placemark>
        <name>Flight Mode GPS</name>
        <description>autonomous segment</description>
        <LineString>
          <coordinates>
            10.0,50.0,100 10.1,50.1,101
          </coordinates>
        </LineString>
      </Placemark>
      <Placemark>
        <name>Flight Mode Sport</name>
        <LineString>
          <coordinates>10.2,50.2,102</coordinates>
        </LineString>
      </Placemark>
    </Folder>
  </Document>
</kml>"#;

    fn points(line: &LineString<f64>) -> Vec<(f64, f64)> {
        line.coords().map(|c| (c.x, c.y)).collect()
    }

    fn kmz_with_entries(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer
                .start_file(name.to_string(), SimpleFileOptions::default())
                .expect("start zip entry");
            writer.write_all(content.as_bytes()).expect("write entry");
        }
        writer.finish().expect("finish archive").into_inner()
    }

    #[test]
    fn test_only_flight_mode_placemarks_contribute() {
        let line = parse_kml_kmz(FLIGHT_KML.as_bytes()).unwrap();
        assert_eq!(
            points(&line),
            vec![(10.0, 50.0), (10.1, 50.1), (10.2, 50.2)]
        );
    }

    #[test]
    fn test_placemarks_concatenate_in_document_order() {
        let line = parse_kml_kmz(FLIGHT_KML.as_bytes()).unwrap();
        let xs: Vec<f64> = line.coords().map(|c| c.x).collect();
        assert_eq!(xs, vec![10.0, 10.1, 10.2]);
    }

    #[test]
    fn test_flight_mode_match_is_case_sensitive() {
        let kml = FLIGHT_KML.replace("Flight Mode", "flight mode");
        match parse_kml_kmz(kml.as_bytes()) {
            Err(ParseError::InsufficientCoordinates { pairs }) => assert_eq!(pairs, 0),
            other => panic!("expected InsufficientCoordinates, got {:?}", other),
        }
    }

    #[test]
    fn test_point_without_comma_is_dropped_others_kept() {
        let kml = r#"<kml><Document><Folder>
            <Placemark>
              <name>Flight Mode</name>
              <LineString>
                <coordinates>10.0,50.0 nocomma 10.2,50.2</coordinates>
              </LineString>
            </Placemark>
        </Folder></Document></kml>"#;
        let line = parse_kml_kmz(kml.as_bytes()).unwrap();
        assert_eq!(points(&line), vec![(10.0, 50.0), (10.2, 50.2)]);
    }

    #[test]
    fn test_malformed_numeric_point_is_dropped() {
        let kml = r#"<kml><Document><Folder>
            <Placemark>
              <name>Flight Mode</name>
              <LineString>
                <coordinates>10.0,50.0 abc,50.1 10.2,def 10.3,50.3</coordinates>
              </LineString>
            </Placemark>
        </Folder></Document></kml>"#;
        let line = parse_kml_kmz(kml.as_bytes()).unwrap();
        assert_eq!(points(&line), vec![(10.0, 50.0), (10.3, 50.3)]);
    }

    #[test]
    fn test_observer_reports_placemarks_and_dropped_points() {
        #[derive(Default)]
        struct Recording {
            placemarks: Vec<(String, bool)>,
            dropped: Vec<String>,
        }
        impl ParseObserver for Recording {
            fn on_placemark(&mut self, name: &str, matched: bool) {
                self.placemarks.push((name.to_string(), matched));
            }
            fn on_point_dropped(&mut self, point: &str) {
                self.dropped.push(point.to_string());
            }
        }

        let kml = r#"<kml><Document><Folder>
            <Placemark>
              <name>Home</name>
              <LineString><coordinates>1.0,2.0</coordinates></LineString>
            </Placemark>
            <Placemark>
              <name>Flight Mode</name>
              <LineString><coordinates>10.0,50.0 junk 10.1,50.1</coordinates></LineString>
            </Placemark>
        </Folder></Document></kml>"#;

        let mut recording = Recording::default();
        parse_kml_kmz_with(kml.as_bytes(), &mut recording).unwrap();

        assert_eq!(
            recording.placemarks,
            vec![("Home".to_string(), false), ("Flight Mode".to_string(), true)]
        );
        assert_eq!(recording.dropped, vec!["junk".to_string()]);
    }

    #[test]
    fn test_kmz_signature_detection() {
        assert!(is_kmz(&[0x50, 0x4B, 0x03, 0x04]));
        assert!(is_kmz(&[0x50, 0x4B]));
        assert!(!is_kmz(&[0x50]));
        assert!(!is_kmz(b"<kml></kml>"));
        assert!(!is_kmz(&[]));
    }

    #[test]
    fn test_kmz_round_trip() {
        let kmz = kmz_with_entries(&[("doc.kml", FLIGHT_KML)]);
        assert!(is_kmz(&kmz));
        let line = parse_kml_kmz(&kmz).unwrap();
        assert_eq!(
            points(&line),
            vec![(10.0, 50.0), (10.1, 50.1), (10.2, 50.2)]
        );
    }

    #[test]
    fn test_kmz_first_kml_entry_wins() {
        let other = FLIGHT_KML.replace("10.0,50.0,100 10.1,50.1,101", "20.0,60.0 20.1,60.1");
        let kmz = kmz_with_entries(&[
            ("assets/icon.png", "not xml"),
            ("a.kml", FLIGHT_KML),
            ("b.kml", other.as_str()),
        ]);
        let line = parse_kml_kmz(&kmz).unwrap();
        assert_eq!(points(&line)[0], (10.0, 50.0));
    }

    #[test]
    fn test_kmz_without_kml_entry_fails() {
        let kmz = kmz_with_entries(&[("readme.txt", "nothing here")]);
        assert!(matches!(
            parse_kml_kmz(&kmz),
            Err(ParseError::NoKmlEntry)
        ));
    }

    #[test]
    fn test_kml_entry_extension_is_case_sensitive() {
        let kmz = kmz_with_entries(&[("DOC.KML", FLIGHT_KML)]);
        assert!(matches!(
            parse_kml_kmz(&kmz),
            Err(ParseError::NoKmlEntry)
        ));
    }

    #[test]
    fn test_invalid_xml_fails() {
        assert!(matches!(
            parse_kml_kmz(b"this is not a kml document"),
            Err(ParseError::Xml(_))
        ));
    }

    #[test]
    fn test_reparsing_same_bytes_is_identical() {
        let first = parse_kml_kmz(FLIGHT_KML.as_bytes()).unwrap();
        let second = parse_kml_kmz(FLIGHT_KML.as_bytes()).unwrap();
        assert_eq!(points(&first), points(&second));
    }
}
