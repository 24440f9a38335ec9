//! Document shape of a flight-log KML export.
//!
//! The logging apps emit a fixed layout: root → Document → Folder → list of
//! Placemarks, each placemark carrying at most one LineString. Multiple or
//! nested folders and multiple line strings per placemark are not
//! supported by this binding.

use serde::Deserialize;

/// Root `<kml>` element.
#[derive(Debug, Deserialize)]
pub struct Kml {
    #[serde(rename = "Document")]
    pub document: KmlDocument,
}

/// `<Document>` wrapper around the single folder.
#[derive(Debug, Default, Deserialize)]
pub struct KmlDocument {
    #[serde(rename = "Folder", default)]
    pub folder: KmlFolder,
}

/// `<Folder>` holding the placemark list.
#[derive(Debug, Default, Deserialize)]
pub struct KmlFolder {
    #[serde(rename = "Placemark", default)]
    pub placemarks: Vec<Placemark>,
}

/// Named KML element that may carry a line string and free-text metadata.
#[derive(Debug, Default, Deserialize)]
pub struct Placemark {
    #[serde(rename = "name", default)]
    pub name: String,
    #[serde(rename = "description", default)]
    pub description: String,
    #[serde(rename = "LineString")]
    pub line_string: Option<KmlLineString>,
}

/// `<LineString>` with its whitespace-separated coordinate string.
#[derive(Debug, Default, Deserialize)]
pub struct KmlLineString {
    #[serde(rename = "coordinates", default)]
    pub coordinates: String,
}
