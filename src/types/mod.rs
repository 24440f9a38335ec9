pub mod kml;
pub mod schema;

pub use kml::*;
pub use schema::*;
