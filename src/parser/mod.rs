pub mod detect;
pub mod framing;
pub mod kml;
pub mod main;
pub mod tabular;

pub use detect::*;
pub use framing::*;
pub use kml::*;
pub use main::*;
pub use tabular::*;
