//! Coordinate reference system descriptors (see [`CrsDescriptor`]) and their classification from raw metadata
//! (see [`classify`]).

mod classifier;
mod descriptor;
mod metadata;
mod wkt;

pub use classifier::classify;
pub use descriptor::{CrsDescriptor, CrsKind, Unit, EPSG_WEB_MERCATOR, EPSG_WGS84};
pub use metadata::CrsMetadata;
