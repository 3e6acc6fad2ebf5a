//! Geographic coordinates (see [`Coordinate`]), UTM zone selection (see [`select_utm`]) and dataset extents
//! (see [`Extent`]).

mod extent;
mod point;
mod utm;

pub use extent::Extent;
pub use point::{Coordinate, GeoPoint};
pub use utm::{
    select_utm, select_utm_lonlat, utm_central_meridian, utm_zone_from_epsg, UtmSelection,
    EPSG_UTM_NORTH_BASE, EPSG_UTM_SOUTH_BASE, UTM_POLAR_LIMIT, UTM_ZONE_COUNT, UTM_ZONE_WIDTH,
};
