use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};

/// Point on the surface of the Earth given in degrees.
pub trait GeoPoint {
    /// Numeric type used to represent coordinates.
    type Num: Float;

    /// Latitude in degrees.
    fn lat(&self) -> Self::Num;
    /// Longitude in degrees.
    fn lon(&self) -> Self::Num;

    /// Latitude in radians.
    fn lat_rad(&self) -> Self::Num {
        self.lat().to_radians()
    }

    /// Longitude in radians.
    fn lon_rad(&self) -> Self::Num {
        self.lon().to_radians()
    }
}

/// Validated longitude/latitude pair in degrees.
///
/// Longitude is always in `[-180, 180]` and latitude in `[-90, 90]`. Values outside of these ranges (including
/// `NaN` and infinities) are rejected by [`Coordinate::new`] instead of being clamped or wrapped.
///
/// ```
/// use crs_advisor::geo::{Coordinate, GeoPoint};
///
/// let auckland = Coordinate::new(174.7, -36.9).unwrap();
/// assert_eq!(auckland.lon(), 174.7);
/// assert!(Coordinate::new(181.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lon: f64,
    lat: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lon: f64,
    lat: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = AdvisorError;

    fn try_from(value: RawCoordinate) -> Result<Self> {
        Self::new(value.lon, value.lat)
    }
}

impl Coordinate {
    /// Creates a new coordinate, failing with [`AdvisorError::InvalidCoordinate`] if either value is out of range.
    pub fn new(lon: f64, lat: f64) -> Result<Self> {
        if (-180.0..=180.0).contains(&lon) && (-90.0..=90.0).contains(&lat) {
            Ok(Self { lon, lat })
        } else {
            Err(AdvisorError::InvalidCoordinate { lon, lat })
        }
    }

    /// Same as [`Coordinate::new`] with the arguments in latitude-first order.
    pub fn latlon(lat: f64, lon: f64) -> Result<Self> {
        Self::new(lon, lat)
    }

    /// Creates a coordinate from any other geographic point.
    pub fn from_point(other: &impl GeoPoint<Num = f64>) -> Result<Self> {
        Self::new(other.lon(), other.lat())
    }
}

impl GeoPoint for Coordinate {
    type Num = f64;

    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(value: Coordinate) -> Self {
        geo::Point::new(value.lon, value.lat)
    }
}

#[cfg(feature = "geo-types")]
mod geo_types_impl {
    use geo_types::CoordFloat;

    use super::{Coordinate, GeoPoint};
    use crate::error::AdvisorError;

    impl<T: CoordFloat> GeoPoint for geo_types::Point<T> {
        type Num = T;

        fn lat(&self) -> T {
            self.y()
        }

        fn lon(&self) -> T {
            self.x()
        }
    }

    impl TryFrom<geo_types::Point<f64>> for Coordinate {
        type Error = AdvisorError;

        fn try_from(value: geo_types::Point<f64>) -> Result<Self, Self::Error> {
            Coordinate::from_point(&value)
        }
    }
}
