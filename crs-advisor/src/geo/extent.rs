use geo::{EuclideanDistance, HaversineDistance};
use serde::{Deserialize, Serialize};

use crate::crs::Unit;
use crate::error::{AdvisorError, Result};
use crate::geo::point::{Coordinate, GeoPoint};

/// Spatial extent of a dataset, described by the length of its bounding box diagonal.
///
/// The advisor uses the diagonal to decide whether a projected CRS is still accurate over the whole area.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Extent {
    diagonal_km: f64,
}

impl Extent {
    /// Creates an extent from a known diagonal length in kilometres.
    pub fn from_diagonal_km(diagonal_km: f64) -> Result<Self> {
        if diagonal_km.is_finite() && diagonal_km >= 0.0 {
            Ok(Self { diagonal_km })
        } else {
            Err(AdvisorError::InvalidExtent(format!(
                "diagonal must be a non-negative number of kilometres, got {diagonal_km}"
            )))
        }
    }

    /// Bounding box of the geographic coordinates.
    ///
    /// The longitude range of the box is the narrowest one that covers all the points, so a dataset crossing the
    /// antimeridian gets a narrow box around it, while points spread around the globe get a box spanning up to
    /// 360°. The diagonal is measured along great circles from the south-west corner through the centre of the
    /// box to the north-east corner, so that it never takes the short way around the other side of the globe.
    ///
    /// Returns `None` if the iterator is empty.
    pub fn from_coordinates<'a>(
        coordinates: impl IntoIterator<Item = &'a Coordinate>,
    ) -> Option<Self> {
        let mut lat_min = f64::INFINITY;
        let mut lat_max = f64::NEG_INFINITY;
        let mut longitudes = Vec::new();

        for c in coordinates {
            lat_min = lat_min.min(c.lat());
            lat_max = lat_max.max(c.lat());
            longitudes.push(c.lon());
        }

        let (lon_start, lon_span) = covering_longitude_range(&mut longitudes)?;

        let south_west = geo::Point::new(lon_start, lat_min);
        let center = geo::Point::new(lon_start + lon_span / 2.0, (lat_min + lat_max) / 2.0);
        let north_east = geo::Point::new(lon_start + lon_span, lat_max);

        let diagonal_m =
            south_west.haversine_distance(&center) + center.haversine_distance(&north_east);

        Some(Self {
            diagonal_km: diagonal_m / 1000.0,
        })
    }

    /// Bounding box in a projected CRS with the given linear `unit`.
    ///
    /// Fails with [`AdvisorError::MalformedCrs`] if the unit is not linear.
    pub fn from_projected_bounds(
        x_min: f64,
        y_min: f64,
        x_max: f64,
        y_max: f64,
        unit: Unit,
    ) -> Result<Self> {
        let Some(meters_per_unit) = unit.meters_per_unit() else {
            return Err(AdvisorError::MalformedCrs(format!(
                "projected bounds require a linear unit, got {unit}"
            )));
        };

        let min = geo::Point::new(x_min, y_min);
        let max = geo::Point::new(x_max, y_max);

        Self::from_diagonal_km(min.euclidean_distance(&max) * meters_per_unit / 1000.0)
    }

    /// Length of the bounding box diagonal in kilometres.
    pub fn diagonal_km(&self) -> f64 {
        self.diagonal_km
    }
}

impl TryFrom<f64> for Extent {
    type Error = AdvisorError;

    fn try_from(diagonal_km: f64) -> Result<Self> {
        Self::from_diagonal_km(diagonal_km)
    }
}

impl From<Extent> for f64 {
    fn from(extent: Extent) -> Self {
        extent.diagonal_km
    }
}

/// Finds the narrowest longitude range covering all of `longitudes`, as its western edge and width in degrees.
///
/// The range is the complement of the largest gap between neighbouring longitudes on the circle. Returns `None`
/// for an empty slice.
fn covering_longitude_range(longitudes: &mut [f64]) -> Option<(f64, f64)> {
    longitudes.sort_by(f64::total_cmp);
    let first = *longitudes.first()?;
    let last = *longitudes.last()?;

    // gap across the antimeridian, from the easternmost point back to the westernmost one
    let mut largest_gap = first + 360.0 - last;
    let mut start = first;

    for pair in longitudes.windows(2) {
        let gap = pair[1] - pair[0];
        if gap > largest_gap {
            largest_gap = gap;
            start = pair[1];
        }
    }

    Some((start, 360.0 - largest_gap))
}
