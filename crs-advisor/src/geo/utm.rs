//! Selection of the UTM zone and its WGS84 EPSG code for a point.

use serde::Serialize;

use crate::crs::CrsDescriptor;
use crate::error::Result;
use crate::geo::point::{Coordinate, GeoPoint};

/// Number of UTM zones around the globe.
pub const UTM_ZONE_COUNT: u8 = 60;
/// Width of a UTM zone in degrees of longitude.
pub const UTM_ZONE_WIDTH: f64 = 6.0;
/// Latitude above which (by absolute value) UTM is not the recommended projection.
pub const UTM_POLAR_LIMIT: f64 = 84.0;

/// First EPSG code of the WGS84 / UTM northern zones (zone 1 is `32601`).
pub const EPSG_UTM_NORTH_BASE: u32 = 32600;
/// First EPSG code of the WGS84 / UTM southern zones (zone 1 is `32701`).
pub const EPSG_UTM_SOUTH_BASE: u32 = 32700;

/// Result of [`select_utm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UtmSelection {
    zone_number: u8,
    epsg_code: u32,
    polar_warning: bool,
}

impl UtmSelection {
    /// UTM zone number in `1..=60`.
    pub fn zone_number(&self) -> u8 {
        self.zone_number
    }

    /// EPSG code of the WGS84 / UTM CRS for the zone and hemisphere.
    pub fn epsg_code(&self) -> u32 {
        self.epsg_code
    }

    /// Set when the point lies beyond 84° north or south, where UPS should be used instead of UTM.
    pub fn polar_warning(&self) -> bool {
        self.polar_warning
    }

    /// Whether the selected code belongs to the southern hemisphere range.
    pub fn is_southern(&self) -> bool {
        self.epsg_code > EPSG_UTM_SOUTH_BASE
    }

    /// Central meridian of the selected zone in degrees.
    pub fn central_meridian(&self) -> f64 {
        utm_central_meridian(self.zone_number)
    }

    /// Projected CRS descriptor of the selected zone.
    pub fn to_descriptor(&self) -> CrsDescriptor {
        CrsDescriptor::from_utm_selection(self)
    }
}

/// Selects the UTM zone and EPSG code for the coordinate.
///
/// The zone is `floor((lon + 180) / 6) mod 60 + 1`, so both `-180` and `180` map to zone 1. Points with
/// latitude above zero get the northern code (`32600 + zone`), everything else including the equator gets the
/// southern one (`32700 + zone`).
///
/// Irregular zones around Norway and Svalbard are not taken into account. Points closer to the poles than 84°
/// still receive a nominal zone, but [`UtmSelection::polar_warning`] is set.
///
/// ```
/// use crs_advisor::geo::{select_utm, Coordinate};
///
/// let london = Coordinate::new(-0.1, 51.5).unwrap();
/// let selection = select_utm(&london);
/// assert_eq!(selection.zone_number(), 30);
/// assert_eq!(selection.epsg_code(), 32630);
/// ```
pub fn select_utm(coordinate: &Coordinate) -> UtmSelection {
    let lon = coordinate.lon();
    let lat = coordinate.lat();

    let zone_index =
        ((lon + 180.0) / UTM_ZONE_WIDTH).floor() as u32 % u32::from(UTM_ZONE_COUNT);
    let zone_number = zone_index as u8 + 1;

    let epsg_code = if lat > 0.0 {
        EPSG_UTM_NORTH_BASE + u32::from(zone_number)
    } else {
        EPSG_UTM_SOUTH_BASE + u32::from(zone_number)
    };

    let polar_warning = lat.abs() > UTM_POLAR_LIMIT;
    if polar_warning {
        log::warn!(
            "Point ({lon}, {lat}) is outside of the UTM latitude band, UPS is recommended instead"
        );
    }

    log::trace!("Selected UTM zone {zone_number} (EPSG:{epsg_code}) for ({lon}, {lat})");

    UtmSelection {
        zone_number,
        epsg_code,
        polar_warning,
    }
}

/// Validates the longitude and latitude and selects the UTM zone for them. See [`select_utm`].
pub fn select_utm_lonlat(lon: f64, lat: f64) -> Result<UtmSelection> {
    Ok(select_utm(&Coordinate::new(lon, lat)?))
}

/// Returns the central meridian of the UTM zone in degrees.
pub fn utm_central_meridian(zone: u8) -> f64 {
    f64::from(zone) * UTM_ZONE_WIDTH - 183.0
}

/// Returns the zone number if `epsg_code` is one of the WGS84 / UTM codes, with `true` for the southern ones.
pub fn utm_zone_from_epsg(epsg_code: u32) -> Option<(u8, bool)> {
    let zone_range = 1..=u32::from(UTM_ZONE_COUNT);
    if zone_range.contains(&epsg_code.wrapping_sub(EPSG_UTM_NORTH_BASE)) {
        Some(((epsg_code - EPSG_UTM_NORTH_BASE) as u8, false))
    } else if zone_range.contains(&epsg_code.wrapping_sub(EPSG_UTM_SOUTH_BASE)) {
        Some(((epsg_code - EPSG_UTM_SOUTH_BASE) as u8, true))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdvisorError;
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;

    fn select(lon: f64, lat: f64) -> UtmSelection {
        select_utm_lonlat(lon, lat).unwrap()
    }

    #[test]
    fn zone_is_always_in_range() {
        let mut lon = -180.0;
        while lon < 180.0 {
            let mut lat = -90.0;
            while lat <= 90.0 {
                let zone = select(lon, lat).zone_number();
                assert!((1..=60).contains(&zone), "zone {zone} for ({lon}, {lat})");
                lat += 7.5;
            }
            lon += 0.25;
        }
    }

    #[test]
    fn antimeridian_wraps_to_first_zone() {
        for lat in [-60.0, 0.0, 0.5, 45.0] {
            assert_eq!(select(180.0, lat), select(-180.0, lat));
            assert_eq!(select(180.0, lat).zone_number(), 1);
        }
    }

    #[test]
    fn known_cities() {
        let auckland = select(174.7, -36.9);
        assert_eq!(auckland.zone_number(), 60);
        assert_eq!(auckland.epsg_code(), 32760);
        assert!(auckland.is_southern());

        let london = select(-0.1, 51.5);
        assert_eq!(london.zone_number(), 30);
        assert_eq!(london.epsg_code(), 32630);
        assert!(!london.is_southern());

        assert_eq!(select(116.0, 40.0).epsg_code(), 32650);
        assert_eq!(select(-122.0, 37.0).zone_number(), 10);
        assert_eq!(select(0.0, 10.0).zone_number(), 31);
    }

    #[test]
    fn zone_borders() {
        assert_eq!(select(-174.0, 10.0).zone_number(), 2);
        assert_eq!(select(-174.000001, 10.0).zone_number(), 1);
        assert_eq!(select(179.999999, 10.0).zone_number(), 60);
    }

    #[test]
    fn equator_is_southern() {
        let selection = select(3.0, 0.0);
        assert_eq!(selection.epsg_code(), 32731);
        assert!(selection.is_southern());

        assert_eq!(select(3.0, 1e-9).epsg_code(), 32631);
    }

    #[test]
    fn polar_points_get_nominal_zone_with_warning() {
        let svalbard = select(15.0, 84.5);
        assert_eq!(svalbard.zone_number(), 33);
        assert_eq!(svalbard.epsg_code(), 32633);
        assert!(svalbard.polar_warning());

        let antarctica = select(15.0, -90.0);
        assert_eq!(antarctica.epsg_code(), 32733);
        assert!(antarctica.polar_warning());

        assert!(!select(15.0, 84.0).polar_warning());
        assert!(!select(15.0, -84.0).polar_warning());
    }

    #[test]
    fn invalid_input_is_rejected() {
        assert_matches!(
            select_utm_lonlat(190.0, 0.0),
            Err(AdvisorError::InvalidCoordinate { .. })
        );
        assert_matches!(
            select_utm_lonlat(0.0, 91.0),
            Err(AdvisorError::InvalidCoordinate { .. })
        );
    }

    #[test]
    fn central_meridians() {
        assert_relative_eq!(utm_central_meridian(1), -177.0);
        assert_relative_eq!(utm_central_meridian(31), 3.0);
        assert_relative_eq!(select(116.0, 40.0).central_meridian(), 117.0);
    }

    #[test]
    fn zone_from_epsg() {
        assert_eq!(utm_zone_from_epsg(32630), Some((30, false)));
        assert_eq!(utm_zone_from_epsg(32760), Some((60, true)));
        assert_eq!(utm_zone_from_epsg(32601), Some((1, false)));
        assert_eq!(utm_zone_from_epsg(32600), None);
        assert_eq!(utm_zone_from_epsg(32661), None);
        assert_eq!(utm_zone_from_epsg(4326), None);
    }

    #[test]
    fn selection_descriptor() {
        let descriptor = select(174.7, -36.9).to_descriptor();
        assert!(descriptor.is_projected());
        assert_eq!(descriptor.epsg_code(), Some(32760));
        assert!(descriptor.is_southern_hemisphere_utm());
        assert_eq!(descriptor.utm_zone(), Some(60));
    }
}
