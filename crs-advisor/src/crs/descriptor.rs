use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};
use crate::geo::{
    utm_zone_from_epsg, UtmSelection, EPSG_UTM_NORTH_BASE, EPSG_UTM_SOUTH_BASE, UTM_ZONE_COUNT,
};

/// EPSG code of the WGS84 geographic CRS.
pub const EPSG_WGS84: u32 = 4326;
/// EPSG code of the Web Mercator projection.
pub const EPSG_WEB_MERCATOR: u32 = 3857;

/// Length of the international foot in meters.
const METERS_PER_FOOT: f64 = 0.3048;

/// Nature of a coordinate reference system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsKind {
    /// Angular coordinates (longitude and latitude).
    Geographic,
    /// Planar coordinates in linear units.
    Projected,
    /// No CRS is set.
    Unknown,
}

/// Unit of the CRS axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Angular degrees.
    Degree,
    /// Meters.
    Meter,
    /// International feet.
    Foot,
    /// Unit is not declared.
    Unspecified,
}

impl Unit {
    /// Returns true for angular units.
    pub fn is_angular(&self) -> bool {
        matches!(self, Self::Degree)
    }

    /// Returns true for linear units.
    pub fn is_linear(&self) -> bool {
        matches!(self, Self::Meter | Self::Foot)
    }

    /// Length of one unit in meters, if the unit is linear.
    pub fn meters_per_unit(&self) -> Option<f64> {
        match self {
            Self::Meter => Some(1.0),
            Self::Foot => Some(METERS_PER_FOOT),
            Self::Degree | Self::Unspecified => None,
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Degree => "degree",
            Self::Meter => "metre",
            Self::Foot => "foot",
            Self::Unspecified => "unspecified",
        };
        f.write_str(name)
    }
}

/// Immutable description of the CRS a dataset uses.
///
/// Descriptors are either produced by the [classifier](crate::crs::classify), by the UTM zone selector or by one of
/// the constructors of this type. All of them guarantee that:
/// * an [`Unknown`](CrsKind::Unknown) CRS has no EPSG code and [`Unspecified`](Unit::Unspecified) unit,
/// * a [`Geographic`](CrsKind::Geographic) CRS uses degrees,
/// * a [`Projected`](CrsKind::Projected) CRS uses a linear unit,
/// * the southern hemisphere flag is only set for projected CRSs and agrees with the EPSG code of a UTM zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCrsDescriptor")]
pub struct CrsDescriptor {
    kind: CrsKind,
    unit: Unit,
    epsg_code: Option<u32>,
    is_southern_hemisphere_utm: bool,
}

#[derive(Deserialize)]
struct RawCrsDescriptor {
    kind: CrsKind,
    unit: Unit,
    #[serde(default)]
    epsg_code: Option<u32>,
    #[serde(default)]
    is_southern_hemisphere_utm: bool,
}

impl TryFrom<RawCrsDescriptor> for CrsDescriptor {
    type Error = AdvisorError;

    fn try_from(value: RawCrsDescriptor) -> Result<Self> {
        Self::new(
            value.kind,
            value.unit,
            value.epsg_code,
            value.is_southern_hemisphere_utm,
        )
    }
}

impl CrsDescriptor {
    /// Creates a new descriptor, checking that the parameters are consistent with each other.
    pub fn new(
        kind: CrsKind,
        unit: Unit,
        epsg_code: Option<u32>,
        is_southern_hemisphere_utm: bool,
    ) -> Result<Self> {
        match kind {
            CrsKind::Unknown => {
                if epsg_code.is_some() || unit != Unit::Unspecified || is_southern_hemisphere_utm {
                    return Err(malformed(
                        "a CRS that is not set cannot have an EPSG code, unit or hemisphere",
                    ));
                }
            }
            CrsKind::Geographic => {
                if !unit.is_angular() {
                    return Err(malformed(format!("geographic CRS must use degrees, got {unit}")));
                }
                if is_southern_hemisphere_utm {
                    return Err(malformed("geographic CRS cannot be a UTM zone"));
                }
            }
            CrsKind::Projected => {
                if !unit.is_linear() {
                    return Err(malformed(format!(
                        "projected CRS must use a linear unit, got {unit}"
                    )));
                }
            }
        }

        if let Some((_, south)) = epsg_code.and_then(utm_zone_from_epsg) {
            if kind != CrsKind::Projected || unit != Unit::Meter {
                return Err(malformed(format!(
                    "EPSG:{} is a UTM zone in meters",
                    epsg_code.unwrap_or_default()
                )));
            }
            if south != is_southern_hemisphere_utm {
                return Err(malformed(format!(
                    "hemisphere flag contradicts EPSG:{}",
                    epsg_code.unwrap_or_default()
                )));
            }
        }

        Ok(Self {
            kind,
            unit,
            epsg_code,
            is_southern_hemisphere_utm,
        })
    }

    /// Descriptor of a dataset without any CRS information.
    pub const fn unknown() -> Self {
        Self {
            kind: CrsKind::Unknown,
            unit: Unit::Unspecified,
            epsg_code: None,
            is_southern_hemisphere_utm: false,
        }
    }

    /// WGS84 geographic CRS (EPSG:4326).
    pub const fn wgs84() -> Self {
        Self {
            kind: CrsKind::Geographic,
            unit: Unit::Degree,
            epsg_code: Some(EPSG_WGS84),
            is_southern_hemisphere_utm: false,
        }
    }

    /// Web Mercator projection (EPSG:3857).
    pub const fn web_mercator() -> Self {
        Self {
            kind: CrsKind::Projected,
            unit: Unit::Meter,
            epsg_code: Some(EPSG_WEB_MERCATOR),
            is_southern_hemisphere_utm: false,
        }
    }

    /// WGS84 / UTM projection of the given zone.
    pub fn utm(zone: u8, south: bool) -> Result<Self> {
        if !(1..=UTM_ZONE_COUNT).contains(&zone) {
            return Err(malformed(format!("UTM zone {zone} is out of range 1-60")));
        }

        let base = if south {
            EPSG_UTM_SOUTH_BASE
        } else {
            EPSG_UTM_NORTH_BASE
        };

        Ok(Self {
            kind: CrsKind::Projected,
            unit: Unit::Meter,
            epsg_code: Some(base + u32::from(zone)),
            is_southern_hemisphere_utm: south,
        })
    }

    pub(crate) fn from_utm_selection(selection: &UtmSelection) -> Self {
        Self {
            kind: CrsKind::Projected,
            unit: Unit::Meter,
            epsg_code: Some(selection.epsg_code()),
            is_southern_hemisphere_utm: selection.is_southern(),
        }
    }

    /// Kind of the CRS.
    pub fn kind(&self) -> CrsKind {
        self.kind
    }

    /// Unit of the CRS axes.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// EPSG code, if known.
    pub fn epsg_code(&self) -> Option<u32> {
        self.epsg_code
    }

    /// Whether this is a southern hemisphere UTM projection.
    pub fn is_southern_hemisphere_utm(&self) -> bool {
        self.is_southern_hemisphere_utm
    }

    /// Shortcut for checking [`CrsKind::Geographic`].
    pub fn is_geographic(&self) -> bool {
        self.kind == CrsKind::Geographic
    }

    /// Shortcut for checking [`CrsKind::Projected`].
    pub fn is_projected(&self) -> bool {
        self.kind == CrsKind::Projected
    }

    /// Shortcut for checking [`CrsKind::Unknown`].
    pub fn is_unknown(&self) -> bool {
        self.kind == CrsKind::Unknown
    }

    /// UTM zone number if the EPSG code is one of the WGS84 / UTM codes.
    pub fn utm_zone(&self) -> Option<u8> {
        self.epsg_code
            .and_then(utm_zone_from_epsg)
            .map(|(zone, _)| zone)
    }
}

impl Default for CrsDescriptor {
    fn default() -> Self {
        Self::unknown()
    }
}

fn malformed(message: impl Into<String>) -> AdvisorError {
    AdvisorError::MalformedCrs(message.into())
}
