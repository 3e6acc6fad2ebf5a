use crate::crs::descriptor::{CrsDescriptor, CrsKind, Unit, EPSG_WEB_MERCATOR};
use crate::crs::metadata::CrsMetadata;
use crate::error::{AdvisorError, Result};
use crate::geo::utm_zone_from_epsg;

/// Geographic CRSs recognized by their EPSG code alone: WGS84, NAD83, NAD27, ETRS89, CGCS2000 and GDA94.
const GEOGRAPHIC_EPSG_CODES: [u32; 6] = [4326, 4269, 4267, 4258, 4490, 4283];

/// Classifies raw CRS metadata.
///
/// `None` means that the dataset has no CRS set at all, and results in a [`CrsKind::Unknown`] descriptor. The same
/// is true for metadata that declares nothing. Otherwise:
/// * angular units only give a [`CrsKind::Geographic`] CRS,
/// * linear units only (meters or feet) give a [`CrsKind::Projected`] CRS,
/// * a well-known EPSG code is enough when no units are declared.
///
/// Fails with [`AdvisorError::MalformedCrs`] if the metadata declares both angular and linear units, declares units
/// that contradict the EPSG code, uses unit names that are not recognized, or does not allow to determine the units.
///
/// ```
/// use crs_advisor::crs::{classify, CrsKind, CrsMetadata};
///
/// let metadata = CrsMetadata::new().with_unit("degree");
/// assert_eq!(classify(Some(&metadata)).unwrap().kind(), CrsKind::Geographic);
/// assert_eq!(classify(None).unwrap().kind(), CrsKind::Unknown);
/// ```
pub fn classify(metadata: Option<&CrsMetadata>) -> Result<CrsDescriptor> {
    let Some(metadata) = metadata.filter(|m| !m.is_empty()) else {
        log::debug!("No CRS metadata, CRS is not set");
        return Ok(CrsDescriptor::unknown());
    };

    let declared = declared_unit(metadata)?;
    let epsg_code = metadata.epsg_code();
    let implied = epsg_code.and_then(well_known_unit);

    let unit = match (declared, implied) {
        (Some(declared), Some(implied)) if declared != implied => {
            return Err(AdvisorError::MalformedCrs(format!(
                "declared unit {declared} contradicts EPSG:{} which uses {implied}",
                epsg_code.unwrap_or_default()
            )));
        }
        (Some(unit), _) | (None, Some(unit)) => unit,
        (None, None) => {
            return Err(AdvisorError::MalformedCrs(match epsg_code {
                Some(code) => {
                    format!("EPSG:{code} is not a well-known code and no units are declared")
                }
                None => "CRS metadata declares neither units nor an EPSG code".to_string(),
            }));
        }
    };

    let kind = if unit.is_angular() {
        CrsKind::Geographic
    } else {
        CrsKind::Projected
    };

    let southern = metadata.southern_hemisphere()
        || epsg_code
            .and_then(utm_zone_from_epsg)
            .is_some_and(|(_, south)| south);

    let descriptor = CrsDescriptor::new(kind, unit, epsg_code, southern)?;
    log::debug!("Classified CRS metadata as {descriptor:?}");

    Ok(descriptor)
}

/// Unit declared by the metadata, if any.
fn declared_unit(metadata: &CrsMetadata) -> Result<Option<Unit>> {
    let mut result: Option<Unit> = None;

    for name in metadata.units() {
        let unit = parse_unit_name(name).ok_or_else(|| {
            AdvisorError::MalformedCrs(format!("unrecognized unit {name:?}"))
        })?;

        match result {
            Some(existing) if existing != unit => {
                let message = if existing.is_angular() != unit.is_angular() {
                    format!("both angular and linear units are declared ({existing}, {unit})")
                } else {
                    format!("conflicting linear units {existing} and {unit} are declared")
                };
                return Err(AdvisorError::MalformedCrs(message));
            }
            _ => result = Some(unit),
        }
    }

    Ok(result)
}

fn parse_unit_name(name: &str) -> Option<Unit> {
    let name = name.trim().to_ascii_lowercase();
    match name.as_str() {
        "degree" | "degrees" | "deg" | "dd" | "decimal degree" | "decimal degrees" => {
            Some(Unit::Degree)
        }
        "metre" | "meter" | "metres" | "meters" | "m" => Some(Unit::Meter),
        "foot" | "feet" | "ft" | "us-ft" | "us survey foot" | "us_survey_foot" | "foot_us"
        | "international foot" => Some(Unit::Foot),
        _ => None,
    }
}

/// Unit of a CRS that can be recognized by its EPSG code alone.
fn well_known_unit(code: u32) -> Option<Unit> {
    if GEOGRAPHIC_EPSG_CODES.contains(&code) {
        Some(Unit::Degree)
    } else if code == EPSG_WEB_MERCATOR || utm_zone_from_epsg(code).is_some() {
        Some(Unit::Meter)
    } else {
        None
    }
}
