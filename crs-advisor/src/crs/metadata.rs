use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::crs::wkt::WktNode;
use crate::error::{AdvisorError, Result};
use crate::geo::{EPSG_UTM_NORTH_BASE, EPSG_UTM_SOUTH_BASE, UTM_ZONE_COUNT};

lazy_static! {
    static ref WKT_ROOT: Regex = Regex::new(r"^\s*[A-Za-z_]+\s*[\[(]").expect("valid regex");
}

/// Raw CRS metadata as it is attached to a dataset.
///
/// The metadata is not interpreted until it is passed to [`classify`](crate::crs::classify). It can be built
/// manually with the `with_*` methods or parsed from a CRS definition string with [`CrsMetadata::parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrsMetadata {
    units: Vec<String>,
    epsg_code: Option<u32>,
    definition: Option<String>,
    southern_hemisphere: bool,
}

impl CrsMetadata {
    /// Creates empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declared axis unit, e.g. `"degree"`, `"metre"` or `"US survey foot"`.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.units.push(unit.into());
        self
    }

    /// Sets the EPSG code of the CRS.
    pub fn with_epsg(mut self, code: u32) -> Self {
        self.epsg_code = Some(code);
        self
    }

    /// Keeps the definition string the metadata came from. The string is not parsed, use
    /// [`CrsMetadata::parse`] for that.
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    /// Marks the CRS as the southern variant of a UTM projection.
    pub fn with_southern_hemisphere(mut self) -> Self {
        self.southern_hemisphere = true;
        self
    }

    /// Parses a CRS definition string.
    ///
    /// Supported forms are:
    /// * authority codes: `EPSG:32633`, `urn:ogc:def:crs:EPSG::4326`, `OGC:CRS84`,
    /// * PROJ strings: `+proj=utm +zone=33 +south +datum=WGS84 +units=m`,
    /// * WKT1 and WKT2: `GEOGCS[...]`, `PROJCS[...]`, `GEOGCRS[...]`, `PROJCRS[...]`.
    ///
    /// For WKT only the units of the coordinate system axes and the authority code of the root node are read.
    /// Units and EPSG codes are recorded as they are; contradictions between them are only detected by
    /// [`classify`](crate::crs::classify).
    ///
    /// ```
    /// use crs_advisor::crs::CrsMetadata;
    ///
    /// let metadata = CrsMetadata::parse("+proj=utm +zone=60 +south +datum=WGS84").unwrap();
    /// assert_eq!(metadata.epsg_code(), Some(32760));
    /// assert_eq!(metadata.units(), ["m"]);
    /// ```
    pub fn parse(definition: &str) -> Result<Self> {
        let text = definition.trim();
        if text.is_empty() {
            return Err(AdvisorError::MalformedCrs("empty CRS definition".into()));
        }

        let mut metadata = if let Some(code) = parse_authority_code(text)? {
            Self::new().with_epsg(code)
        } else if text.eq_ignore_ascii_case("OGC:CRS84") || text.eq_ignore_ascii_case("CRS84") {
            Self::new().with_unit("degree")
        } else if text.starts_with('+') {
            parse_proj(text)?
        } else if WKT_ROOT.is_match(text) {
            parse_wkt(text)?
        } else {
            return Err(AdvisorError::MalformedCrs(format!(
                "unrecognized CRS definition: {text}"
            )));
        };

        log::trace!("Parsed CRS definition {text:?} into {metadata:?}");

        metadata.definition = Some(text.to_string());
        Ok(metadata)
    }

    /// Declared unit names.
    pub fn units(&self) -> &[String] {
        &self.units
    }

    /// EPSG code, if declared.
    pub fn epsg_code(&self) -> Option<u32> {
        self.epsg_code
    }

    /// Definition string the metadata was parsed from.
    pub fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }

    /// Whether the southern hemisphere variant of a UTM projection is declared.
    pub fn southern_hemisphere(&self) -> bool {
        self.southern_hemisphere
    }

    /// Returns true if the metadata says nothing at all about the CRS.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
            && self.epsg_code.is_none()
            && self.definition.is_none()
            && !self.southern_hemisphere
    }
}

fn parse_authority_code(text: &str) -> Result<Option<u32>> {
    let lower = text.to_ascii_lowercase();
    let code = if let Some(code) = lower.strip_prefix("epsg:") {
        code
    } else if let Some(code) = lower.strip_prefix("urn:ogc:def:crs:epsg:") {
        // version part is optional: `urn:ogc:def:crs:EPSG::4326` or `urn:ogc:def:crs:EPSG:9.8:4326`
        code.rsplit(':').next().unwrap_or_default()
    } else {
        return Ok(None);
    };

    code.trim()
        .parse()
        .map(Some)
        .map_err(|_| AdvisorError::MalformedCrs(format!("invalid EPSG code in {text}")))
}

fn parse_proj(text: &str) -> Result<CrsMetadata> {
    let mut metadata = CrsMetadata::new();
    let mut projection = None;
    let mut zone = None;
    let mut wgs84 = false;

    for token in text.split_whitespace() {
        let Some(token) = token.strip_prefix('+') else {
            return Err(AdvisorError::MalformedCrs(format!(
                "invalid PROJ parameter {token:?}"
            )));
        };

        let (key, value) = match token.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (token, None),
        };

        match (key, value) {
            ("proj", Some(value)) => projection = Some(value.to_ascii_lowercase()),
            ("units", Some(value)) => metadata.units.push(value.to_string()),
            ("zone", Some(value)) => {
                let parsed = value.parse::<u8>().ok().filter(|z| (1..=UTM_ZONE_COUNT).contains(z));
                zone = Some(parsed.ok_or_else(|| {
                    AdvisorError::MalformedCrs(format!("invalid UTM zone {value:?}"))
                })?);
            }
            ("south", None) => metadata.southern_hemisphere = true,
            ("datum" | "ellps", Some(value)) => wgs84 |= value.eq_ignore_ascii_case("WGS84"),
            ("init", Some(value)) => metadata.epsg_code = parse_authority_code(value)?,
            _ => {}
        }
    }

    match projection.as_deref() {
        Some("longlat" | "latlong" | "lonlat" | "latlon") => {
            if metadata.units.is_empty() {
                metadata.units.push("degree".into());
            }
        }
        Some(other) => {
            // PROJ defaults to meters for all projections
            if metadata.units.is_empty() {
                metadata.units.push("m".into());
            }

            if other == "utm" && wgs84 && metadata.epsg_code.is_none() {
                if let Some(zone) = zone {
                    let base = if metadata.southern_hemisphere {
                        EPSG_UTM_SOUTH_BASE
                    } else {
                        EPSG_UTM_NORTH_BASE
                    };
                    metadata.epsg_code = Some(base + u32::from(zone));
                }
            }
        }
        None if metadata.epsg_code.is_none() => {
            return Err(AdvisorError::MalformedCrs(format!(
                "PROJ string without +proj parameter: {text}"
            )));
        }
        None => {}
    }

    Ok(metadata)
}

fn parse_wkt(text: &str) -> Result<CrsMetadata> {
    let root = WktNode::parse(text)?;
    log::trace!("Reading units and authority of WKT {} node", root.keyword());

    let mut metadata = CrsMetadata::new();
    metadata.units = root.coordinate_units();
    metadata.epsg_code = root.epsg_code()?;

    Ok(metadata)
}
