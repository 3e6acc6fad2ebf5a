//! Helpers for choosing and checking coordinate reference systems before running geometric operations.
//!
//! The crate does not transform coordinates or compute geometries. It answers three questions a GIS application
//! has to ask before it hands data to a geometry or projection engine:
//!
//! * What kind of CRS does the data use? [`crs::classify`] turns raw metadata ([`crs::CrsMetadata`], which can
//!   be parsed from EPSG codes, PROJ strings or WKT) into an immutable [`crs::CrsDescriptor`].
//! * Which projected CRS should be used around a point? [`geo::select_utm`] returns the UTM zone and the WGS84
//!   / UTM EPSG code for it.
//! * Will the result of an operation be trustworthy? [`advisor::Advisor`] returns a verdict for a distance,
//!   area, direction or topological operation on data in a given CRS.
//!
//! ```
//! use crs_advisor::advisor::{Advisor, OperationKind, OperationRequest, Verdict};
//! use crs_advisor::crs::{classify, CrsMetadata};
//! use crs_advisor::geo::{select_utm, Coordinate, Extent};
//!
//! let points = [
//!     Coordinate::new(174.70, -36.90).unwrap(),
//!     Coordinate::new(174.80, -36.85).unwrap(),
//! ];
//! let crs = classify(Some(&CrsMetadata::parse("EPSG:4326").unwrap())).unwrap();
//!
//! let advisor = Advisor::default();
//! let buffer = OperationRequest::new(OperationKind::DistanceBuffer, crs);
//! assert_eq!(advisor.advise(&buffer).verdict(), Verdict::UnsafeSphericalRecommended);
//!
//! // reproject into the local UTM zone instead
//! let utm = select_utm(&points[0]);
//! assert_eq!(utm.epsg_code(), 32760);
//!
//! let extent = Extent::from_coordinates(&points).unwrap();
//! let buffer = OperationRequest::new(OperationKind::DistanceBuffer, utm.to_descriptor()).with_extent(extent);
//! assert!(advisor.advise(&buffer).is_safe());
//! ```
//!
//! All types are immutable values and all functions are pure, so they can be used from any number of threads.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod advisor;
pub mod crs;
pub mod error;
pub mod geo;

pub use crate::advisor::{
    Advisor, AdvisorConfig, Advisory, OperationKind, OperationRequest, ReasonCode, Verdict,
};
pub use crate::crs::{classify, CrsDescriptor, CrsKind, CrsMetadata, Unit};
pub use crate::error::{AdvisorError, Result};
pub use crate::geo::{select_utm, select_utm_lonlat, Coordinate, Extent, GeoPoint, UtmSelection};
