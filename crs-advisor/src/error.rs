//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdvisorError {
    /// CRS metadata is contradictory or cannot be parsed.
    #[error("malformed CRS: {0}")]
    MalformedCrs(String),
    /// Longitude or latitude is outside of the valid range.
    #[error("invalid coordinate: lon {lon}, lat {lat}")]
    InvalidCoordinate {
        /// Longitude in degrees.
        lon: f64,
        /// Latitude in degrees.
        lat: f64,
    },
    /// Operation kind is not one of the supported kinds.
    #[error("unsupported operation kind: {0}")]
    UnsupportedOperationKind(String),
    /// Extent of a dataset is not a non-negative number.
    #[error("invalid extent: {0}")]
    InvalidExtent(String),
    /// Advisor configuration is invalid.
    #[error("invalid advisor configuration: {0}")]
    InvalidConfig(String),
}

/// Result type with [`AdvisorError`] as the error.
pub type Result<T> = std::result::Result<T, AdvisorError>;
