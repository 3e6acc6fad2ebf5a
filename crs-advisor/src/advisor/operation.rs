use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::crs::CrsDescriptor;
use crate::error::AdvisorError;
use crate::geo::Extent;

/// Kind of geometric operation a caller intends to apply to a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// Buffering or any other operation parametrized by a linear distance.
    DistanceBuffer,
    /// Computation of areas.
    AreaComputation,
    /// Computation of bearings and azimuths.
    DirectionComputation,
    /// Intersects, contains, touches and other topological predicates.
    TopologicalPredicate,
}

impl OperationKind {
    /// All supported operation kinds.
    pub const ALL: [OperationKind; 4] = [
        Self::DistanceBuffer,
        Self::AreaComputation,
        Self::DirectionComputation,
        Self::TopologicalPredicate,
    ];

    /// Canonical name of the kind, e.g. `DISTANCE_BUFFER`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DistanceBuffer => "DISTANCE_BUFFER",
            Self::AreaComputation => "AREA_COMPUTATION",
            Self::DirectionComputation => "DIRECTION_COMPUTATION",
            Self::TopologicalPredicate => "TOPOLOGICAL_PREDICATE",
        }
    }

    /// Whether the result of the operation depends on the metric of the CRS.
    pub fn is_metric(&self) -> bool {
        !matches!(self, Self::TopologicalPredicate)
    }
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses canonical names case-insensitively, with either `_` or `-` as separators.
impl FromStr for OperationKind {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| AdvisorError::UnsupportedOperationKind(s.to_string()))
    }
}

/// Description of an intended operation: what is done and on which data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRequest {
    kind: OperationKind,
    crs: CrsDescriptor,
    extent_diagonal_km: Option<Extent>,
}

impl OperationRequest {
    /// Creates a new request without information about the spatial extent of the data.
    pub fn new(kind: OperationKind, crs: CrsDescriptor) -> Self {
        Self {
            kind,
            crs,
            extent_diagonal_km: None,
        }
    }

    /// Sets the bounding box diagonal of the data in kilometres.
    ///
    /// Fails with [`AdvisorError::InvalidExtent`] if the diagonal is negative, infinite or `NaN`.
    pub fn with_extent_km(self, diagonal_km: f64) -> Result<Self, AdvisorError> {
        Ok(self.with_extent(Extent::from_diagonal_km(diagonal_km)?))
    }

    /// Sets the spatial extent of the data.
    pub fn with_extent(mut self, extent: Extent) -> Self {
        self.extent_diagonal_km = Some(extent);
        self
    }

    /// Kind of the operation.
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// CRS of the input data.
    pub fn crs(&self) -> &CrsDescriptor {
        &self.crs
    }

    /// Spatial extent of the data, if known.
    pub fn extent(&self) -> Option<Extent> {
        self.extent_diagonal_km
    }

    /// Bounding box diagonal of the data in kilometres, if known.
    pub fn extent_diagonal_km(&self) -> Option<f64> {
        self.extent_diagonal_km.map(|extent| extent.diagonal_km())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parse_kinds() {
        assert_eq!(
            "DISTANCE_BUFFER".parse::<OperationKind>().unwrap(),
            OperationKind::DistanceBuffer
        );
        assert_eq!(
            "area_computation".parse::<OperationKind>().unwrap(),
            OperationKind::AreaComputation
        );
        assert_eq!(
            " direction-computation ".parse::<OperationKind>().unwrap(),
            OperationKind::DirectionComputation
        );
        assert_eq!(
            "Topological_Predicate".parse::<OperationKind>().unwrap(),
            OperationKind::TopologicalPredicate
        );
    }

    #[test]
    fn parse_unsupported_kind() {
        assert_matches!(
            "RASTER_RESAMPLING".parse::<OperationKind>(),
            Err(AdvisorError::UnsupportedOperationKind(name)) if name == "RASTER_RESAMPLING"
        );
        assert!("".parse::<OperationKind>().is_err());
    }

    #[test]
    fn display_roundtrip() {
        for kind in OperationKind::ALL {
            assert_eq!(kind.to_string().parse::<OperationKind>().unwrap(), kind);
        }
    }

    #[test]
    fn request_extent() {
        let request = OperationRequest::new(OperationKind::AreaComputation, CrsDescriptor::wgs84());
        assert_eq!(request.extent_diagonal_km(), None);

        let extent = Extent::from_diagonal_km(42.0).unwrap();
        let request = request.with_extent(extent);
        assert_eq!(request.extent_diagonal_km(), Some(42.0));
        assert_eq!(request.kind(), OperationKind::AreaComputation);
        assert!(request.crs().is_geographic());

        let request = request.with_extent_km(7.5).unwrap();
        assert_eq!(request.extent(), Some(Extent::from_diagonal_km(7.5).unwrap()));
    }

    #[test]
    fn request_rejects_invalid_extent() {
        for diagonal_km in [-5.0, f64::NAN, f64::NEG_INFINITY, f64::INFINITY] {
            let request =
                OperationRequest::new(OperationKind::DistanceBuffer, CrsDescriptor::wgs84());
            assert_matches!(
                request.with_extent_km(diagonal_km),
                Err(AdvisorError::InvalidExtent(_))
            );
        }
    }
}
