//! Advice on whether a geometric operation gives trustworthy results in the CRS of the data.
//!
//! The [`Advisor`] does not perform any operations itself. It looks at the [`CrsDescriptor`] of the data, the
//! [kind of the operation](OperationKind) and optionally the spatial extent of the data, and returns an
//! [`Advisory`] saying whether the geometry engine can be trusted with the operation as is, or whether the data
//! should be reprojected or handed to a spherical engine first.
//!
//! ```
//! use crs_advisor::advisor::{Advisor, OperationKind, OperationRequest, Verdict};
//! use crs_advisor::crs::CrsDescriptor;
//!
//! let advisor = Advisor::default();
//! let request = OperationRequest::new(OperationKind::DistanceBuffer, CrsDescriptor::wgs84());
//!
//! assert_eq!(advisor.advise(&request).verdict(), Verdict::UnsafeSphericalRecommended);
//! ```

mod config;
mod operation;
mod verdict;

pub use config::{AdvisorConfig, DEFAULT_EXTENT_THRESHOLD_KM};
pub use operation::{OperationKind, OperationRequest};
pub use verdict::{Advisory, ReasonCode, Verdict};

use crate::crs::{CrsDescriptor, CrsKind};
use crate::error::Result;

/// Decides whether operations are sound for the CRS of their input.
///
/// The advisor is an immutable value and can be shared between any number of threads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Advisor {
    config: AdvisorConfig,
}

impl Advisor {
    /// Creates a new advisor, validating the configuration.
    pub fn new(config: AdvisorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration of the advisor.
    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Returns the verdict for the request.
    ///
    /// The decision is made as follows:
    /// * data without a CRS should always be reprojected, since the meaning of its units is unknown;
    /// * topological predicates on geographic data are safe;
    /// * distances, areas and directions on geographic data are safe only if a spherical engine is available;
    /// * operations on projected data are safe unless the data extent is larger than the configured threshold.
    pub fn advise(&self, request: &OperationRequest) -> Advisory {
        let crs = request.crs();
        let kind = request.kind();

        let advisory = match crs.kind() {
            CrsKind::Unknown => Advisory::new(
                Verdict::UnsafeReprojectRecommended,
                ReasonCode::NoCrsDeclared,
            ),
            CrsKind::Geographic => {
                if !kind.is_metric() {
                    Advisory::new(Verdict::Safe, ReasonCode::TopologyCrsInvariant)
                } else if self.config.spherical_engine() {
                    Advisory::new(Verdict::Safe, ReasonCode::SphericalEngineCompensates)
                } else {
                    Advisory::new(
                        Verdict::UnsafeSphericalRecommended,
                        ReasonCode::DegreeUnitsDistort,
                    )
                }
            }
            CrsKind::Projected => match request.extent_diagonal_km() {
                Some(extent) if extent > self.config.extent_threshold_km() => Advisory::new(
                    Verdict::UnsafeReprojectRecommended,
                    ReasonCode::ExtentExceedsProjectionAccuracy,
                ),
                _ if !kind.is_metric() => {
                    Advisory::new(Verdict::Safe, ReasonCode::TopologyCrsInvariant)
                }
                _ => Advisory::new(Verdict::Safe, ReasonCode::PlanarUnitsMatch),
            },
        };

        log::debug!(
            "{kind} on {:?} CRS (EPSG:{:?}, extent {:?} km): {advisory}",
            crs.kind(),
            crs.epsg_code(),
            request.extent_diagonal_km()
        );

        advisory
    }

    /// Same as [`Advisor::advise`], but takes the operation kind by its name.
    ///
    /// Fails with [`AdvisorError::UnsupportedOperationKind`](crate::error::AdvisorError::UnsupportedOperationKind)
    /// if the name is not one of the [`OperationKind`] names, and with
    /// [`AdvisorError::InvalidExtent`](crate::error::AdvisorError::InvalidExtent) if the extent is negative,
    /// infinite or `NaN`.
    pub fn advise_kind(
        &self,
        kind: &str,
        crs: &CrsDescriptor,
        extent_diagonal_km: Option<f64>,
    ) -> Result<Advisory> {
        let kind: OperationKind = kind.parse()?;
        let mut request = OperationRequest::new(kind, crs.clone());
        if let Some(extent) = extent_diagonal_km {
            request = request.with_extent_km(extent)?;
        }

        Ok(self.advise(&request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs::{classify, CrsMetadata, Unit};
    use crate::error::AdvisorError;
    use crate::geo::{select_utm_lonlat, Coordinate, Extent};
    use assert_matches::assert_matches;

    fn projected_meters() -> CrsDescriptor {
        CrsDescriptor::utm(33, false).unwrap()
    }

    fn advise(kind: OperationKind, crs: CrsDescriptor, extent: Option<f64>) -> Advisory {
        let mut request = OperationRequest::new(kind, crs);
        if let Some(extent) = extent {
            request = request.with_extent_km(extent).unwrap();
        }
        Advisor::default().advise(&request)
    }

    #[test]
    fn unknown_crs_needs_reprojection() {
        for kind in OperationKind::ALL {
            for extent in [None, Some(1.0), Some(10_000.0)] {
                let advisory = advise(kind, CrsDescriptor::unknown(), extent);
                assert_eq!(advisory.verdict(), Verdict::UnsafeReprojectRecommended);
                assert_eq!(advisory.reason(), ReasonCode::NoCrsDeclared);
            }
        }
    }

    #[test]
    fn buffer_in_projected_meters_is_safe() {
        let advisory = advise(OperationKind::DistanceBuffer, projected_meters(), Some(50.0));
        assert_eq!(advisory.verdict(), Verdict::Safe);
        assert_eq!(advisory.reason(), ReasonCode::PlanarUnitsMatch);

        let advisory = advise(OperationKind::DistanceBuffer, projected_meters(), None);
        assert!(advisory.is_safe());
    }

    #[test]
    fn feet_are_linear_too() {
        let crs = CrsDescriptor::new(CrsKind::Projected, Unit::Foot, Some(2263), false).unwrap();
        assert!(advise(OperationKind::AreaComputation, crs, Some(100.0)).is_safe());
    }

    #[test]
    fn large_projected_extent_needs_reprojection() {
        for kind in OperationKind::ALL {
            let advisory = advise(kind, projected_meters(), Some(800.0));
            assert_eq!(advisory.verdict(), Verdict::UnsafeReprojectRecommended);
            assert_eq!(advisory.reason(), ReasonCode::ExtentExceedsProjectionAccuracy);
        }
    }

    #[test]
    fn threshold_boundary_is_safe() {
        let at_threshold = advise(OperationKind::DistanceBuffer, projected_meters(), Some(500.0));
        assert!(at_threshold.is_safe());

        let above = advise(OperationKind::DistanceBuffer, projected_meters(), Some(500.001));
        assert!(!above.is_safe());
    }

    #[test]
    fn custom_threshold() {
        let advisor =
            Advisor::new(AdvisorConfig::default().with_extent_threshold_km(100.0)).unwrap();
        let request = OperationRequest::new(OperationKind::AreaComputation, projected_meters())
            .with_extent_km(150.0)
            .unwrap();
        assert_eq!(
            advisor.advise(&request).verdict(),
            Verdict::UnsafeReprojectRecommended
        );
    }

    #[test]
    fn geographic_metric_operations_need_spherical_engine() {
        for kind in [
            OperationKind::DistanceBuffer,
            OperationKind::AreaComputation,
            OperationKind::DirectionComputation,
        ] {
            let advisory = advise(kind, CrsDescriptor::wgs84(), None);
            assert_eq!(advisory.verdict(), Verdict::UnsafeSphericalRecommended);
            assert_eq!(advisory.reason(), ReasonCode::DegreeUnitsDistort);
        }
    }

    #[test]
    fn spherical_engine_compensates_for_degrees() {
        let advisor = Advisor::new(AdvisorConfig::default().with_spherical_engine(true)).unwrap();
        let request = OperationRequest::new(OperationKind::DistanceBuffer, CrsDescriptor::wgs84())
            .with_extent_km(20_000.0)
            .unwrap();
        let advisory = advisor.advise(&request);
        assert_eq!(advisory.verdict(), Verdict::Safe);
        assert_eq!(advisory.reason(), ReasonCode::SphericalEngineCompensates);
    }

    #[test]
    fn topology_on_geographic_is_safe_regardless_of_extent() {
        for extent in [None, Some(0.0), Some(499.0), Some(20_000.0)] {
            let advisory =
                advise(OperationKind::TopologicalPredicate, CrsDescriptor::wgs84(), extent);
            assert_eq!(advisory.verdict(), Verdict::Safe);
            assert_eq!(advisory.reason(), ReasonCode::TopologyCrsInvariant);
        }
    }

    #[test]
    fn advise_by_name() {
        let advisor = Advisor::default();
        let advisory = advisor
            .advise_kind("DISTANCE_BUFFER", &CrsDescriptor::unknown(), None)
            .unwrap();
        assert_eq!(advisory.verdict(), Verdict::UnsafeReprojectRecommended);

        let advisory = advisor
            .advise_kind("distance_buffer", &projected_meters(), Some(50.0))
            .unwrap();
        assert!(advisory.is_safe());

        assert_matches!(
            advisor.advise_kind("SHORTEST_PATH", &projected_meters(), None),
            Err(AdvisorError::UnsupportedOperationKind(_))
        );
    }

    #[test]
    fn advise_by_name_rejects_invalid_extent() {
        let advisor = Advisor::default();
        for extent in [-5.0, f64::NAN, f64::NEG_INFINITY, f64::INFINITY] {
            assert_matches!(
                advisor.advise_kind("DISTANCE_BUFFER", &projected_meters(), Some(extent)),
                Err(AdvisorError::InvalidExtent(_))
            );
        }

        let advisory = advisor
            .advise_kind("DISTANCE_BUFFER", &projected_meters(), Some(0.0))
            .unwrap();
        assert!(advisory.is_safe());
    }

    #[test]
    fn data_around_the_globe_is_not_safe_in_projection() {
        let points = [
            Coordinate::new(-179.0, 0.0).unwrap(),
            Coordinate::new(0.0, 0.0).unwrap(),
            Coordinate::new(179.0, 1.0).unwrap(),
        ];
        let extent = Extent::from_coordinates(&points).unwrap();
        let request =
            OperationRequest::new(OperationKind::AreaComputation, CrsDescriptor::web_mercator())
                .with_extent(extent);

        let advisory = Advisor::default().advise(&request);
        assert_eq!(advisory.verdict(), Verdict::UnsafeReprojectRecommended);
        assert_eq!(advisory.reason(), ReasonCode::ExtentExceedsProjectionAccuracy);
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert_matches!(
            Advisor::new(AdvisorConfig::default().with_extent_threshold_km(-5.0)),
            Err(AdvisorError::InvalidConfig(_))
        );
    }

    #[test]
    fn classify_select_and_advise() {
        let metadata = CrsMetadata::parse("EPSG:4326").unwrap();
        let crs = classify(Some(&metadata)).unwrap();
        let request = OperationRequest::new(OperationKind::DistanceBuffer, crs);
        assert!(!Advisor::default().advise(&request).is_safe());

        let utm = select_utm_lonlat(174.7, -36.9).unwrap().to_descriptor();
        let request = OperationRequest::new(OperationKind::DistanceBuffer, utm)
            .with_extent_km(30.0)
            .unwrap();
        assert!(Advisor::default().advise(&request).is_safe());
    }

    #[test]
    fn shared_between_threads() {
        let advisor = Advisor::default();
        let crs = projected_meters();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let advisor = &advisor;
                    let crs = &crs;
                    scope.spawn(move || {
                        let request =
                            OperationRequest::new(OperationKind::DistanceBuffer, crs.clone())
                                .with_extent_km(f64::from(i) * 100.0)
                                .unwrap();
                        advisor.advise(&request)
                    })
                })
                .collect();

            for (i, handle) in handles.into_iter().enumerate() {
                let advisory = handle.join().expect("advisor thread panicked");
                assert_eq!(advisory.is_safe(), i <= 5, "extent {} km", i * 100);
            }
        });
    }
}
