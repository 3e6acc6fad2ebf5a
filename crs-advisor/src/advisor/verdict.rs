use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Outcome of the safety check of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Result of the operation can be trusted.
    Safe,
    /// Data should be reprojected into a suitable projected CRS first.
    UnsafeReprojectRecommended,
    /// Operation should be carried out by a spherical geometry engine.
    UnsafeSphericalRecommended,
}

impl Verdict {
    /// Canonical name of the verdict, e.g. `UNSAFE_REPROJECT_RECOMMENDED`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::UnsafeReprojectRecommended => "UNSAFE_REPROJECT_RECOMMENDED",
            Self::UnsafeSphericalRecommended => "UNSAFE_SPHERICAL_RECOMMENDED",
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason a verdict was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonCode {
    /// Data has no CRS.
    NoCrsDeclared,
    /// Distances, areas or directions would be measured in degrees.
    DegreeUnitsDistort,
    /// Degrees are fine because a spherical engine does the computation.
    SphericalEngineCompensates,
    /// Topological predicates do not depend on the CRS.
    TopologyCrsInvariant,
    /// Linear units of the projected CRS match the operation.
    PlanarUnitsMatch,
    /// Data spans more than the projection is accurate for.
    ExtentExceedsProjectionAccuracy,
}

impl ReasonCode {
    /// Stable machine readable code, e.g. `NO_CRS_DECLARED`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoCrsDeclared => "NO_CRS_DECLARED",
            Self::DegreeUnitsDistort => "DEGREE_UNITS_DISTORT",
            Self::SphericalEngineCompensates => "SPHERICAL_ENGINE_COMPENSATES",
            Self::TopologyCrsInvariant => "TOPOLOGY_CRS_INVARIANT",
            Self::PlanarUnitsMatch => "PLANAR_UNITS_MATCH",
            Self::ExtentExceedsProjectionAccuracy => "EXTENT_EXCEEDS_PROJECTION_ACCURACY",
        }
    }

    /// Human readable explanation.
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoCrsDeclared => {
                "no CRS declared; operation assumes planar units of unknown meaning"
            }
            Self::DegreeUnitsDistort => {
                "geographic CRS uses degrees, planar computation in degrees distorts the result"
            }
            Self::SphericalEngineCompensates => "spherical engine compensates for degree units",
            Self::TopologyCrsInvariant => "topological predicates are CRS-invariant",
            Self::PlanarUnitsMatch => "projected CRS uses linear units",
            Self::ExtentExceedsProjectionAccuracy => {
                "projected CRS accuracy degrades over large extents"
            }
        }
    }
}

impl Display for ReasonCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Verdict of the [`Advisor`](super::Advisor) together with its reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Advisory {
    verdict: Verdict,
    reason: ReasonCode,
}

impl Advisory {
    pub(crate) fn new(verdict: Verdict, reason: ReasonCode) -> Self {
        Self { verdict, reason }
    }

    /// The verdict.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Why the verdict was given.
    pub fn reason(&self) -> ReasonCode {
        self.reason
    }

    /// Shortcut for `verdict() == Verdict::Safe`.
    pub fn is_safe(&self) -> bool {
        self.verdict == Verdict::Safe
    }
}

impl Display for Advisory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.verdict, self.reason.as_str(), self.reason)
    }
}
