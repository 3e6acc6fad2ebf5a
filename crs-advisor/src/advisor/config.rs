use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};

/// Default bounding box diagonal above which a projected CRS is not trusted.
pub const DEFAULT_EXTENT_THRESHOLD_KM: f64 = 500.0;

/// Configuration of the [`Advisor`](super::Advisor).
///
/// Can be deserialized with all fields optional:
///
/// ```
/// use crs_advisor::advisor::AdvisorConfig;
///
/// let config = AdvisorConfig::from_json(r#"{ "spherical_engine": true }"#).unwrap();
/// assert!(config.spherical_engine());
/// assert_eq!(config.extent_threshold_km(), 500.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    extent_threshold_km: f64,
    spherical_engine: bool,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            extent_threshold_km: DEFAULT_EXTENT_THRESHOLD_KM,
            spherical_engine: false,
        }
    }
}

impl AdvisorConfig {
    /// Reads the configuration from a JSON document and validates it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| AdvisorError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the bounding box diagonal in kilometres above which projected CRSs are not trusted.
    ///
    /// Defaults to 500 km.
    pub fn with_extent_threshold_km(mut self, threshold_km: f64) -> Self {
        self.extent_threshold_km = threshold_km;
        self
    }

    /// Declares whether the host geometry engine computes on the sphere when given geographic coordinates.
    ///
    /// Defaults to `false`.
    pub fn with_spherical_engine(mut self, available: bool) -> Self {
        self.spherical_engine = available;
        self
    }

    /// Extent threshold in kilometres.
    pub fn extent_threshold_km(&self) -> f64 {
        self.extent_threshold_km
    }

    /// Whether a spherical geometry engine is available.
    pub fn spherical_engine(&self) -> bool {
        self.spherical_engine
    }

    /// Checks that the threshold is a positive finite number.
    pub fn validate(&self) -> Result<()> {
        if self.extent_threshold_km.is_finite() && self.extent_threshold_km > 0.0 {
            Ok(())
        } else {
            Err(AdvisorError::InvalidConfig(format!(
                "extent threshold must be a positive number of kilometres, got {}",
                self.extent_threshold_km
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn defaults() {
        let config = AdvisorConfig::default();
        assert_eq!(config.extent_threshold_km(), 500.0);
        assert!(!config.spherical_engine());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_json() {
        let config = AdvisorConfig::from_json("{}").unwrap();
        assert_eq!(config, AdvisorConfig::default());

        let config = AdvisorConfig::from_json(r#"{"extent_threshold_km": 120.5}"#).unwrap();
        assert_eq!(config.extent_threshold_km(), 120.5);
    }

    #[test]
    fn invalid_json() {
        assert_matches!(
            AdvisorConfig::from_json(r#"{"extent_threshold_km": -1}"#),
            Err(AdvisorError::InvalidConfig(_))
        );
        assert_matches!(
            AdvisorConfig::from_json(r#"{"extent_threshold_km": "far"}"#),
            Err(AdvisorError::InvalidConfig(_))
        );
    }

    #[test]
    fn builder() {
        let config = AdvisorConfig::default()
            .with_extent_threshold_km(50.0)
            .with_spherical_engine(true);
        assert_eq!(config.extent_threshold_km(), 50.0);
        assert!(config.spherical_engine());

        assert!(AdvisorConfig::default()
            .with_extent_threshold_km(0.0)
            .validate()
            .is_err());
        assert!(AdvisorConfig::default()
            .with_extent_threshold_km(f64::INFINITY)
            .validate()
            .is_err());
    }
}
