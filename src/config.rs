use crate::error::{PhotonMapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default k-NN parameters used when gathering photons for a density estimate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatherConfig {
    /// Initial search radius.
    pub radius: f64,
    /// Maximum number of photons returned per query.
    pub max_photons: usize,
}

impl Default for GatherConfig {
    fn default() -> Self {
        GatherConfig {
            radius: 3.0,
            max_photons: 1000,
        }
    }
}

/// Construction and query settings for a photon map.
///
/// Every field has a default, so a JSON document only needs to name the
/// values it overrides:
///
/// ```
/// let config = photonmap::PhotonMapConfig::from_json(r#"{ "capacity": 5000 }"#).unwrap();
/// assert_eq!(config.capacity, 5000);
/// assert_eq!(config.gather.max_photons, 1000);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotonMapConfig {
    /// Maximum number of photons the store accepts. Further inserts are dropped.
    pub capacity: usize,
    /// Radiant power of the emitting light source.
    pub power: [f64; 3],
    /// Sub-ranges with at least this many photons are partitioned in parallel
    /// while balancing.
    pub parallel_threshold: usize,
    pub gather: GatherConfig,
}

impl Default for PhotonMapConfig {
    fn default() -> Self {
        PhotonMapConfig {
            capacity: 100_000,
            power: [1.0, 1.0, 1.0],
            parallel_threshold: 4096,
            gather: GatherConfig::default(),
        }
    }
}

impl PhotonMapConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PhotonMapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.power.iter().all(|p| p.is_finite()) {
            return Err(PhotonMapError::invalid_config(format!(
                "power must be finite, got {:?}",
                self.power
            )));
        }
        if self.parallel_threshold < 2 {
            return Err(PhotonMapError::invalid_config(format!(
                "parallel_threshold must be at least 2, got {}",
                self.parallel_threshold
            )));
        }
        if !(self.gather.radius.is_finite() && self.gather.radius > 0.0) {
            return Err(PhotonMapError::invalid_config(format!(
                "gather radius must be positive and finite, got {}",
                self.gather.radius
            )));
        }
        if self.gather.max_photons == 0 {
            return Err(PhotonMapError::invalid_config("gather max_photons must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PhotonMapConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = PhotonMapConfig::from_json(
            r#"{ "power": [2.0, 1.0, 0.5], "gather": { "radius": 2.0 } }"#,
        )
        .unwrap();

        assert_eq!(config.capacity, 100_000);
        assert_eq!(config.power, [2.0, 1.0, 0.5]);
        assert_eq!(config.gather.radius, 2.0);
        assert_eq!(config.gather.max_photons, 1000);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = PhotonMapConfig::from_json(r#"{ "parallel_threshold": 1 }"#).unwrap_err();
        assert!(matches!(err, PhotonMapError::InvalidConfig(_)));

        let err = PhotonMapConfig::from_json(r#"{ "gather": { "radius": -1.0 } }"#).unwrap_err();
        assert!(matches!(err, PhotonMapError::InvalidConfig(_)));

        let err = PhotonMapConfig::from_json(r#"{ "gather": { "max_photons": 0 } }"#).unwrap_err();
        assert!(matches!(err, PhotonMapError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = PhotonMapConfig::from_json("{ capacity: ").unwrap_err();
        assert!(matches!(err, PhotonMapError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = PhotonMapConfig::from_path("/nonexistent/photonmap.json").unwrap_err();
        assert!(matches!(err, PhotonMapError::Io(_)));
    }
}
