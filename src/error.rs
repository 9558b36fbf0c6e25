//! Error type for the fallible parts of the crate.
//!
//! Building, balancing and searching a photon map never fail; their degenerate
//! states (a saturated store, an empty map, a zero result budget) are plain
//! return values. Only loading a [`PhotonMapConfig`](crate::PhotonMapConfig)
//! can go wrong.

/// Errors raised while loading or validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum PhotonMapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl PhotonMapError {
    pub fn invalid_config<T: ToString>(msg: T) -> Self {
        PhotonMapError::InvalidConfig(msg.to_string())
    }
}

/// Result type alias for configuration loading.
pub type Result<T> = std::result::Result<T, PhotonMapError>;
