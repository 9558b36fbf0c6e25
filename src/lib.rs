//! # photonmap
//!
//! `photonmap` is the photon map of an offline light-transport renderer: a
//! balanced spatial index over the light samples ("photons") deposited while
//! tracing, answering bounded k-nearest-neighbor queries while shading.
//!
//! ## Features
//!
//! - **Saturating store**: photons are appended in O(1) up to a fixed capacity,
//!   further photons are dropped. Per-thread shards can be merged.
//! - **Implicit kd-tree**: balancing lays the photons out as a left-complete
//!   binary tree in a flat array, children of node `i` at `2i` and `2i + 1`.
//!   Large subtrees are partitioned in parallel with `rayon`.
//! - **Bounded k-NN**: queries keep a max-heap of the closest photons whose
//!   maximum doubles as the shrinking search radius.
//!
//! ## Example
//!
//! ```
//! use photonmap::PhotonStore;
//!
//! let mut store = PhotonStore::new(10, [1.0, 1.0, 1.0]);
//! for x in 0..5 {
//!     store.insert([x as f64, 0.0, 0.0], [0.0, 1.0, 0.0]);
//! }
//!
//! let map = store.balance();
//! let result = map.search([2.0, 0.0, 0.0], 10.0, 3);
//! assert_eq!(result.len(), 3);
//! assert_eq!(result.max_dist_sq(), 1.0);
//! ```
//!
//! ## Main Interface
//!
//! Photons go into a [`PhotonStore`]; [`PhotonStore::balance`] turns it into a
//! read-only [`PhotonMap`], which [`PhotonMap::search`] queries.

mod balance;
mod bounds;
mod config;
mod error;
mod map;
mod nearest;
mod photon;
pub mod sampling;
mod store;

pub use bounds::BoundingBox;
pub use config::GatherConfig;
pub use config::PhotonMapConfig;
pub use error::PhotonMapError;
pub use error::Result;
pub use map::PhotonMap;
pub use nearest::NearestPhotons;
pub use nearest::Neighbor;
pub use photon::Axis;
pub use photon::Photon;
pub use store::PhotonStore;
