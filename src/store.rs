use crate::balance;
use crate::bounds::BoundingBox;
use crate::config::PhotonMapConfig;
use crate::error::Result;
use crate::map::PhotonMap;
use crate::photon::Photon;
use crate::sampling;
use log::{debug, warn};
use rand::Rng;

/// Upper bound on the slots reserved up front; larger stores grow on demand.
const MAX_RESERVED: usize = 1 << 20;

/// Unbalanced photon storage filled during the tracing phase.
///
/// Records occupy slots `1..=len()`; slot 0 is reserved so that the balanced
/// tree can use `2i`/`2i + 1` child arithmetic on the very same layout.
/// Once `capacity` photons are stored, further inserts are dropped.
#[derive(Clone, Debug)]
pub struct PhotonStore {
    photons: Vec<Photon>,
    capacity: usize,
    bounds: BoundingBox,
    power: [f64; 3],
    dropped: usize,
    parallel_threshold: usize,
}

impl PhotonStore {
    /// Creates an empty store for at most `capacity` photons emitted by a
    /// light of the given `power`.
    pub fn new(capacity: usize, power: [f64; 3]) -> Self {
        let mut photons = Vec::with_capacity(capacity.min(MAX_RESERVED) + 1);
        photons.push(Photon::default());
        PhotonStore {
            photons,
            capacity,
            bounds: BoundingBox::empty(),
            power,
            dropped: 0,
            parallel_threshold: PhotonMapConfig::default().parallel_threshold,
        }
    }

    /// Creates a store from a validated configuration.
    pub fn with_config(config: &PhotonMapConfig) -> Result<Self> {
        config.validate()?;
        let mut store = Self::new(config.capacity, config.power);
        store.parallel_threshold = config.parallel_threshold;
        Ok(store)
    }

    /// Stores a photon at `position` arriving from `direction`.
    ///
    /// Returns `false` and leaves the store untouched when it is full.
    pub fn insert(&mut self, position: [f64; 3], direction: [f64; 3]) -> bool {
        if self.is_full() {
            if self.dropped == 0 {
                warn!(
                    "photon store saturated at {} photons, further photons are dropped",
                    self.capacity
                );
            }
            self.dropped += 1;
            return false;
        }

        self.photons.push(Photon::new(position, direction));
        self.bounds.extend(&position);
        true
    }

    /// Appends the photons of another store, typically a per-thread shard,
    /// under this store's capacity.
    pub fn merge(&mut self, other: PhotonStore) {
        let incoming = other.len();
        let room = self.capacity - self.len();
        let taken = incoming.min(room);

        if taken == incoming {
            self.photons.extend_from_slice(other.photons());
            self.bounds = self.bounds.union(&other.bounds);
        } else {
            for photon in &other.photons()[..taken] {
                self.photons.push(*photon);
                self.bounds.extend(&photon.position);
            }
            if self.dropped == 0 {
                warn!(
                    "photon store saturated at {} photons while merging, further photons are dropped",
                    self.capacity
                );
            }
        }
        self.dropped += other.dropped + (incoming - taken);
        debug!("merged {} of {} photons, store holds {}", taken, incoming, self.len());
    }

    /// Fills the store with `count` photons at uniformly random positions in
    /// `bounds`, with uniformly random directions. Returns how many were stored.
    pub fn scatter_uniform<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize, bounds: &BoundingBox) -> usize {
        let mut stored = 0;
        for _ in 0..count {
            let position = sampling::uniform_point(rng, bounds);
            let direction = sampling::uniform_direction(rng);
            if self.insert(position, direction) {
                stored += 1;
            }
        }
        stored
    }

    /// Balances the stored photons into a [`PhotonMap`]. Consumes the store:
    /// no photon can be added once the tree is built.
    pub fn balance(self) -> PhotonMap {
        let PhotonStore {
            photons,
            bounds,
            power,
            parallel_threshold,
            ..
        } = self;
        let photons = balance::balance(photons, bounds, parallel_threshold);
        PhotonMap::from_balanced(photons, bounds, power)
    }

    pub fn len(&self) -> usize {
        self.photons.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of photons rejected because the store was full.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Tight bounding box of all stored positions. Empty while the store is.
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn power(&self) -> [f64; 3] {
        self.power
    }

    /// Stored photons in insertion order.
    pub fn photons(&self) -> &[Photon] {
        &self.photons[1..]
    }

    /// Sets the minimum range size partitioned in parallel while balancing.
    /// Values below 2 are raised to 2.
    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold.max(2);
    }
}
