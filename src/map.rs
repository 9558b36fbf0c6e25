use crate::bounds::BoundingBox;
use crate::nearest::NearestPhotons;
use crate::photon::Photon;
use log::trace;
use rayon::prelude::*;
use std::f64::consts::PI;

/// A balanced, read-only photon map.
///
/// Photons are laid out as an implicit binary tree: slot 1 is the root and
/// node `i` has children `2i` and `2i + 1`. For an internal node splitting
/// along axis `a`, its left subtree holds no coordinate `a` larger than its
/// own and its right subtree none smaller.
///
/// The map is only obtainable from [`PhotonStore::balance`](crate::PhotonStore::balance)
/// and is `Sync`, so any number of threads can search it at once.
#[derive(Clone, Debug)]
pub struct PhotonMap {
    photons: Vec<Photon>,
    bounds: BoundingBox,
    power: [f64; 3],
}

impl PhotonMap {
    pub(crate) fn from_balanced(photons: Vec<Photon>, bounds: BoundingBox, power: [f64; 3]) -> Self {
        PhotonMap { photons, bounds, power }
    }

    pub fn len(&self) -> usize {
        self.photons.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn power(&self) -> [f64; 3] {
        self.power
    }

    /// Photons in tree order: element `i` is node `i + 1`.
    pub fn photons(&self) -> &[Photon] {
        &self.photons[1..]
    }

    /// Tree node `index`, counting from the root at 1.
    pub fn node(&self, index: usize) -> Option<&Photon> {
        if index == 0 {
            return None;
        }
        self.photons.get(index)
    }

    /// Finds up to `max_results` photons closest to `target` and strictly
    /// within `radius`.
    pub fn search(&self, target: [f64; 3], radius: f64, max_results: usize) -> NearestPhotons<'_> {
        let mut query = NearestPhotons::new(target, radius, max_results);
        self.locate(&mut query);
        query
    }

    /// Runs `query` against the tree, keeping whatever it already holds.
    pub fn locate<'a>(&'a self, query: &mut NearestPhotons<'a>) {
        if self.is_empty() || query.max_results() == 0 {
            return;
        }
        self.locate_node(query, 1);
        trace!(
            "located {} photons around {:?} within squared radius {}",
            query.len(),
            query.target(),
            query.max_dist_sq()
        );
    }

    fn locate_node<'a>(&'a self, query: &mut NearestPhotons<'a>, node: usize) {
        let count = self.len();
        let photon = &self.photons[node];

        let left = 2 * node;
        if left <= count {
            if let Some(axis) = photon.axis {
                let a = axis.index();
                let d = query.target()[a] - photon.position[a];
                let (near, far) = if d > 0.0 { (left + 1, left) } else { (left, left + 1) };

                if near <= count {
                    self.locate_node(query, near);
                }
                if far <= count && d * d < query.max_dist_sq() {
                    self.locate_node(query, far);
                }
            }
        }

        query.consider(photon);
    }

    /// Searches around every target in parallel.
    pub fn search_many(&self, targets: &[[f64; 3]], radius: f64, max_results: usize) -> Vec<NearestPhotons<'_>> {
        targets
            .par_iter()
            .map(|&target| self.search(target, radius, max_results))
            .collect()
    }

    /// Irradiance estimate at a surface point with unit `normal`, from the
    /// photons gathered by `result`.
    ///
    /// Photons arriving from above the surface contribute their cosine to the
    /// normal. The sum is scaled by the light power and divided by the disc
    /// area of the final search radius and by the number of stored photons.
    pub fn irradiance(&self, result: &NearestPhotons<'_>, normal: [f64; 3]) -> [f64; 3] {
        let radius_sq = result.max_dist_sq();
        if result.is_empty() || radius_sq <= 0.0 || !radius_sq.is_finite() {
            return [0.0; 3];
        }

        let cosines: f64 = result
            .neighbors()
            .iter()
            .map(|n| {
                let d = n.photon.direction;
                d[0] * normal[0] + d[1] * normal[1] + d[2] * normal[2]
            })
            .filter(|&cos| cos > 0.0)
            .sum();

        let scale = cosines / (PI * radius_sq * self.len() as f64);
        [self.power[0] * scale, self.power[1] * scale, self.power[2] * scale]
    }
}
