use crate::photon::Photon;

/// A photon found by a k-NN query, with its squared distance to the target.
#[derive(Clone, Copy, Debug)]
pub struct Neighbor<'a> {
    pub photon: &'a Photon,
    pub dist_sq: f64,
}

/// Working set of a bounded k-nearest-neighbor query.
///
/// Candidates are appended until `max_results` are held. The first candidate
/// past that turns the entries into a max-heap keyed by squared distance, and
/// from then on `max_dist_sq` equals the heap maximum: it is both the worst
/// accepted distance and the pruning radius of the tree walk. Until then it is
/// the squared initial search radius.
#[derive(Clone, Debug)]
pub struct NearestPhotons<'a> {
    target: [f64; 3],
    max_results: usize,
    max_dist_sq: f64,
    built: bool,
    entries: Vec<Neighbor<'a>>,
}

impl<'a> NearestPhotons<'a> {
    pub fn new(target: [f64; 3], radius: f64, max_results: usize) -> Self {
        NearestPhotons {
            target,
            max_results,
            max_dist_sq: radius * radius,
            built: false,
            entries: Vec::with_capacity(max_results),
        }
    }

    pub fn target(&self) -> [f64; 3] {
        self.target
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Current worst accepted squared distance. After the search this is the
    /// squared radius that density estimates normalize by.
    pub fn max_dist_sq(&self) -> f64 {
        self.max_dist_sq
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the result set overflowed and was turned into a heap.
    pub fn is_heap(&self) -> bool {
        self.built
    }

    /// Found photons, in insertion order until the heap is built and in heap
    /// order afterwards.
    pub fn neighbors(&self) -> &[Neighbor<'a>] {
        &self.entries
    }

    /// Found photons ordered by increasing distance.
    pub fn sorted(&self) -> Vec<Neighbor<'a>> {
        let mut out = self.entries.clone();
        out.sort_by(|a, b| a.dist_sq.total_cmp(&b.dist_sq));
        out
    }

    /// Offers a photon to the result set. It is kept if it lies strictly
    /// inside the current radius.
    pub(crate) fn consider(&mut self, photon: &'a Photon) {
        if self.max_results == 0 {
            return;
        }
        let dist_sq = photon.dist_sq(&self.target);
        if dist_sq >= self.max_dist_sq {
            return;
        }

        let candidate = Neighbor { photon, dist_sq };
        if self.entries.len() < self.max_results {
            self.entries.push(candidate);
            return;
        }

        if !self.built {
            self.build_heap();
            if dist_sq >= self.max_dist_sq {
                return;
            }
        }
        self.replace_max(candidate);
    }

    /// Floyd heapify, largest distance first.
    fn build_heap(&mut self) {
        let n = self.entries.len();
        for i in (0..n / 2).rev() {
            let item = self.entries[i];
            let slot = self.sift_down(i, item.dist_sq);
            self.entries[slot] = item;
        }
        self.built = true;
        self.max_dist_sq = self.entries[0].dist_sq;
    }

    /// Drops the current maximum in favour of a closer candidate.
    fn replace_max(&mut self, candidate: Neighbor<'a>) {
        let slot = self.sift_down(0, candidate.dist_sq);
        self.entries[slot] = candidate;
        self.max_dist_sq = self.entries[0].dist_sq;
    }

    /// Moves larger children up from `start` until `dist_sq` fits, and returns
    /// the slot where an entry with that distance belongs.
    fn sift_down(&mut self, start: usize, dist_sq: f64) -> usize {
        let n = self.entries.len();
        let mut parent = start;
        loop {
            let mut child = 2 * parent + 1;
            if child >= n {
                break;
            }
            if child + 1 < n && self.entries[child + 1].dist_sq > self.entries[child].dist_sq {
                child += 1;
            }
            if dist_sq >= self.entries[child].dist_sq {
                break;
            }
            self.entries[parent] = self.entries[child];
            parent = child;
        }
        parent
    }
}
