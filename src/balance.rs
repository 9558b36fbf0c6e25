//! Balancing of an unordered photon array into an implicit kd-tree.
//!
//! The input keeps the store layout: photons in slots `1..=n`, slot 0 unused.
//! The output uses the same layout, but slot `i` now holds tree node `i`, whose
//! children live in slots `2i` and `2i + 1`.
//!
//! Balancing runs in two passes. The first recursively median-partitions the
//! photons in place, choosing the split axis from a bounding box that shrinks
//! at every level, and tags each median with its axis. The median rank of a
//! range depends on its length only, so the second pass can walk the same
//! ranges again and copy each median to its tree slot.

use crate::bounds::BoundingBox;
use crate::photon::{Axis, Photon};
use log::debug;
use std::time::Instant;

pub(crate) fn balance(mut photons: Vec<Photon>, bounds: BoundingBox, parallel_threshold: usize) -> Vec<Photon> {
    let count = photons.len().saturating_sub(1);
    if count <= 1 {
        return photons;
    }

    let start = Instant::now();
    partition(&mut photons[1..], bounds, parallel_threshold);

    let mut tree = vec![Photon::default(); count + 1];
    layout(&photons[1..], &mut tree, 1);

    debug!(
        "balanced {} photons in {:?} (parallel threshold {})",
        count,
        start.elapsed(),
        parallel_threshold
    );
    tree
}

/// Offset of the median within a range of `n` photons.
///
/// With `k` the smallest power of two such that `4k > n`, the left subtree
/// receives `2k - 1` photons when `3k <= n` and `n - k` otherwise. This shape
/// makes the tree left-complete, so the nodes fill slots `1..=n` without gaps
/// whatever `n` is.
pub(crate) fn median_offset(n: usize) -> usize {
    let mut k = 1;
    while 4 * k <= n {
        k *= 2;
    }
    if 3 * k <= n { 2 * k - 1 } else { n - k }
}

fn partition(photons: &mut [Photon], bounds: BoundingBox, parallel_threshold: usize) {
    let n = photons.len();
    if n <= 1 {
        return;
    }

    let axis = bounds.longest_axis();
    let median = median_offset(n);
    select(photons, median, axis);
    photons[median].axis = Some(axis);

    let split = photons[median].position[axis.index()];
    let (left, rest) = photons.split_at_mut(median);
    let right = &mut rest[1..];
    let left_bounds = bounds.with_max(axis, split);
    let right_bounds = bounds.with_min(axis, split);

    if n >= parallel_threshold {
        rayon::join(
            || partition(left, left_bounds, parallel_threshold),
            || partition(right, right_bounds, parallel_threshold),
        );
    } else {
        partition(left, left_bounds, parallel_threshold);
        partition(right, right_bounds, parallel_threshold);
    }
}

/// Moves the photon of rank `median` along `axis` into place, with no larger
/// coordinate before it and no smaller one after it.
fn select(photons: &mut [Photon], median: usize, axis: Axis) {
    let a = axis.index();
    photons.select_nth_unstable_by(median, |p, q| p.position[a].total_cmp(&q.position[a]));
}

fn layout(ranked: &[Photon], tree: &mut [Photon], node: usize) {
    let n = ranked.len();
    if n == 0 {
        return;
    }

    let median = median_offset(n);
    tree[node] = ranked[median];
    layout(&ranked[..median], tree, 2 * node);
    layout(&ranked[median + 1..], tree, 2 * node + 1);
}
