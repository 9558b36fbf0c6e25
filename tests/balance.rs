use photonmap::{Axis, BoundingBox, PhotonMap, PhotonStore};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn random_map(seed: u64, count: usize, threshold: usize) -> (PhotonStore, PhotonMap) {
    let mut rng = StdRng::seed_from_u64(seed);
    let bounds = BoundingBox::new([0.0, 0.0, 0.0], [100.0, 40.0, 10.0]);
    let mut store = PhotonStore::new(count, [1.0; 3]);
    store.scatter_uniform(&mut rng, count, &bounds);
    store.set_parallel_threshold(threshold);
    let map = store.clone().balance();
    (store, map)
}

/// Collects the coordinates on `axis` of every node in the subtree at `node`.
fn subtree_values(map: &PhotonMap, node: usize, axis: usize, out: &mut Vec<f64>) {
    if let Some(photon) = map.node(node) {
        out.push(photon.position()[axis]);
        subtree_values(map, 2 * node, axis, out);
        subtree_values(map, 2 * node + 1, axis, out);
    }
}

fn assert_balanced(map: &PhotonMap) {
    for node in 1..=map.len() {
        let photon = map.node(node).unwrap();
        if 2 * node > map.len() {
            continue;
        }
        let axis = photon.axis().expect("internal node without split axis").index();
        let split = photon.position()[axis];

        let mut left = Vec::new();
        subtree_values(map, 2 * node, axis, &mut left);
        assert!(
            left.iter().all(|&v| v <= split),
            "left subtree of node {} crosses split {} on axis {}",
            node, split, axis
        );

        let mut right = Vec::new();
        subtree_values(map, 2 * node + 1, axis, &mut right);
        assert!(
            right.iter().all(|&v| v >= split),
            "right subtree of node {} crosses split {} on axis {}",
            node, split, axis
        );
    }
}

fn sorted_positions<'a>(photons: impl Iterator<Item = &'a photonmap::Photon>) -> Vec<[f64; 3]> {
    let mut out: Vec<[f64; 3]> = photons.map(|p| p.position()).collect();
    out.sort_by(|a, b| {
        a[0].total_cmp(&b[0])
            .then(a[1].total_cmp(&b[1]))
            .then(a[2].total_cmp(&b[2]))
    });
    out
}

#[test_log::test]
fn test_balance_invariant_random() {
    for &count in &[2, 3, 4, 5, 7, 8, 13, 100, 1000, 4097] {
        let (_, map) = random_map(count as u64, count, 4096);
        assert_eq!(map.len(), count);
        assert_balanced(&map);
    }
}

#[test]
fn test_balance_preserves_photons() {
    let (store, map) = random_map(11, 2500, 4096);
    assert_eq!(sorted_positions(store.photons().iter()), sorted_positions(map.photons().iter()));
}

#[test]
fn test_parallel_balance_matches_sequential() {
    let (_, sequential) = random_map(5, 20_000, usize::MAX);
    let (_, parallel) = random_map(5, 20_000, 64);

    assert_balanced(&parallel);
    assert_eq!(sequential.photons(), parallel.photons());
}

#[test]
fn test_leaves_have_no_axis() {
    let (_, map) = random_map(3, 300, 4096);
    for node in 1..=map.len() {
        let photon = map.node(node).unwrap();
        if 2 * node > map.len() {
            assert_eq!(photon.axis(), None, "leaf {} carries an axis", node);
        } else {
            assert!(photon.axis().is_some(), "internal node {} has no axis", node);
        }
    }
}

#[test]
fn test_root_splits_longest_axis() {
    let (_, map) = random_map(8, 500, 4096);
    // Bounds are 100 x 40 x 10, so the root splits along X
    assert_eq!(map.node(1).unwrap().axis(), Some(Axis::X));
}

#[test]
fn test_coincident_photons() {
    let mut store = PhotonStore::new(64, [1.0; 3]);
    for _ in 0..64 {
        store.insert([1.0, 2.0, 3.0], [0.0, 0.0, 1.0]);
    }
    assert_eq!(store.bounds().extent(), [0.0; 3]);

    let map = store.balance();
    assert_eq!(map.len(), 64);
    assert_balanced(&map);
    // Zero extent falls back to X
    assert_eq!(map.node(1).unwrap().axis(), Some(Axis::X));
}

#[test]
fn test_duplicate_coordinates() {
    let mut store = PhotonStore::new(200, [1.0; 3]);
    for i in 0..200 {
        store.insert([(i % 3) as f64, (i % 5) as f64, (i % 2) as f64], [1.0, 0.0, 0.0]);
    }
    let before = sorted_positions(store.photons().iter());
    let map = store.balance();
    assert_balanced(&map);
    assert_eq!(before, sorted_positions(map.photons().iter()));
}

#[test]
fn test_trivial_stores() {
    let map = PhotonStore::new(10, [1.0; 3]).balance();
    assert!(map.is_empty());
    assert!(map.node(1).is_none());

    let mut store = PhotonStore::new(10, [1.0; 3]);
    store.insert([4.0, 5.0, 6.0], [0.0, 1.0, 0.0]);
    let map = store.balance();
    assert_eq!(map.len(), 1);
    assert_eq!(map.node(1).unwrap().position(), [4.0, 5.0, 6.0]);
    assert_eq!(map.node(1).unwrap().axis(), None);
}
