use photonmap::{BoundingBox, PhotonMapConfig, PhotonStore};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    // Initialize Rayon explicitly so thread creation happens
    // before the work we want to profile.
    rayon::ThreadPoolBuilder::new().build_global().unwrap();

    let config = match std::env::args().nth(1) {
        Some(path) => PhotonMapConfig::from_path(&path).unwrap_or_else(|e| {
            eprintln!("Error loading {}: {}", path, e);
            std::process::exit(1);
        }),
        None => PhotonMapConfig {
            capacity: 1_000_000,
            ..PhotonMapConfig::default()
        },
    };

    let bounds = BoundingBox::new([0.0, 0.0, 0.0], [100.0, 100.0, 100.0]);
    let mut rng = StdRng::seed_from_u64(123456789);

    // Emit a few more photons than fit to exercise saturation
    let mut store = PhotonStore::with_config(&config).unwrap_or_else(|e| {
        eprintln!("Invalid config: {}", e);
        std::process::exit(1);
    });
    store.scatter_uniform(&mut rng, config.capacity + config.capacity / 10, &bounds);

    // Balancing is the hot path
    let map = store.balance();

    let targets: Vec<[f64; 3]> = (0..10_000)
        .map(|i| {
            let v = (i as f64 / 10_000.0) * 100.0;
            [v, v, 100.0 - v]
        })
        .collect();
    let results = map.search_many(&targets, config.gather.radius, config.gather.max_photons);
    let found: usize = results.iter().map(|r| r.len()).sum();
    println!(
        "{} photons, {} queries, {:.1} photons per query",
        map.len(),
        targets.len(),
        found as f64 / targets.len() as f64
    );
}
