use std::hint::black_box;
use std::time::Instant;

use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use vista_placement::{Region, TreePlacement, place_trees};

fn bench_place_trees(count: usize, spread: f32, iterations: usize) {
    let params = TreePlacement {
        count,
        region: Region::centered(spread, spread),
        ..TreePlacement::default()
    };
    let mountains = [
        Vec3::new(0.0, 12.0, 1.0),
        Vec3::new(-10.0, 9.0, 5.0),
        Vec3::new(8.0, 8.0, 11.0),
    ];
    let mut rng = StdRng::seed_from_u64(42);

    let start = Instant::now();
    let mut failures = 0usize;
    for _ in 0..iterations {
        if place_trees(&mut rng, black_box(&params), black_box(&mountains)).is_err() {
            failures += 1;
        }
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  place_trees ({count} trees, spread {spread}, {iterations} iters): {per_iter:?}/iter, {failures} infeasible"
    );
}

fn main() {
    println!("=== placement benchmarks ===");
    bench_place_trees(20, 75.0, 1_000);
    bench_place_trees(60, 75.0, 200);
    bench_place_trees(200, 150.0, 50);
}
