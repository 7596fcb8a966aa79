use std::time::Instant;

use mesh_life::{Driver, KernelBackend, Mesh, MeshConfig, Pattern, Signals};
use rand::SeedableRng;

fn bench_mesh(size: usize, threads: usize, kernel: KernelBackend, generations: u64) -> (f64, u64) {
    let config = MeshConfig::default()
        .size(size)
        .thread_count(threads)
        .kernel(kernel);
    let mesh = Mesh::with_config(config).expect("build mesh");
    let mut driver = Driver::new(mesh);
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x5EED_1234_ABCD_EF01);
    let seed = Pattern::random(size, 0.42, &mut rng).expect("seed pattern");
    driver.load(&seed).expect("load");
    let mut mesh = driver.into_mesh();

    let start = Instant::now();
    for _ in 0..generations {
        mesh.tick(Signals::EVOLVE).expect("evolve");
    }
    let duration = start.elapsed();

    let total_ms = duration.as_secs_f64() * 1000.0;
    (total_ms, std::hint::black_box(mesh.population()))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let scales: &[(usize, u64)] = &[
        (10, 20_000),  // reference mesh
        (64, 2_000),   // parallel threshold
        (256, 200),
        (1024, 20),
    ];
    let max_threads = rayon::current_num_threads();

    println!(
        "{:<10} {:>8} {:>10} {:>8} {:>12} {:>10}",
        "Grid", "Threads", "Kernel", "Gens", "Total(ms)", "Avg(us)"
    );
    println!("{}", "-".repeat(64));

    for &(size, gens) in scales {
        for threads in [1, max_threads] {
            for kernel in [KernelBackend::AdderTree, KernelBackend::Popcount] {
                let (total_ms, _pop) = bench_mesh(size, threads, kernel, gens);
                let avg_us = total_ms * 1000.0 / gens as f64;
                println!(
                    "{:<10} {:>8} {:>10} {:>8} {:>12.1} {:>10.2}",
                    format!("{}x{}", size, size),
                    threads,
                    format!("{kernel:?}"),
                    gens,
                    total_ms,
                    avg_us
                );
            }
            if max_threads == 1 {
                break;
            }
        }
    }
}
