#![allow(clippy::needless_return)]

use symfun::parameters::ParameterGrid;
use symfun::sampling::{Sampler, SamplerParameters};
use symfun::{AngularKind, DescriptorSet, NeighborGeometry};

use criterion::{BenchmarkGroup, Criterion, measurement::WallTime, SamplingMode};
use criterion::{black_box, criterion_group, criterion_main};

fn geometries(n_neighbors: usize) -> Vec<NeighborGeometry> {
    let mut sampler = Sampler::new(SamplerParameters {
        min_distance: 1.8,
        max_distance: 6.0,
        max_neighbors: n_neighbors,
        varying_neighbors: false,
        seed: 0,
    }).expect("invalid sampler parameters");

    return sampler.samples(100);
}

fn descriptors(n_radial: usize, n_angular: usize) -> DescriptorSet {
    let grid = ParameterGrid {
        cutoff: 6.0,
        radial: n_radial,
        angular: n_angular,
        angular_kind: AngularKind::G4,
        angular_width: 0.005,
    };
    return grid.generate().expect("invalid symmetry functions");
}

fn run_descriptors(mut group: BenchmarkGroup<WallTime>, n_radial: usize, n_angular: usize) {
    let set = descriptors(n_radial, n_angular);

    for &n_neighbors in black_box(&[8, 32, 64]) {
        let geometries = geometries(n_neighbors);
        group.bench_function(&format!("{} neighbors", n_neighbors), |b| b.iter_custom(|repeat| {
            let start = std::time::Instant::now();
            for _ in 0..repeat {
                set.compute_many(&geometries).expect("failed to compute features");
            }
            start.elapsed() / geometries.len() as u32
        }));
    }
}

fn symmetry_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("Radial symmetry functions (per atom)");
    group.noise_threshold(0.05);
    group.sampling_mode(SamplingMode::Flat);
    run_descriptors(group, 16, 0);

    let mut group = c.benchmark_group("Radial and angular symmetry functions (per atom)");
    group.noise_threshold(0.05);
    group.measurement_time(std::time::Duration::from_secs(10));
    group.sampling_mode(SamplingMode::Flat);
    run_descriptors(group, 16, 32);
}

criterion_group!(all, symmetry_functions);
criterion_main!(all);
