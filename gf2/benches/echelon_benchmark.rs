use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use gf2::symplectic::{conjoin, self_trace};
use gf2::BitMatrix;
use rand::prelude::*;

struct Parameters((f64, usize));

pub fn echelonize_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("BitMatrix::echelonize");
    for sparsity in [0.5, 0.1, 0.01] {
        for size in [100usize, 1000usize] {
            group.sample_size(10);
            let parameters = Parameters((sparsity, size));
            group.bench_with_input(
                BenchmarkId::from_parameter(&parameters),
                &parameters,
                |bencher, parameters| {
                    let (sparsity, size) = parameters.0;
                    bencher.iter_batched(
                        || random_bitmatrix(size, size, sparsity),
                        |mut matrix| matrix.echelonize(),
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
    group.finish();
}

pub fn self_trace_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("symplectic::self_trace");
    for sparsity in [0.5, 0.1] {
        for leg_count in [16usize, 128usize, 512usize] {
            group.sample_size(10);
            let parameters = Parameters((sparsity, leg_count));
            group.bench_with_input(
                BenchmarkId::from_parameter(&parameters),
                &parameters,
                |bencher, parameters| {
                    let (sparsity, leg_count) = parameters.0;
                    bencher.iter_batched(
                        || random_bitmatrix(leg_count, 2 * leg_count, sparsity),
                        |matrix| self_trace(&matrix, 0, leg_count - 1),
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
    group.finish();
}

pub fn conjoin_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("symplectic::conjoin");
    for leg_count in [16usize, 128usize, 512usize] {
        group.sample_size(10);
        let parameters = Parameters((0.5, leg_count));
        group.bench_with_input(
            BenchmarkId::from_parameter(&parameters),
            &parameters,
            |bencher, parameters| {
                let (sparsity, leg_count) = parameters.0;
                bencher.iter_batched(
                    || {
                        let left = random_bitmatrix(leg_count, 2 * leg_count, sparsity);
                        let right = random_bitmatrix(leg_count, 2 * leg_count, sparsity);
                        (left, right)
                    },
                    |(left, right)| conjoin(&left, &right, leg_count - 1, 0),
                    BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

fn random_bitmatrix(row_count: usize, column_count: usize, sparsity: f64) -> BitMatrix {
    let mut matrix = BitMatrix::zeros(row_count, column_count);
    let mut random_number_generator = thread_rng();
    for row_index in 0..row_count {
        for column_index in 0..column_count {
            matrix.set((row_index, column_index), random_number_generator.gen_bool(sparsity));
        }
    }
    matrix
}

impl std::fmt::Display for Parameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (sparsity, size) = self.0;
        write!(f, "(sparsity={sparsity}, size={size})")?;
        Ok(())
    }
}

criterion_group!(benches, echelonize_benchmark, self_trace_benchmark, conjoin_benchmark);
criterion_main!(benches);
