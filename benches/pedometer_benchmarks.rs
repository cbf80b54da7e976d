use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::prelude::*;
use rand_pcg::Pcg64;
use std::f32::consts::PI;
use stride_pedometer::{Pedometer, RawSample, Vector3Ext, approx_sqrt, smoothing::average};

const BATCH_SIZE: usize = 25;
const SAMPLE_RATE: f32 = 50.0;

// Pre-generated batches to eliminate RNG overhead during benchmarks
struct PreGeneratedData {
    batches: Vec<Vec<RawSample>>,
    index: usize,
}

impl PreGeneratedData {
    fn new(count: usize, seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut batches = Vec::with_capacity(count);

        for i in 0..count {
            let batch = (0..BATCH_SIZE)
                .map(|j| {
                    let time = (i * BATCH_SIZE + j) as f32 / SAMPLE_RATE;

                    // Walking at about two steps per second with wrist sway
                    let step_phase = time * 1.9 * 2.0 * PI;
                    let bounce = 320.0 * step_phase.sin();
                    let sway = 90.0 * (step_phase * 0.5).sin();

                    RawSample::new(
                        (40.0 + 0.6 * sway) as i16 + rng.random_range(-12..12),
                        (-120.0 + sway) as i16 + rng.random_range(-12..12),
                        (-990.0 - bounce) as i16 + rng.random_range(-15..15),
                    )
                })
                .collect();
            batches.push(batch);
        }

        Self { batches, index: 0 }
    }

    fn next(&mut self) -> &[RawSample] {
        let batch = &self.batches[self.index];
        self.index = (self.index + 1) % self.batches.len();
        batch
    }
}

/// Benchmark processing one walking batch
fn bench_process_batch(c: &mut Criterion) {
    let mut pedometer = Pedometer::new();
    let mut data = PreGeneratedData::new(240, 42);

    c.bench_function("pedometer_process_batch", |b| {
        b.iter(|| black_box(pedometer.process_batch(black_box(data.next()))))
    });
}

/// Benchmark processing one batch while standing still
fn bench_process_batch_standing(c: &mut Criterion) {
    let mut pedometer = Pedometer::new();
    let batch = [RawSample::new(40, -120, -990); BATCH_SIZE];

    c.bench_function("pedometer_process_batch_standing", |b| {
        b.iter(|| black_box(pedometer.process_batch(black_box(&batch))))
    });
}

/// Benchmark one minute of walking
fn bench_process_minute(c: &mut Criterion) {
    let data = PreGeneratedData::new(120, 7);

    c.bench_function("pedometer_process_minute", |b| {
        b.iter(|| {
            let mut pedometer = Pedometer::new();
            for batch in &data.batches {
                let _ = pedometer.process_batch(black_box(batch));
            }
            black_box(pedometer.steps())
        })
    });
}

/// Benchmark the Newton-Raphson square root at a typical magnitude
fn bench_approx_sqrt(c: &mut Criterion) {
    c.bench_function("approx_sqrt_1g", |b| b.iter(|| approx_sqrt(black_box(996_100))));
}

/// Benchmark the square root at full scale, where the iteration cap matters
fn bench_approx_sqrt_full_scale(c: &mut Criterion) {
    c.bench_function("approx_sqrt_full_scale", |b| {
        b.iter(|| approx_sqrt(black_box(3 * 32_768 * 32_768)))
    });
}

/// Benchmark smoothing plus magnitude of one group
fn bench_group_magnitude(c: &mut Criterion) {
    let group = [
        RawSample::new(38, -118, -1290),
        RawSample::new(41, -121, -1250),
        RawSample::new(44, -119, -1180),
        RawSample::new(39, -125, -1090),
        RawSample::new(42, -117, -990),
    ];

    c.bench_function("group_magnitude", |b| {
        b.iter(|| average(black_box(&group)).composite_magnitude())
    });
}

/// Benchmark pedometer creation
fn bench_pedometer_creation(c: &mut Criterion) {
    c.bench_function("pedometer_new", |b| b.iter(|| black_box(Pedometer::new())));
}

criterion_group!(
    benches,
    bench_process_batch,
    bench_process_batch_standing,
    bench_process_minute,
    bench_approx_sqrt,
    bench_approx_sqrt_full_scale,
    bench_group_magnitude,
    bench_pedometer_creation
);

criterion_main!(benches);
