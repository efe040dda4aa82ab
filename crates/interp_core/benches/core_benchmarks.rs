//! Criterion benchmarks for interp_core.
//!
//! Measures bundle construction, lookup and node sensitivities for the
//! common 1-D families, and fitting cost for the N-D interpolators, across
//! data sizes to characterise scaling behaviour.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use interp_core::math::interpolators::{
    Interpolator1D, LinearInterpolator1D, MonotonicIncreasingInterpolator1D,
    MonotonicityPreservingCubicSplineInterpolator1D, NaturalCubicSplineInterpolator1D,
};
use interp_core::math::interpolators_nd::{
    InterpolatorND, KrigingInterpolatorND, RadialBasisFunction, RadialBasisFunctionInterpolatorND,
    SampleND,
};

/// Generate test data for 1D interpolation benchmarks.
fn generate_1d_data(n: usize) -> (Vec<f64>, Vec<f64>) {
    let xs: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
    let ys: Vec<f64> = xs.iter().map(|&x| x.sin() + 0.5 * x * x).collect();
    (xs, ys)
}

/// Generate scattered 2D samples on a perturbed lattice.
fn generate_nd_data(n: usize) -> Vec<SampleND> {
    let side = (n as f64).sqrt().ceil() as usize;
    (0..n)
        .map(|k| {
            let (i, j) = ((k / side) as f64, (k % side) as f64);
            let x = i / side as f64 + 0.01 * j;
            let y = j / side as f64 + 0.013 * i;
            (vec![x, y], x.sin() * y.cos())
        })
        .collect()
}

/// Benchmark one 1D family: construction, lookup and sensitivities.
fn bench_family(c: &mut Criterion, group_name: &str, interpolator: &dyn Interpolator1D) {
    let mut group = c.benchmark_group(group_name);

    for size in [100, 1000, 10000] {
        let (xs, ys) = generate_1d_data(size);

        group.bench_with_input(
            BenchmarkId::new("construction", size),
            &(&xs, &ys),
            |b, (xs, ys)| {
                b.iter(|| interpolator.data_bundle_from_sorted(black_box(xs), black_box(ys)).unwrap());
            },
        );

        let bundle = interpolator.data_bundle_from_sorted(&xs, &ys).unwrap();
        group.bench_with_input(BenchmarkId::new("lookup_100", size), &bundle, |b, bundle| {
            let test_xs: Vec<f64> = (0..100).map(|i| i as f64 / 99.0).collect();
            b.iter(|| {
                for &x in &test_xs {
                    let _ = interpolator.interpolate(bundle, black_box(x));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("sensitivities", size), &bundle, |b, bundle| {
            b.iter(|| interpolator.node_sensitivities_for_value(bundle, black_box(0.37)).unwrap());
        });
    }

    group.finish();
}

fn bench_linear_interpolation(c: &mut Criterion) {
    bench_family(c, "linear_interpolation", &LinearInterpolator1D);
}

/// Construction includes the tridiagonal solve.
fn bench_cubic_spline_interpolation(c: &mut Criterion) {
    bench_family(c, "cubic_spline_interpolation", &NaturalCubicSplineInterpolator1D::default());
}

fn bench_monotonic_interpolation(c: &mut Criterion) {
    bench_family(c, "monotonic_interpolation", &MonotonicIncreasingInterpolator1D);
}

/// Spline solve plus the slope filter and its sensitivities.
fn bench_monotone_spline_interpolation(c: &mut Criterion) {
    bench_family(
        c,
        "monotone_spline_interpolation",
        &MonotonicityPreservingCubicSplineInterpolator1D::default(),
    );
}

/// Benchmark N-D fitting, dominated by the dense inverse.
fn bench_nd_fitting(c: &mut Criterion) {
    let mut group = c.benchmark_group("nd_fitting");
    group.sample_size(20);

    let rbf = RadialBasisFunctionInterpolatorND::new(RadialBasisFunction::Multiquadric, 0.3, false).unwrap();
    let kriging = KrigingInterpolatorND::new(1.5).unwrap();

    for size in [25, 100, 400] {
        let samples = generate_nd_data(size);

        group.bench_with_input(BenchmarkId::new("rbf_construction", size), &samples, |b, samples| {
            b.iter(|| rbf.data_bundle(black_box(samples)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("kriging_construction", size), &samples, |b, samples| {
            b.iter(|| kriging.data_bundle(black_box(samples)).unwrap());
        });

        let bundle = rbf.data_bundle(&samples).unwrap();
        group.bench_with_input(BenchmarkId::new("rbf_lookup", size), &bundle, |b, bundle| {
            b.iter(|| rbf.interpolate(bundle, black_box(&[0.42, 0.58])).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_linear_interpolation,
    bench_cubic_spline_interpolation,
    bench_monotonic_interpolation,
    bench_monotone_spline_interpolation,
    bench_nd_fitting
);
criterion_main!(benches);
