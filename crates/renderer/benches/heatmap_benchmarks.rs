//! Benchmarks for the renderer crate - aggregation, partitioning and SVG output.
//!
//! Run with: cargo bench --package renderer --bench heatmap_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use graph_common::{Calendar, Rgb};
use renderer::{partition, ColorScheme, HeatmapRenderer, Levels, Quantizer};
use test_utils::{dates, ramp_calendar, scattered_events};

fn create_renderer(levels: u32) -> HeatmapRenderer {
    HeatmapRenderer::new(Quantizer::new(
        Levels::new(levels).expect("benchmark levels are valid"),
        ColorScheme::from_primary(Rgb::new(0x21, 0x6e, 0x39)),
    ))
}

// =============================================================================
// AGGREGATION BENCHMARKS
// =============================================================================

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let last = dates::monday();

    for count in [1_000usize, 10_000, 100_000] {
        let events = scattered_events(last, count, 5, 42);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("events", count), &events, |b, events| {
            b.iter(|| {
                let mut calendar = Calendar::new(last);
                black_box(calendar.aggregate(events.iter().copied()))
            });
        });
    }

    group.finish();
}

// =============================================================================
// PARTITION BENCHMARKS
// =============================================================================

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");

    for (name, last) in [("monday", dates::monday()), ("saturday", dates::saturday())] {
        let calendar = Calendar::new(last);
        group.bench_with_input(BenchmarkId::new("last_date", name), &calendar, |b, calendar| {
            b.iter(|| partition(black_box(calendar)).map(|slices| slices.len()))
        });
    }

    group.finish();
}

// =============================================================================
// RENDER BENCHMARKS
// =============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let calendar = ramp_calendar(dates::monday());

    for levels in [5u32, 20, 255] {
        let renderer = create_renderer(levels);

        group.bench_with_input(BenchmarkId::new("compact", levels), &calendar, |b, calendar| {
            b.iter(|| renderer.render_to_vec(black_box(calendar), false).map(|(bytes, _)| bytes.len()))
        });
        group.bench_with_input(BenchmarkId::new("indented", levels), &calendar, |b, calendar| {
            b.iter(|| renderer.render_to_vec(black_box(calendar), true).map(|(bytes, _)| bytes.len()))
        });
    }

    group.finish();
}

// =============================================================================
// FULL PIPELINE BENCHMARKS
// =============================================================================

fn bench_full_pipeline(c: &mut Criterion) {
    let last = dates::saturday();
    let events = scattered_events(last, 20_000, 3, 7);
    let renderer = create_renderer(5);

    c.bench_function("events_to_svg", |b| {
        b.iter(|| {
            let mut calendar = Calendar::new(last);
            calendar.aggregate(events.iter().copied());
            renderer.render_to_vec(&calendar, false).map(|(bytes, _)| bytes.len())
        })
    });
}

criterion_group!(
    benches,
    bench_aggregate,
    bench_partition,
    bench_render,
    bench_full_pipeline,
);
criterion_main!(benches);
