//! Benchmarks for frame evaluation

#[path = "../tests/common/mod.rs"]
mod common;

use caption_core::resolve_style;
use caption_renderer::animation::{assign_animations, spring};
use caption_renderer::layout::{layout_group, LayoutParams};
use caption_renderer::{Compositor, ExportJob};
use common::{context, sample_transcript, FixedAdvanceMeasurer};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

fn compositor(style_id: &str) -> Compositor {
    Compositor::new(
        context(240),
        Arc::new(sample_transcript()),
        Arc::new(resolve_style(style_id, None)),
    )
    .unwrap()
}

fn benchmark_frame_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame");
    for style_id in ["basic", "equal-width", "gradient", "three-lines-left"] {
        let compositor = compositor(style_id);
        compositor.prepare().unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(style_id), &compositor, |b, compositor| {
            b.iter(|| compositor.render_frame(black_box(150)))
        });
    }
    group.finish();
}

fn benchmark_layout(c: &mut Criterion) {
    let transcript = sample_transcript();
    let style = resolve_style("equal-width", None);
    let params = LayoutParams::new(972.0);
    let body = &transcript.groups()[2];

    c.bench_function("layout_group", |b| {
        b.iter(|| layout_group(black_box(body), &style, &FixedAdvanceMeasurer, &params, None))
    });
}

fn benchmark_animation(c: &mut Criterion) {
    c.bench_function("spring_frame_90", |b| b.iter(|| spring(black_box(90.0), 30.0)));
    c.bench_function("assign_animations_12", |b| {
        b.iter(|| assign_animations(black_box(42.125), 12))
    });
}

fn benchmark_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    group.sample_size(10);
    for batch_size in [1usize, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(batch_size), &batch_size, |b, &batch_size| {
            b.iter(|| {
                ExportJob::from_parts(context(240), sample_transcript(), resolve_style("basic", None))
                    .unwrap()
                    .with_batch_size(batch_size)
                    .render_all()
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_frame_evaluation,
    benchmark_layout,
    benchmark_animation,
    benchmark_export
);

criterion_main!(benches);
