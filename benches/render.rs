#[macro_use]
extern crate criterion;
extern crate mandelzoom;
extern crate num;
extern crate num_cpus;

use criterion::Criterion;
use mandelzoom::{escape_time, NoProgress, RenderConfig, Renderer, Viewport};
use num::Complex;

fn seahorse(zoom: f64) -> Viewport {
    Viewport::new(zoom, Complex::new(-0.7448617666197486, -0.1225611668766516))
}

fn escape_benchmark(c: &mut Criterion) {
    c.bench_function("escape_time seahorse 10000", |b| {
        b.iter(|| escape_time(seahorse(1.0).center, 10_000))
    });
}

fn frame_benchmark(c: &mut Criterion) {
    let config = RenderConfig {
        width: 128,
        height: 128,
        ..RenderConfig::default()
    };
    let renderer = Renderer::new(config, num_cpus::get()).unwrap();
    c.bench_function("render_frame 128x128 zoom 50", move |b| {
        b.iter(|| renderer.render_frame(&seahorse(50.0), &NoProgress).unwrap())
    });
}

criterion_group!(benches, escape_benchmark, frame_benchmark);
criterion_main!(benches);
