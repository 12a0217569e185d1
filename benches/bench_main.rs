use std::hint::black_box;

use bevy_pixel_heightmap::{FrameBuffer, PixelHeightmap, PixelHeightmapConfig};
use criterion::{Criterion, criterion_group, criterion_main};

fn gradient_frame(w: usize, h: usize) -> FrameBuffer {
    let pixels = (0..w * h)
        .map(|i| {
            let v = (i % w) as f32 / (w - 1) as f32;
            [v, v * 0.5, 1.0 - v, 1.0]
        })
        .collect();
    FrameBuffer::new(w, h, pixels)
}

fn bench_animator(c: &mut Criterion) {
    let config = PixelHeightmapConfig {
        pixel_spacing: 0.1,
        max_resolution: 0,
        frame_hold_duration: 0.0,
        transition_duration: 1.0,
        auto_play: true,
        use_vertical_gradient: true,
        ..Default::default()
    };

    c.bench_function("PixelHeightmap build 128x128", |b| {
        let frames = vec![gradient_frame(128, 128)];
        b.iter(|| PixelHeightmap::new(black_box(frames.clone()), config.clone()));
    });

    c.bench_function("PixelHeightmap tick 128x128", |b| {
        let frames = vec![gradient_frame(128, 128), gradient_frame(128, 128)];
        let mut animator = PixelHeightmap::new(frames, config.clone());
        b.iter(|| animator.tick(black_box(1.0 / 60.0)));
    });
}

criterion_group!(benches, bench_animator);
criterion_main!(benches);
