pub use criterion::Criterion;

pub use nalgebra::{vector, Vector2};
pub use volren_lib::{
    render::{RenderMode, RenderOptions, Renderer, Uniforms},
    test_helpers::sphere_volume,
    volumetric::Volume,
};

pub const RESOLUTION: Vector2<u16> = vector![256, 256];

pub const VOLUME_SIDE: usize = 64;

/// Views rendered in each iteration, `(xrot, yrot, zoom)`
pub const DEFAULT_VIEWS: [(f32, f32, f32); 3] = [(0.0, 0.0, 1.0), (30.0, 45.0, 1.0), (-60.0, 120.0, 1.5)];

pub fn get_volume() -> Volume {
    sphere_volume(VOLUME_SIDE, VOLUME_SIDE as f32 * 0.45)
}

pub fn bench_mode(c: &mut Criterion, name: &str, mode: RenderMode, render_options: RenderOptions) {
    let renderer = Renderer::new(get_volume(), render_options);
    let mut buffer = vec![0; renderer.buffer_len()];

    c.bench_function(name, |b| {
        b.iter(|| {
            for &(xrot, yrot, zoom) in DEFAULT_VIEWS.iter() {
                let uniforms = Uniforms {
                    method: mode,
                    iso_value: 0.4,
                    xrot,
                    yrot,
                    zoom,
                };
                renderer.render(&uniforms, &mut buffer);
            }
        });
    });
}
