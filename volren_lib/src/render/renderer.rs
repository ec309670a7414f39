use nalgebra::{vector, Point3, Vector3};
use rayon::prelude::*;

use crate::{
    camera::PerspectiveCamera,
    color::{self, RGBA},
    common::Ray,
    volumetric::Volume,
    TransferFunction,
};

use super::{RenderMode, RenderOptions, Uniforms, MIN_SAMPLE_STEP, MIN_ZOOM};

const AMBIENT: f32 = 0.2;
const DIFFUSE: f32 = 0.7;
const SPECULAR: f32 = 0.3;
const SHININESS: f32 = 32.0;

const OPACITY_THRESHOLD: f32 = 0.99;

// Upper bound of samples on one ray
const MAX_RAY_SAMPLES: usize = 1 << 16;

/// Ray caster
///
/// Owns the volume (`tex`) and the transfer function (`transferFunction`),
/// everything else comes in [`Uniforms`] with each frame.
pub struct Renderer {
    volume: Volume,
    transfer_function: TransferFunction,
    render_options: RenderOptions,
}

impl Renderer {
    pub fn new(volume: Volume, render_options: RenderOptions) -> Renderer {
        Renderer {
            volume,
            transfer_function: TransferFunction::default(),
            render_options,
        }
    }

    /// Replace transfer function used by alpha blending
    pub fn upload_transfer_function(&mut self, tf: TransferFunction) {
        self.transfer_function = tf;
    }

    /// Size of RGB frame in bytes
    pub fn buffer_len(&self) -> usize {
        self.render_options.buffer_len()
    }

    fn sample_step(&self) -> f32 {
        self.render_options
            .sample_step
            .unwrap_or_else(|| self.volume.voxel_size())
            .max(MIN_SAMPLE_STEP)
    }

    /// Render one frame into `buffer` as RGB, row 0 is the top of the image
    ///
    /// # Panics
    ///
    /// If `buffer` is shorter than [`Renderer::buffer_len`].
    pub fn render(&self, uniforms: &Uniforms, buffer: &mut [u8]) {
        let (img_w, img_h) = (
            self.render_options.resolution.x as usize,
            self.render_options.resolution.y as usize,
        );
        assert!(
            buffer.len() >= self.buffer_len(),
            "frame buffer too small: {} < {}",
            buffer.len(),
            self.buffer_len()
        );

        let mut camera =
            PerspectiveCamera::orbit(uniforms.xrot, uniforms.yrot, uniforms.zoom.max(MIN_ZOOM));
        camera.change_aspect_from_resolution(img_w as u32, img_h as u32);

        let row_len = img_w * 3;
        let buffer = &mut buffer[..row_len * img_h];

        if self.render_options.multi_thread {
            buffer
                .par_chunks_exact_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| self.render_row(&camera, uniforms, y, row));
        } else {
            buffer
                .chunks_exact_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| self.render_row(&camera, uniforms, y, row));
        }
    }

    fn render_row(&self, camera: &PerspectiveCamera, uniforms: &Uniforms, y: usize, row: &mut [u8]) {
        let step_x = 1.0 / self.render_options.resolution.x as f32;
        let step_y = 1.0 / self.render_options.resolution.y as f32;
        let y_norm = (y as f32 + 0.5) * step_y;

        for (x, pixel) in row.chunks_exact_mut(3).enumerate() {
            let pixel_coord = ((x as f32 + 0.5) * step_x, y_norm);
            let ray = camera.get_ray(pixel_coord);
            let rgb = self.cast_ray(&ray, uniforms);

            // expects black background
            pixel[0] = color::to_byte(rgb.x);
            pixel[1] = color::to_byte(rgb.y);
            pixel[2] = color::to_byte(rgb.z);
        }
    }

    /// Color of one ray, black if it misses the volume
    pub fn cast_ray(&self, ray: &Ray, uniforms: &Uniforms) -> Vector3<f32> {
        let (t_enter, t_exit) = match self.volume.get_bound_box().intersect(ray) {
            Some(t) => t,
            None => return Vector3::zeros(),
        };
        let march = RayMarch::new(ray, t_enter.max(0.0), t_exit, self.sample_step());

        match uniforms.method {
            RenderMode::Mip => self.maximum_intensity(&march),
            RenderMode::AlphaBlending => self.alpha_blending(&march).xyz(),
            RenderMode::IsoSurface => self.iso_surface(&march, uniforms.iso_value),
        }
    }

    fn sample(&self, pos: &Point3<f32>) -> f32 {
        let tex_pos = self.volume.get_bound_box().normalize_point(pos);
        self.volume.sample_at(tex_pos)
    }

    fn maximum_intensity(&self, march: &RayMarch) -> Vector3<f32> {
        let max = march
            .positions()
            .map(|(_, pos)| self.sample(&pos))
            .fold(0.0, f32::max);
        vector![max, max, max]
    }

    fn alpha_blending(&self, march: &RayMarch) -> RGBA {
        let mut accum = color::zero();

        // Table opacities are per voxel
        let opacity_exp = march.step / self.volume.voxel_size();

        for (_, pos) in march.positions() {
            let sample = self.sample(&pos);
            let color_b = self.transfer_function.lookup(sample);
            if color_b.w == 0.0 {
                continue;
            }

            let alpha = 1.0 - (1.0 - color_b.w.min(1.0)).powf(opacity_exp);
            let weight = (1.0 - accum.w) * alpha;
            accum += vector![
                weight * color_b.x,
                weight * color_b.y,
                weight * color_b.z,
                weight
            ];

            if self.render_options.early_ray_termination && accum.w > OPACITY_THRESHOLD {
                break;
            }
        }
        accum
    }

    fn iso_surface(&self, march: &RayMarch, iso_value: f32) -> Vector3<f32> {
        let mut previous: Option<(f32, f32)> = None;

        for (t, pos) in march.positions() {
            let sample = self.sample(&pos);
            if sample >= iso_value {
                let t_hit = match previous {
                    Some((t_prev, s_prev)) if sample > s_prev => {
                        t_prev + (t - t_prev) * (iso_value - s_prev) / (sample - s_prev)
                    }
                    _ => t,
                };
                let hit = march.ray.point_from_t(t_hit);
                return self.shade(&hit, &march.ray.direction);
            }
            previous = Some((t, sample));
        }
        Vector3::zeros()
    }

    // Phong, light at the camera
    fn shade(&self, pos: &Point3<f32>, view_dir: &Vector3<f32>) -> Vector3<f32> {
        let surface = surface_color();
        let mut rgb = AMBIENT * surface;

        let tex_pos = self.volume.get_bound_box().normalize_point(pos);
        let grad = self.volume.gradient_at(tex_pos);
        if grad.magnitude_squared() < f32::EPSILON {
            return rgb;
        }

        let normal = -grad.normalize();
        let light = -view_dir.normalize();

        let n_dot_l = normal.dot(&light).max(0.0);
        rgb += DIFFUSE * n_dot_l * surface;

        // halfway vector equals light direction
        let n_dot_h = normal.dot(&light).max(0.0);
        rgb += SPECULAR * n_dot_h.powf(SHININESS) * vector![1.0, 1.0, 1.0];

        rgb
    }
}

fn surface_color() -> Vector3<f32> {
    vector![0.9, 0.85, 0.75]
}

// Samples of a ray between entry and exit
struct RayMarch<'a> {
    ray: &'a Ray,
    t_enter: f32,
    step: f32,
    steps: usize,
}

impl<'a> RayMarch<'a> {
    fn new(ray: &'a Ray, t_enter: f32, t_exit: f32, step: f32) -> RayMarch<'a> {
        let steps = ((t_exit - t_enter) / step).max(0.0) as usize;
        let steps = steps.min(MAX_RAY_SAMPLES - 1) + 1;
        RayMarch {
            ray,
            t_enter,
            step,
            steps,
        }
    }

    fn positions(&self) -> impl Iterator<Item = (f32, Point3<f32>)> + '_ {
        (0..self.steps).map(move |i| {
            let t = self.t_enter + i as f32 * self.step;
            (t, self.ray.point_from_t(t))
        })
    }
}
