use nalgebra::{vector, Vector3};

use super::SampleGenerator;

/// Ball in the middle of the volume
///
/// Density is 255 in the center and falls off linearly to 0 at radius,
/// every iso value gives a sphere.
pub struct SphereGenerator {
    center: Vector3<f32>,
    radius: f32,
}

impl SphereGenerator {
    pub fn new(dims: Vector3<u32>) -> SphereGenerator {
        let dims_f = dims.cast::<f32>();
        let center = (dims_f - vector![1.0, 1.0, 1.0]) / 2.0;
        let radius = dims_f.min() * 0.45;
        SphereGenerator { center, radius }
    }
}

impl SampleGenerator for SphereGenerator {
    fn sample_at(&self, coords: Vector3<u32>) -> u8 {
        let d = (coords.cast::<f32>() - self.center).magnitude();
        let t = (1.0 - d / self.radius).max(0.0);
        (t * 255.0).round() as u8
    }
}
