use std::ops::RangeBounds;

use nalgebra::{vector, Vector3};

use super::SampleGenerator;

// Sample of generated shapes varies by this much
const SAMPLE_VARIANCE: u8 = 10;

/// Generate volume with a number of randomly placed shapes
pub struct ShapesGenerator {
    shapes: Vec<ShapeInfo>,
}

impl ShapesGenerator {
    /// Shapes have side `obj_size` (give or take a quarter) and must fit into `dims`
    pub fn new(
        dims: Vector3<u32>,
        n_of_shapes: usize,
        sample: u8,
        obj_size: u32,
        seed: u64,
    ) -> ShapesGenerator {
        let size = vector![obj_size, obj_size, obj_size];
        let variance = size / 4;
        let random_shape_gen =
            ShapeInfoGenerator::new(dims, size, variance, sample, SAMPLE_VARIANCE, seed);
        let shapes = random_shape_gen.get_shapes(n_of_shapes);
        ShapesGenerator { shapes }
    }
}

impl SampleGenerator for ShapesGenerator {
    fn sample_at(&self, coords: Vector3<u32>) -> u8 {
        // First shape containing the point wins
        self.shapes
            .iter()
            .find_map(|shape| shape.sample_at(coords))
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Cuboid,
    Sphere,
}

// # of enum ShapeType variants
const N_OF_SHAPE_KINDS: u8 = 2;

/// One shape in volume, occupies voxels from `position_low` to `position_high` inclusive
#[derive(Debug)]
pub struct ShapeInfo {
    pub position_low: Vector3<u32>,
    pub position_high: Vector3<u32>,
    pub shape_type: ShapeType,
    pub sample: u8,
}

impl ShapeInfo {
    #[must_use]
    pub fn new(
        position_low: Vector3<u32>,
        position_high: Vector3<u32>,
        shape_type: ShapeType,
        sample: u8,
    ) -> Self {
        Self {
            position_low,
            position_high,
            shape_type,
            sample,
        }
    }

    fn contains(&self, coords: Vector3<u32>) -> bool {
        (0..3).all(|i| coords[i] >= self.position_low[i] && coords[i] <= self.position_high[i])
    }

    /// Sample at `coords`, `None` outside of the shape
    pub fn sample_at(&self, coords: Vector3<u32>) -> Option<u8> {
        if !self.contains(coords) {
            return None;
        }
        match self.shape_type {
            ShapeType::Cuboid => Some(self.sample),
            ShapeType::Sphere => self.sphere_sample(coords),
        }
    }

    fn sphere_sample(&self, coords: Vector3<u32>) -> Option<u8> {
        let low = self.position_low.cast::<f32>();
        let high = self.position_high.cast::<f32>();

        let center = (low + high) / 2.0;
        let r = (high.x - low.x) / 2.0;

        if (coords.cast::<f32>() - center).magnitude() <= r {
            Some(self.sample)
        } else {
            None
        }
    }
}

/// Generate shapes
/// Helper type
pub struct ShapeInfoGenerator {
    rng: fastrand::Rng,
    vol_dims: Vector3<u32>,
    size: Vector3<u32>,
    size_variance: Vector3<u32>,
    sample: u8,
    sample_variance: u8,
}

impl ShapeInfoGenerator {
    #[must_use]
    pub fn new(
        vol_dims: Vector3<u32>,
        size: Vector3<u32>,
        size_variance: Vector3<u32>,
        sample: u8,
        sample_variance: u8,
        seed: u64,
    ) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            vol_dims,
            size,
            size_variance,
            sample,
            sample_variance,
        }
    }

    fn random_shape(&self) -> ShapeType {
        match self.rng.u8(0..N_OF_SHAPE_KINDS) {
            0 => ShapeType::Cuboid,
            _ => ShapeType::Sphere,
        }
    }

    fn random_vector<R>(&self, ranges: Vector3<R>) -> Vector3<u32>
    where
        R: RangeBounds<u32> + Clone,
    {
        let rand_x = self.rng.u32(ranges[0].clone()); // Using index, .x access not working
        let rand_y = self.rng.u32(ranges[1].clone());
        let rand_z = self.rng.u32(ranges[2].clone());
        vector![rand_x, rand_y, rand_z]
    }

    pub fn get_shapes(&self, n: usize) -> Vec<ShapeInfo> {
        (0..n).map(|_| self.get_shape()).collect()
    }

    pub fn get_shape(&self) -> ShapeInfo {
        let shape_type = self.random_shape();

        // Sizes are at least 1 and at most the volume
        let size_min = (self.size - self.size_variance).map(|v| v.max(1));
        let size_max = (self.size + self.size_variance).zip_map(&self.vol_dims, u32::min);

        let size_ranges = vector![
            size_min.x..=size_max.x.max(size_min.x),
            size_min.y..=size_max.y.max(size_min.y),
            size_min.z..=size_max.z.max(size_min.z)
        ];
        let mut size = self.random_vector(size_ranges);
        if shape_type == ShapeType::Sphere {
            let side = size.x.min(size.y).min(size.z);
            size = vector![side, side, side];
        }
        let size = size.zip_map(&self.vol_dims, u32::min);

        // Spawn shape in positions it fits
        let pos_ranges = vector![
            0..=(self.vol_dims.x - size.x),
            0..=(self.vol_dims.y - size.y),
            0..=(self.vol_dims.z - size.z)
        ];
        let position_low = self.random_vector(pos_ranges);

        let position_high = position_low + size - vector![1, 1, 1];

        let sample = self.random_sample();

        ShapeInfo::new(position_low, position_high, shape_type, sample)
    }

    fn random_sample(&self) -> u8 {
        // Uses saturating intrinsics, so there is no overflow
        let low = self.sample.saturating_sub(self.sample_variance).max(1);
        let high = self.sample.saturating_add(self.sample_variance);
        self.rng.u8(low..=high.max(low))
    }
}
