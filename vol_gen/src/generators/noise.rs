use nalgebra::Vector3;

use super::SampleGenerator;

/// Uniform random samples
///
/// Every voxel has its own generator seeded by its position,
/// so the result does not depend on order of generation.
pub struct NoiseGenerator {
    dims: Vector3<u32>,
    seed: u64,
}

impl NoiseGenerator {
    pub fn new(dims: Vector3<u32>, seed: u64) -> NoiseGenerator {
        NoiseGenerator { dims, seed }
    }
}

impl SampleGenerator for NoiseGenerator {
    fn sample_at(&self, coords: Vector3<u32>) -> u8 {
        let index = coords.x as u64
            + coords.y as u64 * self.dims.x as u64
            + coords.z as u64 * self.dims.x as u64 * self.dims.y as u64;
        let rng = fastrand::Rng::with_seed(self.seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        rng.u8(..)
    }
}

#[cfg(test)]
mod test {
    use nalgebra::vector;

    use super::*;

    fn samples(gen: &NoiseGenerator) -> Vec<u8> {
        (0..64).map(|x| gen.sample_at(vector![x, 1, 2])).collect()
    }

    #[test]
    fn same_seed_same_noise() {
        let a = NoiseGenerator::new(vector![64, 4, 4], 7);
        let b = NoiseGenerator::new(vector![64, 4, 4], 7);
        assert_eq!(samples(&a), samples(&b));

        let c = NoiseGenerator::new(vector![64, 4, 4], 8);
        assert_ne!(samples(&a), samples(&c));
    }

    #[test]
    fn not_constant() {
        let gen = NoiseGenerator::new(vector![64, 4, 4], 1);
        let s = samples(&gen);
        assert!(s.iter().any(|&v| v != s[0]));
    }
}
