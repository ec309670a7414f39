use nalgebra::Vector3;

use super::SampleGenerator;

/// Generate solid volume
/// All sample values are the same
pub struct SolidGenerator {
    /// The sample value
    sample: u8,
}

impl SolidGenerator {
    pub fn new(sample: u8) -> SolidGenerator {
        SolidGenerator { sample }
    }
}

impl SampleGenerator for SolidGenerator {
    fn sample_at(&self, _coords: Vector3<u32>) -> u8 {
        self.sample
    }
}

#[cfg(test)]
mod test {
    use nalgebra::vector;

    use super::*;

    #[test]
    fn constant() {
        let gen = SolidGenerator::new(42);
        assert_eq!(gen.sample_at(vector![0, 0, 0]), 42);
        assert_eq!(gen.sample_at(vector![100, 3, 7]), 42);
    }
}
