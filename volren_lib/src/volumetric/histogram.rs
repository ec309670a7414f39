/// Number of bins, one for every byte value
pub const HISTOGRAM_BINS: usize = 256;

/// Normalized histogram of voxel values
///
/// Bins sum up to 1 for non-empty data.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    bins: [f32; HISTOGRAM_BINS],
}

impl Histogram {
    pub fn from_samples(samples: &[u8]) -> Histogram {
        let mut counts = [0u64; HISTOGRAM_BINS];
        for &s in samples {
            counts[s as usize] += 1;
        }

        let mut bins = [0.0; HISTOGRAM_BINS];
        if !samples.is_empty() {
            let total = samples.len() as f64;
            for (bin, &count) in bins.iter_mut().zip(counts.iter()) {
                *bin = (count as f64 / total) as f32;
            }
        }

        Histogram { bins }
    }

    pub fn bins(&self) -> &[f32; HISTOGRAM_BINS] {
        &self.bins
    }

    pub fn get(&self, value: u8) -> f32 {
        self.bins[value as usize]
    }

    /// Height of the tallest bin
    pub fn max_bin(&self) -> f32 {
        self.bins.iter().copied().fold(0.0, f32::max)
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Histogram {
            bins: [0.0; HISTOGRAM_BINS],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalized() {
        let samples = [0, 0, 255, 7, 7, 7, 7, 1];
        let hist = Histogram::from_samples(&samples);

        assert_eq!(hist.get(0), 0.25);
        assert_eq!(hist.get(7), 0.5);
        assert_eq!(hist.get(255), 0.125);
        assert_eq!(hist.get(1), 0.125);
        assert_eq!(hist.get(2), 0.0);
        assert_eq!(hist.max_bin(), 0.5);

        let sum: f32 = hist.bins().iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn empty_samples() {
        let hist = Histogram::from_samples(&[]);
        assert_eq!(hist, Histogram::default());
        assert_eq!(hist.max_bin(), 0.0);
    }
}
