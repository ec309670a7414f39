use nalgebra::{vector, Vector2};

/// Smallest accepted distance between samples, in world units
///
/// The longest side of the volume has length 1, so this is about
/// a twentieth of a voxel of a 512 wide volume.
pub const MIN_SAMPLE_STEP: f32 = 1e-4;

/// Settings of renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Size of rendered image in pixels
    pub resolution: Vector2<u16>,
    /// Distance between samples on a ray, in world units.
    /// `None` means one voxel along the longest side of the volume.
    pub sample_step: Option<f32>,
    /// Stop compositing once the ray is almost opaque
    pub early_ray_termination: bool,
    /// Render rows in parallel
    pub multi_thread: bool,
}

impl RenderOptions {
    pub fn builder() -> RenderOptionsBuilder {
        RenderOptionsBuilder::new()
    }

    /// Number of bytes of RGB image
    pub fn buffer_len(&self) -> usize {
        3 * self.resolution.x as usize * self.resolution.y as usize
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptionsBuilder::new().build_unchecked()
    }
}

#[derive(Default)]
pub struct RenderOptionsBuilder {
    resolution: Option<Vector2<u16>>,
    sample_step: Option<f32>,
    early_ray_termination: Option<bool>,
    multi_thread: Option<bool>,
}

impl RenderOptionsBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn resolution(mut self, resolution: Vector2<u16>) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn sample_step(mut self, step: f32) -> Self {
        self.sample_step = Some(step);
        self
    }

    pub fn early_ray_termination(mut self, ert: bool) -> Self {
        self.early_ray_termination = Some(ert);
        self
    }

    pub fn multi_thread(mut self, multi_thread: bool) -> Self {
        self.multi_thread = Some(multi_thread);
        self
    }

    /// Build options
    ///
    /// `None` if resolution is missing or zero, or if step is not finite
    /// or smaller than [`MIN_SAMPLE_STEP`].
    pub fn build(self) -> Option<RenderOptions> {
        let resolution = self.resolution?;
        if resolution.x == 0 || resolution.y == 0 {
            return None;
        }
        if let Some(step) = self.sample_step {
            if !step.is_finite() || step < MIN_SAMPLE_STEP {
                return None;
            }
        }
        Some(self.build_unchecked())
    }

    /// Build options, missing values are filled with defaults
    pub fn build_unchecked(self) -> RenderOptions {
        RenderOptions {
            resolution: self.resolution.unwrap_or_else(|| vector![512, 512]),
            sample_step: self.sample_step,
            early_ray_termination: self.early_ray_termination.unwrap_or(true),
            multi_thread: self.multi_thread.unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builder_defaults() {
        let opts = RenderOptions::builder().build_unchecked();
        assert_eq!(opts.resolution, vector![512, 512]);
        assert_eq!(opts.sample_step, None);
        assert!(opts.early_ray_termination);
        assert!(opts.multi_thread);
        assert_eq!(opts.buffer_len(), 3 * 512 * 512);
    }

    #[test]
    fn builder_validates() {
        assert!(RenderOptions::builder().build().is_none());
        assert!(RenderOptions::builder()
            .resolution(vector![0, 10])
            .build()
            .is_none());
        assert!(RenderOptions::builder()
            .resolution(vector![10, 10])
            .sample_step(0.0)
            .build()
            .is_none());
        assert!(RenderOptions::builder()
            .resolution(vector![10, 10])
            .sample_step(1e-40)
            .build()
            .is_none());
        assert!(RenderOptions::builder()
            .resolution(vector![10, 10])
            .sample_step(f32::INFINITY)
            .build()
            .is_none());
        assert!(RenderOptions::builder()
            .resolution(vector![10, 10])
            .sample_step(MIN_SAMPLE_STEP)
            .build()
            .is_some());

        let opts = RenderOptions::builder()
            .resolution(vector![30, 20])
            .sample_step(0.01)
            .multi_thread(false)
            .build()
            .unwrap();
        assert_eq!(opts.resolution, vector![30, 20]);
        assert_eq!(opts.sample_step, Some(0.01));
        assert!(!opts.multi_thread);
    }
}
