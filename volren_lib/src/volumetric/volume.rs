use std::{path::Path, sync::Arc};

use log::{info, warn};
use nalgebra::{vector, Point3, Vector3};

use super::{DataSource, Histogram};
use crate::{common::BoundBox, Error, Result};

/// Volume of 8-bit samples, used as a 3D texture by the renderer
///
/// Samples are stored linearly, index of voxel `[x,y,z]` is `x + y*W + z*W*H`.
/// Files stay memory mapped, clones share the mapping.
/// In world coordinates, the volume is centered in the origin and
/// its longest side has the length of 1.
#[derive(Clone)]
pub struct Volume {
    size: Vector3<usize>,
    data: Arc<DataSource>,
    bound_box: BoundBox,
    histogram: Histogram,
}

impl std::fmt::Debug for Volume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Volume")
            .field("box", &self.bound_box)
            .field("size", &self.size)
            .field("data len ", &self.as_slice().len())
            .finish()
    }
}

impl Volume {
    /// Read raw file with dimensions `size`
    pub fn from_file<P>(path: P, size: Vector3<usize>) -> Result<Volume>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let ds = DataSource::from_file(path)?;
        let volume = Volume::from_data_source(ds, size)?;
        info!(
            "Loaded volume {} ({}x{}x{})",
            path.display(),
            size.x,
            size.y,
            size.z
        );
        Ok(volume)
    }

    /// Take ownership of the samples in `ds`, bytes past the last voxel are ignored
    pub fn from_data_source(ds: DataSource, size: Vector3<usize>) -> Result<Volume> {
        let expected = Volume::voxel_count(size)?;

        if ds.len() < expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: ds.len(),
            });
        }
        if ds.len() > expected {
            warn!(
                "Volume data has {} trailing bytes, ignoring them",
                ds.len() - expected
            );
        }

        Ok(Volume::build(size, ds))
    }

    /// Construct volume from owned samples
    pub fn from_vec(size: Vector3<usize>, data: Vec<u8>) -> Result<Volume> {
        Volume::from_data_source(DataSource::from_vec(data), size)
    }

    fn voxel_count(size: Vector3<usize>) -> Result<usize> {
        let invalid = Error::InvalidDimensions(size.x, size.y, size.z);
        if size.iter().any(|&d| d == 0) {
            return Err(invalid);
        }
        size.x
            .checked_mul(size.y)
            .and_then(|xy| xy.checked_mul(size.z))
            .ok_or(invalid)
    }

    fn build(size: Vector3<usize>, data: DataSource) -> Volume {
        let histogram = Histogram::from_samples(&data.get_slice()[..size.product()]);

        let longest = longest_side(size) as f32;
        let dims = size.map(|v| v as f32 / longest);
        let bound_box = BoundBox::centered(dims);

        Volume {
            size,
            data: Arc::new(data),
            bound_box,
            histogram,
        }
    }

    fn get_3d_index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.size.x + z * self.size.x * self.size.y
    }

    /// Get dimensions in voxels
    pub fn get_size(&self) -> Vector3<usize> {
        self.size
    }

    pub fn get_bound_box(&self) -> BoundBox {
        self.bound_box
    }

    pub fn get_histogram(&self) -> &Histogram {
        &self.histogram
    }

    pub fn get_data(&self, x: usize, y: usize, z: usize) -> Option<u8> {
        if x >= self.size.x || y >= self.size.y || z >= self.size.z {
            return None;
        }
        self.as_slice().get(self.get_3d_index(x, y, z)).copied()
    }

    /// Samples of the volume, without trailing bytes of the source
    pub fn as_slice(&self) -> &[u8] {
        &self.data.get_slice()[..self.size.product()]
    }

    /// Edge of a voxel along the longest axis, in world units
    pub fn voxel_size(&self) -> f32 {
        1.0 / longest_side(self.size) as f32
    }

    // Direct access, indices must be valid
    fn texel(&self, x: usize, y: usize, z: usize) -> f32 {
        self.data.get_slice()[self.get_3d_index(x, y, z)] as f32
    }

    /// Trilinear sample at texture coordinates `<0;1>^3`, result in `<0;1>`
    ///
    /// Texel centers lie at `(i + 0.5) / N`, coordinates outside
    /// are clamped to the edge.
    pub fn sample_at(&self, pos: Point3<f32>) -> f32 {
        let (x0, x1, x_t) = texel_coord(pos.x, self.size.x);
        let (y0, y1, y_t) = texel_coord(pos.y, self.size.y);
        let (z0, z1, z_t) = texel_coord(pos.z, self.size.z);

        // x lines
        let c00 = lerp(self.texel(x0, y0, z0), self.texel(x1, y0, z0), x_t);
        let c10 = lerp(self.texel(x0, y1, z0), self.texel(x1, y1, z0), x_t);
        let c01 = lerp(self.texel(x0, y0, z1), self.texel(x1, y0, z1), x_t);
        let c11 = lerp(self.texel(x0, y1, z1), self.texel(x1, y1, z1), x_t);

        // y plane
        let c0 = lerp(c00, c10, y_t);
        let c1 = lerp(c01, c11, y_t);

        lerp(c0, c1, z_t) / 255.0
    }

    /// Gradient of samples at texture coordinates `pos`, in world space
    ///
    /// Central differences, one texel apart.
    pub fn gradient_at(&self, pos: Point3<f32>) -> Vector3<f32> {
        let texel = self.size.map(|v| 1.0 / v as f32);
        let world_step = self.bound_box.dims().component_mul(&texel);

        let dx = vector![texel.x, 0.0, 0.0];
        let dy = vector![0.0, texel.y, 0.0];
        let dz = vector![0.0, 0.0, texel.z];

        let gx = self.sample_at(pos + dx) - self.sample_at(pos - dx);
        let gy = self.sample_at(pos + dy) - self.sample_at(pos - dy);
        let gz = self.sample_at(pos + dz) - self.sample_at(pos - dz);

        vector![gx, gy, gz].component_div(&(2.0 * world_step))
    }
}

fn longest_side(size: Vector3<usize>) -> usize {
    size.iter().copied().max().unwrap_or(1)
}

// Lower texel, upper texel and interpolation parameter
fn texel_coord(t: f32, n: usize) -> (usize, usize, f32) {
    let max = (n - 1) as f32;
    let u = (t * n as f32 - 0.5).clamp(0.0, max);
    let lower = u.floor();
    let frac = u - lower;
    let lower = lower as usize;
    let upper = usize::min(lower + 1, n - 1);
    (lower, upper, frac)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
