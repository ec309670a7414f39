//! Module with helper functions
//! Saves repetition in unit tests

use std::path::{Path, PathBuf};

use nalgebra::{vector, Vector3};

use crate::volumetric::Volume;

/// 2x2x2 volume with distinct samples
pub fn white_volume() -> Volume {
    let data = vec![0, 32, 64, 64 + 32, 128, 128 + 32, 128 + 64, 255];
    Volume::from_vec(vector![2, 2, 2], data).unwrap()
}

pub fn empty_volume(size: Vector3<usize>) -> Volume {
    let data = vec![0; size.x * size.y * size.z];
    Volume::from_vec(size, data).unwrap()
}

/// Cube of side `side` with a ball of radius `radius` voxels in the middle
///
/// Density falls off linearly from 255 in the center to 0 on the surface of the ball.
pub fn sphere_volume(side: usize, radius: f32) -> Volume {
    let center = (side as f32 - 1.0) / 2.0;
    let mut data = Vec::with_capacity(side * side * side);
    for z in 0..side {
        for y in 0..side {
            for x in 0..side {
                let d = vector![x as f32 - center, y as f32 - center, z as f32 - center];
                let t = 1.0 - d.magnitude() / radius;
                data.push((t.max(0.0) * 255.0) as u8);
            }
        }
    }
    Volume::from_vec(vector![side, side, side], data).unwrap()
}

/// Empty cube with one voxel at `pos` set to 255
pub fn single_voxel_volume(side: usize, pos: Vector3<usize>) -> Volume {
    let mut data = vec![0; side * side * side];
    data[pos.x + pos.y * side + pos.z * side * side] = 255;
    Volume::from_vec(vector![side, side, side], data).unwrap()
}

/// File in temporary directory, removed on drop
pub struct TempFile {
    path: PathBuf,
}

impl TempFile {
    /// Names are prefixed with process id, tests running in parallel must use distinct names
    pub fn with_content(name: &str, content: &[u8]) -> TempFile {
        let mut path = std::env::temp_dir();
        path.push(format!("volren-{}-{name}", std::process::id()));
        std::fs::write(&path, content).unwrap();
        TempFile { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
