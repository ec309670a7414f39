//! Volumetric data
//!
//! Raw volumes are headerless grids of bytes, one byte per voxel,
//! x coordinate changing the fastest.

mod histogram;
pub mod parse;
mod vol_reader;
mod volume;

pub use histogram::{Histogram, HISTOGRAM_BINS};
pub use vol_reader::DataSource;
pub use volume::Volume;

use std::path::Path;

use nalgebra::Vector3;

use crate::Result;

/// Load raw volume from file
///
/// If `size` is `None`, dimensions are parsed from the file name
/// (see [`parse::dims_from_file_name`]).
pub fn from_file<P>(path: P, size: Option<Vector3<usize>>) -> Result<Volume>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let size = match size {
        Some(size) => size,
        None => parse::dims_from_file_name(path)?,
    };
    Volume::from_file(path, size)
}
