//! Volume dimensions encoded in file names
//!
//! Raw files carry no header, the convention is to name them
//! `<name>_<X>_<Y>_<Z>.raw`, for example `CThead_512_512_452.raw`.

use std::path::Path;

use nalgebra::{vector, Vector3};
use nom::{
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res},
    sequence::{preceded, tuple},
    IResult,
};

use crate::{Error, Result};

fn dimension(s: &str) -> IResult<&str, usize> {
    preceded(char('_'), map_res(digit1, |d: &str| d.parse::<usize>()))(s)
}

fn dims_suffix(s: &str) -> IResult<&str, (usize, usize, usize)> {
    all_consuming(tuple((dimension, dimension, dimension)))(s)
}

/// Parse dimensions from file name of form `<name>_<X>_<Y>_<Z>.<ext>`
pub fn dims_from_file_name<P>(path: P) -> Result<Vector3<usize>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let err = || Error::FileName(path.display().to_string());

    let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(err)?;

    // leftmost underscore, after which the whole rest is the suffix
    let (x, y, z) = stem
        .match_indices('_')
        .find_map(|(i, _)| dims_suffix(&stem[i..]).ok())
        .map(|(_, dims)| dims)
        .ok_or_else(err)?;

    Ok(vector![x, y, z])
}

/// Construct file name following the `<name>_<X>_<Y>_<Z>.raw` convention
pub fn raw_file_name(name: &str, dims: Vector3<usize>) -> String {
    format!("{name}_{}_{}_{}.raw", dims.x, dims.y, dims.z)
}
