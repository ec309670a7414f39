use std::{error::Error, path::PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use nalgebra::{vector, Vector3};
use rayon::prelude::*;

use crate::{
    config::{Config, GeneratorConfig},
    file::write_volume,
};

mod noise;
mod shapes;
mod solid;
mod sphere;

pub use noise::NoiseGenerator;
pub use shapes::ShapesGenerator;
pub use solid::SolidGenerator;
pub use sphere::SphereGenerator;

// Generates one sample at a time, at any location
pub trait SampleGenerator: Sync {
    fn sample_at(&self, coords: Vector3<u32>) -> u8;
}

pub fn get_sample_generator(config: &Config, seed: u64) -> Box<dyn SampleGenerator> {
    match config.generator {
        GeneratorConfig::Shapes {
            n_of_shapes,
            sample,
            obj_size,
        } => Box::new(ShapesGenerator::new(
            config.dims,
            n_of_shapes,
            sample,
            obj_size,
            seed,
        )),
        GeneratorConfig::Noise => Box::new(NoiseGenerator::new(config.dims, seed)),
        GeneratorConfig::Solid { sample } => Box::new(SolidGenerator::new(sample)),
        GeneratorConfig::Sphere => Box::new(SphereGenerator::new(config.dims)),
    }
}

/// Samples of the whole volume, x changing the fastest
///
/// Slices along z are generated in parallel.
pub fn generate_buffer(
    gen: &dyn SampleGenerator,
    dims: Vector3<u32>,
    progress: &ProgressBar,
) -> Vec<u8> {
    let slice_len = dims.x as usize * dims.y as usize;
    let mut buffer = vec![0; slice_len * dims.z as usize];

    buffer
        .par_chunks_mut(slice_len)
        .enumerate()
        .for_each(|(z, slice)| {
            for y in 0..dims.y {
                for x in 0..dims.x {
                    let index = x as usize + y as usize * dims.x as usize;
                    slice[index] = gen.sample_at(vector![x, y, z as u32]);
                }
            }
            progress.inc(1);
        });

    buffer
}

/// Generate volume described by `config` and save it
///
/// Returns path of the written file.
pub fn generate_vol(config: &Config) -> Result<PathBuf, Box<dyn Error>> {
    let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
    info!("Using seed {seed}");
    let gen = get_sample_generator(config, seed);

    let progress = ProgressBar::new(config.dims.z as u64);
    progress.set_style(
        ProgressStyle::default_bar().template("{elapsed_precise} [{bar:40}] {pos}/{len} slices"),
    );
    let buffer = generate_buffer(gen.as_ref(), config.dims, &progress);
    progress.finish();

    write_volume(&config.file_name, &buffer)?;
    Ok(config.file_name.clone())
}
