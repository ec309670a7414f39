//! Command line arguments
//! Uses library `clap`

use std::{path::PathBuf, str::FromStr};

use clap::{Arg, ArgMatches, Command, ValueHint};
use nalgebra::{vector, Vector2, Vector3};
use volren_lib::{
    render::{RenderOptions, MIN_SAMPLE_STEP},
    volumetric::parse,
};

use crate::app::defaults;

fn is_positive_number(num: &str) -> Result<(), String> {
    match num.parse::<u32>() {
        Ok(n) if n > 0 => Ok(()),
        Ok(_) => Err("Number must be greater than 0".into()),
        Err(_) => Err("Number required".into()),
    }
}

fn fits_resolution(num: &str) -> Result<(), String> {
    match num.parse::<u16>() {
        Ok(n) if n > 0 => Ok(()),
        _ => Err("Resolution must be in range <1;65535>".into()),
    }
}

fn is_sample_step(num: &str) -> Result<(), String> {
    match num.parse::<f32>() {
        Ok(n) if n.is_finite() && n >= MIN_SAMPLE_STEP => Ok(()),
        Ok(_) => Err(format!("Step must be at least {MIN_SAMPLE_STEP}")),
        Err(_) => Err("Number required".into()),
    }
}

pub fn get_command<'a>() -> Command<'a> {
    Command::new("vol_app")
        .version("0.1.0")
        .about("Interactive volume renderer")
        .arg(
            Arg::new("file")
                .help("Raw volume, one byte per voxel")
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath)
                .default_value(defaults::VOLUME_PATH),
        )
        .arg(
            Arg::new("dims")
                .help("Dimensions of volume, read from file name if omitted")
                .long("dims")
                .short('d')
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("resolution")
                .help("Size of rendered image")
                .long("resolution")
                .short('r')
                .number_of_values(2)
                .value_names(&["W", "H"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .validator(fits_resolution),
        )
        .arg(
            Arg::new("step")
                .help("Distance between samples, longest side of volume has length 1")
                .long("step")
                .value_name("STEP")
                .validator(is_sample_step),
        )
        .arg(
            Arg::new("single-thread")
                .help("Render on one thread")
                .long("single-thread"),
        )
}

fn values<T>(args: &ArgMatches, key: &str) -> Option<Vec<T>>
where
    T: FromStr,
{
    // Validated by clap
    args.values_of(key)?
        .map(|v| v.parse::<T>().ok())
        .collect()
}

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub file: PathBuf,
    pub dims: Vector3<usize>,
    pub resolution: Vector2<u16>,
    pub step: Option<f32>,
    pub multi_thread: bool,
}

impl Config {
    pub fn from_args(args: &ArgMatches) -> Config {
        let file: PathBuf = args
            .value_of_os("file")
            .map(Into::into)
            .unwrap_or_else(|| defaults::VOLUME_PATH.into());

        let dims = match values::<usize>(args, "dims") {
            Some(v) => vector![v[0], v[1], v[2]],
            None => parse::dims_from_file_name(&file).unwrap_or(defaults::VOLUME_DIMS),
        };

        let resolution = match values::<u16>(args, "resolution") {
            Some(v) => vector![v[0], v[1]],
            None => defaults::RENDER_RESOLUTION,
        };

        let step = args.value_of("step").and_then(|s| s.parse().ok());
        let multi_thread = defaults::MULTI_THREAD && !args.is_present("single-thread");

        Config {
            file,
            dims,
            resolution,
            step,
            multi_thread,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        let builder = RenderOptions::builder()
            .resolution(self.resolution)
            .early_ray_termination(defaults::ERT)
            .multi_thread(self.multi_thread);
        match self.step {
            Some(step) => builder.sample_step(step).build_unchecked(),
            None => builder.build_unchecked(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn config(args: &[&str]) -> Config {
        let matches = get_command().try_get_matches_from(args).unwrap();
        Config::from_args(&matches)
    }

    #[test]
    fn defaults() {
        let c = config(&["vol_app"]);
        assert_eq!(c.file, PathBuf::from(defaults::VOLUME_PATH));
        assert_eq!(c.dims, vector![512, 512, 452]);
        assert_eq!(c.resolution, vector![600, 600]);
        assert_eq!(c.step, None);
        assert!(c.multi_thread);
    }

    #[test]
    fn dims_from_file_name() {
        let c = config(&["vol_app", "data/Bucky_32_32_32.raw"]);
        assert_eq!(c.dims, vector![32, 32, 32]);

        let c = config(&["vol_app", "data/head.raw"]);
        assert_eq!(c.dims, defaults::VOLUME_DIMS);
    }

    #[test]
    fn explicit_values() {
        let c = config(&[
            "vol_app",
            "head.raw",
            "--dims=10,20,30",
            "--resolution=320,240",
            "--step=0.005",
            "--single-thread",
        ]);
        assert_eq!(c.dims, vector![10, 20, 30]);
        assert_eq!(c.resolution, vector![320, 240]);
        assert_eq!(c.step, Some(0.005));
        assert!(!c.multi_thread);

        let opts = c.render_options();
        assert_eq!(opts.resolution, vector![320, 240]);
        assert_eq!(opts.sample_step, Some(0.005));
        assert!(!opts.multi_thread);
    }

    #[test]
    fn invalid_values_rejected() {
        let cmd = || get_command();
        assert!(cmd()
            .try_get_matches_from(["vol_app", "--dims=0,1,1"])
            .is_err());
        assert!(cmd()
            .try_get_matches_from(["vol_app", "--dims=1,1"])
            .is_err());
        assert!(cmd()
            .try_get_matches_from(["vol_app", "--resolution=70000,10"])
            .is_err());
        assert!(cmd()
            .try_get_matches_from(["vol_app", "--step=-1"])
            .is_err());
        assert!(cmd()
            .try_get_matches_from(["vol_app", "--step=1e-12"])
            .is_err());
        assert!(cmd()
            .try_get_matches_from(["vol_app", "--step=inf"])
            .is_err());
    }
}
