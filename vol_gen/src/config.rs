use std::{path::PathBuf, str::FromStr};

use clap::ArgMatches;
use nalgebra::{vector, Vector3};
use volren_lib::volumetric::parse::raw_file_name;

/// Side of shapes if not given
const DEFAULT_OBJECT_SIZE: u32 = 16;
/// Sample of shapes if not given
const DEFAULT_SAMPLE: u8 = 200;

/// Transform `Values` into `Vector`
fn values_to_vector3<T>(args: &ArgMatches, key: &str) -> Result<Vector3<T>, String>
where
    T: FromStr + Copy,
{
    let vals: Vec<T> = args
        .values_of(key)
        .ok_or_else(|| format!("Missing argument {key}"))?
        .map(|v| v.parse::<T>().map_err(|_| format!("Bad value '{v}' of {key}")))
        .collect::<Result<_, _>>()?;
    match vals[..] {
        [x, y, z] => Ok(vector![x, y, z]),
        _ => Err(format!("Expected 3 values of {key}")),
    }
}

fn parse_opt<T: FromStr>(args: &ArgMatches, key: &str) -> Result<Option<T>, String> {
    args.value_of(key)
        .map(|v| v.parse::<T>().map_err(|_| format!("Bad value '{v}' of {key}")))
        .transpose()
}

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug)]
pub struct Config {
    /// Dimensions of volume
    pub dims: Vector3<u32>,
    /// Type of generator to be used
    pub generator: GeneratorConfig,
    /// Output file, named `<name>_<X>_<Y>_<Z>.raw`
    pub file_name: PathBuf,
    /// Optional seed for RNG, to replicate results
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_args(args: &ArgMatches) -> Result<Config, String> {
        // Dims
        let dims = values_to_vector3(args, "dims")?;
        // Generator
        let generator = GeneratorConfig::from_args(args)?;

        if let GeneratorConfig::Shapes { obj_size, .. } = generator {
            if dims.iter().any(|&d| d < obj_size) {
                return Err(format!("object-size {obj_size} does not fit into volume"));
            }
        }

        // File name
        let name = args
            .value_of("name")
            .unwrap_or_else(|| generator.name())
            .to_string();
        let mut file_name: PathBuf = args
            .value_of_os("output-dir")
            .map(Into::into)
            .unwrap_or_else(|| ".".into());
        file_name.push(raw_file_name(&name, dims.cast::<usize>()));

        let seed = parse_opt(args, "seed")?;

        Ok(Config {
            dims,
            generator,
            file_name,
            seed,
        })
    }
}

/// Settings specific to generator variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorConfig {
    /// Randomly placed spheres and cuboids
    Shapes {
        n_of_shapes: usize,
        sample: u8,
        obj_size: u32,
    },
    /// Uniform random bytes
    Noise,
    /// All samples have the same value
    Solid { sample: u8 },
    /// Ball with density falling off from the center
    Sphere,
}

impl GeneratorConfig {
    pub fn from_args(args: &ArgMatches) -> Result<GeneratorConfig, String> {
        let s = args.value_of("generator").ok_or("Missing generator")?;

        let sample: Option<u8> = parse_opt(args, "sample")?;

        let config = match s {
            "shapes" => GeneratorConfig::Shapes {
                n_of_shapes: parse_opt(args, "n-of-shapes")?.unwrap_or(1),
                sample: sample.unwrap_or(DEFAULT_SAMPLE),
                obj_size: parse_opt(args, "object-size")?.unwrap_or(DEFAULT_OBJECT_SIZE),
            },
            "noise" => GeneratorConfig::Noise,
            "solid" => GeneratorConfig::Solid {
                sample: sample.unwrap_or(DEFAULT_SAMPLE),
            },
            "sphere" => GeneratorConfig::Sphere,
            other => return Err(format!("Unknown generator '{other}'")),
        };
        Ok(config)
    }

    /// Default volume name
    pub fn name(&self) -> &'static str {
        match self {
            GeneratorConfig::Shapes { .. } => "shapes",
            GeneratorConfig::Noise => "noise",
            GeneratorConfig::Solid { .. } => "solid",
            GeneratorConfig::Sphere => "sphere",
        }
    }
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use super::*;
    use crate::args::get_command;

    fn config(args: &[&str]) -> Result<Config, String> {
        let matches = get_command()
            .try_get_matches_from(args)
            .map_err(|e| e.to_string())?;
        Config::from_args(&matches)
    }

    #[test]
    fn solid_config() {
        let c = config(&["vol_gen", "--dims=4,5,6", "-g", "solid", "--sample=7"]).unwrap();
        assert_eq!(c.dims, vector![4, 5, 6]);
        assert_eq!(c.generator, GeneratorConfig::Solid { sample: 7 });
        assert_eq!(c.file_name, Path::new(".").join("solid_4_5_6.raw"));
        assert_eq!(c.seed, None);
    }

    #[test]
    fn shapes_config() {
        let c = config(&[
            "vol_gen",
            "--dims=64,64,64",
            "--generator=shapes",
            "--n-of-shapes=5",
            "--object-size=8",
            "--seed=42",
            "--name=blobs",
            "-o",
            "out",
        ])
        .unwrap();
        assert_eq!(
            c.generator,
            GeneratorConfig::Shapes {
                n_of_shapes: 5,
                sample: DEFAULT_SAMPLE,
                obj_size: 8
            }
        );
        assert_eq!(c.seed, Some(42));
        assert_eq!(c.file_name, Path::new("out").join("blobs_64_64_64.raw"));
    }

    #[test]
    fn missing_required_values() {
        // solid requires sample
        assert!(config(&["vol_gen", "--dims=4,4,4", "-g", "solid"]).is_err());
        assert!(config(&["vol_gen", "-g", "noise"]).is_err());
        assert!(config(&["vol_gen", "--dims=4,4,4", "-g", "cubes"]).is_err());
    }

    #[test]
    fn objects_must_fit() {
        let res = config(&[
            "vol_gen",
            "--dims=8,8,8",
            "-g",
            "shapes",
            "--n-of-shapes=2",
            "--object-size=9",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn seed_takes_full_u64() {
        let c = config(&["vol_gen", "--dims=4,4,4", "-g", "noise", "--seed=0"]).unwrap();
        assert_eq!(c.seed, Some(0));

        let c = config(&["vol_gen", "--dims=4,4,4", "-g", "noise", "--seed=18446744073709551615"])
            .unwrap();
        assert_eq!(c.seed, Some(u64::MAX));

        assert!(config(&["vol_gen", "--dims=4,4,4", "-g", "noise", "--seed=-1"]).is_err());
    }

    #[test]
    fn sample_range() {
        assert!(config(&["vol_gen", "--dims=4,4,4", "-g", "solid", "--sample=256"]).is_err());
        assert!(config(&["vol_gen", "--dims=4,4,4", "-g", "solid", "--sample=0"]).is_err());
    }
}
