//! Argument parsing and validation
//! Uses library `clap`

use std::ffi::OsStr;

use clap::{Arg, Command, ValueHint};

// up to 32bit value
pub fn is_positive_number(num: &str) -> Result<(), String> {
    let n = num.parse::<u32>();
    match n {
        Ok(n) => {
            if n > 0 {
                Ok(())
            } else {
                Err("Number must be greater than 0".into())
            }
        }
        Err(_) => Err("Number required".into()),
    }
}

pub fn can_fit_u8(num: &str) -> Result<(), String> {
    let n = num.parse::<u8>();
    match n {
        Ok(_) => Ok(()),
        Err(_) => Err("Number does not fit in range <0;255>".into()),
    }
}

pub fn is_seed(num: &str) -> Result<(), String> {
    match num.parse::<u64>() {
        Ok(_) => Ok(()),
        Err(_) => Err("Seed must be in range <0;2^64)".into()),
    }
}

pub const GENERATOR_NAMES: &[&str] = &["shapes", "noise", "solid", "sphere"];

pub fn get_command<'a>() -> Command<'a> {
    Command::new("vol_gen")
        .version("0.1.0")
        .about("Raw volume generator")
        .arg(
            Arg::new("dims")
                .help("Dimensions of volume")
                .long("dims")
                .short('d')
                .required(true)
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("generator")
                .help("Type of generator")
                .long("generator")
                .short('g')
                .required(true)
                .requires_ifs(&[
                    ("solid", "sample"), // if solid is set, require option sample
                    ("shapes", "n-of-shapes"),
                ])
                .takes_value(true)
                .value_name("NAME")
                .possible_values(GENERATOR_NAMES),
        )
        .arg(
            Arg::new("seed")
                .help("Seed for RNG, leave out for random seed")
                .long("seed")
                .value_name("SEED")
                .validator(is_seed),
        )
        .arg(
            Arg::new("sample")
                .help("Value of generated objects")
                .long("sample")
                .value_name("BYTE")
                .validator(|s| is_positive_number(s).and(can_fit_u8(s))),
        )
        .arg(
            Arg::new("object-size")
                .help("Side of generated shapes in voxels")
                .long("object-size")
                .value_name("SIDE")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("n-of-shapes")
                .help("Number of shapes generated in volume")
                .long("n-of-shapes")
                .value_name("N")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("name")
                .help("Name of volume, dimensions are appended to it")
                .long("name")
                .short('n')
                .value_name("NAME"),
        )
        .arg(
            Arg::new("output-dir")
                .help("Directory to write the volume to")
                .long("output-dir")
                .short('o')
                .value_name("DIR")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::DirPath)
                .default_value_os(OsStr::new(".")),
        )
}
