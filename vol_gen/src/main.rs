//! Raw volume generator
//!
//! Writes headerless volumes named `<name>_<X>_<Y>_<Z>.raw`, for example:
//! `cargo run --release --bin vol_gen -- --dims=128,128,128 -g sphere`

use log::{error, info};

mod args;
mod config;
mod file;
mod generators;

use crate::{args::get_command, config::Config, generators::generate_vol};

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = get_command().get_matches();

    let cfg = match Config::from_args(&args) {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            std::process::exit(2);
        }
    };

    info!("Generating volume...");
    info!("{:?}", cfg);

    match generate_vol(&cfg) {
        Ok(path) => info!("Generating finished, result in {}", path.display()),
        Err(e) => {
            error!("Generating failed: {e}");
            std::process::exit(1);
        }
    }
}
