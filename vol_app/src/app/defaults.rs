//! # Default values
//!
//! Used as initial values, most can be overridden from the command line.

use nalgebra::{vector, Vector2, Vector3};

// Render resolution
pub const RENDER_WIDTH: u16 = 600;
pub const RENDER_HEIGHT: u16 = 600;
pub const RENDER_RESOLUTION: Vector2<u16> = vector![RENDER_WIDTH, RENDER_HEIGHT];

// Volume
pub const VOLUME_PATH: &str = "volumes/CThead_512_512_452.raw";
/// Used when the file name carries no dimensions
pub const VOLUME_DIMS: Vector3<usize> = vector![512, 512, 452];

pub const MULTI_THREAD: bool = true;
pub const ERT: bool = true;

// Mouse sensitivity, per pixel of drag
pub const ROTATION_SPEED: f32 = 0.1;
pub const ZOOM_SPEED: f32 = 0.1;

// Transfer function editor image
pub const EDITOR_WIDTH: u32 = 512;
pub const EDITOR_HEIGHT: u32 = 200;
