//! # volren_lib
//!
//! Ray-casting volume renderer for raw, headerless 8-bit voxel grids.
//!
//! The library covers the whole pipeline of the viewer:
//! loading the volume and its histogram ([`volumetric`]), the editable
//! [`TransferFunction`], the orbiting [`PerspectiveCamera`] and the
//! [`render::Renderer`] implementing maximum-intensity projection,
//! alpha blending and Phong-shaded iso-surfaces.
//!
//! [`render::RendererFront`] runs a renderer in its own thread.

pub mod camera;
pub mod color;
pub mod common;
mod error;
pub mod render;
pub mod test_helpers;
pub mod transfer_function;
pub mod volumetric;

pub use camera::PerspectiveCamera;
pub use error::{Error, Result};
pub use transfer_function::{Channel, TransferFunction};
