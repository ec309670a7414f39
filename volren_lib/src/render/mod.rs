//! Rendering
//!
//! [`Renderer`] casts rays through the volume, one per pixel.
//! Per-frame parameters are passed as [`Uniforms`],
//! [`RendererFront`] runs the renderer in a separate thread.

mod render_front;
mod render_options;
mod renderer;
mod uniforms;

pub use render_front::{RendererFront, RendererMessage};
pub use render_options::{RenderOptions, RenderOptionsBuilder, MIN_SAMPLE_STEP};
pub use renderer::Renderer;
pub use uniforms::{RenderMode, Uniforms, ISO_STEP, MIN_ZOOM};
