//! App state and gui callbacks

pub mod defaults;
pub mod input;
mod render_state;
mod state;
mod state_ref;
pub mod tf_editor;
pub use render_state::RenderState;
pub use state::State;
pub use state_ref::StateRef;
