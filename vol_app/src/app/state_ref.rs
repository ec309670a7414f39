use std::{cell::RefCell, rc::Rc};

use volren_lib::volumetric::Volume;

use crate::app::State;

use crate::App;

/// Shared counted reference to `State`
///
/// Every callback needs a reference to state.
#[derive(Clone)]
pub struct StateRef(Rc<RefCell<State>>);

impl std::ops::Deref for StateRef {
    type Target = Rc<RefCell<State>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl StateRef {
    /// Wrap reference in Newtype
    pub fn new(inner: Rc<RefCell<State>>) -> StateRef {
        StateRef(inner)
    }

    /// Start renderer and request first frame
    pub fn initial_render_call(&mut self, volume: Volume) {
        self.borrow_mut().initial_render_call(volume);
    }

    /// Shuts down renderer
    ///
    /// Finishing function.
    /// Blocks until render thread is joined
    pub fn shutdown_renderer(&mut self) {
        self.borrow_mut().shutdown_renderer()
    }

    /// Register all callbacks from GUI
    ///
    /// # Params
    /// * `app` - reference to GUI
    pub fn register_callbacks(&mut self, app: &App) {
        // Callback
        // Invoked when new frame is rendered
        let state_clone = self.clone();
        app.on_new_rendered_frame(move || {
            let mut state = state_clone.borrow_mut();
            state.display_frame();
            state.handle_rendering_finished();
        });

        // Callback
        // React to mouse move in render area
        let state_clone = self.clone();
        app.on_render_area_moved(move |x, y| {
            state_clone.borrow_mut().handle_mouse_pos(x, y);
        });

        // Callback
        // React to mouse button in render area
        let state_clone = self.clone();
        app.on_render_area_pressed(move |button, x, y| {
            state_clone.borrow_mut().handle_mouse_press(button, x, y);
        });

        let state_clone = self.clone();
        app.on_render_area_released(move || {
            state_clone.borrow_mut().handle_mouse_release();
        });

        // Callback
        // React to keyboard event
        let state_clone = self.clone();
        app.on_key_typed(move |text| {
            if let Some(ch) = text.as_str().chars().next() {
                state_clone.borrow_mut().handle_key_press(ch);
            }
        });

        // Transfer function editor

        let state_clone = self.clone();
        app.on_tf_editor_pressed(move |x, y| state_clone.borrow_mut().handle_tf_press(x, y));

        let state_clone = self.clone();
        app.on_tf_editor_dragged(move |x, y| state_clone.borrow_mut().handle_tf_drag(x, y));

        let state_clone = self.clone();
        app.on_tf_editor_released(move || state_clone.borrow_mut().handle_tf_release());

        let state_clone = self.clone();
        app.on_channel_selected(move |index| {
            state_clone.borrow_mut().handle_channel_selected(index)
        });

        let state_clone = self.clone();
        app.on_tf_reset(move || state_clone.borrow_mut().handle_tf_reset());
    }

    /// Push current state to GUI
    pub fn sync_state_with_gui(&self) {
        let state = self.borrow();
        state.sync_state_with_gui();
        state.update_tf_editor();
    }
}
