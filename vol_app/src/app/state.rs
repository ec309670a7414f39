use std::{cell::RefCell, rc::Rc, sync::Arc};

use crossbeam_channel::Receiver;
use log::{info, warn};
use nalgebra::Vector2;
use parking_lot::Mutex;
use slint::{Image, Rgb8Pixel, SharedPixelBuffer, Weak};
use volren_lib::{volumetric::Volume, Channel};

use super::{
    defaults::{EDITOR_HEIGHT, EDITOR_WIDTH},
    input::{self, MouseButton, MouseState},
    tf_editor::TfEditor,
    RenderState, StateRef,
};

use crate::{config::Config, App};

/// Application state
pub struct State {
    rendering: RenderState,
    // GUI
    app: Weak<App>,
    mouse: MouseState,
    tf_editor: TfEditor,
}

impl State {
    /// Initial state, renderer is not running yet
    ///
    /// # Params
    ///
    /// * app - reference to GUI, see `App::as_weak`
    /// * volume - volume to display
    /// * config - command line configuration
    pub fn new(app: Weak<App>, volume: &Volume, config: &Config) -> State {
        State {
            rendering: RenderState::new(config.render_options()),
            app,
            mouse: MouseState::new(),
            tf_editor: TfEditor::new(volume.get_histogram()),
        }
    }

    pub fn new_shared(app: Weak<App>, volume: &Volume, config: &Config) -> StateRef {
        let state = State::new(app, volume, config);
        StateRef::new(Rc::new(RefCell::new(state)))
    }

    /// Get handle to GUI
    ///
    /// `None` if the window is gone or if called from a thread different than main thread
    pub fn get_app(&self) -> Option<App> {
        self.app.upgrade()
    }

    /// Get handle to shared buffer
    ///
    /// Returns reference, to avoid atomic operation.
    pub fn get_buffer_handle(&self) -> Option<&Arc<Mutex<Vec<u8>>>> {
        self.rendering.renderer_front.get_buffer_handle_borrow()
    }

    pub fn get_renderer_receiver(&self) -> Receiver<()> {
        self.rendering.renderer_front.get_receiver()
    }

    pub fn get_resolution(&self) -> Vector2<u16> {
        self.rendering.render_options.resolution
    }

    /// Start render thread and request the first frame
    pub fn initial_render_call(&mut self, volume: Volume) {
        self.rendering.start_renderer(volume);
        self.request_redraw();
    }

    pub fn request_redraw(&mut self) {
        self.rendering.request_redraw(&mut self.tf_editor);
    }

    pub fn handle_mouse_press(&mut self, button: i32, x: f32, y: f32) {
        self.mouse
            .press(MouseButton::from_gui_int(button), input::position(x, y));
        self.request_redraw();
    }

    pub fn handle_mouse_release(&mut self) {
        self.mouse.release();
        self.request_redraw();
    }

    /// Rotate or zoom based on held button
    pub fn handle_mouse_pos(&mut self, x: f32, y: f32) {
        self.mouse
            .drag(input::position(x, y), &mut self.rendering.uniforms);
        self.sync_state_with_gui();
        self.request_redraw();
    }

    /// Handle keyboard presses
    pub fn handle_key_press(&mut self, ch: char) {
        input::handle_key(ch, &mut self.rendering.uniforms);
        self.sync_state_with_gui();
        self.request_redraw();
    }

    pub fn handle_tf_press(&mut self, x: f32, y: f32) {
        self.tf_editor.press(x, y);
        self.update_tf_editor();
        self.request_redraw();
    }

    pub fn handle_tf_drag(&mut self, x: f32, y: f32) {
        self.tf_editor.drag(x, y);
        self.update_tf_editor();
        self.request_redraw();
    }

    pub fn handle_tf_release(&mut self) {
        self.tf_editor.release();
    }

    pub fn handle_channel_selected(&mut self, index: i32) {
        let channel = match usize::try_from(index).ok().and_then(Channel::from_index) {
            Some(channel) => channel,
            None => {
                warn!("Unknown channel index {index}");
                return;
            }
        };
        self.tf_editor.select_channel(channel);
        self.update_tf_editor();
    }

    pub fn handle_tf_reset(&mut self) {
        info!("Transfer function reset");
        self.tf_editor.reset();
        self.update_tf_editor();
        self.request_redraw();
    }

    /// Copy rendered frame to GUI
    pub fn display_frame(&self) {
        let (app, shared_buffer) = match (self.get_app(), self.get_buffer_handle()) {
            (Some(app), Some(buffer)) => (app, buffer),
            _ => return,
        };

        let pixel_buffer = {
            let resolution = self.get_resolution();
            let lock = shared_buffer.lock();
            SharedPixelBuffer::<Rgb8Pixel>::clone_from_slice(
                lock.as_slice(),
                resolution.x as u32,
                resolution.y as u32,
            )
            // mutex drop
        };

        app.set_render_target(Image::from_rgb8(pixel_buffer));
    }

    /// Called after receiving a rendered frame
    pub fn handle_rendering_finished(&mut self) {
        let elapsed = self.rendering.handle_rendering_finished(&mut self.tf_editor);
        if let Some(app) = self.get_app() {
            app.set_frame_time(elapsed.as_millis().try_into().unwrap_or(i32::MAX));
        }
    }

    /// Redraw editor panel
    pub fn update_tf_editor(&self) {
        let app = match self.get_app() {
            Some(app) => app,
            None => return,
        };
        let image = self.tf_editor.draw();
        let pixel_buffer =
            SharedPixelBuffer::<Rgb8Pixel>::clone_from_slice(&image, EDITOR_WIDTH, EDITOR_HEIGHT);
        app.set_tf_editor_image(Image::from_rgb8(pixel_buffer));
        app.set_selected_channel(self.tf_editor.get_channel().index() as i32);
    }

    pub fn sync_state_with_gui(&self) {
        if let Some(app) = self.get_app() {
            app.set_status_text(input::describe(&self.rendering.uniforms).into());
        }
    }

    /// Shutdown renderer
    /// Blocks until thread is joined
    pub fn shutdown_renderer(&mut self) {
        self.rendering.shutdown();
    }
}
