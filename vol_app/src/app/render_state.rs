use std::time::{Duration, Instant};

use log::{debug, info};
use volren_lib::{
    render::{RenderOptions, Renderer, RendererFront, RendererMessage, Uniforms},
    volumetric::Volume,
};

use super::tf_editor::TfEditor;

/// State of rendering
///
/// Owns the renderer thread and the parameters of the next frame.
/// At most one frame is in flight, requests made meanwhile
/// are merged into one frame rendered after the current one.
pub struct RenderState {
    pub renderer_front: RendererFront,
    pub render_options: RenderOptions,
    pub uniforms: Uniforms,
    pub is_rendering: bool,
    pub redraw_requested: bool,
    pub render_time: Instant,
}

impl RenderState {
    pub fn new(render_options: RenderOptions) -> Self {
        Self {
            renderer_front: RendererFront::new(),
            render_options,
            uniforms: Uniforms::default(),
            is_rendering: false,
            redraw_requested: false,
            render_time: Instant::now(),
        }
    }

    /// Spawn render thread with `volume`
    ///
    /// Does not render anything until requested.
    pub fn start_renderer(&mut self, volume: Volume) {
        info!(
            "Starting renderer, resolution {}x{}",
            self.render_options.resolution.x, self.render_options.resolution.y
        );
        let renderer = Renderer::new(volume, self.render_options);
        self.renderer_front.start_rendering(renderer);
        self.is_rendering = false;
        self.redraw_requested = false;
    }

    /// Render a new frame now, or after the current one is finished
    pub fn request_redraw(&mut self, tf_editor: &mut TfEditor) {
        if self.is_rendering {
            self.redraw_requested = true;
            return;
        }
        self.start_frame(tf_editor);
    }

    fn start_frame(&mut self, tf_editor: &mut TfEditor) {
        if let Some(tf) = tf_editor.take_changed() {
            debug!("Uploading transfer function");
            self.renderer_front
                .send_message(RendererMessage::UploadTransferFunction(Box::new(tf)));
        }
        self.renderer_front
            .send_message(RendererMessage::StartRendering(self.uniforms));
        self.is_rendering = true;
        self.redraw_requested = false;
        self.render_time = Instant::now();
    }

    /// Called after receiving a rendered frame, issues the deferred redraw
    ///
    /// Returns time since the frame was requested.
    pub fn handle_rendering_finished(&mut self, tf_editor: &mut TfEditor) -> Duration {
        let elapsed = self.render_time.elapsed();
        self.is_rendering = false;

        if self.redraw_requested {
            self.start_frame(tf_editor);
        }
        elapsed
    }

    /// Blocks until thread is joined
    pub fn shutdown(&mut self) {
        self.renderer_front.send_message(RendererMessage::ShutDown);
        self.renderer_front.finish();
    }
}

#[cfg(test)]
mod test {
    use nalgebra::vector;
    use volren_lib::{render::RenderMode, test_helpers::sphere_volume, Channel};

    use super::*;

    fn state() -> (RenderState, TfEditor) {
        let opts = RenderOptions::builder()
            .resolution(vector![8, 8])
            .multi_thread(false)
            .build()
            .unwrap();
        let volume = sphere_volume(6, 2.5);
        let editor = TfEditor::new(volume.get_histogram());
        let mut state = RenderState::new(opts);
        state.start_renderer(volume);
        (state, editor)
    }

    fn wait_frame(state: &mut RenderState, editor: &mut TfEditor) {
        assert!(state.renderer_front.receive_message());
        state.handle_rendering_finished(editor);
    }

    #[test]
    fn redraw_deferred_while_rendering() {
        let (mut state, mut editor) = state();

        state.request_redraw(&mut editor);
        assert!(state.is_rendering);
        assert!(!state.redraw_requested);

        // merged into one deferred frame
        state.request_redraw(&mut editor);
        state.request_redraw(&mut editor);
        assert!(state.redraw_requested);

        wait_frame(&mut state, &mut editor);
        assert!(state.is_rendering);
        assert!(!state.redraw_requested);

        wait_frame(&mut state, &mut editor);
        assert!(!state.is_rendering);

        state.shutdown();
    }

    #[test]
    fn edited_tf_uploaded_with_next_frame() {
        let (mut state, mut editor) = state();
        state.uniforms.method = RenderMode::AlphaBlending;

        state.request_redraw(&mut editor);
        wait_frame(&mut state, &mut editor);
        let lit = {
            let buffer = state.renderer_front.get_buffer_handle().unwrap();
            let lit = buffer.lock().iter().any(|&b| b > 0);
            lit
        };
        assert!(lit);

        // paint whole alpha channel to zero
        editor.select_channel(Channel::Alpha);
        editor.press(0.0, 1.0);
        editor.drag(1.0, 1.0);
        editor.release();
        assert!(editor.is_changed());

        state.request_redraw(&mut editor);
        assert!(!editor.is_changed());
        wait_frame(&mut state, &mut editor);

        let buffer = state.renderer_front.get_buffer_handle().unwrap();
        assert!(buffer.lock().iter().all(|&b| b == 0));

        state.shutdown();
    }
}
