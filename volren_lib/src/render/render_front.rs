use std::{sync::Arc, thread::JoinHandle, time::Instant};

use crossbeam::channel::{Receiver, Sender};
use log::{debug, error, info};
use parking_lot::Mutex;

use crate::TransferFunction;

use super::{Renderer, Uniforms};

/// Messages to renderer
///
/// Messages queue up and one is read after frame is done
pub enum RendererMessage {
    /// Render a frame with given parameters
    StartRendering(Uniforms),
    /// Replace transfer function, used from the next frame on
    UploadTransferFunction(Box<TransferFunction>),
    /// Shut down, thread will get ready to be joined
    ShutDown,
}

/// Renderer running in its own thread
///
/// Frames are written to the shared buffer, every finished
/// frame is announced with a message.
struct RenderThread {
    renderer: Renderer,
    shared_buffer: Arc<Mutex<Vec<u8>>>,
    communication: (Sender<()>, Receiver<RendererMessage>),
}

impl RenderThread {
    fn new(renderer: Renderer, communication: (Sender<()>, Receiver<RendererMessage>)) -> Self {
        let buffer = Arc::new(Mutex::new(vec![0; renderer.buffer_len()]));
        Self {
            renderer,
            shared_buffer: buffer,
            communication,
        }
    }

    fn get_shared_buffer(&self) -> Arc<Mutex<Vec<u8>>> {
        self.shared_buffer.clone()
    }

    // Spawn thread, waits for messages and does not start rendering on its own
    fn start(mut self) -> JoinHandle<()> {
        std::thread::spawn(move || {
            info!("Render thread started");
            // Master loop
            while let Ok(msg) = self.communication.1.recv() {
                match msg {
                    RendererMessage::StartRendering(uniforms) => {
                        let start = Instant::now();
                        {
                            let mut buffer = self.shared_buffer.lock();
                            self.renderer.render(&uniforms, &mut buffer[..]);
                        }
                        debug!("Frame rendered in {} ms", start.elapsed().as_millis());

                        if self.communication.0.send(()).is_err() {
                            break;
                        }
                    }
                    RendererMessage::UploadTransferFunction(tf) => {
                        self.renderer.upload_transfer_function(*tf);
                    }
                    RendererMessage::ShutDown => break,
                }
            }
            info!("Render thread finished");
        })
    }
}

/// Communicating with renderer
///
/// Can be active or inactive.
pub struct RendererFront {
    handle: Option<JoinHandle<()>>,
    buffer: Option<Arc<Mutex<Vec<u8>>>>,
    communication_in: (Sender<RendererMessage>, Receiver<RendererMessage>),
    communication_out: (Sender<()>, Receiver<()>),
}

impl RendererFront {
    /// Create inactive front
    pub fn new() -> Self {
        let communication_in = crossbeam::channel::bounded(100); // main -> renderer
        let communication_out = crossbeam::channel::bounded(100); // renderer -> main
        Self {
            handle: None,
            buffer: None,
            communication_in,
            communication_out,
        }
    }

    /// Send message to renderer
    pub fn send_message(&self, msg: RendererMessage) {
        if self.communication_in.0.send(msg).is_err() {
            error!("Renderer channel closed");
        }
    }

    /// Getter for message receiver
    ///
    /// The only message means new frame is ready and shared buffer can be obtained.
    pub fn get_receiver(&self) -> Receiver<()> {
        self.communication_out.1.clone()
    }

    /// Receive message from renderer
    ///
    /// Blocking call, `false` if the renderer is gone
    pub fn receive_message(&self) -> bool {
        self.communication_out.1.recv().is_ok()
    }

    /// Getter for shared framebuffer
    /// If front is inactive, return `None`
    pub fn get_buffer_handle(&self) -> Option<Arc<Mutex<Vec<u8>>>> {
        self.buffer.as_ref().cloned()
    }

    /// Borrow buffer handle
    /// Avoids incrementing atomic reference counter
    /// Otherwise equivalent to `get_buffer_handle`
    pub fn get_buffer_handle_borrow(&self) -> Option<&Arc<Mutex<Vec<u8>>>> {
        self.buffer.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Start `renderer` in a new thread
    ///
    /// Front goes into active state.
    /// If front was already active, previous renderer gets shutdown first.
    pub fn start_rendering(&mut self, renderer: Renderer) {
        if self.handle.is_some() {
            info!("Shutting down current renderer");
            self.send_message(RendererMessage::ShutDown);
            self.finish();
        }

        let communication = (
            self.communication_out.0.clone(),
            self.communication_in.1.clone(),
        );
        let thread = RenderThread::new(renderer, communication);
        let buffer = thread.get_shared_buffer();
        let handle = thread.start(); // start thread but wait for StartRendering message
        self.buffer = Some(buffer);
        self.handle = Some(handle);
    }

    /// Sync thread with parent
    ///
    /// `ShutDown` message must be sent first separately.
    /// Call is blocking until thread is joined.
    /// Front goes into inactive state.
    pub fn finish(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Render thread panicked");
            }
            self.buffer = None;
        }
    }
}

impl Default for RendererFront {
    fn default() -> Self {
        Self::new()
    }
}
