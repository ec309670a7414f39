//! Volume rendering app
//!
//! Launch with a raw volume, for example:
//! `cargo run --release --bin vol_app -- volumes/CThead_512_512_452.raw`
//!
//! Left mouse drag rotates the volume, right drag zooms.
//! Keys `0`, `1`, `2` pick MIP, alpha blending or iso-surface,
//! `+` and `-` change the iso value.

use crossbeam_channel::{select, Receiver, Sender};
use log::{debug, error, info};

// GUI bindings
slint::include_modules!();

mod app;
mod config;
use app::State;
use config::Config;

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = config::get_command().get_matches();
    let config = Config::from_args(&matches);

    let volume = match volren_lib::volumetric::from_file(&config.file, Some(config.dims)) {
        Ok(volume) => volume,
        Err(e) => {
            error!("Cannot load volume {}: {e}", config.file.display());
            std::process::exit(1);
        }
    };
    debug!("{:?}", volume);

    // GUI App object and handles
    let app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            error!("Cannot create window: {e}");
            std::process::exit(1);
        }
    };
    let app_weak = app.as_weak();
    let app_poll = app_weak.clone();

    // State
    // Wrapped for access in closures
    let mut state = State::new_shared(app_weak, &volume, &config);

    state.sync_state_with_gui();

    // Start thread listening for messages from renderer
    let (shutdown_send, shutdown_recv): (Sender<_>, Receiver<()>) = crossbeam_channel::bounded(2);
    let render_msg_recv_thread = {
        let render_recv = state.borrow().get_renderer_receiver();
        std::thread::spawn(move || loop {
            select! {
                recv(shutdown_recv) -> _ => return,
                recv(render_recv) -> msg => {
                    if msg.is_err() {
                        return;
                    }
                }
            }

            let a = app_poll.clone();
            let res = slint::invoke_from_event_loop(move || {
                if let Some(app) = a.upgrade() {
                    app.invoke_new_rendered_frame();
                }
            });
            if res.is_err() {
                return;
            }
        })
    };

    //
    // Registering callbacks
    //

    state.register_callbacks(&app);

    state.initial_render_call(volume);

    // Run app, main event loop
    if let Err(e) = app.run() {
        error!("Event loop failed: {e}");
    }

    // Shutdown
    info!("App shutting down");
    state.shutdown_renderer();

    // Receiver thread may be gone already
    let _ = shutdown_send.send(());
    if render_msg_recv_thread.join().is_err() {
        error!("Frame listener thread panicked");
    }
}
