//! Keyboard and mouse handling
//!
//! Independent of GUI, events come already translated.

use log::info;
use nalgebra::{vector, Vector2};
use volren_lib::render::{RenderMode, Uniforms, ISO_STEP};

use super::defaults;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Other,
}

impl MouseButton {
    /// Button index as sent by GUI
    pub fn from_gui_int(value: i32) -> MouseButton {
        match value {
            0 => MouseButton::Left,
            1 => MouseButton::Right,
            _ => MouseButton::Other,
        }
    }
}

/// State of mouse in render area
#[derive(Debug, Default)]
pub struct MouseState {
    left_held: bool,
    right_held: bool,
    last: Vector2<f32>,
}

impl MouseState {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn left_held(&self) -> bool {
        self.left_held
    }

    pub fn right_held(&self) -> bool {
        self.right_held
    }

    /// Button pressed at `pos`
    ///
    /// Only the last pressed button counts as held.
    pub fn press(&mut self, button: MouseButton, pos: Vector2<f32>) {
        self.last = pos;
        self.left_held = false;
        self.right_held = false;
        match button {
            MouseButton::Left => self.left_held = true,
            MouseButton::Right => self.right_held = true,
            MouseButton::Other => (),
        }
    }

    /// Any button released
    pub fn release(&mut self) {
        self.left_held = false;
        self.right_held = false;
    }

    /// Mouse moved to `pos`, rotates or zooms depending on held button
    pub fn drag(&mut self, pos: Vector2<f32>, uniforms: &mut Uniforms) {
        let diff = pos - self.last;
        self.last = pos;

        if self.left_held {
            uniforms.xrot += defaults::ROTATION_SPEED * diff.y;
            uniforms.yrot += defaults::ROTATION_SPEED * diff.x;
        } else if self.right_held {
            uniforms.set_zoom(uniforms.zoom + defaults::ZOOM_SPEED * diff.y);
        }
    }
}

/// Handle keyboard press
///
/// `0`, `1`, `2` switch rendering method, `+` and `-` change iso value,
/// `p` prints view parameters.
pub fn handle_key(ch: char, uniforms: &mut Uniforms) {
    match ch {
        '0' => uniforms.method = RenderMode::Mip,
        '1' => uniforms.method = RenderMode::AlphaBlending,
        '2' => uniforms.method = RenderMode::IsoSurface,
        '+' => {
            uniforms.change_iso_value(ISO_STEP);
            info!("Iso value: {}", uniforms.iso_value);
        }
        '-' => {
            uniforms.change_iso_value(-ISO_STEP);
            info!("Iso value: {}", uniforms.iso_value);
        }
        'p' => info!("{}", describe(uniforms)),
        _ => (),
    }
}

/// One line summary of rendering parameters
pub fn describe(uniforms: &Uniforms) -> String {
    format!(
        "{} | iso {:.2} | rotation ({:.1}, {:.1}) | zoom {:.2}",
        uniforms.method.name(),
        uniforms.iso_value,
        uniforms.xrot,
        uniforms.yrot,
        uniforms.zoom
    )
}

pub fn position(x: f32, y: f32) -> Vector2<f32> {
    vector![x, y]
}
