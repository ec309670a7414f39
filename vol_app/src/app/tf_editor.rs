//! Transfer function editor
//!
//! Keeps the edited table and draws the editor panel:
//! log-scaled histogram of the volume with the four channel curves over it.

use volren_lib::{
    transfer_function::TF_ENTRIES,
    volumetric::{Histogram, HISTOGRAM_BINS},
    Channel, TransferFunction,
};

use super::defaults::{EDITOR_HEIGHT, EDITOR_WIDTH};

// Bins are scaled by log(1 + LOG_SCALE * bin / max)
const LOG_SCALE: f32 = 1000.0;

const BACKGROUND: [u8; 3] = [24, 24, 24];
const HISTOGRAM_COLOR: [u8; 3] = [80, 80, 80];

fn channel_color(channel: Channel) -> [u8; 3] {
    match channel {
        Channel::Red => [230, 50, 50],
        Channel::Green => [50, 210, 50],
        Channel::Blue => [70, 110, 255],
        Channel::Alpha => [240, 240, 240],
    }
}

pub struct TfEditor {
    tf: TransferFunction,
    channel: Channel,
    histogram: Vec<f32>,
    last_point: Option<(usize, f32)>,
    changed: bool,
}

impl TfEditor {
    pub fn new(histogram: &Histogram) -> TfEditor {
        TfEditor {
            tf: TransferFunction::default(),
            channel: Channel::Alpha,
            histogram: log_scaled(histogram),
            last_point: None,
            changed: false,
        }
    }

    pub fn get_tf(&self) -> &TransferFunction {
        &self.tf
    }

    pub fn get_channel(&self) -> Channel {
        self.channel
    }

    pub fn select_channel(&mut self, channel: Channel) {
        self.channel = channel;
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Table to upload if it was edited since last call
    pub fn take_changed(&mut self) -> Option<TransferFunction> {
        if self.changed {
            self.changed = false;
            Some(self.tf.clone())
        } else {
            None
        }
    }

    /// Reset table to the default ramp
    pub fn reset(&mut self) {
        self.tf.reset();
        self.changed = true;
    }

    /// Start of a stroke, coordinates normalized to `<0;1>`
    pub fn press(&mut self, x: f32, y: f32) {
        let point = point_from_coords(x, y);
        self.tf.set(point.0, self.channel, point.1);
        self.last_point = Some(point);
        self.changed = true;
    }

    /// Continue the stroke, joins the point with the previous one
    pub fn drag(&mut self, x: f32, y: f32) {
        let last = match self.last_point {
            Some(p) => p,
            None => return,
        };
        let point = point_from_coords(x, y);
        self.tf.paint_line(self.channel, last, point);
        self.last_point = Some(point);
        self.changed = true;
    }

    pub fn release(&mut self) {
        self.last_point = None;
    }

    /// Draw panel as RGB image of `EDITOR_WIDTH x EDITOR_HEIGHT`
    pub fn draw(&self) -> Vec<u8> {
        let (w, h) = (EDITOR_WIDTH as usize, EDITOR_HEIGHT as usize);
        let mut image = Canvas::new(w, h);

        for x in 0..w {
            let bin = x * HISTOGRAM_BINS / w;
            let bar = (self.histogram[bin] * (h - 1) as f32).round() as usize;
            image.vline(x, h - 1 - bar, h - 1, HISTOGRAM_COLOR);
        }

        // Selected channel on top
        let order = Channel::ALL
            .iter()
            .copied()
            .filter(|&c| c != self.channel)
            .chain(std::iter::once(self.channel));

        for channel in order {
            let color = channel_color(channel);
            let mut prev_y: Option<usize> = None;
            for x in 0..w {
                let index = x * TF_ENTRIES / w;
                let y = value_to_row(self.tf.get(index, channel), h);
                let from = prev_y.unwrap_or(y);
                image.vline(x, from.min(y), from.max(y), color);
                prev_y = Some(y);
            }
        }

        image.into_inner()
    }
}

/// Table index and value of a point in the editor
///
/// `x` grows right, `y` grows down.
pub fn point_from_coords(x: f32, y: f32) -> (usize, f32) {
    let index = (x * TF_ENTRIES as f32).floor();
    let index = index.clamp(0.0, (TF_ENTRIES - 1) as f32) as usize;
    let value = (1.0 - y).clamp(0.0, 1.0);
    (index, value)
}

fn value_to_row(value: f32, height: usize) -> usize {
    ((1.0 - value) * (height - 1) as f32).round() as usize
}

fn log_scaled(histogram: &Histogram) -> Vec<f32> {
    let max = histogram.max_bin();
    if max <= 0.0 {
        return vec![0.0; HISTOGRAM_BINS];
    }
    let norm = (1.0 + LOG_SCALE).ln();
    histogram
        .bins()
        .iter()
        .map(|&b| (1.0 + LOG_SCALE * b / max).ln() / norm)
        .collect()
}

// RGB image
struct Canvas {
    width: usize,
    data: Vec<u8>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Canvas {
        let data = BACKGROUND
            .iter()
            .copied()
            .cycle()
            .take(width * height * 3)
            .collect();
        Canvas { width, data }
    }

    // Inclusive
    fn vline(&mut self, x: usize, y_from: usize, y_to: usize, color: [u8; 3]) {
        for y in y_from..=y_to {
            let i = (x + y * self.width) * 3;
            if let Some(px) = self.data.get_mut(i..i + 3) {
                px.copy_from_slice(&color);
            }
        }
    }

    fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn editor() -> TfEditor {
        let samples: Vec<u8> = (0..=255).chain(std::iter::repeat(0).take(1000)).collect();
        TfEditor::new(&Histogram::from_samples(&samples))
    }

    fn pixel(image: &[u8], x: usize, y: usize) -> [u8; 3] {
        let i = (x + y * EDITOR_WIDTH as usize) * 3;
        [image[i], image[i + 1], image[i + 2]]
    }

    #[test]
    fn coordinates_mapping() {
        assert_eq!(point_from_coords(0.0, 0.0), (0, 1.0));
        assert_eq!(point_from_coords(0.5, 0.75), (128, 0.25));
        assert_eq!(point_from_coords(1.0, 1.0), (255, 0.0));
        assert_eq!(point_from_coords(-0.2, 1.5), (0, 0.0));
        assert_eq!(point_from_coords(3.0, -1.0), (255, 1.0));
    }

    #[test]
    fn press_sets_one_entry() {
        let mut ed = editor();
        ed.select_channel(Channel::Red);
        ed.press(10.5 / 256.0, 1.0);

        assert_eq!(ed.get_tf().get(10, Channel::Red), 0.0);
        assert_eq!(ed.get_tf().get(10, Channel::Green), 10.0 / 255.0);
        assert_eq!(ed.get_tf().get(11, Channel::Red), 11.0 / 255.0);
        assert!(ed.is_changed());
    }

    #[test]
    fn drag_paints_line() {
        let mut ed = editor();
        ed.select_channel(Channel::Alpha);
        ed.press(0.0, 0.0);
        ed.drag(100.5 / 256.0, 1.0);

        let tf = ed.get_tf();
        assert_eq!(tf.get(0, Channel::Alpha), 1.0);
        assert!((tf.get(50, Channel::Alpha) - 0.5).abs() < 1e-6);
        assert_eq!(tf.get(100, Channel::Alpha), 0.0);
        assert_eq!(tf.get(101, Channel::Alpha), 101.0 / 255.0);
    }

    #[test]
    fn drag_without_press_is_ignored() {
        let mut ed = editor();
        ed.drag(0.5, 0.5);
        assert!(!ed.is_changed());

        ed.press(0.5, 0.5);
        ed.release();
        let before = ed.get_tf().clone();
        ed.drag(0.9, 0.0);
        assert_eq!(ed.get_tf(), &before);
    }

    #[test]
    fn take_changed_clears_flag() {
        let mut ed = editor();
        assert!(ed.take_changed().is_none());

        ed.press(0.5, 0.0);
        let tf = ed.take_changed().unwrap();
        assert_eq!(tf.get(128, Channel::Alpha), 1.0);
        assert!(!ed.is_changed());
        assert!(ed.take_changed().is_none());
    }

    #[test]
    fn reset_restores_ramp() {
        let mut ed = editor();
        ed.press(0.5, 1.0);
        ed.take_changed();

        ed.reset();
        assert!(ed.is_changed());
        assert_eq!(ed.get_tf(), &TransferFunction::default());
    }

    #[test]
    fn histogram_log_scale() {
        let ed = editor();
        assert!((ed.histogram[0] - 1.0).abs() < 1e-6);
        assert!(ed.histogram[1] > 0.0);
        assert!(ed.histogram[1] < 1.0);

        let empty = log_scaled(&Histogram::from_samples(&[]));
        assert!(empty.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn draw_panel() {
        let mut ed = editor();
        let image = ed.draw();
        assert_eq!(image.len(), (EDITOR_WIDTH * EDITOR_HEIGHT * 3) as usize);

        // ramp starts in the lower left corner, selected alpha is drawn on top
        let bottom = EDITOR_HEIGHT as usize - 1;
        assert_eq!(pixel(&image, 0, bottom), channel_color(Channel::Alpha));

        ed.select_channel(Channel::Red);
        let image = ed.draw();
        assert_eq!(pixel(&image, 0, bottom), channel_color(Channel::Red));

        // top right is above the ramp and the histogram
        let right = EDITOR_WIDTH as usize - 1;
        assert_eq!(pixel(&image, right, 0), channel_color(Channel::Red));
        assert_eq!(pixel(&image, right / 2, 0), BACKGROUND);
    }
}
