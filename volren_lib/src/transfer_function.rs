//! Transfer function
//!
//! Maps normalized sample values to color and opacity.
//! Stored as a table of 256 RGBA entries, like a 1D texture
//! with nearest filtering.

use crate::color::{self, RGBA};

/// Number of entries in the table
pub const TF_ENTRIES: usize = 256;

/// Channel of transfer function entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];

    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Alpha => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Channel> {
        Channel::ALL.get(index).copied()
    }
}

/// Table of 256 RGBA entries, every value in range `<0;1>`
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    table: Vec<f32>,
}

impl TransferFunction {
    /// Linear ramp, entry `i` is `i/255` in all channels
    pub fn ramp() -> TransferFunction {
        let table = (0..TF_ENTRIES)
            .flat_map(|i| {
                let v = i as f32 / 255.0;
                [v, v, v, v]
            })
            .collect();
        TransferFunction { table }
    }

    /// Every entry transparent black
    pub fn transparent() -> TransferFunction {
        TransferFunction {
            table: vec![0.0; TF_ENTRIES * 4],
        }
    }

    pub fn reset(&mut self) {
        *self = TransferFunction::ramp();
    }

    /// Table index of normalized sample, clamped
    pub fn index_of(sample: f32) -> usize {
        let i = (sample * TF_ENTRIES as f32).floor();
        i.clamp(0.0, (TF_ENTRIES - 1) as f32) as usize
    }

    /// Nearest entry of normalized sample `<0;1>`
    pub fn lookup(&self, sample: f32) -> RGBA {
        self.entry(TransferFunction::index_of(sample))
    }

    /// Entry at `index`, transparent black if out of range
    pub fn entry(&self, index: usize) -> RGBA {
        if index >= TF_ENTRIES {
            return color::zero();
        }
        let e = &self.table[index * 4..index * 4 + 4];
        color::new(e[0], e[1], e[2], e[3])
    }

    pub fn get(&self, index: usize, channel: Channel) -> f32 {
        self.table
            .get(index * 4 + channel.index())
            .copied()
            .unwrap_or(0.0)
    }

    /// Set one value, clamped to `<0;1>`
    ///
    /// Indices out of range are ignored.
    pub fn set(&mut self, index: usize, channel: Channel, value: f32) {
        if index >= TF_ENTRIES {
            return;
        }
        self.table[index * 4 + channel.index()] = value.clamp(0.0, 1.0);
    }

    pub fn set_entry(&mut self, index: usize, rgba: RGBA) {
        for channel in Channel::ALL {
            self.set(index, channel, rgba[channel.index()]);
        }
    }

    /// Set all entries between two points of a channel, interpolating linearly
    ///
    /// Points are `(index, value)`, order does not matter.
    pub fn paint_line(&mut self, channel: Channel, from: (usize, f32), to: (usize, f32)) {
        let (start, end) = if from.0 <= to.0 { (from, to) } else { (to, from) };
        let span = end.0 - start.0;
        if span == 0 {
            self.set(end.0, channel, end.1);
            return;
        }
        for index in start.0..=usize::min(end.0, TF_ENTRIES - 1) {
            let t = (index - start.0) as f32 / span as f32;
            let value = start.1 + (end.1 - start.1) * t;
            self.set(index, channel, value);
        }
    }

    /// Flat table, 4 values per entry
    pub fn as_slice(&self) -> &[f32] {
        &self.table
    }
}

impl Default for TransferFunction {
    fn default() -> Self {
        TransferFunction::ramp()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_is_ramp() {
        let tf = TransferFunction::default();
        assert_eq!(tf.as_slice().len(), TF_ENTRIES * 4);
        assert_eq!(tf.entry(0), color::zero());
        assert_eq!(tf.entry(255), color::new(1.0, 1.0, 1.0, 1.0));
        let mid = tf.entry(51);
        assert_eq!(mid, color::mono(0.2, 0.2));
    }

    #[test]
    fn lookup_nearest() {
        let tf = TransferFunction::ramp();
        assert_eq!(TransferFunction::index_of(0.0), 0);
        assert_eq!(TransferFunction::index_of(0.5), 128);
        assert_eq!(TransferFunction::index_of(1.0), 255);
        assert_eq!(TransferFunction::index_of(-0.3), 0);
        assert_eq!(TransferFunction::index_of(4.0), 255);
        assert_eq!(tf.lookup(1.0), tf.entry(255));
        assert_eq!(tf.lookup(0.003), tf.entry(0));
        assert_eq!(tf.lookup(0.004), tf.entry(1));
    }

    #[test]
    fn set_clamps() {
        let mut tf = TransferFunction::transparent();
        tf.set(10, Channel::Green, 1.5);
        tf.set(11, Channel::Alpha, -0.5);
        tf.set(300, Channel::Red, 0.5);

        assert_eq!(tf.get(10, Channel::Green), 1.0);
        assert_eq!(tf.get(11, Channel::Alpha), 0.0);
        assert_eq!(tf.entry(10), color::new(0.0, 1.0, 0.0, 0.0));
        assert_eq!(tf.entry(300), color::zero());
    }

    #[test]
    fn paint_line_interpolates() {
        let mut tf = TransferFunction::transparent();
        tf.paint_line(Channel::Alpha, (20, 1.0), (10, 0.0));

        assert_eq!(tf.get(10, Channel::Alpha), 0.0);
        assert!((tf.get(15, Channel::Alpha) - 0.5).abs() < 1e-6);
        assert_eq!(tf.get(20, Channel::Alpha), 1.0);
        assert_eq!(tf.get(21, Channel::Alpha), 0.0);
        assert_eq!(tf.get(15, Channel::Red), 0.0);
    }

    #[test]
    fn paint_single_point() {
        let mut tf = TransferFunction::transparent();
        tf.paint_line(Channel::Blue, (7, 0.4), (7, 0.4));
        assert_eq!(tf.get(7, Channel::Blue), 0.4);
        assert_eq!(tf.get(6, Channel::Blue), 0.0);
        assert_eq!(tf.get(8, Channel::Blue), 0.0);
    }

    #[test]
    fn reset_restores_ramp() {
        let mut tf = TransferFunction::transparent();
        tf.set_entry(3, color::new(0.1, 0.2, 0.3, 0.4));
        tf.reset();
        assert_eq!(tf, TransferFunction::ramp());
    }

    #[test]
    fn channel_indices() {
        for (i, ch) in Channel::ALL.iter().enumerate() {
            assert_eq!(ch.index(), i);
            assert_eq!(Channel::from_index(i), Some(*ch));
        }
        assert_eq!(Channel::from_index(4), None);
    }
}
