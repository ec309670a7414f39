use nalgebra::{vector, Vector4};

/// Color with opacity, all components in range `<0;1>`
pub type RGBA = Vector4<f32>;

pub fn new(r: f32, g: f32, b: f32, a: f32) -> RGBA {
    vector![r, g, b, a]
}

pub fn zero() -> RGBA {
    vector![0.0, 0.0, 0.0, 0.0]
}

pub fn mono(v: f32, opacity: f32) -> RGBA {
    vector![v, v, v, opacity]
}

/// Convert color component `<0;1>` to byte, saturating
pub fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn byte_conversion_saturates() {
        assert_eq!(to_byte(0.0), 0);
        assert_eq!(to_byte(1.0), 255);
        assert_eq!(to_byte(1.7), 255);
        assert_eq!(to_byte(-0.2), 0);
        assert_eq!(to_byte(0.5), 128);
    }
}
