/// Smallest allowed zoom, keeps the camera in front of the volume
pub const MIN_ZOOM: f32 = 0.05;

/// Change of iso value per key press
pub const ISO_STEP: f32 = 0.02;

/// Rendering method (`method` uniform)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Maximum intensity projection
    #[default]
    Mip,
    /// Front-to-back compositing of transfer function colors
    AlphaBlending,
    /// Phong shaded surface at iso value
    IsoSurface,
}

impl RenderMode {
    pub fn as_uniform(self) -> i32 {
        match self {
            RenderMode::Mip => 0,
            RenderMode::AlphaBlending => 1,
            RenderMode::IsoSurface => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RenderMode::Mip => "MIP",
            RenderMode::AlphaBlending => "Alpha blending",
            RenderMode::IsoSurface => "Iso-surface",
        }
    }
}

impl TryFrom<i32> for RenderMode {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RenderMode::Mip),
            1 => Ok(RenderMode::AlphaBlending),
            2 => Ok(RenderMode::IsoSurface),
            v => Err(v),
        }
    }
}

/// Parameters of one frame
///
/// Together with the volume (`tex`) and the transfer function
/// (`transferFunction`), these are all inputs of the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniforms {
    /// `method`
    pub method: RenderMode,
    /// `isoValue`, in range `<0;1>`
    pub iso_value: f32,
    /// `xrot`, rotation around x axis in degrees
    pub xrot: f32,
    /// `yrot`, rotation around y axis in degrees
    pub yrot: f32,
    /// `zoom`, at least [`MIN_ZOOM`]
    pub zoom: f32,
}

impl Uniforms {
    pub fn set_iso_value(&mut self, value: f32) {
        self.iso_value = value.clamp(0.0, 1.0);
    }

    pub fn change_iso_value(&mut self, delta: f32) {
        self.set_iso_value(self.iso_value + delta);
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(MIN_ZOOM);
    }
}

impl Default for Uniforms {
    fn default() -> Self {
        Self {
            method: RenderMode::Mip,
            iso_value: 0.5,
            xrot: 0.0,
            yrot: 0.0,
            zoom: 1.0,
        }
    }
}
