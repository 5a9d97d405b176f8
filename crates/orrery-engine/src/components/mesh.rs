use crate::api::error::ConfigError;

/// Linear RGB colour for meshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl MeshColor {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };
    pub const GRAY: Self = Self { r: 0.5, g: 0.5, b: 0.5 };
    pub const SILVER: Self = Self { r: 0.75, g: 0.75, b: 0.75 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` colour. `body` names the owner in the error.
    pub fn from_hex(hex: &str, body: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor {
            body: body.to_string(),
            value: hex.to_string(),
        };
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 {
            return Err(invalid());
        }
        let channel = |i: usize| {
            digits
                .get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .map(|v| v as f32 / 255.0)
                .ok_or_else(invalid)
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Default for MeshColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Mesh primitive the renderer should draw for a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshShape {
    /// Solid sphere.
    Sphere { radius: f32 },
    /// Thin torus lying in the XZ plane, tracing an orbit.
    OrbitPath { radius: f32, tube: f32 },
    /// Flying saucer: torus hull plus a translucent dome.
    Saucer { hull_radius: f32, dome_radius: f32 },
}

impl MeshShape {
    /// Wire discriminant written into node instances.
    pub fn kind(&self) -> f32 {
        match self {
            MeshShape::Sphere { .. } => 0.0,
            MeshShape::OrbitPath { .. } => 1.0,
            MeshShape::Saucer { .. } => 2.0,
        }
    }

    /// Primary and secondary radii.
    pub fn radii(&self) -> (f32, f32) {
        match *self {
            MeshShape::Sphere { radius } => (radius, 0.0),
            MeshShape::OrbitPath { radius, tube } => (radius, tube),
            MeshShape::Saucer { hull_radius, dome_radius } => (hull_radius, dome_radius),
        }
    }
}

/// Renderable mesh attached to an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: MeshShape,
    pub color: MeshColor,
    /// Self-lit (the star, the saucer glow).
    pub emissive: bool,
    /// Draw a flat ring adornment around the sphere.
    pub rings: bool,
}

impl MeshComponent {
    pub fn new(shape: MeshShape, color: MeshColor) -> Self {
        Self {
            shape,
            color,
            emissive: false,
            rings: false,
        }
    }

    pub fn sphere(radius: f32, color: MeshColor) -> Self {
        Self::new(MeshShape::Sphere { radius }, color)
    }

    pub fn with_emissive(mut self, emissive: bool) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_rings(mut self, rings: bool) -> Self {
        self.rings = rings;
        self
    }
}
