//! Circular orbit motion model: pure math, no engine state.
//!
//! Bodies follow prescribed circles in the XZ plane around the origin;
//! there is no gravitation.

use glam::Vec3;
use crate::api::error::ConfigError;

/// Decorative self-rotation of orbiting bodies, radians per second.
/// Matches 0.01 rad per frame at 60 fps, but independent of frame rate.
pub const BODY_SPIN_RATE: f32 = 0.6;

/// Immutable orbit definition for one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalParameters {
    /// Distance from the origin.
    pub orbit_radius: f32,
    /// Radians per second; negative values orbit clockwise.
    pub angular_speed: f32,
    /// Angle at elapsed time zero.
    pub initial_angle: f32,
    /// Display radius of the body itself.
    pub body_radius: f32,
    /// Whether the body carries a ring adornment.
    pub has_rings: bool,
}

impl OrbitalParameters {
    /// Check radii are positive and angles finite. `body` names the owner in errors.
    pub fn validate(&self, body: &str) -> Result<(), ConfigError> {
        positive(body, "orbit_radius", self.orbit_radius)?;
        positive(body, "body_radius", self.body_radius)?;
        finite(body, "angular_speed", self.angular_speed)?;
        finite(body, "initial_angle", self.initial_angle)?;
        Ok(())
    }

    /// Orbit angle after `t` seconds of orbit time, wrapped to [0, TAU).
    /// Computed in f64 so long uptimes do not quantize the angle.
    pub fn angle_at(&self, t: f64) -> f32 {
        let angle = f64::from(self.initial_angle) + f64::from(self.angular_speed) * t;
        angle.rem_euclid(std::f64::consts::TAU) as f32
    }

    /// Position on the orbit after `t` seconds of orbit time.
    pub fn position_at(&self, t: f64) -> Vec3 {
        let angle = self.angle_at(t);
        Vec3::new(
            self.orbit_radius * angle.cos(),
            0.0,
            self.orbit_radius * angle.sin(),
        )
    }
}

/// Compress true relative sizes into a displayable range.
/// Monotonic, so ordering between bodies survives.
pub fn scale_radius(true_radius: f32) -> f32 {
    true_radius.cbrt()
}

/// Advance a decorative spin angle by `dt` seconds at `rate` rad/s, wrapped to [0, TAU).
pub fn spin(rotation: f32, rate: f32, dt: f32) -> f32 {
    (rotation + rate * dt).rem_euclid(std::f32::consts::TAU)
}

pub(crate) fn positive(body: &str, field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { body: body.to_string(), field, value })
    }
}

pub(crate) fn finite(body: &str, field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { body: body.to_string(), field, value })
    }
}
