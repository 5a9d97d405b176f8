use glam::Vec3;
use crate::api::error::ConfigError;
use crate::api::types::EntityId;
use crate::celestial::description::Description;
use crate::celestial::orbit::{self, OrbitalParameters, BODY_SPIN_RATE};
use crate::overlay::broadcast::HoverBroadcast;

/// How a body moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Fixed at the origin (the star).
    Stationary { body_radius: f32 },
    /// Circular orbit around the origin.
    Orbiting(OrbitalParameters),
}

/// A hoverable body: pauses while the pointer is over it and publishes its description.
///
/// Orbit angle is driven by `elapsed - paused_total`, so a pause stops the
/// body's own clock instead of resetting it, and unpausing resumes from the
/// frozen angle with no jump.
#[derive(Debug, Clone)]
pub struct InteractiveBody {
    id: EntityId,
    description: Description,
    motion: Motion,
    paused: bool,
    /// Elapsed time at pause onset.
    paused_at: f64,
    /// Total time spent paused before the current pause.
    paused_total: f64,
    position: Vec3,
    rotation: f32,
}

impl InteractiveBody {
    /// An orbiting body. Parameters and description are validated here.
    pub fn orbiting(
        id: EntityId,
        params: OrbitalParameters,
        description: Description,
    ) -> Result<Self, ConfigError> {
        params.validate(&description.title)?;
        Self::build(id, Motion::Orbiting(params), description)
    }

    /// The stationary star at the origin.
    pub fn star(id: EntityId, body_radius: f32, description: Description) -> Result<Self, ConfigError> {
        orbit::positive(&description.title, "body_radius", body_radius)?;
        Self::build(id, Motion::Stationary { body_radius }, description)
    }

    fn build(id: EntityId, motion: Motion, description: Description) -> Result<Self, ConfigError> {
        description.validate(&description.title)?;
        let position = match motion {
            Motion::Stationary { .. } => Vec3::ZERO,
            Motion::Orbiting(params) => params.position_at(0.0),
        };
        Ok(Self {
            id,
            description,
            motion,
            paused: false,
            paused_at: 0.0,
            paused_total: 0.0,
            position,
            rotation: 0.0,
        })
    }

    /// Pointer entered the body at frame time `now`: freeze and publish.
    /// Returns true if the overlay changed.
    pub fn on_pointer_enter(&mut self, now: f64, hover: &mut HoverBroadcast) -> bool {
        if !self.paused {
            self.paused = true;
            self.paused_at = now;
            self.position = self.position_at(now);
        }
        hover.publish(self.id, &self.description)
    }

    /// Pointer left the body at frame time `now`: resume and clear our description.
    /// Returns true if the overlay changed.
    pub fn on_pointer_leave(&mut self, now: f64, hover: &mut HoverBroadcast) -> bool {
        if self.paused {
            self.paused = false;
            self.paused_total += (now - self.paused_at).max(0.0);
        }
        hover.clear(self.id)
    }

    /// Per-frame update. Paused bodies keep their last position and spin.
    pub fn tick(&mut self, elapsed: f64, dt: f32) {
        if self.paused {
            return;
        }
        self.position = self.position_at(elapsed);
        if let Motion::Orbiting(_) = self.motion {
            self.rotation = orbit::spin(self.rotation, BODY_SPIN_RATE, dt);
        }
    }

    /// Where the body would be at `elapsed`, given the pauses so far.
    fn position_at(&self, elapsed: f64) -> Vec3 {
        match self.motion {
            Motion::Stationary { .. } => Vec3::ZERO,
            Motion::Orbiting(params) => params.position_at(elapsed - self.paused_total),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.description.title
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn body_radius(&self) -> f32 {
        match self.motion {
            Motion::Stationary { body_radius } => body_radius,
            Motion::Orbiting(params) => params.body_radius,
        }
    }

    pub fn has_rings(&self) -> bool {
        matches!(self.motion, Motion::Orbiting(p) if p.has_rings)
    }
}
