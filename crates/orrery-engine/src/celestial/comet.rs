use glam::Vec3;
use crate::api::types::EntityId;
use crate::core::rng::RandomSource;

/// Distance from the origin beyond which a comet is considered gone.
pub const EXPIRY_RADIUS: f32 = 1000.0;

/// Heading used when the sampled direction is degenerate.
const FALLBACK_DIRECTION: Vec3 = Vec3::Y;

/// A transient object on a straight-line trajectory that reports its own expiry.
#[derive(Debug, Clone)]
pub struct Comet {
    id: EntityId,
    position: Vec3,
    direction: Vec3,
    speed: f32,
    expiry_radius: f32,
    expired: bool,
}

impl Comet {
    /// `direction` is normalised; a zero or non-finite vector falls back to +Y.
    pub fn new(id: EntityId, start: Vec3, direction: Vec3, speed: f32, expiry_radius: f32) -> Self {
        Self {
            id,
            position: start,
            direction: direction.try_normalize().unwrap_or(FALLBACK_DIRECTION),
            speed,
            expiry_radius,
            expired: false,
        }
    }

    /// Random heading: each component uniform in [-1, 1), then normalised.
    pub fn sample_direction(rng: &mut dyn RandomSource) -> Vec3 {
        let x = rng.range(-1.0, 1.0);
        let y = rng.range(-1.0, 1.0);
        let z = rng.range(-1.0, 1.0);
        Vec3::new(x, y, z).try_normalize().unwrap_or(FALLBACK_DIRECTION)
    }

    /// Move for `dt` seconds. Returns true exactly once: on the frame the
    /// comet first ends up beyond its expiry radius.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.position += self.direction * self.speed * dt;
        if !self.expired && self.position.length() > self.expiry_radius {
            self.expired = true;
            return true;
        }
        false
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{Rng, SequenceRandom};

    #[test]
    fn moves_along_direction() {
        let mut c = Comet::new(EntityId(1), Vec3::ZERO, Vec3::new(3.0, 0.0, 4.0), 10.0, EXPIRY_RADIUS);
        assert!((c.direction().length() - 1.0).abs() < 1e-6);
        c.tick(0.5);
        assert!((c.position() - Vec3::new(3.0, 0.0, 4.0)).length() < 1e-4);
    }

    #[test]
    fn zero_direction_falls_back() {
        let c = Comet::new(EntityId(1), Vec3::ZERO, Vec3::ZERO, 1.0, EXPIRY_RADIUS);
        assert_eq!(c.direction(), Vec3::Y);
        let mut mid = SequenceRandom::constant(0.5);
        assert_eq!(Comet::sample_direction(&mut mid), Vec3::Y);
    }

    #[test]
    fn sampled_directions_are_unit() {
        let mut rng = Rng::new(9);
        for _ in 0..200 {
            let d = Comet::sample_direction(&mut rng);
            assert!((d.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn outward_comet_distance_never_shrinks() {
        let start = Vec3::new(100.0, 300.0, -50.0);
        let mut c = Comet::new(EntityId(1), start, Vec3::new(0.2, 1.0, -0.1), 12.0, EXPIRY_RADIUS);
        let mut last = c.position().length();
        for _ in 0..1000 {
            c.tick(1.0 / 30.0);
            let d = c.position().length();
            assert!(d >= last);
            last = d;
        }
    }

    #[test]
    fn expiry_reported_exactly_once() {
        let mut c = Comet::new(EntityId(1), Vec3::new(0.0, 990.0, 0.0), Vec3::Y, 10.0, EXPIRY_RADIUS);
        let reports: usize = (0..20).map(|_| c.tick(0.5) as usize).sum();
        assert_eq!(reports, 1);
        assert!(c.is_expired());
    }
}
