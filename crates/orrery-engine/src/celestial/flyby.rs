use glam::Vec3;
use crate::api::game::EngineContext;
use crate::api::types::EntityId;
use crate::celestial::config::FlybyConfig;
use crate::celestial::orbit;
use crate::components::entity::Entity;
use crate::components::mesh::{MeshColor, MeshComponent, MeshShape};
use crate::core::timer::TimerId;

/// Scene tag of the flyby entity.
pub const FLYBY_TAG: &str = "ufo";

/// Flyby lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlybyState {
    Idle,
    /// Traversing. `anchor` is the elapsed time of the first active frame;
    /// `None` until that frame runs, so a new pass never reuses an old anchor.
    Active { anchor: Option<f64> },
}

/// Notifications for collaborators that care whether the flyby is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlybyTransition {
    BecameActive,
    BecameInactive,
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Periodic bounded traversal of the scene by a saucer.
///
/// A repeating timer moves `Idle → Active`; the pass ends once progress
/// reaches 1. Every activation produces exactly one `BecameInactive`,
/// however far a single frame overshoots.
pub struct FlybyController {
    id: EntityId,
    config: FlybyConfig,
    state: FlybyState,
    timer: Option<TimerId>,
    position: Vec3,
    rotation: f32,
    activations: u64,
}

impl FlybyController {
    pub fn new(id: EntityId, config: FlybyConfig) -> Self {
        let position = Vec3::new(config.from, config.height, 0.0);
        Self {
            id,
            config,
            state: FlybyState::Idle,
            timer: None,
            position,
            rotation: 0.0,
            activations: 0,
        }
    }

    /// Spawn the hidden saucer entity and arm the periodic timer.
    pub fn start(&mut self, ctx: &mut EngineContext) {
        if self.timer.is_some() {
            return;
        }
        ctx.scene.spawn(
            Entity::new(self.id)
                .with_tag(FLYBY_TAG)
                .with_pos(self.position)
                .with_scale(self.config.scale)
                .with_active(false)
                .with_mesh(
                    MeshComponent::new(
                        MeshShape::Saucer { hull_radius: 5.0, dome_radius: 2.5 },
                        MeshColor::SILVER,
                    )
                    .with_emissive(true),
                ),
        );
        self.timer = Some(ctx.timers.arm_repeating(ctx.clock.elapsed(), self.config.period));
    }

    /// React to a fired timer. A firing mid-pass restarts the pass without a
    /// second `BecameActive`.
    pub fn on_timer(&mut self, timer: TimerId, ctx: &mut EngineContext) -> Option<FlybyTransition> {
        if self.timer != Some(timer) {
            return None;
        }
        let was_idle = self.state == FlybyState::Idle;
        self.state = FlybyState::Active { anchor: None };
        if let Some(entity) = ctx.scene.get_mut(self.id) {
            entity.active = true;
        }
        if was_idle {
            self.activations += 1;
            log::debug!("flyby {} started", self.activations);
            Some(FlybyTransition::BecameActive)
        } else {
            None
        }
    }

    /// Per-frame update. Idle controllers do nothing.
    pub fn tick(&mut self, ctx: &mut EngineContext) -> Option<FlybyTransition> {
        let FlybyState::Active { anchor } = self.state else {
            return None;
        };
        let elapsed = ctx.clock.elapsed();
        let anchor = anchor.unwrap_or(elapsed);
        self.state = FlybyState::Active { anchor: Some(anchor) };

        let progress = ((elapsed - anchor) / f64::from(self.config.duration)) as f32;
        let c = &self.config;
        self.position = Vec3::new(lerp(c.from, c.to, progress.min(1.0)), c.height, 0.0);
        self.rotation = orbit::spin(self.rotation, c.spin_rate, ctx.clock.delta());

        let done = progress >= 1.0;
        if done {
            self.state = FlybyState::Idle;
            log::debug!("flyby {} finished", self.activations);
        }
        if let Some(entity) = ctx.scene.get_mut(self.id) {
            entity.pos = self.position;
            entity.rotation = self.rotation;
            entity.active = !done;
        }
        done.then_some(FlybyTransition::BecameInactive)
    }

    /// Cancel the periodic timer and hide the saucer.
    pub fn stop(&mut self, ctx: &mut EngineContext) {
        if let Some(timer) = self.timer.take() {
            ctx.timers.cancel(timer);
        }
        self.state = FlybyState::Idle;
        ctx.scene.despawn(self.id);
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn state(&self) -> FlybyState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, FlybyState::Active { .. })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn activations(&self) -> u64 {
        self.activations
    }
}
