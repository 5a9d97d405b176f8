use std::collections::HashMap;
use glam::Vec3;
use crate::api::game::EngineContext;
use crate::api::types::EntityId;
use crate::celestial::comet::Comet;
use crate::celestial::config::CometRainConfig;
use crate::components::entity::Entity;
use crate::components::mesh::{MeshColor, MeshComponent};
use crate::core::timer::TimerId;

/// Scene tag carried by every comet entity.
pub const COMET_TAG: &str = "comet";

/// Spawn scheduler for comets.
///
/// Holds at most one armed spawn timer. Each firing spawns one comet and
/// re-arms with a fresh random delay. Comets report their own expiry while
/// ticking; reported comets are reaped at the start of the next tick.
pub struct CometRain {
    config: CometRainConfig,
    comets: HashMap<EntityId, Comet>,
    timer: Option<TimerId>,
    /// Expired comets waiting to be reaped.
    expired: Vec<EntityId>,
    spawned: u64,
    reaped: u64,
}

impl CometRain {
    pub fn new(config: CometRainConfig) -> Self {
        Self {
            config,
            comets: HashMap::new(),
            timer: None,
            expired: Vec::new(),
            spawned: 0,
            reaped: 0,
        }
    }

    /// Arm the first spawn timer. Does nothing if one is already armed.
    pub fn start(&mut self, ctx: &mut EngineContext) {
        if self.timer.is_none() {
            self.arm(ctx);
        }
    }

    fn arm(&mut self, ctx: &mut EngineContext) {
        let delay = ctx.rng.range(self.config.min_delay, self.config.max_delay);
        self.timer = Some(ctx.timers.arm_once(ctx.clock.elapsed(), delay));
    }

    /// React to a fired timer. Returns the new comet's id if `timer` was ours.
    pub fn on_timer(&mut self, timer: TimerId, ctx: &mut EngineContext) -> Option<EntityId> {
        if self.timer != Some(timer) {
            return None;
        }
        self.timer = None;
        let id = self.spawn(ctx);
        self.arm(ctx);
        Some(id)
    }

    fn spawn(&mut self, ctx: &mut EngineContext) -> EntityId {
        let c = &self.config;
        let extent = c.spawn_half_extent;
        let x = ctx.rng.range(-extent, extent);
        let z = ctx.rng.range(-extent, extent);
        let start = Vec3::new(x, c.spawn_height, z);
        let speed = ctx.rng.range(c.min_speed, c.max_speed);
        let direction = Comet::sample_direction(ctx.rng.as_mut());

        let id = ctx.next_id();
        let comet = Comet::new(id, start, direction, speed, c.expiry_radius);
        ctx.scene.spawn(
            Entity::new(id)
                .with_tag(COMET_TAG)
                .with_pos(comet.position())
                .with_mesh(MeshComponent::sphere(c.comet_radius, MeshColor::WHITE)),
        );
        self.comets.insert(id, comet);
        self.spawned += 1;
        log::debug!("comet {} spawned at {start} heading {direction}, speed {speed:.1}", id.0);
        id
    }

    /// Reap comets that reported expiry last frame, then move the rest.
    pub fn tick(&mut self, ctx: &mut EngineContext) {
        for id in std::mem::take(&mut self.expired) {
            if self.comets.remove(&id).is_some() {
                ctx.scene.despawn(id);
                self.reaped += 1;
                log::debug!("comet {} reaped", id.0);
            }
        }

        let dt = ctx.clock.delta();
        for (id, comet) in self.comets.iter_mut() {
            if comet.tick(dt) {
                self.expired.push(*id);
            }
            if let Some(entity) = ctx.scene.get_mut(*id) {
                entity.pos = comet.position();
            }
        }
    }

    /// Cancel the spawn timer and remove every comet.
    pub fn stop(&mut self, ctx: &mut EngineContext) {
        if let Some(timer) = self.timer.take() {
            ctx.timers.cancel(timer);
        }
        for (id, _) in self.comets.drain() {
            ctx.scene.despawn(id);
        }
        self.expired.clear();
    }

    pub fn active_count(&self) -> usize {
        self.comets.len()
    }

    pub fn get(&self, id: EntityId) -> Option<&Comet> {
        self.comets.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Comet> {
        self.comets.values()
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    pub fn reaped(&self) -> u64 {
        self.reaped
    }
}
