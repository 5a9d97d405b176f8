use serde::Deserialize;
use crate::api::error::ConfigError;
use crate::api::types::{EntityId, GameEvent};
use crate::core::rng::{RandomSource, Rng};
use crate::core::scene::Scene;
use crate::core::time::FrameClock;
use crate::core::timer::{TimerId, TimerQueue};
use crate::input::queue::InputQueue;
use crate::overlay::broadcast::OverlayProjection;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Maximum number of node instances in the scene description (default: 512).
    pub max_nodes: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Largest frame delta in seconds; larger deltas are clamped (default: 0.25).
    pub max_frame_dt: f32,
    /// Seed for the default random source.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_nodes: 512,
            max_events: 32,
            max_frame_dt: 0.25,
            seed: 42,
        }
    }
}

/// The core contract every scene must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Build the scene. Configuration problems are reported here, never mid-animation.
    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), ConfigError>;

    /// Per-frame update, called once per displayed frame after `begin_frame`.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Current 2D overlay projection, if the game has one.
    fn overlay(&self) -> Option<OverlayProjection> {
        None
    }

    /// Release timers and transient state. Later updates must be no-ops.
    fn teardown(&mut self, _ctx: &mut EngineContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub clock: FrameClock,
    pub timers: TimerQueue,
    pub rng: Box<dyn RandomSource>,
    pub events: Vec<GameEvent>,
    /// Timers that came due in the current frame, in due order.
    fired: Vec<TimerId>,
    max_events: usize,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::new(),
            clock: FrameClock::new(config.max_frame_dt),
            timers: TimerQueue::new(),
            rng: Box::new(Rng::new(config.seed)),
            events: Vec::new(),
            fired: Vec::new(),
            max_events: config.max_events,
            next_id: 1,
        }
    }

    /// Replace the random source (tests use scripted sequences).
    pub fn with_random(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Advance the clock by one frame and collect the timers that came due.
    pub fn begin_frame(&mut self, dt: f32) {
        self.clock.advance(dt);
        self.fired = self.timers.advance(self.clock.elapsed());
    }

    /// Timers that fired at the start of this frame.
    pub fn fired_timers(&self) -> &[TimerId] {
        &self.fired
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() >= self.max_events {
            log::warn!("event buffer full, dropping event kind {}", event.kind);
            return;
        }
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
        self.fired.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
