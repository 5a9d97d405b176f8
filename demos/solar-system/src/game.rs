//! Solar System: hover-to-pause planets, comet rain and a periodic UFO flyby.
//!
//! Everything moves on the frame clock; the host only forwards pointer
//! events and draws the node buffer plus the overlay projection.

use orrery_engine::*;

use crate::bodies;

// ── Capacities ───────────────────────────────────────────────────────

/// Sun, 8 planets, 8 orbit paths, the saucer, plus headroom for comets.
const MAX_NODES: usize = 128;
const MAX_EVENTS: usize = 16;

// ── Game struct ──────────────────────────────────────────────────────

pub struct SolarSystem {
    scene: Option<OrreryScene>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self { scene: None }
    }

    pub fn scene(&self) -> Option<&OrreryScene> {
        self.scene.as_ref()
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_nodes: MAX_NODES,
            max_events: MAX_EVENTS,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), ConfigError> {
        let config = bodies::standard_scene()?;
        self.scene = Some(OrreryScene::compose(&config, ctx)?);
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        scene.handle_input(input, ctx);
        scene.tick(ctx);
    }

    fn overlay(&self) -> Option<OverlayProjection> {
        self.scene.as_ref().filter(|s| s.is_alive()).map(|s| s.overlay())
    }

    fn teardown(&mut self, ctx: &mut EngineContext) {
        if let Some(scene) = self.scene.as_mut() {
            scene.teardown(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::core::rng::SequenceRandom;
    use orrery_web::GameRunner;

    fn runner() -> GameRunner<SolarSystem> {
        let game = SolarSystem::new();
        let config = GameConfig { max_frame_dt: 0.0, ..game.config() };
        let ctx = EngineContext::from_config(&config).with_random(SequenceRandom::constant(0.5));
        let mut runner = GameRunner::new(game).with_context(ctx);
        runner.init().unwrap();
        runner
    }

    fn run(runner: &mut GameRunner<SolarSystem>, frames: usize) {
        for _ in 0..frames {
            runner.tick(0.25);
        }
    }

    fn id_of(runner: &GameRunner<SolarSystem>, name: &str) -> u32 {
        runner.game().scene().unwrap().planet(name).unwrap().id().0
    }

    #[test]
    fn init_builds_every_body() {
        let runner = runner();
        let scene = runner.game().scene().unwrap();
        assert_eq!(scene.planets().len(), 8);
        assert_eq!(scene.star().name(), "Sun");
        // sun + 8 planets + 8 orbit paths; the saucer starts hidden
        assert_eq!(runner.node_count(), 17);
    }

    #[test]
    fn hovering_saturn_pauses_it_and_fills_the_overlay() {
        let mut runner = runner();
        run(&mut runner, 4);
        let saturn = id_of(&runner, "Saturn");

        runner.push_input(InputEvent::PointerMove { x: 640.0, y: 360.0 });
        runner.push_input(InputEvent::PointerEnter { target: EntityId(saturn) });
        runner.tick(0.25);
        let held = runner.game().scene().unwrap().planet("Saturn").unwrap().position();

        run(&mut runner, 8);
        let scene = runner.game().scene().unwrap();
        assert_eq!(scene.planet("Saturn").unwrap().position(), held);
        assert!(runner.overlay_json().contains("\"title\":\"Saturn\""));
        assert!(runner.overlay_json().contains("\"pointer\":[640.0,360.0]"));

        runner.push_input(InputEvent::PointerLeave { target: EntityId(saturn) });
        runner.tick(0.25);
        assert!(runner.overlay_json().contains("\"description\":null"));
    }

    #[test]
    fn earth_label_turns_to_alert_during_flyby() {
        let mut runner = runner();
        run(&mut runner, 4);
        assert!(runner.overlay_json().contains("I live here!"));

        run(&mut runner, 56);
        assert!(runner.overlay_json().contains("that's UFO !!"));
        assert!(runner.overlay_json().contains("\"flybyActive\":true"));
        // first comet (12.5 s) and the saucer join the node buffer
        assert_eq!(runner.node_count(), 19);
    }

    #[test]
    fn destroy_leaves_no_timers() {
        let mut runner = runner();
        run(&mut runner, 60);
        runner.shutdown();
        assert_eq!(runner.context().timers.pending(), 0);
        assert!(runner.overlay_json().is_empty());
        let frames = runner.context().clock.frames();
        run(&mut runner, 10);
        assert_eq!(runner.context().clock.frames(), frames);
    }
}
