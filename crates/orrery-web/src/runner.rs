use orrery_engine::{
    ConfigError, Game, GameConfig, EngineContext,
    InputEvent, InputQueue, NodeBuffer, ProtocolLayout,
};
use orrery_engine::bridge::protocol::{
    HEADER_FLOATS, HEADER_FRAME_COUNTER, HEADER_PROTOCOL_VERSION, HEADER_MAX_NODES,
    HEADER_NODE_COUNT, HEADER_MAX_EVENTS, HEADER_EVENT_COUNT, HEADER_ELAPSED,
    PROTOCOL_VERSION,
};
use orrery_engine::systems::render::build_node_buffer;

/// Generic runner that wires a `Game` to the host animation loop.
///
/// Each concrete scene creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    nodes: NodeBuffer,
    header: [f32; HEADER_FLOATS],
    overlay_json: String,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    torn_down: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);

        Self {
            ctx: EngineContext::from_config(&config),
            nodes: NodeBuffer::with_capacity(config.max_nodes),
            game,
            input: InputQueue::new(),
            header: [0.0; HEADER_FLOATS],
            overlay_json: String::new(),
            layout,
            config,
            initialized: false,
            torn_down: false,
        }
    }

    /// Replace the engine context before `init` (tests inject random sources).
    pub fn with_context(mut self, ctx: EngineContext) -> Self {
        self.ctx = ctx;
        self
    }

    /// Build the scene. Call once after construction.
    pub fn init(&mut self) -> Result<(), ConfigError> {
        self.game.init(&mut self.ctx)?;
        self.initialized = true;
        self.publish();
        Ok(())
    }

    /// Queue a pointer event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.torn_down {
            return;
        }
        self.input.push(event);
    }

    /// Run one displayed frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized || self.torn_down {
            return;
        }

        self.ctx.clear_frame_data();
        self.ctx.begin_frame(dt);
        self.game.update(&mut self.ctx, &self.input);

        // Drain input after update
        self.input.drain();

        self.publish();
    }

    /// Tear the scene down. Later ticks and input are ignored.
    pub fn shutdown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        if self.initialized {
            self.game.teardown(&mut self.ctx);
        }
        self.input.drain();
        self.ctx.clear_frame_data();
        self.publish();
    }

    /// Refresh node buffer, overlay JSON and header from the current scene.
    fn publish(&mut self) {
        let dropped = build_node_buffer(self.ctx.scene.iter(), &mut self.nodes);
        if dropped > 0 {
            log::debug!("frame {}: {dropped} nodes over capacity", self.ctx.clock.frames());
        }

        self.overlay_json.clear();
        if let Some(overlay) = self.game.overlay() {
            match overlay.to_json() {
                Ok(json) => self.overlay_json = json,
                Err(err) => log::error!("overlay serialization failed: {err}"),
            }
        }

        self.header[HEADER_FRAME_COUNTER] = self.ctx.clock.frames() as f32;
        self.header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        self.header[HEADER_MAX_NODES] = self.layout.max_nodes as f32;
        self.header[HEADER_NODE_COUNT] = self.nodes.instance_count() as f32;
        self.header[HEADER_MAX_EVENTS] = self.layout.max_events as f32;
        self.header[HEADER_EVENT_COUNT] = self.ctx.events.len() as f32;
        self.header[HEADER_ELAPSED] = self.ctx.clock.elapsed() as f32;
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn is_running(&self) -> bool {
        self.initialized && !self.torn_down
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn nodes_ptr(&self) -> *const f32 {
        self.nodes.instances_ptr()
    }

    pub fn node_count(&self) -> u32 {
        self.nodes.instance_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn overlay_json(&self) -> &str {
        &self.overlay_json
    }

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_nodes(&self) -> u32 {
        self.layout.max_nodes as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn max_frame_dt(&self) -> f32 {
        self.config.max_frame_dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{Entity, EntityId, GameEvent, MeshColor, MeshComponent, OverlayProjection};

    /// One sphere that drifts along x and counts its updates.
    struct Drifter {
        fail: bool,
        updates: u32,
        torn_down: bool,
    }

    impl Drifter {
        fn new(fail: bool) -> Self {
            Self { fail, updates: 0, torn_down: false }
        }
    }

    impl Game for Drifter {
        fn config(&self) -> GameConfig {
            GameConfig { max_nodes: 4, max_events: 2, ..GameConfig::default() }
        }

        fn init(&mut self, ctx: &mut EngineContext) -> Result<(), ConfigError> {
            if self.fail {
                return Err(ConfigError::UnknownLabelBody("Pluto".into()));
            }
            let id = ctx.next_id();
            ctx.scene.spawn(Entity::new(id).with_mesh(MeshComponent::sphere(1.0, MeshColor::WHITE)));
            Ok(())
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.updates += 1;
            let dt = ctx.clock.delta();
            if let Some(e) = ctx.scene.get_mut(EntityId(1)) {
                e.pos.x += dt;
            }
            for _ in input.iter() {
                ctx.emit_event(GameEvent::new(9.0, 1.0));
            }
        }

        fn overlay(&self) -> Option<OverlayProjection> {
            None
        }

        fn teardown(&mut self, _ctx: &mut EngineContext) {
            self.torn_down = true;
        }
    }

    #[test]
    fn tick_before_init_is_ignored() {
        let mut runner = GameRunner::new(Drifter::new(false));
        runner.tick(0.1);
        assert_eq!(runner.game().updates, 0);
    }

    #[test]
    fn init_failure_is_reported() {
        let mut runner = GameRunner::new(Drifter::new(true));
        assert!(matches!(runner.init(), Err(ConfigError::UnknownLabelBody(_))));
        runner.tick(0.1);
        assert_eq!(runner.game().updates, 0);
        assert!(!runner.is_running());
    }

    #[test]
    fn tick_publishes_header_and_nodes() {
        let mut runner = GameRunner::new(Drifter::new(false));
        runner.init().unwrap();
        runner.push_input(InputEvent::PointerMove { x: 1.0, y: 2.0 });
        runner.tick(0.1);
        runner.tick(0.1);

        let header = runner.header();
        assert_eq!(header[HEADER_FRAME_COUNTER], 2.0);
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_MAX_NODES], 4.0);
        assert_eq!(header[HEADER_NODE_COUNT], 1.0);
        assert!((header[HEADER_ELAPSED] - 0.2).abs() < 1e-6);
        // input was drained after the first tick
        assert_eq!(runner.game_events_len(), 0);
        assert!((runner.context().scene.get(EntityId(1)).unwrap().pos.x - 0.2).abs() < 1e-6);
        assert!(runner.overlay_json().is_empty());
    }

    #[test]
    fn shutdown_stops_the_loop() {
        let mut runner = GameRunner::new(Drifter::new(false));
        runner.init().unwrap();
        runner.tick(0.1);
        runner.shutdown();
        runner.shutdown();
        runner.push_input(InputEvent::PointerMove { x: 0.0, y: 0.0 });
        runner.tick(0.1);
        assert!(runner.game().torn_down);
        assert_eq!(runner.game().updates, 1);
        assert!(!runner.is_running());
    }
}
