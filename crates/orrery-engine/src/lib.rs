pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod overlay;
pub mod celestial;

// Re-export key types at crate root for convenience
pub use api::error::ConfigError;
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::mesh::{MeshComponent, MeshShape, MeshColor};
pub use core::scene::Scene;
pub use core::time::FrameClock;
pub use core::timer::{TimerId, TimerQueue};
pub use core::rng::{RandomSource, Rng};
pub use renderer::instance::{NodeInstance, NodeBuffer, NODE_FLAG_RINGS, NODE_FLAG_EMISSIVE};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;
pub use systems::render::build_node_buffer;
pub use overlay::broadcast::{HoverBroadcast, AnchorLabel, OverlayProjection};

pub use celestial::body::{InteractiveBody, Motion};
pub use celestial::comet::Comet;
pub use celestial::comet_rain::CometRain;
pub use celestial::composer::{OrreryScene, EVENT_FLYBY, EVENT_HOVER};
pub use celestial::config::{
    SceneConfig, StarConfig, PlanetConfig, LabelConfig, CometRainConfig, FlybyConfig,
};
pub use celestial::description::Description;
pub use celestial::flyby::{FlybyController, FlybyState, FlybyTransition};
pub use celestial::orbit::OrbitalParameters;
