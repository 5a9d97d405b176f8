//! Solar system data: relative radii (Earth = 1), chosen orbit distances,
//! display colours and the hover text for each body.
//!
//! Radii are cube-root scaled when the scene is composed so the Sun and the
//! gas giants stay on screen next to Mercury.

use orrery_engine::{ConfigError, SceneConfig};

/// Scene description shipped with the demo.
pub const SCENE_JSON: &str = include_str!("../scene.json");

/// Planet names in orbit order.
pub const PLANET_NAMES: [&str; 8] = [
    "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
];

/// Parse and validate the bundled scene.
pub fn standard_scene() -> Result<SceneConfig, ConfigError> {
    let config = SceneConfig::from_json(SCENE_JSON)?;
    config.validate()?;
    Ok(config)
}
