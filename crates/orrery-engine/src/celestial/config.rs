use std::collections::HashSet;
use serde::Deserialize;
use crate::api::error::ConfigError;
use crate::celestial::description::Description;
use crate::celestial::orbit::{finite, positive, scale_radius, OrbitalParameters};
use crate::components::mesh::MeshColor;

/// Full description of an orrery scene. Loaded from JSON or built in code,
/// then validated once before anything is spawned.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneConfig {
    pub star: StarConfig,
    pub planets: Vec<PlanetConfig>,
    #[serde(default)]
    pub label: LabelConfig,
    #[serde(default)]
    pub comet_rain: CometRainConfig,
    #[serde(default)]
    pub flyby: FlybyConfig,
}

/// The star at the origin.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarConfig {
    /// True radius relative to the reference planet (display uses the cube root).
    pub radius: f32,
    /// `#rrggbb`
    pub color: String,
    pub description: Description,
}

/// One orbiting planet.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetConfig {
    pub name: String,
    /// True radius relative to the reference planet (display uses the cube root).
    pub radius: f32,
    /// Orbit radius in scene units.
    pub orbit: f32,
    /// Radians per second.
    pub orbit_speed: f32,
    #[serde(default)]
    pub initial_angle: f32,
    /// `#rrggbb`
    pub color: String,
    #[serde(default)]
    pub rings: bool,
    pub description: Description,
}

impl PlanetConfig {
    pub fn orbital_parameters(&self) -> OrbitalParameters {
        OrbitalParameters {
            orbit_radius: self.orbit,
            angular_speed: self.orbit_speed,
            initial_angle: self.initial_angle,
            body_radius: scale_radius(self.radius),
            has_rings: self.rings,
        }
    }
}

/// Caption pinned to one planet; switches text while the flyby is active.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelConfig {
    /// Planet name the caption follows.
    pub body: String,
    pub text: String,
    pub alert_text: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            body: "Earth".to_string(),
            text: "I live here!".to_string(),
            alert_text: "that's UFO !!".to_string(),
        }
    }
}

/// Comet spawning parameters. Ranges are half-open: [min, max).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CometRainConfig {
    pub min_delay: f32,
    pub max_delay: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Height of the spawn plane.
    pub spawn_height: f32,
    /// Spawn x and z are uniform in [-half_extent, half_extent).
    pub spawn_half_extent: f32,
    pub expiry_radius: f32,
    pub comet_radius: f32,
}

impl Default for CometRainConfig {
    fn default() -> Self {
        Self {
            min_delay: 5.0,
            max_delay: 20.0,
            min_speed: 5.0,
            max_speed: 15.0,
            spawn_height: 300.0,
            spawn_half_extent: 300.0,
            expiry_radius: crate::celestial::comet::EXPIRY_RADIUS,
            comet_radius: 1.0,
        }
    }
}

impl CometRainConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        const BODY: &str = "cometRain";
        positive(BODY, "minDelay", self.min_delay)?;
        range("cometRain.delay", self.min_delay, self.max_delay)?;
        positive(BODY, "minSpeed", self.min_speed)?;
        range("cometRain.speed", self.min_speed, self.max_speed)?;
        finite(BODY, "spawnHeight", self.spawn_height)?;
        positive(BODY, "spawnHalfExtent", self.spawn_half_extent)?;
        positive(BODY, "expiryRadius", self.expiry_radius)?;
        positive(BODY, "cometRadius", self.comet_radius)?;
        Ok(())
    }
}

/// Flyby timing and path.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlybyConfig {
    /// Seconds between passes.
    pub period: f32,
    /// Seconds per pass.
    pub duration: f32,
    /// Start and end x coordinate.
    pub from: f32,
    pub to: f32,
    pub height: f32,
    /// Decorative spin, radians per second.
    pub spin_rate: f32,
    pub scale: f32,
}

impl Default for FlybyConfig {
    fn default() -> Self {
        Self {
            period: 15.0,
            duration: 3.0,
            from: 100.0,
            to: -100.0,
            height: 20.0,
            spin_rate: 10.0,
            scale: 0.1,
        }
    }
}

impl FlybyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        const BODY: &str = "flyby";
        positive(BODY, "period", self.period)?;
        positive(BODY, "duration", self.duration)?;
        finite(BODY, "from", self.from)?;
        finite(BODY, "to", self.to)?;
        finite(BODY, "height", self.height)?;
        finite(BODY, "spinRate", self.spin_rate)?;
        positive(BODY, "scale", self.scale)?;
        Ok(())
    }
}

fn range(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min < max {
        Ok(())
    } else {
        Err(ConfigError::EmptyRange { field, min, max })
    }
}

impl SceneConfig {
    /// Parse a scene from JSON. Call `validate` before composing.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject anything that would misbehave once animation starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let star = &self.star;
        let star_name = star.description.title.as_str();
        positive(star_name, "radius", star.radius)?;
        MeshColor::from_hex(&star.color, star_name)?;
        star.description.validate(star_name)?;

        let mut names = HashSet::new();
        for planet in &self.planets {
            let name = planet.name.as_str();
            if name.trim().is_empty() {
                return Err(ConfigError::MissingDescription { body: "planet".to_string(), field: "name" });
            }
            if !names.insert(name) {
                return Err(ConfigError::DuplicateBody(name.to_string()));
            }
            positive(name, "radius", planet.radius)?;
            planet.orbital_parameters().validate(name)?;
            MeshColor::from_hex(&planet.color, name)?;
            planet.description.validate(name)?;
        }

        if !names.contains(self.label.body.as_str()) {
            return Err(ConfigError::UnknownLabelBody(self.label.body.clone()));
        }
        for (field, text) in [("text", &self.label.text), ("alertText", &self.label.alert_text)] {
            if text.trim().is_empty() {
                return Err(ConfigError::MissingDescription { body: "label".to_string(), field });
            }
        }

        self.comet_rain.validate()?;
        self.flyby.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r##"{
        "star": {
            "radius": 109,
            "color": "#ffcc00",
            "description": {
                "title": "Sun", "size": "Size: 109", "distance": "0 AU",
                "moons": "Moons: None.", "funFact": "Fun Fact: hot."
            }
        },
        "planets": [{
            "name": "Earth", "radius": 1, "orbit": 16, "orbitSpeed": 0.3,
            "color": "#00aaff",
            "description": {
                "title": "Earth", "size": "Size: 1", "distance": "16 AU",
                "moons": "Moons: 1 (Moon).", "funFact": "Fun Fact: life."
            }
        }],
        "cometRain": { "maxDelay": 8 }
    }"##;

    #[test]
    fn parses_with_defaults() {
        let config = SceneConfig::from_json(SCENE).unwrap();
        config.validate().unwrap();
        assert_eq!(config.planets[0].initial_angle, 0.0);
        assert!(!config.planets[0].rings);
        assert_eq!(config.label, LabelConfig::default());
        assert_eq!(config.comet_rain.max_delay, 8.0);
        assert_eq!(config.comet_rain.min_delay, 5.0);
        assert_eq!(config.flyby, FlybyConfig::default());
    }

    #[test]
    fn display_radius_is_cube_root() {
        let mut config = SceneConfig::from_json(SCENE).unwrap();
        config.planets[0].radius = 8.0;
        assert!((config.planets[0].orbital_parameters().body_radius - 2.0).abs() < 1e-6);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(SceneConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn rejects_unknown_label_body() {
        let mut config = SceneConfig::from_json(SCENE).unwrap();
        config.label.body = "Pluto".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::UnknownLabelBody(b)) if b == "Pluto"));
    }

    #[test]
    fn rejects_duplicate_planets() {
        let mut config = SceneConfig::from_json(SCENE).unwrap();
        config.planets.push(config.planets[0].clone());
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateBody(_))));
    }

    #[test]
    fn rejects_empty_delay_range() {
        let mut config = SceneConfig::from_json(SCENE).unwrap();
        config.comet_rain.max_delay = 5.0;
        assert!(matches!(config.validate(), Err(ConfigError::EmptyRange { .. })));
    }

    #[test]
    fn rejects_bad_orbit_and_colour() {
        let mut config = SceneConfig::from_json(SCENE).unwrap();
        config.planets[0].orbit = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::NotPositive { field: "orbit_radius", .. })));

        let mut config = SceneConfig::from_json(SCENE).unwrap();
        config.star.color = "yellow".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidColor { .. })));
    }

    #[test]
    fn rejects_zero_flyby_duration() {
        let mut config = SceneConfig::from_json(SCENE).unwrap();
        config.flyby.duration = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::NotPositive { field: "duration", .. })));
    }
}
