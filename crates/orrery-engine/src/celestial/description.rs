use serde::{Deserialize, Serialize};
use crate::api::error::ConfigError;

/// Display text for one celestial body. Shown by the overlay while hovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Description {
    pub title: String,
    pub size: String,
    pub distance: String,
    pub moons: String,
    pub fun_fact: String,
}

impl Description {
    /// Build a description, rejecting empty fields.
    pub fn new(
        title: impl Into<String>,
        size: impl Into<String>,
        distance: impl Into<String>,
        moons: impl Into<String>,
        fun_fact: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let description = Self {
            title: title.into(),
            size: size.into(),
            distance: distance.into(),
            moons: moons.into(),
            fun_fact: fun_fact.into(),
        };
        description.validate(&description.title)?;
        Ok(description)
    }

    /// Every field must carry text. `body` names the owner in errors.
    pub fn validate(&self, body: &str) -> Result<(), ConfigError> {
        let fields = [
            ("title", &self.title),
            ("size", &self.size),
            ("distance", &self.distance),
            ("moons", &self.moons),
            ("funFact", &self.fun_fact),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingDescription { body: body.to_string(), field });
            }
        }
        Ok(())
    }
}
