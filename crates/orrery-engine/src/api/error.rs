use thiserror::Error;

/// Errors raised while building a scene from its configuration.
/// All of these surface at construction time; nothing fails mid-animation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("scene config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{body}: description field `{field}` is empty")]
    MissingDescription { body: String, field: &'static str },

    #[error("{body}: `{field}` must be a positive finite number, got {value}")]
    NotPositive { body: String, field: &'static str, value: f32 },

    #[error("{body}: `{field}` must be finite, got {value}")]
    NotFinite { body: String, field: &'static str, value: f32 },

    #[error("{body}: colour `{value}` is not of the form #rrggbb")]
    InvalidColor { body: String, value: String },

    #[error("{field}: range [{min}, {max}) is empty")]
    EmptyRange { field: &'static str, min: f32, max: f32 },

    #[error("label body `{0}` does not name any planet")]
    UnknownLabelBody(String),

    #[error("duplicate body name `{0}`")]
    DuplicateBody(String),
}
