//! Animation error types

use thiserror::Error;

/// Errors raised while configuring the animation system
#[derive(Error, Debug)]
pub enum AnimationError {
    /// Preset configuration could not be parsed
    #[error("Invalid preset config: {0}")]
    Config(#[from] toml::de::Error),

    /// Preset configuration parsed but holds an unusable value
    #[error("Invalid preset config value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Result type for animation configuration
pub type Result<T> = std::result::Result<T, AnimationError>;
