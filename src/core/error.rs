use thiserror::Error;

use crate::core::types::EntityKind;

#[derive(Error, Debug)]
pub enum SimError {
    #[error(
        "World generation failed: placed {placed} of {required} houses after {attempts} attempts"
    )]
    GenerationFailed {
        placed: u32,
        required: u32,
        attempts: u32,
    },

    #[error("Entity placement failed: placed {placed} of {required} {kind} entities")]
    EntityPlacementFailed {
        kind: EntityKind,
        placed: u32,
        required: u32,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
