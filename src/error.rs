//! Crate-wide error type

use std::fmt;

use thiserror::Error;

/// Which model a failed load was for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Surface,
    Pillar,
    Player,
    Crown,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKind::Surface => "surface",
            ModelKind::Pillar => "pillar",
            ModelKind::Player => "player",
            ModelKind::Crown => "crown",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Cannot load {kind} model from '{path}'")]
    ResourceLoad { kind: ModelKind, path: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Surface must be loaded first")]
    SurfaceNotLoaded,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
