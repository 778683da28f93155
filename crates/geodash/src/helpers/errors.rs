use thiserror::Error;

use crate::world::LoadConfigError;

#[derive(Debug, Error)]
pub enum GlobeError {
    #[error("config error: {0}")]
    Config(#[from] LoadConfigError),

    #[error("unknown anchor: {0}")]
    UnknownAnchor(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
