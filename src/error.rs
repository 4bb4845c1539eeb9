//! Crate-level error type

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::engine::EngineError;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, DashError>;
