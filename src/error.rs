//! Top-level error type for the tracker binary.

use std::io;

use crate::camera::CameraError;
use crate::config::ConfigError;
use crate::vision::VisionError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Vision(#[from] VisionError),

    #[error("terminal error: {0}")]
    Terminal(#[source] io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to install Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("failed to set up logging: {0}")]
    Logging(String),
}
