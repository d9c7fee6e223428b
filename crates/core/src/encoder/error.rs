//! Error types for the encoder module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors reported synchronously when launching the relay process.
///
/// Failures after a successful launch are not represented here: they are
/// observed by the supervisor's exit observer and only surface through a
/// later status query.
#[derive(Debug, Error)]
pub enum EncoderError {
    /// FFmpeg binary not found.
    #[error("FFmpeg not found at path: {path}")]
    FfmpegNotFound { path: PathBuf },

    /// The OS refused to launch the relay process.
    #[error("Failed to spawn relay process: {0}")]
    Spawn(#[source] std::io::Error),
}
