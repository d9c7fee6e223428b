//! Relay encoder command construction.
//!
//! This module describes the external ffmpeg invocation that reads an
//! uploaded asset and pushes an encoded stream to the ingest endpoint.
//! Everything here is pure: the argument vector is built from
//! configuration and inputs without touching the process table, so it can
//! be tested exhaustively without spawning anything.

mod args;
mod config;
mod error;

pub use args::{build_relay_args, publish_url};
pub use config::EncoderConfig;
pub use error::EncoderError;
