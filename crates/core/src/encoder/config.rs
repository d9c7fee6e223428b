//! Configuration for the relay encoder.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the ffmpeg relay invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Path to ffmpeg binary.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    /// x264 encoding preset.
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Maximum video bitrate in kbit/s.
    #[serde(default = "default_video_maxrate")]
    pub video_maxrate_kbps: u32,

    /// Rate control buffer size in kbit.
    #[serde(default = "default_video_bufsize")]
    pub video_bufsize_kbps: u32,

    /// Keyframe interval in frames.
    #[serde(default = "default_gop_size")]
    pub gop_size: u32,

    /// Audio bitrate in kbit/s.
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate_kbps: u32,

    /// Audio channel count.
    #[serde(default = "default_audio_channels")]
    pub audio_channels: u32,

    /// Audio sample rate in Hz.
    #[serde(default = "default_audio_sample_rate")]
    pub audio_sample_rate_hz: u32,
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_preset() -> String {
    "fast".to_string()
}

fn default_video_maxrate() -> u32 {
    3000
}

fn default_video_bufsize() -> u32 {
    6000
}

fn default_gop_size() -> u32 {
    50
}

fn default_audio_bitrate() -> u32 {
    160
}

fn default_audio_channels() -> u32 {
    2
}

fn default_audio_sample_rate() -> u32 {
    44100
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            preset: default_preset(),
            video_maxrate_kbps: default_video_maxrate(),
            video_bufsize_kbps: default_video_bufsize(),
            gop_size: default_gop_size(),
            audio_bitrate_kbps: default_audio_bitrate(),
            audio_channels: default_audio_channels(),
            audio_sample_rate_hz: default_audio_sample_rate(),
        }
    }
}
