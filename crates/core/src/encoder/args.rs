//! Pure construction of the relay argument vector.

use std::path::Path;

use super::config::EncoderConfig;

/// Joins the ingest base URL and a stream key into the publish URL.
pub fn publish_url(base_url: &str, stream_key: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), stream_key)
}

/// Builds the ffmpeg argument vector for relaying `input_path` to
/// `publish_url`.
///
/// The input is read at its native rate and optionally looped forever;
/// video is re-encoded with x264 under a bitrate cap, audio as stereo AAC,
/// and the result is muxed as FLV with the publish URL as the final
/// argument.
pub fn build_relay_args(
    config: &EncoderConfig,
    input_path: &Path,
    publish_url: &str,
    loop_input: bool,
) -> Vec<String> {
    let mut args = vec![
        "-re".to_string(),
        "-stream_loop".to_string(),
        if loop_input { "-1" } else { "0" }.to_string(),
        "-i".to_string(),
        input_path.to_string_lossy().to_string(),
    ];

    // Video
    args.extend([
        "-c:v".to_string(),
        "libx264".to_string(),
        "-preset".to_string(),
        config.preset.clone(),
        "-maxrate".to_string(),
        format!("{}k", config.video_maxrate_kbps),
        "-bufsize".to_string(),
        format!("{}k", config.video_bufsize_kbps),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
        "-g".to_string(),
        config.gop_size.to_string(),
    ]);

    // Audio
    args.extend([
        "-c:a".to_string(),
        "aac".to_string(),
        "-b:a".to_string(),
        format!("{}k", config.audio_bitrate_kbps),
        "-ac".to_string(),
        config.audio_channels.to_string(),
        "-ar".to_string(),
        config.audio_sample_rate_hz.to_string(),
    ]);

    // Container and destination
    args.extend(["-f".to_string(), "flv".to_string()]);
    args.push(publish_url.to_string());

    args
}
