pub mod config;
pub mod encoder;
pub mod redact;
pub mod session;
pub mod upload;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, IngestConfig,
    ServerConfig, UploadConfig,
};
pub use encoder::{build_relay_args, publish_url, EncoderConfig, EncoderError};
pub use redact::redact_key;
pub use session::{remove_upload, Phase, StatusSnapshot, StopOutcome, StreamSupervisor};
pub use upload::stored_filename;
