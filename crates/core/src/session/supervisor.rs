//! Supervision of the external relay process.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::encoder::{build_relay_args, publish_url, EncoderConfig, EncoderError};
use crate::redact::redact_key;

use super::cleanup::remove_upload;
use super::{Phase, StatusSnapshot, StopOutcome};

/// Mutable record of the current session.
///
/// Invariant: `pid` is present iff `phase.is_active()`. `generation` ties
/// an exit observation to the process it describes and survives resets.
#[derive(Debug, Default)]
struct SessionSlot {
    phase: Phase,
    stream_key: Option<String>,
    asset_path: Option<PathBuf>,
    pid: Option<u32>,
    generation: u64,
}

impl SessionSlot {
    fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.stream_key = None;
        self.asset_path = None;
        self.pid = None;
    }
}

/// Owns the lifecycle of the relay process and the singleton session
/// record behind it.
///
/// Every mutation of the session (`start`, `stop`, and the exit
/// observers spawned per process) goes through one mutex, so concurrent
/// HTTP requests and exit notifications can never interleave into a torn
/// state. None of the operations waits for the relay process itself:
/// `start` returns once the spawn result is known and `stop` once the
/// termination signal is sent.
pub struct StreamSupervisor {
    encoder: EncoderConfig,
    ingest_base_url: String,
    slot: Arc<Mutex<SessionSlot>>,
}

impl StreamSupervisor {
    pub fn new(encoder: EncoderConfig, ingest_base_url: impl Into<String>) -> Self {
        Self {
            encoder,
            ingest_base_url: ingest_base_url.into(),
            slot: Arc::new(Mutex::new(SessionSlot::default())),
        }
    }

    /// Starts a relay for the given uploaded asset, replacing any active
    /// one.
    ///
    /// An active relay is signaled and deregistered before the new
    /// process is spawned; its exit observer deletes its asset later. On
    /// spawn failure the session is left idle, `asset_path` is deleted
    /// here, and the error is returned to the caller.
    pub async fn start(
        &self,
        asset_path: PathBuf,
        stream_key: String,
        loop_input: bool,
    ) -> Result<(), EncoderError> {
        let mut slot = self.slot.lock().await;

        if let Some(pid) = slot.pid.take() {
            info!("Replacing active relay process (pid {})", pid);
            signal_terminate(pid);
            slot.reset();
        }

        slot.generation += 1;
        let generation = slot.generation;
        slot.phase = Phase::Starting;
        slot.stream_key = Some(stream_key.clone());
        slot.asset_path = Some(asset_path.clone());

        let url = publish_url(&self.ingest_base_url, &stream_key);
        let args = build_relay_args(&self.encoder, &asset_path, &url, loop_input);

        let spawned = Command::new(&self.encoder.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                slot.reset();
                drop(slot);
                warn!("Failed to spawn relay process: {}", e);
                remove_upload(&asset_path).await;
                return Err(if e.kind() == std::io::ErrorKind::NotFound {
                    EncoderError::FfmpegNotFound {
                        path: self.encoder.ffmpeg_path.clone(),
                    }
                } else {
                    EncoderError::Spawn(e)
                });
            }
        };

        slot.pid = child.id();
        slot.phase = Phase::Running;
        info!(
            "Relay started for key {} (pid {:?})",
            redact_key(&stream_key),
            slot.pid
        );

        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(forward_output("stdout", stdout));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_output("stderr", stderr));
        }

        tokio::spawn(observe_exit(
            Arc::clone(&self.slot),
            child,
            generation,
            asset_path,
        ));

        Ok(())
    }

    /// Signals the active relay to terminate.
    ///
    /// Best-effort and non-blocking: the state reset and asset cleanup
    /// happen in the exit observer once the process actually dies. A stop
    /// with no active session is a no-op.
    pub async fn stop(&self) -> StopOutcome {
        let mut slot = self.slot.lock().await;
        match slot.pid {
            Some(pid) => {
                info!("Stopping relay process (pid {})", pid);
                slot.phase = Phase::Stopping;
                signal_terminate(pid);
                StopOutcome::Stopped
            }
            None => StopOutcome::NoActiveSession,
        }
    }

    /// Consistent snapshot of the session state.
    pub async fn status(&self) -> StatusSnapshot {
        let slot = self.slot.lock().await;
        StatusSnapshot {
            is_streaming: slot.phase.is_active(),
            has_stream_key: slot.stream_key.is_some(),
        }
    }

    /// Host-shutdown hook: signals any active relay so no encoder process
    /// outlives the server.
    pub async fn shutdown(&self) {
        if self.stop().await == StopOutcome::Stopped {
            info!("Signaled active relay process during shutdown");
        }
    }
}

/// Waits for a relay process to exit, then resets the session and cleans
/// up the asset the session owned.
///
/// The slot is only touched if `generation` is still current: a late exit
/// from a replaced process must not corrupt its successor. The asset is
/// deleted unconditionally: this task is its sole owner.
async fn observe_exit(
    slot: Arc<Mutex<SessionSlot>>,
    mut child: Child,
    generation: u64,
    asset_path: PathBuf,
) {
    let status = child.wait().await;

    {
        let mut slot = slot.lock().await;
        if slot.generation == generation {
            match &status {
                Ok(status) if status.success() => {
                    info!("Relay process exited cleanly");
                }
                Ok(status) => {
                    slot.phase = Phase::Crashed;
                    warn!("Relay process exited abnormally: {}", status);
                }
                Err(e) => {
                    slot.phase = Phase::Crashed;
                    warn!("Failed to collect relay process exit status: {}", e);
                }
            }
            slot.reset();
        } else {
            debug!(
                "Ignoring exit of replaced relay process (generation {}): {:?}",
                generation, status
            );
        }
    }

    remove_upload(&asset_path).await;
}

/// Forwards one ffmpeg output stream to the log, line by line.
async fn forward_output<R>(stream: &'static str, reader: R)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        debug!("ffmpeg {}: {}", stream, line);
    }
}

#[cfg(unix)]
fn signal_terminate(pid: u32) {
    unsafe {
        libc::kill(pid as libc::pid_t, libc::SIGTERM);
    }
}

#[cfg(not(unix))]
fn signal_terminate(pid: u32) {
    warn!("Cannot signal relay process (pid {}) on this platform", pid);
}
