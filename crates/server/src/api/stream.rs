//! Stream control API handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::multipart::Field,
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::{error, warn};

use relaycast_core::{
    redact_key, remove_upload, stored_filename, StatusSnapshot, StopOutcome,
};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct StartStreamResponse {
    pub message: String,
    #[serde(rename = "streamKey")]
    pub stream_key: String,
}

#[derive(Debug, Serialize)]
pub struct StopStreamResponse {
    pub message: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn internal_error(message: impl Into<String>) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/start-stream
///
/// Multipart form: `streamKey` (text, required), `video` (file, required,
/// video mime type only), `loop` (`"true"` enables input looping).
/// Replaces any relay that is already running. The response carries the
/// stream key in redacted form only.
pub async fn start_stream(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<StartStreamResponse>, ApiError> {
    let mut stream_key: Option<String> = None;
    let mut loop_input = false;
    let mut video_path: Option<PathBuf> = None;

    while let Ok(Some(mut field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "streamKey" => {
                if let Ok(text) = field.text().await {
                    if !text.is_empty() {
                        stream_key = Some(text);
                    }
                }
            }
            "loop" => {
                if let Ok(text) = field.text().await {
                    loop_input = text == "true";
                }
            }
            "video" => {
                let content_type = field.content_type().unwrap_or("").to_string();
                if !content_type.starts_with("video/") {
                    if let Some(path) = video_path.take() {
                        remove_upload(&path).await;
                    }
                    return Err(bad_request("Only video files are allowed"));
                }

                let original_name = field.file_name().unwrap_or("upload.mp4").to_string();
                let path = state
                    .config()
                    .upload
                    .dir
                    .join(stored_filename(&original_name));
                receive_video(&mut field, &path, state.config().upload.max_bytes).await?;
                video_path = Some(path);
            }
            _ => {}
        }
    }

    let (stream_key, video_path) = match (stream_key, video_path) {
        (Some(key), Some(path)) => (key, path),
        (_, path) => {
            // Reject before any spawn attempt; a half-formed upload must
            // not be left behind either.
            if let Some(path) = path {
                remove_upload(&path).await;
            }
            return Err(bad_request("Missing stream key or video file"));
        }
    };

    match state
        .supervisor()
        .start(video_path, stream_key.clone(), loop_input)
        .await
    {
        Ok(()) => Ok(Json(StartStreamResponse {
            message: "Stream started successfully".to_string(),
            stream_key: redact_key(&stream_key),
        })),
        Err(e) => {
            error!("Relay spawn failed: {}", e);
            Err(internal_error("Failed to start streaming process"))
        }
    }
}

/// POST /api/stop-stream
///
/// Always 200; the body distinguishes an actual stop from a no-op.
pub async fn stop_stream(State(state): State<Arc<AppState>>) -> Json<StopStreamResponse> {
    match state.supervisor().stop().await {
        StopOutcome::Stopped => Json(StopStreamResponse {
            message: "Stream stopped successfully".to_string(),
        }),
        StopOutcome::NoActiveSession => Json(StopStreamResponse {
            message: "No active stream to stop".to_string(),
        }),
    }
}

/// GET /api/status
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusSnapshot> {
    Json(state.supervisor().status().await)
}

// ============================================================================
// Upload plumbing
// ============================================================================

/// Streams an uploaded video field to `path`, enforcing the size ceiling
/// chunk by chunk. On any failure the partial file is removed before the
/// error is returned, so a rejected upload never leaves a stray file.
async fn receive_video(field: &mut Field<'_>, path: &Path, max_bytes: u64) -> Result<(), ApiError> {
    let mut file = tokio::fs::File::create(path).await.map_err(|e| {
        error!("Failed to create upload file {}: {}", path.display(), e);
        internal_error("Internal server error")
    })?;

    let mut written: u64 = 0;
    loop {
        match field.chunk().await {
            Ok(Some(chunk)) => {
                written += chunk.len() as u64;
                if written > max_bytes {
                    drop(file);
                    remove_upload(path).await;
                    return Err(bad_request(format!(
                        "File too large. Maximum size is {}MB.",
                        max_bytes / (1024 * 1024)
                    )));
                }
                if let Err(e) = file.write_all(&chunk).await {
                    error!("Failed to write upload file {}: {}", path.display(), e);
                    drop(file);
                    remove_upload(path).await;
                    return Err(internal_error("Internal server error"));
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("Video upload aborted: {}", e);
                drop(file);
                remove_upload(path).await;
                return Err(bad_request("Failed to read video upload"));
            }
        }
    }

    if written == 0 {
        remove_upload(path).await;
        return Err(bad_request("Missing stream key or video file"));
    }

    file.flush().await.map_err(|e| {
        error!("Failed to flush upload file {}: {}", path.display(), e);
        internal_error("Internal server error")
    })?;

    Ok(())
}
