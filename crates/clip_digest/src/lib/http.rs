use std::{path::PathBuf, sync::Arc};

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::io::AsyncWriteExt;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    error::PipelineError,
    media::{audio_sibling, sanitize_file_name, AudioExtractor},
    stt::Transcriber,
    workspace::RequestWorkspace,
    Summarizer, SummaryPipeline, SummaryResponse,
};

/// Body of `GET /`.
pub const LIVENESS_MESSAGE: &str = "clip-digest backend is running!";

/// Builds the service router around a shared pipeline.
///
/// Clients disagree on whether the upload endpoint has a trailing slash, so
/// both spellings are routed.
pub fn router<E, T, S>(pipeline: Arc<SummaryPipeline<E, T, S>>, max_upload_bytes: usize) -> Router
where
    E: AudioExtractor + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(liveness))
        .route("/summarize", post(summarize::<E, T, S>))
        .route("/summarize/", post(summarize::<E, T, S>))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(pipeline)
}

async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": LIVENESS_MESSAGE }))
}

#[tracing::instrument(skip_all)]
async fn summarize<E, T, S>(
    State(pipeline): State<Arc<SummaryPipeline<E, T, S>>>,
    mut multipart: Multipart,
) -> Result<Json<SummaryResponse>, ApiError>
where
    E: AudioExtractor + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    // the workspace owns every artifact of this request; dropping it at the
    // end of this scope deletes them, on success and on error alike
    let workspace = pipeline.workspace().await?;
    let video_path = receive_upload(&mut multipart, &workspace).await?;

    let summary = pipeline.process(&video_path).await?;

    Ok(Json(summary))
}

/// Streams the first file part of the form into the workspace and returns
/// the stored path.
async fn receive_upload(
    multipart: &mut Multipart,
    workspace: &RequestWorkspace,
) -> Result<PathBuf, ApiError> {
    while let Some(mut field) = multipart.next_field().await? {
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };

        let file_name = sanitize_file_name(&file_name)?;
        // reject non-video names before writing anything to disk
        audio_sibling(&file_name)?;

        let video_path = workspace.join(&file_name);
        let mut file = tokio::fs::File::create(&video_path).await.map_err(|e| {
            PipelineError::Upload(format!("failed to create {}: {e}", video_path.display()))
        })?;

        while let Some(chunk) = field.chunk().await? {
            file.write_all(&chunk)
                .await
                .map_err(|e| PipelineError::Upload(format!("failed to write upload: {e}")))?;
        }

        file.flush()
            .await
            .map_err(|e| PipelineError::Upload(format!("failed to flush upload: {e}")))?;

        tracing::info!(path = %video_path.display(), "Stored upload");
        return Ok(video_path);
    }

    Err(PipelineError::Validation("multipart form contains no file".into()).into())
}

/// Error response body, rendered as `{"error": <kind>, "detail": <text>}`.
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    detail: String,
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        let status = match &err {
            PipelineError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PipelineError::Upload(_)
            | PipelineError::Extraction(_)
            | PipelineError::Transcription(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PipelineError::Summarization(_) => StatusCode::BAD_GATEWAY,
        };

        ApiError {
            status,
            kind: err.kind(),
            detail: err.to_string(),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError {
            status: err.status(),
            kind: "upload",
            detail: err.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(kind = self.kind, detail = %self.detail, "Request failed");

        (
            self.status,
            Json(serde_json::json!({
                "error": self.kind,
                "detail": self.detail
            })),
        )
            .into_response()
    }
}
