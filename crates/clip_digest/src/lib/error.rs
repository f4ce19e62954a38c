/// Failure taxonomy for a single summarization request.
///
/// Every pipeline stage maps its collaborator's error into exactly one
/// variant, so callers can tell which stage failed without inspecting
/// message text.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("invalid upload: {0}")]
    Validation(String),
    #[error("failed to store upload: {0}")]
    Upload(String),
    #[error("audio extraction failed: {0}")]
    Extraction(String),
    #[error("transcription failed: {0}")]
    Transcription(String),
    #[error("summarization failed: {0}")]
    Summarization(String),
}

impl PipelineError {
    /// Stable label used in error response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Validation(_) => "validation",
            PipelineError::Upload(_) => "upload",
            PipelineError::Extraction(_) => "extraction",
            PipelineError::Transcription(_) => "transcription",
            PipelineError::Summarization(_) => "summarization",
        }
    }
}
