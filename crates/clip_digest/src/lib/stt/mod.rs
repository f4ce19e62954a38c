pub mod model;
pub mod whisper;

use std::{
    fmt::Debug,
    future::Future,
    path::{Path, PathBuf},
};

pub trait Transcriber {
    type Error: Debug;

    fn transcribe(
        &self,
        audio_path: &Path,
    ) -> impl Future<Output = Result<TranscribeResponse, Self::Error>> + Send;
}

#[derive(Debug, Clone)]
pub struct TranscribeResponse {
    pub duration: f64,
    pub text: String,
    pub language: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum TranscribeError {
    #[error("model error: {0}")]
    Model(String),

    #[error("model not found: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("model download failed: {0}")]
    ModelDownload(String),

    #[error("audio decoding error: {0}")]
    AudioDecode(String),

    #[error("audio file not found: {path}")]
    AudioNotFound { path: PathBuf },

    #[error("transcription error: {0}")]
    Transcription(String),

    #[error("whisper error: {0}")]
    Whisper(#[from] whisper_rs::WhisperError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
