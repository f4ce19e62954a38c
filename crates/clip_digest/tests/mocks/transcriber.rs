use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use clip_digest::{TranscribeResponse, Transcriber};

#[derive(Clone)]
pub struct MockTranscriber {
    pub response_text: Option<String>,
    pub calls: Arc<Mutex<Vec<PathBuf>>>,
    pub fail_with: Option<String>,
}

impl MockTranscriber {
    pub fn new(response_text: &str) -> Self {
        Self {
            response_text: Some(response_text.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    /// Returns the audio file's own contents as the transcript.
    pub fn echoing() -> Self {
        Self {
            response_text: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            response_text: Some(String::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl Transcriber for MockTranscriber {
    type Error = anyhow::Error;

    async fn transcribe(&self, audio_path: &Path) -> Result<TranscribeResponse, Self::Error> {
        self.calls.lock().unwrap().push(audio_path.to_path_buf());

        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }

        let text = match &self.response_text {
            Some(text) => text.clone(),
            None => String::from_utf8_lossy(&tokio::fs::read(audio_path).await?).into_owned(),
        };

        Ok(TranscribeResponse {
            duration: 120.0,
            text,
            language: Some("en".to_string()),
        })
    }
}
