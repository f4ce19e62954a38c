use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use clip_digest::media::AudioExtractor;

/// Stand-in for the ffmpeg wrapper. By default it "extracts" by copying the
/// video bytes into the audio file, so downstream mocks can observe which
/// upload they were fed.
#[derive(Clone, Default)]
pub struct MockExtractor {
    pub calls: Arc<Mutex<Vec<(PathBuf, PathBuf)>>>,
    pub fail_with: Option<String>,
    pub skip_output: bool,
}

impl MockExtractor {
    pub fn failing(msg: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
            skip_output: false,
        }
    }

    /// Claims success without writing the audio file.
    pub fn producing_nothing() -> Self {
        Self {
            skip_output: true,
            ..Default::default()
        }
    }
}

impl AudioExtractor for MockExtractor {
    type Error = anyhow::Error;

    async fn extract(&self, video_path: &Path, audio_path: &Path) -> anyhow::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((video_path.to_path_buf(), audio_path.to_path_buf()));

        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }

        if !self.skip_output {
            tokio::fs::copy(video_path, audio_path).await?;
        }

        Ok(())
    }
}
