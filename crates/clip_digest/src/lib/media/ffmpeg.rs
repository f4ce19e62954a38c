use std::{ops::Deref, path::Path};

use ffmpeg_bindings::Ffmpeg;

use crate::media::AudioExtractor;

pub struct FfmpegExtractor(pub Ffmpeg);

impl Deref for FfmpegExtractor {
    type Target = Ffmpeg;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AudioExtractor for FfmpegExtractor {
    type Error = anyhow::Error;

    async fn extract(&self, video_path: &Path, audio_path: &Path) -> anyhow::Result<()> {
        let ffmpeg = self.0.clone();
        let video = video_path.to_path_buf();
        let audio = audio_path.to_path_buf();

        tokio::task::spawn_blocking(move || ffmpeg.extract_audio(&video, &audio))
            .await
            .map_err(|e| anyhow::anyhow!("audio extraction task panicked: {e}"))?
            .inspect_err(|e| tracing::error!(error = %e, "Failed to extract audio"))?;

        if !audio_path.exists() {
            anyhow::bail!(
                "ffmpeg did not produce expected file: {}",
                audio_path.display()
            );
        }

        Ok(())
    }
}
