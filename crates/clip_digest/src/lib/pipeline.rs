pub mod builder;

use std::{
    fs::remove_dir_all,
    path::{Path, PathBuf},
};

use crate::{
    error::PipelineError,
    media::{audio_sibling, AudioExtractor},
    stt::{TranscribeResponse, Transcriber},
    workspace::RequestWorkspace,
    Summarizer, SummaryResponse,
};

/// Fixed prefix prepended to the transcript to form the summarization prompt.
pub const PROMPT_PREFIX: &str = "Summarize this: ";

// The core upload-to-summary pipeline
#[derive(Debug)]
pub struct SummaryPipeline<E, T, S>
where
    E: AudioExtractor + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    workdir: PathBuf,
    extractor: E,
    transcriber: T,
    summarizer: S,
}

impl<E, T, S> SummaryPipeline<E, T, S>
where
    E: AudioExtractor + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    /// Root directory request workspaces are created under.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Opens a scratch workspace for one request's artifacts.
    pub async fn workspace(&self) -> Result<RequestWorkspace, PipelineError> {
        RequestWorkspace::create(&self.workdir).await
    }

    /// Runs extraction, transcription and summarization for one uploaded
    /// video. `video_path` should live inside a request workspace; artifact
    /// cleanup belongs to the workspace, not to this method.
    #[tracing::instrument(skip(self))]
    pub async fn process(&self, video_path: &Path) -> Result<SummaryResponse, PipelineError> {
        let audio_path = self.derive_audio_path(video_path)?;

        self.extract_audio(video_path, &audio_path).await?;

        let transcript = self.transcribe_audio(&audio_path).await?;

        let prompt = format!("{PROMPT_PREFIX}{}", transcript.text);
        self.summarize_transcript(&prompt).await
    }

    /// Swaps the upload's video extension for `.wav`, keeping the directory.
    fn derive_audio_path(&self, video_path: &Path) -> Result<PathBuf, PipelineError> {
        let file_name = video_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                PipelineError::Validation(format!("unusable video path: {video_path:?}"))
            })?;

        let audio_name = audio_sibling(file_name)?;
        Ok(video_path.with_file_name(audio_name))
    }

    #[tracing::instrument(skip(self))]
    async fn extract_audio(
        &self,
        video_path: &Path,
        audio_path: &Path,
    ) -> Result<(), PipelineError> {
        self.extractor
            .extract(video_path, audio_path)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to extract audio"))
            .map_err(|e| PipelineError::Extraction(format!("{e:?}")))?;

        if !audio_path.exists() {
            return Err(PipelineError::Extraction(format!(
                "extractor did not produce expected file: {}",
                audio_path.display()
            )));
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn transcribe_audio(
        &self,
        audio_path: &Path,
    ) -> Result<TranscribeResponse, PipelineError> {
        let response = self
            .transcriber
            .transcribe(audio_path)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to transcribe audio"))
            .map_err(|e| PipelineError::Transcription(format!("{e:?}")))?;

        tracing::info!(
            duration = response.duration,
            language = response.language.as_deref().unwrap_or("unknown"),
            "Transcription complete"
        );

        Ok(response)
    }

    #[tracing::instrument(skip_all)]
    async fn summarize_transcript(&self, prompt: &str) -> Result<SummaryResponse, PipelineError> {
        self.summarizer
            .summarize(prompt)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to summarize transcript"))
            .map_err(|e| PipelineError::Summarization(format!("{e:?}")))
    }
}

impl<E, T, S> Drop for SummaryPipeline<E, T, S>
where
    E: AudioExtractor + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    fn drop(&mut self) {
        let workdir_ref = self.workdir.as_path();

        if workdir_ref.exists() {
            if let Err(e) = remove_dir_all(workdir_ref) {
                tracing::warn!(error = ?e, path = ?workdir_ref, "Failed to clean up workdir");
            } else {
                tracing::info!(path = ?workdir_ref, "Cleaned up workdir");
            }
        }
    }
}
