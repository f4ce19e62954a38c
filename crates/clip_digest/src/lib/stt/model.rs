use std::path::{Path, PathBuf};

use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};

use crate::stt::TranscribeError;

const HUGGINGFACE_BASE: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

/// Named whisper.cpp models, or a path to a ggml file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhisperModel {
    Tiny,
    TinyEn,
    Base,
    BaseEn,
    Small,
    SmallEn,
    Medium,
    MediumEn,
    LargeV2,
    LargeV3,
    LargeV3Turbo,
    Custom(PathBuf),
}

impl WhisperModel {
    /// Model filename as published by whisper.cpp on HuggingFace.
    pub fn filename(&self) -> String {
        match self {
            WhisperModel::Tiny => "ggml-tiny.bin".into(),
            WhisperModel::TinyEn => "ggml-tiny.en.bin".into(),
            WhisperModel::Base => "ggml-base.bin".into(),
            WhisperModel::BaseEn => "ggml-base.en.bin".into(),
            WhisperModel::Small => "ggml-small.bin".into(),
            WhisperModel::SmallEn => "ggml-small.en.bin".into(),
            WhisperModel::Medium => "ggml-medium.bin".into(),
            WhisperModel::MediumEn => "ggml-medium.en.bin".into(),
            WhisperModel::LargeV2 => "ggml-large-v2.bin".into(),
            WhisperModel::LargeV3 => "ggml-large-v3.bin".into(),
            WhisperModel::LargeV3Turbo => "ggml-large-v3-turbo.bin".into(),
            WhisperModel::Custom(path) => path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_else(|| "custom-model".into()),
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        match self {
            WhisperModel::Tiny => "tiny",
            WhisperModel::TinyEn => "tiny.en",
            WhisperModel::Base => "base",
            WhisperModel::BaseEn => "base.en",
            WhisperModel::Small => "small",
            WhisperModel::SmallEn => "small.en",
            WhisperModel::Medium => "medium",
            WhisperModel::MediumEn => "medium.en",
            WhisperModel::LargeV2 => "large-v2",
            WhisperModel::LargeV3 => "large-v3",
            WhisperModel::LargeV3Turbo => "large-v3-turbo",
            WhisperModel::Custom(_) => "custom",
        }
    }
}

impl From<&str> for WhisperModel {
    /// Known model names parse to their variant; anything else is treated as
    /// a path to a ggml file.
    fn from(s: &str) -> Self {
        match s {
            "tiny" => WhisperModel::Tiny,
            "tiny.en" => WhisperModel::TinyEn,
            "base" => WhisperModel::Base,
            "base.en" => WhisperModel::BaseEn,
            "small" => WhisperModel::Small,
            "small.en" => WhisperModel::SmallEn,
            "medium" => WhisperModel::Medium,
            "medium.en" => WhisperModel::MediumEn,
            "large-v2" => WhisperModel::LargeV2,
            "large-v3" => WhisperModel::LargeV3,
            "large-v3-turbo" => WhisperModel::LargeV3Turbo,
            other => WhisperModel::Custom(PathBuf::from(other)),
        }
    }
}

/// Default cache location for downloaded models.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("clip-digest")
        .join("models")
}

/// Ensure a model is available locally, downloading it on first use.
/// Returns the path to the model file.
pub async fn ensure_model(
    model: &WhisperModel,
    cache_dir: &Path,
) -> Result<PathBuf, TranscribeError> {
    match model {
        WhisperModel::Custom(path) => {
            if path.exists() {
                Ok(path.clone())
            } else {
                Err(TranscribeError::ModelNotFound { path: path.clone() })
            }
        }
        _ => {
            let filename = model.filename();
            let model_path = cache_dir.join(&filename);

            if model_path.exists() {
                tracing::info!(path = %model_path.display(), "model already cached");
                return Ok(model_path);
            }

            std::fs::create_dir_all(cache_dir).map_err(|e| {
                TranscribeError::Model(format!(
                    "failed to create cache dir {}: {e}",
                    cache_dir.display()
                ))
            })?;

            let url = format!("{HUGGINGFACE_BASE}/{filename}");
            tracing::info!(%url, "downloading model");
            download_model(&url, &model_path).await?;

            Ok(model_path)
        }
    }
}

async fn download_model(url: &str, dest: &Path) -> Result<(), TranscribeError> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .send()
        .await?
        .error_for_status()
        .map_err(|e| TranscribeError::ModelDownload(format!("HTTP error: {e}")))?;

    let total_size = response.content_length().unwrap_or(0);

    let pb = ProgressBar::new(total_size);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")
            .expect("valid template")
            .progress_chars("#>-"),
    );
    pb.set_message(format!(
        "Downloading {}",
        dest.file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default()
    ));

    // Write to a temp file first, then rename (atomic-ish)
    let tmp_path = dest.with_extension("bin.part");
    let mut file = std::fs::File::create(&tmp_path)?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    use std::io::Write;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)?;
        downloaded += chunk.len() as u64;
        pb.set_position(downloaded);
    }

    file.flush()?;
    drop(file);

    // Anything under a megabyte is an error page, not a ggml model
    let file_size = std::fs::metadata(&tmp_path)?.len();
    if file_size < 1_000_000 {
        std::fs::remove_file(&tmp_path).ok();
        return Err(TranscribeError::ModelDownload(format!(
            "downloaded file too small ({file_size} bytes)"
        )));
    }

    std::fs::rename(&tmp_path, dest)?;
    pb.finish_with_message("Download complete");

    if total_size > 0 && file_size != total_size {
        tracing::warn!(
            expected = total_size,
            actual = file_size,
            "file size mismatch, model may be corrupt"
        );
    }

    tracing::info!(path = %dest.display(), size = file_size, "model saved");
    Ok(())
}
