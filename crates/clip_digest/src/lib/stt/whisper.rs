use std::{path::Path, sync::Arc};

use ffmpeg_bindings::WHISPER_SAMPLE_RATE;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::stt::{TranscribeError, TranscribeResponse, Transcriber};

/// Local whisper.cpp transcription.
///
/// The model context is loaded once and shared across requests; each call
/// runs inference on its own state, on the blocking thread pool.
pub struct WhisperTranscriber {
    ctx: Arc<WhisperContext>,
    model_name: String,
}

impl WhisperTranscriber {
    pub fn new(model_path: &Path, model_name: impl Into<String>) -> Result<Self, TranscribeError> {
        let path_str = model_path
            .to_str()
            .ok_or_else(|| TranscribeError::Model("model path contains invalid UTF-8".into()))?;

        tracing::info!(model = %model_path.display(), "loading whisper model");
        let ctx = WhisperContext::new_with_params(path_str, WhisperContextParameters::default())?;

        Ok(Self {
            ctx: Arc::new(ctx),
            model_name: model_name.into(),
        })
    }
}

impl Transcriber for WhisperTranscriber {
    type Error = TranscribeError;

    async fn transcribe(&self, audio_path: &Path) -> Result<TranscribeResponse, Self::Error> {
        if !audio_path.exists() {
            return Err(TranscribeError::AudioNotFound {
                path: audio_path.to_path_buf(),
            });
        }

        tracing::debug!(model = %self.model_name, path = %audio_path.display(), "transcribing audio");

        let ctx = Arc::clone(&self.ctx);
        let path = audio_path.to_path_buf();

        let response = tokio::task::spawn_blocking(move || {
            let samples = read_wav_samples(&path)?;
            run_inference(&ctx, &samples)
        })
        .await
        .map_err(|e| TranscribeError::Transcription(format!("inference task panicked: {e}")))??;

        Ok(response)
    }
}

/// Reads a 16kHz mono PCM wav into f32 samples.
fn read_wav_samples(path: &Path) -> Result<Vec<f32>, TranscribeError> {
    let mut reader = hound::WavReader::open(path).map_err(|e| {
        TranscribeError::AudioDecode(format!("failed to open {}: {e}", path.display()))
    })?;
    let spec = reader.spec();

    if spec.channels != 1 || spec.sample_rate != WHISPER_SAMPLE_RATE || spec.bits_per_sample != 16 {
        return Err(TranscribeError::AudioDecode(format!(
            "expected {WHISPER_SAMPLE_RATE}Hz mono 16-bit wav, got {}Hz {}ch {}-bit",
            spec.sample_rate, spec.channels, spec.bits_per_sample
        )));
    }

    let samples = reader
        .samples::<i16>()
        .map(|s| s.map(|v| v as f32 / 32768.0))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| TranscribeError::AudioDecode(format!("failed to read samples: {e}")))?;

    Ok(samples)
}

fn run_inference(
    ctx: &WhisperContext,
    samples: &[f32],
) -> Result<TranscribeResponse, TranscribeError> {
    let mut state = ctx.create_state()?;

    let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 5 });
    params.set_detect_language(true);

    // Disable stderr printing from whisper.cpp
    params.set_print_progress(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    state.full(params, samples)?;

    let num_segments = state.full_n_segments();
    let mut text = String::new();

    for i in 0..num_segments {
        let segment = state
            .get_segment(i)
            .ok_or_else(|| TranscribeError::Transcription(format!("segment {i} not found")))?;
        let segment_text = segment
            .to_str_lossy()
            .map_err(|e| TranscribeError::Transcription(format!("segment text error: {e}")))?;
        text.push_str(&segment_text);
    }

    let language = whisper_rs::get_lang_str(state.full_lang_id_from_state()).map(str::to_string);
    let duration = samples.len() as f64 / WHISPER_SAMPLE_RATE as f64;

    Ok(TranscribeResponse {
        duration,
        text: text.trim().to_string(),
        language,
    })
}
