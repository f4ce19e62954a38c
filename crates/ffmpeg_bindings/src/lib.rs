//! Thin wrapper around the `ffmpeg` CLI for pulling audio tracks out of
//! video files.
//!
//! All methods shell out synchronously; async callers should run them on a
//! blocking thread.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Stdio},
};

/// Sample rate whisper-family speech models expect.
pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

#[derive(Debug, thiserror::Error)]
pub enum FfmpegError {
    #[error("ffmpeg binary is not runnable: {bin}")]
    NotFound { bin: String },
    #[error("failed to run ffmpeg: {0}")]
    Io(#[from] std::io::Error),
    #[error("input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("ffmpeg exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
}

/// Handle to a probed `ffmpeg` binary.
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    bin: PathBuf,
}

impl Ffmpeg {
    /// Uses the `ffmpeg` found on `PATH`.
    pub fn new() -> Result<Self, FfmpegError> {
        Self::with_binary("ffmpeg")
    }

    /// Uses an explicit binary path, probing it with `-version`.
    pub fn with_binary(bin: impl Into<PathBuf>) -> Result<Self, FfmpegError> {
        let bin = bin.into();

        let probe = Command::new(&bin)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match probe {
            Ok(status) if status.success() => Ok(Self { bin }),
            _ => Err(FfmpegError::NotFound {
                bin: bin.display().to_string(),
            }),
        }
    }

    /// Extracts the audio track of `input` into `output` as 16kHz mono PCM
    /// WAV, the format speech models consume. Overwrites `output` if present.
    pub fn extract_audio(&self, input: &Path, output: &Path) -> Result<(), FfmpegError> {
        if !input.exists() {
            return Err(FfmpegError::InputNotFound(input.to_path_buf()));
        }

        tracing::debug!(input = %input.display(), output = %output.display(), "extracting audio");

        let output_cmd = Command::new(&self.bin)
            .args(extract_audio_args(input, output))
            .stdin(Stdio::null())
            .output()?;

        if !output_cmd.status.success() {
            let stderr = String::from_utf8_lossy(&output_cmd.stderr).into_owned();
            return Err(FfmpegError::Failed {
                status: output_cmd.status,
                stderr,
            });
        }

        Ok(())
    }
}

fn extract_audio_args(input: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "-nostdin".into(),
        "-y".into(),
        "-i".into(),
        input.as_os_str().to_owned(),
        "-vn".into(),
        "-ac".into(),
        "1".into(),
        "-ar".into(),
        WHISPER_SAMPLE_RATE.to_string().into(),
        output.as_os_str().to_owned(),
    ]
}
