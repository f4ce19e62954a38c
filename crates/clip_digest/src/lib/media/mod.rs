pub mod ffmpeg;

use std::{fmt::Debug, future::Future, path::Path};

use crate::error::PipelineError;

/// File extensions accepted as video uploads.
pub const VIDEO_EXTENSIONS: [&str; 8] = ["avi", "m4v", "mkv", "mov", "mp4", "mpeg", "mpg", "webm"];

pub trait AudioExtractor {
    type Error: Debug;

    /// Writes the audio track of `video_path` to `audio_path`.
    fn extract(
        &self,
        video_path: &Path,
        audio_path: &Path,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Reduces a client-supplied filename to its final path component.
pub fn sanitize_file_name(raw: &str) -> Result<String, PipelineError> {
    Path::new(raw)
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .ok_or_else(|| PipelineError::Validation(format!("unusable file name: {raw:?}")))
}

/// Derives the extraction target name from the upload's name, requiring a
/// recognized video extension.
pub fn audio_sibling(video_file_name: &str) -> Result<String, PipelineError> {
    let path = Path::new(video_file_name);
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension {
        Some(ext) if VIDEO_EXTENSIONS.contains(&ext.as_str()) => {
            Ok(path.with_extension("wav").to_string_lossy().into_owned())
        }
        _ => Err(PipelineError::Validation(format!(
            "not a recognized video file: {video_file_name}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(
            sanitize_file_name("nested/dir/clip.mp4").expect("valid name"),
            "clip.mp4"
        );
        assert_eq!(
            sanitize_file_name("../../etc/passwd.mp4").expect("valid name"),
            "passwd.mp4"
        );
    }

    #[test]
    fn test_sanitize_rejects_empty_and_parent_names() {
        assert!(sanitize_file_name("").is_err());
        assert!(sanitize_file_name("..").is_err());
    }

    #[test]
    fn test_audio_sibling_swaps_video_extension_for_wav() {
        assert_eq!(audio_sibling("meeting.mp4").expect("valid"), "meeting.wav");
        assert_eq!(audio_sibling("clip.MOV").expect("valid"), "clip.wav");
        assert_eq!(
            audio_sibling("lecture.part1.webm").expect("valid"),
            "lecture.part1.wav"
        );
    }

    #[test]
    fn test_audio_sibling_rejects_non_video_names() {
        for name in ["notes.txt", "audio.mp3", "archive", "clip."] {
            let result = audio_sibling(name);
            assert!(
                matches!(result, Err(PipelineError::Validation(_))),
                "{name} should be rejected, got {result:?}"
            );
        }
    }
}
