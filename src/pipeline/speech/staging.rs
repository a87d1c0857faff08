use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use super::SpeechError;

const STAGING_PREFIX: &str = "medtriage-audio-";
const DEFAULT_EXTENSION: &str = "bin";

/// An uploaded audio file held on disk for the transcriber.
/// The file is deleted when this value is dropped.
#[derive(Debug)]
pub struct StagedAudio {
    file: NamedTempFile,
}

impl StagedAudio {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Write uploaded audio to a transient file in the system temp directory.
///
/// Only the extension of `file_name` is kept (transcribers sniff the format
/// from it); the client-supplied name never reaches the filesystem.
pub fn stage_audio(bytes: &[u8], file_name: Option<&str>) -> Result<StagedAudio, SpeechError> {
    stage_audio_in(&std::env::temp_dir(), bytes, file_name)
}

/// Same as [`stage_audio`] with an explicit directory.
pub fn stage_audio_in(
    dir: &Path,
    bytes: &[u8],
    file_name: Option<&str>,
) -> Result<StagedAudio, SpeechError> {
    if bytes.is_empty() {
        return Err(SpeechError::EmptyAudio);
    }

    let extension = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

    let mut file = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .suffix(&format!(".{extension}"))
        .tempfile_in(dir)?;
    file.write_all(bytes)?;
    file.flush()?;

    tracing::debug!(
        path = %file.path().display(),
        size = bytes.len(),
        "Audio staged"
    );

    Ok(StagedAudio { file })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_file_holds_content_and_extension() {
        let dir = tempfile::tempdir().unwrap();
        let staged = stage_audio_in(dir.path(), b"RIFF....WAVE", Some("voice note.WAV")).unwrap();

        assert!(staged.path().exists());
        assert!(staged.path().starts_with(dir.path()));
        assert_eq!(staged.path().extension().unwrap(), "wav");
        let name = staged.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(STAGING_PREFIX));
        assert!(!name.contains("voice"));
        assert_eq!(std::fs::read(staged.path()).unwrap(), b"RIFF....WAVE");
    }

    #[test]
    fn staged_file_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let staged = stage_audio_in(dir.path(), b"audio", Some("a.mp3")).unwrap();
        let path = staged.path().to_path_buf();
        assert!(path.exists());
        drop(staged);
        assert!(!path.exists());
    }

    #[test]
    fn suspicious_extensions_fall_back_to_bin() {
        let dir = tempfile::tempdir().unwrap();
        for name in [None, Some("noext"), Some("x.../../etc"), Some("clip.a-b"), Some("clip.verylongext")] {
            let staged = stage_audio_in(dir.path(), b"audio", name).unwrap();
            assert_eq!(staged.path().extension().unwrap(), "bin", "{name:?}");
        }
    }

    #[test]
    fn empty_audio_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = stage_audio_in(dir.path(), b"", Some("a.wav")).unwrap_err();
        assert!(matches!(err, SpeechError::EmptyAudio));
    }
}
