use chrono::{
    DateTime,
    Utc,
};
use rand::{
    distr::Alphanumeric,
    Rng,
};

use super::VocadexError;

/// Hard cap on uploaded audio assets.
pub const MAX_AUDIO_BYTES: usize = 10 * 1024 * 1024;

/// An audio file picked for upload, fully read into memory.
#[derive(Debug, Clone)]
pub struct AudioAsset {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl AudioAsset {
    pub fn size_mb(&self) -> f64 {
        self.bytes.len() as f64 / (1024.0 * 1024.0)
    }
}

pub fn file_extension(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, ext)| ext).filter(|ext| !ext.is_empty())
}

/// MIME type by extension. Anything unrecognized comes back as an
/// octet-stream, which validation then rejects.
pub fn audio_mime_for(file_name: &str) -> String {
    match file_extension(file_name).map(|ext| ext.to_ascii_lowercase()).as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg" | "oga") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        Some("aac") => "audio/aac",
        Some("flac") => "audio/flac",
        Some("opus") => "audio/opus",
        Some("webm") => "audio/webm",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// Local checks before any network call: audio MIME type and the size cap.
pub fn validate_audio_asset(asset: &AudioAsset) -> Result<(), VocadexError> {
    if !asset.mime_type.starts_with("audio/") {
        return Err(VocadexError::Validation(format!(
            "\"{}\" is not an audio file. Pick an MP3, WAV or OGG file.",
            asset.file_name
        )));
    }

    if asset.bytes.len() > MAX_AUDIO_BYTES {
        return Err(VocadexError::Validation(format!(
            "\"{}\" is {:.2} MB; audio files may be at most 10 MB.",
            asset.file_name,
            asset.size_mb()
        )));
    }

    Ok(())
}

/// Storage object path for an uploaded asset, collision-avoided by the
/// upload timestamp plus a random token. The original extension is kept.
pub fn unique_audio_path(file_name: &str, at: DateTime<Utc>, token: &str) -> String {
    let ext = file_extension(file_name).unwrap_or("bin");
    format!("audio/{}_{}.{}", at.timestamp_millis(), token, ext)
}

pub fn generate_audio_path(file_name: &str) -> String {
    unique_audio_path(file_name, Utc::now(), &random_token(12))
}

pub fn random_token(len: usize) -> String {
    rand::rng().sample_iter(&Alphanumeric).take(len).map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn asset(name: &str, mime: &str, size: usize) -> AudioAsset {
        AudioAsset {
            file_name: name.to_string(),
            mime_type: mime.to_string(),
            bytes: vec![0u8; size],
        }
    }

    #[test]
    fn test_rejects_non_audio_mime() {
        let err = validate_audio_asset(&asset("notes.txt", "text/plain", 128)).unwrap_err();
        assert!(err.to_string().contains("not an audio file"), "got: {}", err);
    }

    #[test]
    fn test_rejects_oversized_file() {
        let err =
            validate_audio_asset(&asset("big.mp3", "audio/mpeg", 12 * 1024 * 1024)).unwrap_err();
        assert!(err.to_string().contains("at most 10 MB"), "got: {}", err);
    }

    #[test]
    fn test_accepts_small_audio_file() {
        assert!(validate_audio_asset(&asset("hola.mp3", "audio/mpeg", 64 * 1024)).is_ok());
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(audio_mime_for("word.mp3"), "audio/mpeg");
        assert_eq!(audio_mime_for("word.WAV"), "audio/wav");
        assert_eq!(audio_mime_for("word.txt"), "application/octet-stream");
        assert_eq!(audio_mime_for("no_extension"), "application/octet-stream");
    }

    #[test]
    fn test_unique_path_keeps_extension_and_token() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let path = unique_audio_path("pronunciation.mp3", at, "a1b2c3");
        assert_eq!(path, format!("audio/{}_a1b2c3.mp3", at.timestamp_millis()));
    }

    #[test]
    fn test_random_tokens_differ() {
        let a = random_token(12);
        let b = random_token(12);
        assert_eq!(a.len(), 12);
        assert_ne!(a, b);
    }
}
