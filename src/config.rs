use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application-level constants
pub const APP_NAME: &str = "medtriage";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Language every classification runs in. Input in any other language is
/// translated to this before extraction.
pub const CANONICAL_LANGUAGE: &str = "en";

/// Knowledge base file names, resolved against the knowledge directory.
pub const CRITICAL_SYMPTOMS_FILE: &str = "critical_symptoms.json";
pub const DEPARTMENT_KEYWORDS_FILE: &str = "critical_dept_map.json";
pub const DOCTOR_MAP_FILE: &str = "doctor_map.json";
pub const DISEASE_MAP_FILE: &str = "disease_map.json";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_TRANSCRIBE_MODEL: &str = "whisper-1";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
/// Upper bound for uploaded audio (25 MiB).
pub const DEFAULT_MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024;

/// Default tracing filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "medtriage=info,tower_http=info"
}

/// Get the application data directory
/// `<platform data dir>/medtriage`, or `./medtriage` when the platform has none.
pub fn app_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from(APP_NAME))
}

/// Default knowledge directory.
///
/// A `knowledge/` directory in the working directory wins (matches running
/// from a checkout); otherwise the per-user data directory is used.
pub fn default_knowledge_dir() -> PathBuf {
    let local = PathBuf::from("knowledge");
    if local.is_dir() {
        return local;
    }
    app_data_dir().join("knowledge")
}

/// Runtime configuration for the service and its HTTP collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub knowledge_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub canonical_language: String,
    /// Base URL of a LibreTranslate-compatible server. `None` disables
    /// translation (text is classified as received).
    pub translate_url: Option<String>,
    /// Base URL of a Whisper-compatible transcription server. `None`
    /// disables the audio endpoint.
    pub transcribe_url: Option<String>,
    pub transcribe_model: String,
    pub http_timeout_secs: u64,
    pub max_audio_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            knowledge_dir: default_knowledge_dir(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            canonical_language: CANONICAL_LANGUAGE.to_string(),
            translate_url: None,
            transcribe_url: None,
            transcribe_model: DEFAULT_TRANSCRIBE_MODEL.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            max_audio_bytes: DEFAULT_MAX_AUDIO_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_ends_with_app_name() {
        assert!(app_data_dir().ends_with(APP_NAME));
    }

    #[test]
    fn default_bind_addr_parses() {
        let addr: SocketAddr = DEFAULT_BIND_ADDR.parse().unwrap();
        assert_eq!(addr, AppConfig::default().bind_addr);
    }

    #[test]
    fn default_config_is_english_without_collaborators() {
        let config = AppConfig::default();
        assert_eq!(config.canonical_language, "en");
        assert!(config.translate_url.is_none());
        assert!(config.transcribe_url.is_none());
        assert_eq!(config.max_audio_bytes, 25 * 1024 * 1024);
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
