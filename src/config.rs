use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which text-to-speech backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsBackend {
    /// Hosted Google Translate TTS (MP3, needs network).
    Gtts,
    /// Local espeak-ng subprocess (WAV, offline).
    Espeak,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    pub prompt: String,
    pub tts_backend: TtsBackend,
    pub tts_lang: String,
    pub espeak_binary: String,
    pub espeak_voice: String,
    /// File the camera helper writes the latest capture to.
    pub capture_path: String,
    pub capture_max_width: u32,
    pub jpeg_quality: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.groq.com".into(),
            api_key: String::new(),
            model: "llama-3.2-90b-vision-preview".into(),
            prompt: "Describe this image smartly in 4-5 lines to the person who is completely unaware of the surroundings in a descriptive way.".into(),
            tts_backend: TtsBackend::Gtts,
            tts_lang: "en".into(),
            espeak_binary: "espeak-ng".into(),
            espeak_voice: "en-us".into(),
            capture_path: "capture.jpg".into(),
            capture_max_width: 1024,
            jpeg_quality: 75,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        toml::from_str(&content).map_err(|e| e.to_string())
    }

    /// The API key from the config file, or the `GROQ_API_KEY` environment
    /// variable when the file leaves it blank.
    pub fn resolved_api_key(&self) -> Result<String, String> {
        if !self.api_key.is_empty() {
            return Ok(self.api_key.clone());
        }
        std::env::var("GROQ_API_KEY")
            .map_err(|_| "API key not found: set apiKey in the config or GROQ_API_KEY".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_hosted_setup() {
        let s = Settings::default();
        assert_eq!(s.endpoint, "https://api.groq.com");
        assert_eq!(s.model, "llama-3.2-90b-vision-preview");
        assert_eq!(s.tts_backend, TtsBackend::Gtts);
        assert!(s.prompt.contains("4-5 lines"));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let s = Settings::load(Path::new("/nonexistent/glimpse.toml")).unwrap();
        assert_eq!(s.model, Settings::default().model);
    }

    #[test]
    fn toml_round_trip() {
        let s = Settings::default();
        let text = toml::to_string_pretty(&s).unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back.endpoint, s.endpoint);
        assert_eq!(back.tts_backend, s.tts_backend);
    }

    #[test]
    fn tts_backend_parses_lowercase() {
        let s: Settings = toml::from_str(
            r#"
            endpoint = "https://api.groq.com"
            model = "m"
            prompt = "p"
            ttsBackend = "espeak"
            ttsLang = "en"
            espeakBinary = "espeak-ng"
            espeakVoice = "en-us"
            capturePath = "capture.jpg"
            captureMaxWidth = 800
            jpegQuality = 80
            "#,
        )
        .unwrap();
        assert_eq!(s.tts_backend, TtsBackend::Espeak);
        assert_eq!(s.capture_max_width, 800);
    }
}
