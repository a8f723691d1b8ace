//! Text-to-speech backends. The reconciler only sees the
//! `SpeechSynthesizer` trait; whether speech comes from a hosted API or a
//! local engine is a configuration choice.

use async_trait::async_trait;

pub mod espeak;
pub mod gtts;

/// A synthesized audio clip, opaque to the reconciler. The playback layer
/// decodes it; the container format is whatever the backend produced
/// (MP3 from the hosted API, WAV from the local engine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub data: Vec<u8>,
}

impl AudioClip {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

/// Error type for speech synthesis.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Connection failed: {0}")]
    ConnectionError(String),
    #[error("TTS service error: {0}")]
    ServiceError(String),
    #[error("Speech engine failed: {0}")]
    EngineError(String),
    #[error("Synthesizer produced no audio")]
    EmptyAudio,
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` into an audio clip.
    async fn synthesize(&self, text: &str) -> Result<AudioClip, SpeechError>;

    /// Backend name for logging/display.
    fn name(&self) -> &str;
}
