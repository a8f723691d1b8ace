// espeak.rs — Local TTS via an espeak-ng subprocess writing WAV to stdout.
// No network dependency; useful offline or as a fallback when the hosted
// endpoint is unreachable.

use async_trait::async_trait;
use tokio::process::Command;

use super::{AudioClip, SpeechError, SpeechSynthesizer};

pub struct EspeakSynthesizer {
    binary: String,
    voice: String,
}

impl EspeakSynthesizer {
    pub fn new(binary: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            voice: voice.into(),
        }
    }

    fn args<'a>(&'a self, text: &'a str) -> [&'a str; 4] {
        ["-v", &self.voice, "--stdout", text]
    }
}

#[async_trait]
impl SpeechSynthesizer for EspeakSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<AudioClip, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyAudio);
        }

        let output = Command::new(&self.binary)
            .args(self.args(text))
            .output()
            .await
            .map_err(|e| SpeechError::EngineError(format!("spawn {}: {}", self.binary, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpeechError::EngineError(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        if output.stdout.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }
        Ok(AudioClip::new(output.stdout))
    }

    fn name(&self) -> &str {
        "espeak-ng"
    }
}
