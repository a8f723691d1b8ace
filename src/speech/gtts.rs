// gtts.rs — Hosted TTS via the Google Translate speech endpoint.
//
// The endpoint caps each request at 100 characters, so longer text is split
// at whitespace and the returned MP3 segments are concatenated; MP3 frames
// are self-delimiting, so back-to-back segments play as one clip.

use async_trait::async_trait;
use reqwest::Client;

use super::{AudioClip, SpeechError, SpeechSynthesizer};

const TTS_URL: &str = "https://translate.google.com/translate_tts";
const MAX_CHUNK_CHARS: usize = 100;

pub struct GoogleTranslateTts {
    client: Client,
    lang: String,
}

impl GoogleTranslateTts {
    pub fn new(lang: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            lang: lang.into(),
        }
    }
}

/// Split `text` into whitespace-bounded chunks of at most `max_chars`
/// characters. A single word longer than the limit becomes its own chunk
/// (the endpoint truncates it rather than us dropping it).
fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateTts {
    async fn synthesize(&self, text: &str) -> Result<AudioClip, SpeechError> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }

        let mut data = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let params: [(&str, String); 7] = [
                ("ie", "UTF-8".into()),
                ("client", "tw-ob".into()),
                ("tl", self.lang.clone()),
                ("q", chunk.clone()),
                ("idx", idx.to_string()),
                ("total", chunks.len().to_string()),
                ("textlen", chunk.chars().count().to_string()),
            ];
            let response = self
                .client
                .get(TTS_URL)
                .query(&params)
                .send()
                .await
                .map_err(|e| SpeechError::ConnectionError(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(SpeechError::ServiceError(format!("HTTP {}", status)));
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| SpeechError::ConnectionError(e.to_string()))?;
            data.extend_from_slice(&bytes);
        }

        if data.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }
        log::debug!(
            "gtts: synthesized {} chars into {} bytes across {} segment(s)",
            text.chars().count(),
            data.len(),
            chunks.len()
        );
        Ok(AudioClip::new(data))
    }

    fn name(&self) -> &str {
        "google-translate-tts"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_short_text_is_single_chunk() {
        let chunks = chunk_text("A park bench under a tree.", 100);
        assert_eq!(chunks, vec!["A park bench under a tree."]);
    }

    #[test]
    fn chunk_splits_at_whitespace() {
        let chunks = chunk_text("one two three four", 9);
        assert_eq!(chunks, vec!["one two", "three", "four"]);
        for c in &chunks {
            assert!(c.chars().count() <= 9);
        }
    }

    #[test]
    fn chunk_oversized_word_kept_whole() {
        let chunks = chunk_text("short reallyreallylongword end", 10);
        assert_eq!(chunks, vec!["short", "reallyreallylongword", "end"]);
    }

    #[test]
    fn chunk_empty_text_yields_nothing() {
        assert!(chunk_text("", 100).is_empty());
        assert!(chunk_text("   \n\t ", 100).is_empty());
    }

    #[test]
    fn chunk_counts_chars_not_bytes() {
        // Multi-byte characters must be measured as characters.
        let chunks = chunk_text("ééé ùùù", 3);
        assert_eq!(chunks, vec!["ééé", "ùùù"]);
    }

    #[test]
    fn backend_name() {
        assert_eq!(GoogleTranslateTts::new("en").name(), "google-translate-tts");
    }
}
