// main.rs — Console host for the reconciler. Each line of input is one
// render cycle: the capture file is polled, button events are mapped from
// the command, and the resulting description/failure is printed.

use std::path::Path;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use glimpse::audio::RodioPlayer;
use glimpse::capture::file::WatchedFileSource;
use glimpse::capture::ImageCaptureSource;
use glimpse::config::{Settings, TtsBackend};
use glimpse::describe::groq::GroqVisionClient;
use glimpse::reconciler::Reconciler;
use glimpse::session::{InputEvents, Session};
use glimpse::speech::espeak::EspeakSynthesizer;
use glimpse::speech::gtts::GoogleTranslateTts;
use glimpse::speech::SpeechSynthesizer;

#[tokio::main]
async fn main() -> Result<(), String> {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "glimpse.toml".into());
    let settings = Settings::load(Path::new(&config_path))?;
    let api_key = settings.resolved_api_key()?;

    let describe = Arc::new(GroqVisionClient::new(
        settings.endpoint.as_str(),
        api_key,
        settings.model.as_str(),
    ));
    let speech: Arc<dyn SpeechSynthesizer> = match settings.tts_backend {
        TtsBackend::Gtts => Arc::new(GoogleTranslateTts::new(settings.tts_lang.as_str())),
        TtsBackend::Espeak => Arc::new(EspeakSynthesizer::new(
            settings.espeak_binary.as_str(),
            settings.espeak_voice.as_str(),
        )),
    };
    let audio = Arc::new(RodioPlayer::new());
    let source = WatchedFileSource::new(
        &settings.capture_path,
        settings.capture_max_width,
        settings.jpeg_quality,
    );

    let reconciler = Reconciler::new(describe, speech, audio, settings.prompt.as_str());
    let mut session = Session::new();

    println!("glimpse — watching {} for captures", settings.capture_path);
    println!("commands: <enter> refresh, r regenerate, p replay, q quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.map_err(|e| e.to_string())? {
        let events = match line.trim() {
            "" => InputEvents::NONE,
            "r" | "regenerate" => InputEvents {
                regenerate: true,
                replay: false,
            },
            "p" | "replay" => InputEvents {
                regenerate: false,
                replay: true,
            },
            "q" | "quit" => break,
            other => {
                println!("unknown command: {}", other);
                continue;
            }
        };

        let capture = source.poll();
        let report = reconciler.run_cycle(&mut session, capture.as_ref(), events).await;
        log::debug!("cycle effects: {:?}", report.effects);

        if let Some(failure) = &report.failure {
            println!("{}", failure);
        }
        if session.description_visible {
            if let Some(text) = &session.last_description {
                println!("{}", text);
            }
        }
    }

    Ok(())
}
