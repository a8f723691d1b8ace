// audio.rs — Speaker output for synthesized clips.
//
// rodio's output stream and sink are not Send, so a dedicated playback
// thread owns them and the handle talks to it over a channel. Starting a new
// clip always replaces the current sink, so at most one clip plays at a time.

use rodio::{Decoder, OutputStream, Sink};
use std::io::Cursor;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::{self, Sender},
    Arc, Mutex,
};
use std::thread;

use crate::speech::AudioClip;

/// Error type for playback operations.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("Playback thread unavailable: {0}")]
    Unavailable(String),
}

/// Speaker-facing collaborator. `play` starts a clip; `stop_all` silences
/// everything and is always safe to call, playing or not.
pub trait AudioOutput: Send + Sync {
    fn play(&self, clip: &AudioClip) -> Result<(), AudioError>;
    fn stop_all(&self);

    /// Best-effort: true if a clip was started and not yet stopped. There is
    /// no completion callback, so a finished clip still reads as playing.
    fn is_playing(&self) -> bool;
}

enum PlaybackCommand {
    Play(Vec<u8>),
    StopAll,
}

/// rodio-backed speaker output.
pub struct RodioPlayer {
    tx: Arc<Mutex<Option<Sender<PlaybackCommand>>>>,
    playing: Arc<AtomicBool>,
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl RodioPlayer {
    pub fn new() -> Self {
        Self {
            tx: Arc::new(Mutex::new(None)),
            playing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Spawn the playback thread on first use and return its sender.
    fn ensure_thread(&self) -> Result<Sender<PlaybackCommand>, AudioError> {
        let mut guard = self
            .tx
            .lock()
            .map_err(|e| AudioError::Unavailable(e.to_string()))?;
        if let Some(tx) = guard.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<PlaybackCommand>();

        thread::Builder::new()
            .name("audio-playback".to_string())
            .spawn(move || {
                let mut _stream: Option<OutputStream> = None;
                let mut sink: Option<Sink> = None;

                fn ensure_sink(
                    stream: &mut Option<OutputStream>,
                    sink: &mut Option<Sink>,
                ) -> Result<(), String> {
                    if sink.is_none() {
                        let (s, handle) = OutputStream::try_default()
                            .map_err(|e| format!("open audio output: {}", e))?;
                        let new_sink =
                            Sink::try_new(&handle).map_err(|e| format!("create sink: {}", e))?;
                        *stream = Some(s);
                        *sink = Some(new_sink);
                    }
                    Ok(())
                }

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        PlaybackCommand::Play(bytes) => {
                            // Replace any current sink so clips never overlap.
                            if let Some(old) = sink.take() {
                                old.stop();
                            }
                            if let Err(e) = ensure_sink(&mut _stream, &mut sink) {
                                log::error!("audio output unavailable: {}", e);
                                continue;
                            }
                            match Decoder::new(Cursor::new(bytes)) {
                                Ok(source) => {
                                    if let Some(ref s) = sink {
                                        s.append(source);
                                    }
                                }
                                Err(e) => log::error!("undecodable audio clip: {}", e),
                            }
                        }
                        PlaybackCommand::StopAll => {
                            if let Some(old) = sink.take() {
                                old.stop();
                            }
                            _stream = None;
                        }
                    }
                }
            })
            .map_err(|e| AudioError::Unavailable(e.to_string()))?;

        let tx_clone = tx.clone();
        *guard = Some(tx);
        Ok(tx_clone)
    }
}

impl AudioOutput for RodioPlayer {
    fn play(&self, clip: &AudioClip) -> Result<(), AudioError> {
        let tx = self.ensure_thread()?;
        tx.send(PlaybackCommand::Play(clip.data.clone()))
            .map_err(|e| AudioError::Unavailable(e.to_string()))?;
        self.playing.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop_all(&self) {
        // Stop without spawning: nothing to silence if the thread never ran.
        if let Ok(guard) = self.tx.lock() {
            if let Some(tx) = guard.as_ref() {
                let _ = tx.send(PlaybackCommand::StopAll);
            }
        }
        self.playing.store(false, Ordering::SeqCst);
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }
}
