// reconciler.rs — Orchestrates one render cycle: decide whether to describe
// a new image, replay cached audio, reset, or do nothing, then execute that
// decision against the describe → speech → playback collaborators.
//
// The decision step is a pure function of (session, capture, events); all
// side effects happen in `Reconciler::run_cycle`, which records them in
// order so the host (and the tests) can see exactly what a cycle did.

use std::sync::Arc;

use crate::audio::{AudioError, AudioOutput};
use crate::capture::ImageBlob;
use crate::describe::{DescribeError, DescribeService};
use crate::session::{InputEvents, Session};
use crate::speech::{SpeechError, SpeechSynthesizer};

/// What a render cycle decided to do. First matching branch wins:
/// reset, then new image, then replay, then steady.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Regenerate pressed: stop audio and forget the processed image.
    Reset,
    /// Capture reported an unseen fingerprint: run a describe-and-speak cycle.
    Describe {
        blob: ImageBlob,
        fingerprint: String,
    },
    /// Replay pressed (or carried over) with a cached description.
    Replay { text: String },
    /// Nothing to do; redisplay cached state as-is.
    Steady,
}

/// Pure decision step. Deterministic and side-effect free: the same
/// (session, capture, events) always yields the same decision.
///
/// A replay press with no cached description is dropped — there is nothing
/// to replay, so the cycle is steady.
pub fn decide(session: &Session, capture: Option<&ImageBlob>, events: InputEvents) -> Decision {
    if events.regenerate {
        return Decision::Reset;
    }

    if let Some(blob) = capture {
        let fingerprint = blob.fingerprint();
        if session.last_fingerprint.as_deref() != Some(fingerprint.as_str()) {
            return Decision::Describe {
                blob: blob.clone(),
                fingerprint,
            };
        }
    }

    if events.replay || session.pending_replay {
        if let Some(text) = &session.last_description {
            return Decision::Replay { text: text.clone() };
        }
    }

    Decision::Steady
}

/// One executed collaborator call, recorded in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Describe { fingerprint: String },
    StopAllAudio,
    Speak { text: String },
    Play,
}

/// First failure of the cycle, formatted for the user. A failure aborts the
/// rest of the cycle's effect sequence but never unwinds past this boundary.
#[derive(Debug, thiserror::Error)]
pub enum CycleFailure {
    #[error("Error generating description: {0}")]
    Describe(#[from] DescribeError),
    #[error("Error generating audio: {0}")]
    Speech(#[from] SpeechError),
    #[error("Error playing audio: {0}")]
    Playback(#[from] AudioError),
}

/// What one render cycle did.
#[derive(Debug, Default)]
pub struct CycleReport {
    pub effects: Vec<Effect>,
    pub failure: Option<CycleFailure>,
}

/// Executes render cycles against the configured collaborators.
pub struct Reconciler {
    describe: Arc<dyn DescribeService>,
    speech: Arc<dyn SpeechSynthesizer>,
    audio: Arc<dyn AudioOutput>,
    prompt: String,
}

impl Reconciler {
    pub fn new(
        describe: Arc<dyn DescribeService>,
        speech: Arc<dyn SpeechSynthesizer>,
        audio: Arc<dyn AudioOutput>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            describe,
            speech,
            audio,
            prompt: prompt.into(),
        }
    }

    /// Run one render cycle. Mutates `session` in place and returns the
    /// ordered effect list plus any surfaced failure.
    ///
    /// Effects resolve synchronously within the cycle: a `Describe` or
    /// `Speak` call is awaited before the next state transition, so there is
    /// never more than one in-flight request per session.
    pub async fn run_cycle(
        &self,
        session: &mut Session,
        capture: Option<&ImageBlob>,
        events: InputEvents,
    ) -> CycleReport {
        let decision = decide(session, capture, events);
        // One-shot: a carried replay request is consumed by this cycle no
        // matter which branch won.
        session.pending_replay = false;

        let mut report = CycleReport::default();

        match decision {
            Decision::Steady => {}
            Decision::Reset => {
                self.stop_audio(session, &mut report);
                session.last_fingerprint = None;
                session.clear_description();
                log::info!("session reset; awaiting a fresh capture");
            }
            Decision::Describe { blob, fingerprint } => {
                // Record the attempt before issuing it, so a broken image is
                // described once and not retried on every re-render.
                session.last_fingerprint = Some(fingerprint.clone());
                session.clear_description();
                report.effects.push(Effect::Describe {
                    fingerprint: fingerprint.clone(),
                });

                match self.describe.describe(&blob, &self.prompt).await {
                    Ok(text) => {
                        log::info!(
                            "{}: new image {} described ({} chars)",
                            self.describe.name(),
                            &fingerprint[..12.min(fingerprint.len())],
                            text.len()
                        );
                        session.last_description = Some(text.clone());
                        session.description_visible = true;
                        self.speak(&text, session, &mut report).await;
                    }
                    Err(e) => {
                        log::error!("describe failed for image {}: {}", fingerprint, e);
                        report.failure = Some(CycleFailure::Describe(e));
                    }
                }
            }
            Decision::Replay { text } => {
                self.speak(&text, session, &mut report).await;
            }
        }

        report
    }

    /// Synthesize `text` and start playback: StopAllAudio, Speak, Play.
    /// A synthesis or playback failure leaves the cached description intact
    /// so a later replay can retry speech alone.
    async fn speak(&self, text: &str, session: &mut Session, report: &mut CycleReport) {
        self.stop_audio(session, report);
        report.effects.push(Effect::Speak {
            text: text.to_string(),
        });

        match self.speech.synthesize(text).await {
            Ok(clip) => match self.audio.play(&clip) {
                Ok(()) => {
                    session.audio_playing = true;
                    report.effects.push(Effect::Play);
                }
                Err(e) => {
                    log::error!("playback failed: {}", e);
                    report.failure = Some(CycleFailure::Playback(e));
                }
            },
            Err(e) => {
                log::error!("{}: synthesis failed: {}", self.speech.name(), e);
                report.failure = Some(CycleFailure::Speech(e));
            }
        }
    }

    /// Stop playback unconditionally before starting new audio. The playing
    /// flag is best-effort, so over-stopping is the safe default.
    fn stop_audio(&self, session: &mut Session, report: &mut CycleReport) {
        self.audio.stop_all();
        session.audio_playing = false;
        report.effects.push(Effect::StopAllAudio);
    }
}
