// session.rs — Durable per-user state carried across render cycles.
//
// The host framework re-runs the whole page logic on every interaction, so
// everything that must survive between interactions lives here. The core
// never touches a global: the host loads a `Session`, hands it to the
// reconciler, and stores whatever comes back.

use serde::{Deserialize, Serialize};

/// State persisted across render cycles for one user.
///
/// Invariants maintained by the reconciler:
/// * `description_visible` is true only while `last_description` is set.
/// * `last_fingerprint` is set iff a describe cycle for that exact image has
///   been attempted (success or failure). It is never set before the attempt,
///   so each distinct captured image is described at most once per session
///   unless the user explicitly resets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Fingerprint of the most recent image that already went through a
    /// describe cycle.
    pub last_fingerprint: Option<String>,
    /// Most recent successful description text.
    pub last_description: Option<String>,
    /// Whether the description should be rendered this cycle.
    pub description_visible: bool,
    /// Best-effort belief that audio is currently playing. There is no
    /// reliable end-of-playback signal, so this may be stale; the reconciler
    /// stops playback unconditionally before starting new audio regardless.
    pub audio_playing: bool,
    /// One-shot request to replay cached audio on the next cycle, for hosts
    /// that must defer a replay press instead of delivering it as an event.
    /// Consumed at the start of reconciliation.
    pub pending_replay: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when a cached description exists to replay or redisplay.
    pub fn has_replay_target(&self) -> bool {
        self.last_description.is_some()
    }

    /// Drop the cached description and hide it. Used by the reset branch and
    /// at the start of a fresh describe cycle.
    pub fn clear_description(&mut self) {
        self.last_description = None;
        self.description_visible = false;
    }
}

/// Button-press events delivered by the host for exactly one render cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputEvents {
    /// "Regenerate" — forget the processed image and start over.
    pub regenerate: bool,
    /// "Replay" — speak the cached description again.
    pub replay: bool,
}

impl InputEvents {
    pub const NONE: InputEvents = InputEvents {
        regenerate: false,
        replay: false,
    };
}
