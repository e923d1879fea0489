//! Assembly of multi-track [`LyricState`] values and display-mode control.

use crate::error::CoreError;
use crate::model::{LyricData, LyricState, LyricTrack, TrackKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// User-selected auxiliary display mode.
///
/// At most one of translation/romanization is shown alongside the
/// original text. Serializes as `none`/`translation`/`romaji` so the
/// host application can persist it in its settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LyricMode {
    /// Original text only
    #[default]
    None,
    /// Original plus translation
    Translation,
    /// Original plus romanization
    Romaji,
}

impl LyricMode {
    /// Stable string identifier, usable for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Translation => "translation",
            Self::Romaji => "romaji",
        }
    }
}

impl std::fmt::Display for LyricMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LyricMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "translation" => Ok(Self::Translation),
            "romaji" => Ok(Self::Romaji),
            _ => Err(CoreError::UnknownMode {
                mode: s.to_string(),
            }),
        }
    }
}

impl LyricState {
    /// Assemble a state from parsed line sequences.
    ///
    /// The original track is always present and enabled. Translation and
    /// romanization tracks are attached only when they parsed to at least
    /// one line, and start disabled; enabling one is a display-mode
    /// decision made later by the host.
    #[must_use]
    pub fn new(
        original: LyricData,
        translation: Option<LyricData>,
        romaji: Option<LyricData>,
    ) -> Self {
        let mut tracks = vec![LyricTrack {
            kind: TrackKind::Original,
            data: original,
            enabled: true,
        }];

        if let Some(data) = translation.filter(|d| !d.lines.is_empty()) {
            tracks.push(LyricTrack {
                kind: TrackKind::Translation,
                data,
                enabled: false,
            });
        }

        if let Some(data) = romaji.filter(|d| !d.lines.is_empty()) {
            tracks.push(LyricTrack {
                kind: TrackKind::Romaji,
                data,
                enabled: false,
            });
        }

        Self {
            current_time: 0,
            current_line_index: None,
            current_word_index: None,
            tracks,
            is_playing: false,
        }
    }

    /// State with an empty original track, used when no lyric source
    /// exists and when resetting on track change.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(LyricData::empty(), None, None)
    }

    /// Look up a track by kind
    #[must_use]
    pub fn track(&self, kind: TrackKind) -> Option<&LyricTrack> {
        self.tracks.iter().find(|track| track.kind == kind)
    }

    /// The original track. Present in every assembled state.
    #[must_use]
    pub fn original_track(&self) -> Option<&LyricTrack> {
        self.track(TrackKind::Original)
    }

    /// Whether a translation track was parsed
    #[must_use]
    pub fn has_translation(&self) -> bool {
        self.track(TrackKind::Translation).is_some()
    }

    /// Whether a romanization track was parsed
    #[must_use]
    pub fn has_romaji(&self) -> bool {
        self.track(TrackKind::Romaji).is_some()
    }

    /// Return a state with one track's enablement replaced.
    ///
    /// Unknown kinds leave the state unchanged. The receiver is never
    /// mutated; tracks are part of the state value.
    #[must_use]
    pub fn with_track_enabled(&self, kind: TrackKind, enabled: bool) -> Self {
        let mut next = self.clone();
        if let Some(track) = next.tracks.iter_mut().find(|track| track.kind == kind) {
            track.enabled = enabled;
        }
        next
    }

    /// Return a state with auxiliary-track enablement matching `mode`.
    ///
    /// The original track stays enabled in every mode.
    #[must_use]
    pub fn with_mode(&self, mode: LyricMode) -> Self {
        let mut next = self.clone();
        for track in &mut next.tracks {
            track.enabled = match track.kind {
                TrackKind::Original => true,
                TrackKind::Translation => mode == LyricMode::Translation,
                TrackKind::Romaji => mode == LyricMode::Romaji,
            };
        }
        next
    }
}

impl Default for LyricState {
    fn default() -> Self {
        Self::empty()
    }
}
