//! Lyric data model shared by the format parsers and the sync engine.
//!
//! Everything is plain owned data on an integer millisecond scale. Parsed
//! lines are treated as read-only once built; the sync engine replaces
//! whole [`LyricState`] values instead of mutating them in place.

use serde::{Deserialize, Serialize};

/// Atomic timed unit of text: a word for word-timed sources, an entire
/// line for line-timed sources.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricItem {
    /// Text content. Trailing whitespace is preserved for rendering.
    pub text: String,
    /// Start time in milliseconds
    pub start_time: u64,
    /// Duration in milliseconds; 0 means unknown, bounded by the next
    /// item or line
    pub duration: u64,
}

impl LyricItem {
    /// End time of the item in milliseconds, saturating at `u64::MAX`
    #[must_use]
    pub const fn end_time(&self) -> u64 {
        self.start_time.saturating_add(self.duration)
    }
}

/// A single lyric line: ordered items plus derived line timing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricLine {
    /// Items ordered by non-decreasing start time
    pub items: Vec<LyricItem>,
    /// Start time of the first item, in milliseconds
    pub start_time: u64,
    /// Line duration in milliseconds. May extend past the last word's end
    /// when the source header declares trailing silence; 0 means unknown,
    /// bounded by the next line.
    pub duration: u64,
    /// Flattened human-readable text, free of timing-marker syntax
    pub original_text: String,
}

impl LyricLine {
    /// End time of the line in milliseconds, saturating at `u64::MAX`
    #[must_use]
    pub const fn end_time(&self) -> u64 {
        self.start_time.saturating_add(self.duration)
    }

    /// Concatenated item texts
    #[must_use]
    pub fn text(&self) -> String {
        self.items.iter().map(|item| item.text.as_str()).collect()
    }
}

/// Timing granularity of a parsed lyric source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LyricKind {
    /// One timestamp per full line of text
    Line,
    /// A timestamp and duration per individual word (karaoke)
    Word,
}

/// A parsed line sequence with its timing granularity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricData {
    pub kind: LyricKind,
    pub lines: Vec<LyricLine>,
}

impl LyricData {
    /// Line-timed data
    #[must_use]
    pub const fn line(lines: Vec<LyricLine>) -> Self {
        Self {
            kind: LyricKind::Line,
            lines,
        }
    }

    /// Word-timed data
    #[must_use]
    pub const fn word(lines: Vec<LyricLine>) -> Self {
        Self {
            kind: LyricKind::Word,
            lines,
        }
    }

    /// Line-timed data with no lines
    #[must_use]
    pub const fn empty() -> Self {
        Self::line(Vec::new())
    }
}

/// Identifies one parallel lyric stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackKind {
    /// The sung text itself
    Original,
    /// Translated text aligned to the original lines
    Translation,
    /// Romanized text aligned to the original lines
    Romaji,
}

impl TrackKind {
    /// Stable string identifier, usable for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Translation => "translation",
            Self::Romaji => "romaji",
        }
    }
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TrackKind {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "original" => Ok(Self::Original),
            "translation" => Ok(Self::Translation),
            "romaji" => Ok(Self::Romaji),
            _ => Err(crate::error::CoreError::UnknownTrackKind {
                kind: s.to_string(),
            }),
        }
    }
}

/// One lyric stream plus its display enablement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricTrack {
    pub kind: TrackKind,
    pub data: LyricData,
    pub enabled: bool,
}

/// Category of an embedded metadata record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataKind {
    /// Credits embedded in the lyric stream (lyricist, composer, ...)
    LyricsInfo,
    /// Production staff information
    Production,
    /// Anything else
    Other,
}

/// A credit/annotation record extracted from a word-timed source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricMetadata {
    pub kind: MetadataKind,
    /// Time the record refers to, in milliseconds
    pub time: u64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orpheus_url: Option<String>,
}

/// The aggregate lyric state driven by the playback clock.
///
/// Created by the assembler on a successful parse, replaced wholesale on
/// track/song change, and advanced only through the pure sync transform
/// so the line/word indices always agree with `current_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricState {
    /// Current playback time in milliseconds
    pub current_time: u64,
    /// Focused line in the original track, if any
    pub current_line_index: Option<usize>,
    /// Focused word within the focused line, if any
    pub current_word_index: Option<usize>,
    pub tracks: Vec<LyricTrack>,
    pub is_playing: bool,
}

/// Which source format produced a parse result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Word-timed karaoke source
    Yrc,
    /// Line-timed source
    Lrc,
    /// No usable source text
    None,
}

/// Output of a single parse call over a raw lyric payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricParseResult {
    pub state: LyricState,
    pub metadata: Vec<LyricMetadata>,
    pub is_instrumental: bool,
    pub source: SourceKind,
}
