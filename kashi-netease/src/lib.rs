//! Parsers for the Netease Cloud Music lyric payload.
//!
//! A song's lyric payload carries up to six raw text fields: a
//! word-timed karaoke source (`yrc`), a line-timed source (`lrc`), and
//! line-timed translation/romanization tracks. [`parse`] turns a payload
//! into the unified multi-track [`LyricState`] that the sync engine in
//! `kashi-core` drives against the playback clock.
//!
//! Parsing is total: malformed fragments are dropped at the smallest
//! possible granularity and an empty payload resolves to a valid empty
//! state, never an error.

pub mod auxiliary;
pub mod lrc;
pub mod metadata;
pub mod response;
pub mod yrc;

pub use auxiliary::{parse_romaji, parse_translation};
pub use lrc::parse_lrc;
pub use metadata::extract_metadata;
pub use response::{LyricBlob, RawLyricResponse};
pub use yrc::parse_yrc;

use kashi_core::{LyricData, LyricLine, LyricParseResult, LyricState, SourceKind};
use tracing::debug;

/// Labels that mark a line as credits rather than singable content
const INSTRUMENTAL_MARKERS: [&str; 4] = ["作词", "作曲", "编曲", "制作"];

/// Items shorter than this are metadata-like rather than sung words
const METADATA_MAX_ITEM_DURATION_MS: u64 = 50;

/// Parse a raw lyric payload into a multi-track lyric state.
///
/// The word-timed source wins when it has text; the line-timed source is
/// the fallback; with neither, the result is an empty original track
/// flagged as instrumental. Translation/romanization tracks are attached
/// whichever primary source was used.
#[must_use]
pub fn parse(raw: &RawLyricResponse) -> LyricParseResult {
    let translation = raw.translation_text().map(parse_translation);
    let romaji = raw.romaji_text().map(parse_romaji);

    if let Some(text) = raw.yrc_text() {
        let (data, metadata) = parse_yrc(text);
        debug!(
            lines = data.lines.len(),
            metadata = metadata.len(),
            "Parsed word-timed lyric source"
        );
        let is_instrumental = is_instrumental(&data);
        return LyricParseResult {
            state: LyricState::new(data, translation, romaji),
            metadata,
            is_instrumental,
            source: SourceKind::Yrc,
        };
    }

    if let Some(text) = raw.lrc_text() {
        let data = parse_lrc(text);
        debug!(lines = data.lines.len(), "Parsed line-timed lyric source");
        let is_instrumental = is_instrumental(&data);
        return LyricParseResult {
            state: LyricState::new(data, translation, romaji),
            metadata: Vec::new(),
            is_instrumental,
            source: SourceKind::Lrc,
        };
    }

    debug!("No usable lyric source in payload");
    LyricParseResult {
        state: LyricState::empty(),
        metadata: Vec::new(),
        is_instrumental: true,
        source: SourceKind::None,
    }
}

/// Whether a line sequence has no singable content: empty, or every item
/// blank or a credit label.
#[must_use]
pub fn is_instrumental(data: &LyricData) -> bool {
    if data.lines.is_empty() {
        return true;
    }

    data.lines.iter().all(|line| {
        line.items.iter().all(|item| {
            item.text.trim().is_empty()
                || INSTRUMENTAL_MARKERS
                    .iter()
                    .any(|marker| item.text.contains(marker))
        })
    })
}

/// Heuristic for ultra-short "metadata-like" lines: every item shorter
/// than 50ms. Exposed as a utility; parsing never applies it.
#[must_use]
pub fn is_metadata_line(line: &LyricLine) -> bool {
    !line.items.is_empty()
        && line
            .items
            .iter()
            .all(|item| item.duration < METADATA_MAX_ITEM_DURATION_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kashi_core::{LyricItem, LyricKind, TrackKind};

    const LRC_SAMPLE: &str = "[00:24.00]なぜか悲しい\n\
[00:29.00]ことがあっても\n\
[00:34.00]笑ってみせる";

    const TRANSLATION_SAMPLE: &str = "[00:24.00]〖我不懂为什么〗\n\
[00:29.00]〖即使你在感到〗";

    const YRC_WITH_METADATA: &str = "\
{\"t\":0,\"c\":[{\"tx\":\"作词: \"},{\"tx\":\"someone\"}]}\n\
{\"t\":1000,\"c\":[{\"tx\":\"作曲: \"},{\"tx\":\"someone\"}]}\n\
[28410,4320](28410,270,0)女(28680,180,0)孩(28860,150,0)你(29010,240,0)为(29250,300,0)何\n\
[32950,4380](32950,300,0)马(33250,200,0)戏(33450,120,0)团";

    fn blob(lyric: &str) -> Option<LyricBlob> {
        Some(LyricBlob {
            version: 1,
            lyric: lyric.to_string(),
        })
    }

    #[test]
    fn test_parse_prefers_word_timed_source() {
        let raw = RawLyricResponse {
            lrc: blob(LRC_SAMPLE),
            yrc: blob(YRC_WITH_METADATA),
            ..RawLyricResponse::default()
        };

        let result = parse(&raw);
        assert_eq!(result.source, SourceKind::Yrc);
        let original = result.state.original_track().unwrap();
        assert_eq!(original.data.kind, LyricKind::Word);
        assert_eq!(original.data.lines.len(), 2);
        assert_eq!(result.metadata.len(), 4);
        assert!(!result.is_instrumental);
    }

    #[test]
    fn test_parse_falls_back_to_line_timed_source() {
        let raw = RawLyricResponse {
            lrc: blob(LRC_SAMPLE),
            tlyric: blob(TRANSLATION_SAMPLE),
            ..RawLyricResponse::default()
        };

        let result = parse(&raw);
        assert_eq!(result.source, SourceKind::Lrc);
        assert!(!result.is_instrumental);
        assert!(result.metadata.is_empty());

        let state = &result.state;
        assert_eq!(state.tracks.len(), 2);
        assert!(state.has_translation());
        assert!(!state.track(TrackKind::Translation).unwrap().enabled);
        assert_eq!(
            state.track(TrackKind::Translation).unwrap().data.lines[0].original_text,
            "我不懂为什么"
        );
    }

    #[test]
    fn test_parse_empty_payload_is_instrumental() {
        let raw = RawLyricResponse {
            lrc: blob(""),
            ..RawLyricResponse::default()
        };

        let result = parse(&raw);
        assert_eq!(result.source, SourceKind::None);
        assert!(result.is_instrumental);
        assert!(result.state.original_track().unwrap().data.lines.is_empty());
    }

    #[test]
    fn test_parse_credit_only_lrc_is_instrumental() {
        let raw = RawLyricResponse {
            // The parser drops credit lines, leaving nothing singable
            lrc: blob("[00:00.00]作词: someone\n[00:01.00]编曲: someone\n[00:02.00]   "),
            ..RawLyricResponse::default()
        };

        let result = parse(&raw);
        assert_eq!(result.source, SourceKind::Lrc);
        assert!(result.is_instrumental);
    }

    #[test]
    fn test_end_to_end_line_sync() {
        let raw = RawLyricResponse {
            lrc: blob("[00:24.00]a\n[00:29.00]b"),
            ..RawLyricResponse::default()
        };
        let state = parse(&raw).state;

        assert_eq!(state.sync_to(26_000).current_line_index, Some(0));
        assert_eq!(state.sync_to(29_500).current_line_index, Some(1));
        assert_eq!(state.sync_to(10_000).current_line_index, None);
    }

    #[test]
    fn test_end_to_end_karaoke_sync() {
        let raw = RawLyricResponse {
            yrc: blob(YRC_WITH_METADATA),
            ..RawLyricResponse::default()
        };
        let state = parse(&raw).state;

        let synced = state.sync_to(28_900);
        assert_eq!(synced.current_line_index, Some(0));
        // 女 ends 28680, 孩 ends 28860, 你 is in progress
        assert_eq!(synced.current_word_index, Some(2));

        let progress = synced.karaoke_progress();
        assert_eq!(progress.highlighted, "女孩");
        assert_eq!(progress.remaining, "你为何");

        // Between the first line's end (32730) and the second line's
        // start (32950) the first line holds focus.
        let synced = synced.sync_to(32_800);
        assert_eq!(synced.current_line_index, Some(0));
        assert_eq!(synced.current_word_index, Some(4));
    }

    #[test]
    fn test_is_instrumental() {
        assert!(is_instrumental(&LyricData::empty()));
        assert!(!is_instrumental(&parse_lrc(LRC_SAMPLE)));
        assert!(is_instrumental(&parse_translation("[00:00.00]作曲: x")));
    }

    #[test]
    fn test_is_metadata_line() {
        let metadata_like = LyricLine {
            items: vec![
                LyricItem {
                    text: "a".to_string(),
                    start_time: 0,
                    duration: 10,
                },
                LyricItem {
                    text: "b".to_string(),
                    start_time: 10,
                    duration: 49,
                },
            ],
            start_time: 0,
            duration: 59,
            original_text: "ab".to_string(),
        };
        assert!(is_metadata_line(&metadata_like));

        let sung = LyricLine {
            items: vec![LyricItem {
                text: "word".to_string(),
                start_time: 0,
                duration: 300,
            }],
            start_time: 0,
            duration: 300,
            original_text: "word".to_string(),
        };
        assert!(!is_metadata_line(&sung));

        let empty = LyricLine::default();
        assert!(!is_metadata_line(&empty));
    }
}
