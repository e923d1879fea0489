//! Translation and romanization track parsers.
//!
//! Both share the line-timed timestamp-and-strip shape but keep credit
//! lines (auxiliary tracks carry no credits to filter). Translation text
//! is additionally unwrapped from the 〖〗 corner-bracket decoration some
//! sources apply.

use crate::lrc::{split_timed_line, strip_timestamps};
use kashi_core::{LyricData, LyricItem, LyricLine};

/// Parse a line-timed translation track.
#[must_use]
pub fn parse_translation(src: &str) -> LyricData {
    parse_timed_lines(src, true)
}

/// Parse a line-timed romanization track.
#[must_use]
pub fn parse_romaji(src: &str) -> LyricData {
    parse_timed_lines(src, false)
}

fn parse_timed_lines(src: &str, strip_corner_brackets: bool) -> LyricData {
    let mut lines = Vec::new();

    for raw in src.lines() {
        let Some((start_time, _)) = split_timed_line(raw) else {
            continue;
        };

        let mut text = strip_timestamps(raw);
        if strip_corner_brackets {
            text.retain(|c| c != '〖' && c != '〗');
        }
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        lines.push(LyricLine {
            items: vec![LyricItem {
                text: text.to_string(),
                start_time,
                duration: 0,
            }],
            start_time,
            duration: 0,
            original_text: text.to_string(),
        });
    }

    lines.sort_by_key(|line| line.start_time);

    LyricData::line(lines)
}
