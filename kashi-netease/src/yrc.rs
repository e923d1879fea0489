//! Word-timed (karaoke) lyric parser.
//!
//! Each lyric line is `[lineStart,lineDuration]` followed by repeated
//! `(wordStart,wordDuration,0)text` tokens, all times in milliseconds.
//! Lines beginning with `{` carry embedded JSON metadata and are routed
//! to the metadata extractor instead.

use crate::metadata;
use kashi_core::{LyricData, LyricItem, LyricLine, LyricMetadata};
use tracing::debug;

/// Parse word-timed lyric text into a line sequence plus the metadata
/// records embedded in it.
#[must_use]
pub fn parse_yrc(src: &str) -> (LyricData, Vec<LyricMetadata>) {
    let mut lines = Vec::new();
    let mut metadata = Vec::new();

    for raw in src.lines() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with('{') {
            metadata.extend(metadata::extract_metadata(trimmed));
            continue;
        }

        if let Some(line) = parse_line(trimmed) {
            lines.push(line);
        } else {
            debug!("Skipping malformed word-timed line: {trimmed}");
        }
    }

    lines.sort_by_key(|line| line.start_time);

    (LyricData::word(lines), metadata)
}

/// Parse the `[start,duration]` line header, returning the consumed byte
/// count and the two values.
fn parse_header(src: &str) -> Option<(usize, u64, u64)> {
    if !src.starts_with('[') {
        return None;
    }

    let close = src.find(']')?;
    let (start, duration) = src[1..close].split_once(',')?;

    Some((close + 1, start.parse().ok()?, duration.parse().ok()?))
}

/// Parse a `(start,duration,flag)` word token, returning the consumed
/// byte count and the timing values. The third field is always 0 in
/// upstream data and is ignored.
fn parse_word_token(src: &str) -> Option<(usize, u64, u64)> {
    if !src.starts_with('(') {
        return None;
    }

    let close = src.find(')')?;
    let mut parts = src[1..close].split(',');
    let start = parts.next()?.parse().ok()?;
    let duration = parts.next()?.parse().ok()?;
    let _flag: u64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    Some((close + 1, start, duration))
}

/// Byte offset of the next valid word token at or after `from`, or the
/// end of the content. A bare `(` inside sung text is not a boundary.
fn next_token_start(content: &str, from: usize) -> usize {
    let mut search = from;
    while let Some(open) = content[search..].find('(').map(|i| i + search) {
        if parse_word_token(&content[open..]).is_some() {
            return open;
        }
        search = open + 1;
    }
    content.len()
}

/// Scan a line's content for word tokens. Token text runs to the next
/// valid token (or end of line) and keeps its whitespace; tokens with
/// empty text are dropped.
fn parse_words(content: &str) -> Vec<LyricItem> {
    let mut items = Vec::new();
    let mut pos = 0;

    while pos < content.len() {
        if let Some((consumed, start_time, duration)) = parse_word_token(&content[pos..]) {
            pos += consumed;

            let end = next_token_start(content, pos);
            let text = &content[pos..end];
            if !text.is_empty() {
                items.push(LyricItem {
                    text: text.to_string(),
                    start_time,
                    duration,
                });
            }

            pos = end;
        } else {
            // Not a token boundary: skip one character
            match content[pos..].chars().next() {
                Some(c) => pos += c.len_utf8(),
                None => break,
            }
        }
    }

    items
}

fn parse_line(line: &str) -> Option<LyricLine> {
    let (consumed, start_time, header_duration) = parse_header(line)?;
    let content = &line[consumed..];

    let items = parse_words(content);
    let last_end = items.last()?.end_time();

    // Some sources declare a header duration that stops at the last word
    // instead of covering trailing silence before the next line, which
    // would drop the focused line early. The header is a floor: extend it
    // to at least the last word's end.
    let duration = header_duration.max(last_end.saturating_sub(start_time));

    // Flattened fallback text must never leak token syntax
    let text: String = items.iter().map(|item| item.text.as_str()).collect();
    let trimmed = text.trim();
    let original_text = if trimmed.is_empty() {
        content.to_string()
    } else {
        trimmed.to_string()
    };

    Some(LyricLine {
        items,
        start_time,
        duration,
        original_text,
    })
}
