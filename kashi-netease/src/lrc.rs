//! Line-timed lyric parser.
//!
//! One `[mm:ss.xx]text` stanza per line. Credit lines (lyricist,
//! composer, arranger, performer labels) and empty lines never reach the
//! output; malformed lines are skipped without aborting the parse.

use kashi_core::{parse_timestamp, LyricData, LyricItem, LyricLine};
use tracing::debug;

/// Labels marking credit lines that are dropped from line-timed sources
const CREDIT_MARKERS: [&str; 4] = ["作词", "作曲", "编曲", "演唱"];

/// Parse line-timed lyric text into a line sequence.
#[must_use]
pub fn parse_lrc(src: &str) -> LyricData {
    let mut lines = Vec::new();

    for raw in src.lines() {
        let Some((start_time, text)) = split_timed_line(raw) else {
            if !raw.trim().is_empty() {
                debug!("Skipping line without a timestamp: {raw}");
            }
            continue;
        };

        if CREDIT_MARKERS.iter().any(|marker| text.contains(marker)) {
            continue;
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

    // Stable sort keeps source order for equal timestamps
    lines.sort_by_key(|line| line.start_time);

    LyricData::line(lines)
}

/// Split a raw line at its first valid `[mm:ss.xx]` stamp, returning the
/// parsed milliseconds and the text after the stamp.
pub(crate) fn split_timed_line(line: &str) -> Option<(u64, &str)> {
    let mut offset = 0;
    while let Some(open) = line[offset..].find('[').map(|i| i + offset) {
        let Some(close) = line[open..].find(']').map(|i| i + open) else {
            return None;
        };
        if let Some(start_time) = parse_strict_stamp(&line[open + 1..close]) {
            return Some((start_time, &line[close + 1..]));
        }
        offset = open + 1;
    }
    None
}

/// Validate the strict `mm:ss.xx` / `mm:ss.xxx` stamp shape before
/// handing it to the time codec. Anything looser (ID tags, yrc headers)
/// is rejected here.
pub(crate) fn parse_strict_stamp(stamp: &str) -> Option<u64> {
    let (minutes, rest) = stamp.split_once(':')?;
    let (seconds, fraction) = rest.split_once('.')?;

    if minutes.len() != 2 || seconds.len() != 2 || !(2..=3).contains(&fraction.len()) {
        return None;
    }
    if ![minutes, seconds, fraction]
        .iter()
        .all(|part| part.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    parse_timestamp(stamp)
}

/// Remove every strict timestamp stamp from a line, keeping all other
/// text (including stray brackets) intact.
pub(crate) fn strip_timestamps(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(open) = rest.find('[') {
        if let Some(close) = rest[open..].find(']').map(|i| i + open) {
            if parse_strict_stamp(&rest[open + 1..close]).is_some() {
                out.push_str(&rest[..open]);
                rest = &rest[close + 1..];
                continue;
            }
        }
        out.push_str(&rest[..=open]);
        rest = &rest[open + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kashi_core::LyricKind;

    const SAMPLE: &str = "[00:24.00]なぜか悲しい\n\
[00:29.00]ことがあっても\n\
[00:34.00]笑ってみせる\n\
[00:38.00]あなたを見てた\n\
[00:46.50]\"not found...\" ah まるで\n\
[00:51.00]知らない気持ち";

    #[test]
    fn test_parse_sample() {
        let data = parse_lrc(SAMPLE);
        assert_eq!(data.kind, LyricKind::Line);
        assert_eq!(data.lines.len(), 6);
        assert_eq!(data.lines[0].original_text, "なぜか悲しい");
        assert_eq!(data.lines[0].start_time, 24_000);
        assert_eq!(data.lines[0].duration, 0);
        assert_eq!(data.lines[4].start_time, 46_500);
    }

    #[test]
    fn test_lines_sorted_by_start_time() {
        let data = parse_lrc("[00:30.00]second\n[00:10.00]first\n[00:20.00]middle");
        let starts: Vec<u64> = data.lines.iter().map(|line| line.start_time).collect();
        assert_eq!(starts, vec![10_000, 20_000, 30_000]);
    }

    #[test]
    fn test_credit_lines_dropped() {
        let data = parse_lrc("[00:00.00]作词: someone\n[00:01.00]作曲: someone\n[00:24.00]real lyric");
        assert_eq!(data.lines.len(), 1);
        assert_eq!(data.lines[0].original_text, "real lyric");
    }

    #[test]
    fn test_empty_and_untimed_lines_dropped() {
        let data = parse_lrc("[00:05.00]   \nno stamp here\n[00:10.00]kept");
        assert_eq!(data.lines.len(), 1);
        assert_eq!(data.lines[0].original_text, "kept");
    }

    #[test]
    fn test_millisecond_precision_stamp() {
        let data = parse_lrc("[00:10.254]precise");
        assert_eq!(data.lines[0].start_time, 10_254);
    }

    #[test]
    fn test_strict_stamp_rejects_id_tags_and_headers() {
        assert_eq!(parse_strict_stamp("ar:Artist"), None);
        assert_eq!(parse_strict_stamp("24790,3600"), None);
        assert_eq!(parse_strict_stamp("0:05.00"), None);
        assert_eq!(parse_strict_stamp("00:05.1"), None);
        assert_eq!(parse_strict_stamp("00:05.00"), Some(5000));
    }

    #[test]
    fn test_strip_timestamps() {
        assert_eq!(strip_timestamps("[00:24.00]text"), "text");
        assert_eq!(strip_timestamps("[00:24.00][00:30.00]twice"), "twice");
        assert_eq!(strip_timestamps("keep [brackets] too"), "keep [brackets] too");
    }
}
