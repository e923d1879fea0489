//! Conversion between textual lyric timestamps and integer milliseconds.
//!
//! Lyric sources stamp lines as `[mm:ss.xx]` (centiseconds) or
//! `[mm:ss.xxx]` (milliseconds). Parsing works on the whole millisecond
//! scale used across the crate; formatting is a display-only helper that
//! drops sub-second precision and is deliberately not round-trip exact.

/// Parse a `[mm:ss.xx]` / `[mm:ss.xxx]` timestamp into milliseconds.
///
/// Brackets are optional. A two-digit fraction is read as centiseconds,
/// anything else is padded/truncated to three digits and read as
/// milliseconds. Returns `None` for input that does not fit the shape;
/// callers that scan free-form text validate the shape first.
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<u64> {
    let cleaned = text
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']');

    let (minutes, rest) = cleaned.split_once(':')?;
    let (seconds, fraction) = match rest.split_once('.') {
        Some((seconds, fraction)) => (seconds, fraction),
        None => (rest, "0"),
    };

    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    let fraction_ms = parse_fraction(fraction)?;

    // Saturate rather than overflow on absurd minute values
    Some(
        minutes
            .saturating_mul(60)
            .saturating_add(seconds)
            .saturating_mul(1000)
            .saturating_add(fraction_ms),
    )
}

/// Two digits are centiseconds; otherwise normalize to exactly three
/// digits of milliseconds.
fn parse_fraction(fraction: &str) -> Option<u64> {
    if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    if fraction.len() == 2 {
        return fraction.parse::<u64>().ok().map(|cs| cs * 10);
    }

    let padded = format!("{fraction:0<3}");
    padded[..3].parse().ok()
}

/// Format milliseconds as `mm:ss` for display.
#[must_use]
pub fn format_timestamp(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    format!("{minutes:02}:{seconds:02}")
}
