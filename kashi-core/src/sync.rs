//! Mapping a playback timestamp to the focused line and word.
//!
//! All functions here are pure: they take a [`LyricState`] value and
//! return derived values or a new state, so the host can call them from
//! its render tick at high frequency without ordering concerns.

use crate::model::{LyricItem, LyricLine, LyricState, TrackKind};

/// Flattened text per enabled track for the focused line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CurrentLyrics {
    pub original: Option<String>,
    pub translation: Option<String>,
    pub romaji: Option<String>,
}

/// Split of the focused line into already-sung and remaining text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KaraokeProgress {
    pub highlighted: String,
    pub remaining: String,
    pub highlighted_count: usize,
    pub total_count: usize,
}

/// Timing and text of a line neighboring the focused one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInfo {
    pub start_time: u64,
    pub end_time: u64,
    pub text: String,
}

/// End of a line's interval for focus purposes.
///
/// Line-timed sources parse with `duration == 0`, so the next line's
/// start bounds them implicitly; a last line with unknown duration
/// extends forever.
fn effective_end_time(line: &LyricLine, next_start: Option<u64>) -> u64 {
    if line.duration > 0 {
        line.end_time()
    } else {
        next_start.unwrap_or(u64::MAX)
    }
}

/// First item whose end lies past `time`, else the last item.
fn word_at(line: &LyricLine, time: u64) -> Option<usize> {
    for (index, item) in line.items.iter().enumerate() {
        if time < item.end_time() {
            return Some(index);
        }
    }
    line.items.len().checked_sub(1)
}

impl LyricState {
    /// Compute the state for playback time `time` (milliseconds).
    ///
    /// Binary-searches the original track for the line whose interval
    /// contains `time`, then scans that line for the current word. Two
    /// policies keep a line focused across the quiet spots that
    /// word-timed sources leave between lines:
    ///
    /// - trailing gap: past the last word's end but before the next
    ///   line's start, the line stays focused with the word pinned to
    ///   the last item;
    /// - hold-over: when no interval contains `time`, the previously
    ///   focused line is kept while `time` is at/after its start and
    ///   strictly before the next line's start (or at/after its end
    ///   when it is the last line).
    ///
    /// Repeated application with the same `time` is idempotent.
    #[must_use]
    pub fn sync_to(&self, time: u64) -> Self {
        let mut line_index = None;
        let mut word_index = None;

        if let Some(track) = self.original_track() {
            let lines = &track.data.lines;

            if !lines.is_empty() {
                let mut left = 0usize;
                let mut right = lines.len() - 1;

                while left <= right {
                    let mid = (left + right) / 2;
                    let line = &lines[mid];
                    let next_start = lines.get(mid + 1).map(|next| next.start_time);
                    let line_end = effective_end_time(line, next_start);

                    if time >= line.start_time && time < line_end {
                        line_index = Some(mid);
                        word_index = word_at(line, time);

                        // Trailing gap inside the line's own interval:
                        // keep the last word highlighted until the next
                        // line actually starts.
                        if let (Some(last), Some(next_start)) = (line.items.last(), next_start) {
                            if time >= last.end_time() && time < next_start {
                                word_index = line.items.len().checked_sub(1);
                            }
                        }

                        break;
                    }

                    if time < line.start_time {
                        if mid == 0 {
                            break;
                        }
                        right = mid - 1;
                    } else {
                        left = mid + 1;
                    }
                }

                // Hold-over: the search missed (a genuine gap), so keep
                // the previously focused line until the next one begins.
                if line_index.is_none() {
                    if let Some(previous) = self.current_line_index {
                        if let Some(line) = lines.get(previous) {
                            let next_start = lines.get(previous + 1).map(|next| next.start_time);
                            let held = time >= line.start_time
                                && match next_start {
                                    Some(next_start) => time < next_start,
                                    None => time >= line.end_time(),
                                };
                            if held {
                                line_index = Some(previous);
                                word_index = line.items.len().checked_sub(1);
                            }
                        }
                    }
                }
            }
        }

        Self {
            current_time: time,
            current_line_index: line_index,
            current_word_index: word_index,
            tracks: self.tracks.clone(),
            is_playing: self.is_playing,
        }
    }

    /// Alias of [`sync_to`](Self::sync_to) for seek semantics.
    #[must_use]
    pub fn seek_to_time(&self, time: u64) -> Self {
        self.sync_to(time)
    }

    /// Jump to a line's start, clearing the word focus.
    ///
    /// Out-of-range indices return the state unchanged.
    #[must_use]
    pub fn seek_to_line(&self, index: usize) -> Self {
        let Some(line) = self
            .original_track()
            .and_then(|track| track.data.lines.get(index))
        else {
            return self.clone();
        };

        let mut next = self.clone();
        next.current_time = line.start_time;
        next.current_line_index = Some(index);
        next.current_word_index = None;
        next
    }

    /// Flattened text of the focused line for every enabled track.
    #[must_use]
    pub fn current_lyrics(&self) -> CurrentLyrics {
        let mut result = CurrentLyrics::default();
        let Some(line_index) = self.current_line_index else {
            return result;
        };

        for track in &self.tracks {
            if !track.enabled {
                continue;
            }
            let Some(line) = track.data.lines.get(line_index) else {
                continue;
            };
            let text = line.text();
            match track.kind {
                TrackKind::Original => result.original = Some(text),
                TrackKind::Translation => result.translation = Some(text),
                TrackKind::Romaji => result.romaji = Some(text),
            }
        }

        result
    }

    /// Elapsed fraction of the focused line at `time`, clamped to [0, 1].
    /// 0 when no line is focused.
    #[must_use]
    pub fn highlight_progress(&self, time: u64) -> f32 {
        let Some(line) = self.focused_line() else {
            return 0.0;
        };
        if line.items.is_empty() {
            return 0.0;
        }
        if line.duration == 0 {
            return if time > line.start_time { 1.0 } else { 0.0 };
        }

        let elapsed = time.saturating_sub(line.start_time).min(line.duration);
        #[allow(clippy::cast_precision_loss)]
        let progress = elapsed as f32 / line.duration as f32;
        progress.clamp(0.0, 1.0)
    }

    /// Split the focused line into sung and remaining text at
    /// `current_time`, for the letter-by-letter color sweep.
    #[must_use]
    pub fn karaoke_progress(&self) -> KaraokeProgress {
        let Some(line) = self.focused_line() else {
            return KaraokeProgress::default();
        };

        let mut progress = KaraokeProgress {
            total_count: line.items.len(),
            ..KaraokeProgress::default()
        };

        for item in &line.items {
            if self.current_time >= item.end_time() {
                progress.highlighted.push_str(&item.text);
                progress.highlighted_count += 1;
            } else {
                progress.remaining.push_str(&item.text);
            }
        }

        progress
    }

    /// Indices of fully-sung words in the focused line, excluding the
    /// in-progress word.
    #[must_use]
    pub fn highlighted_word_indices(&self) -> Vec<usize> {
        let (Some(line), Some(word_index)) = (self.focused_line(), self.current_word_index) else {
            return Vec::new();
        };

        line.items
            .iter()
            .take(word_index + 1)
            .enumerate()
            .filter(|(_, item)| self.current_time >= item.end_time())
            .map(|(index, _)| index)
            .collect()
    }

    /// Item timings for an arbitrary line of the original track.
    #[must_use]
    pub fn line_word_timings(&self, index: usize) -> &[LyricItem] {
        self.original_track()
            .and_then(|track| track.data.lines.get(index))
            .map_or(&[], |line| line.items.as_slice())
    }

    /// The line after the focused one, or the first line when nothing is
    /// focused yet.
    #[must_use]
    pub fn next_line_info(&self) -> Option<LineInfo> {
        let next_index = self.current_line_index.map_or(0, |index| index + 1);
        self.line_info(next_index)
    }

    /// The line before the focused one
    #[must_use]
    pub fn previous_line_info(&self) -> Option<LineInfo> {
        let previous = self.current_line_index?.checked_sub(1)?;
        self.line_info(previous)
    }

    fn line_info(&self, index: usize) -> Option<LineInfo> {
        let line = self
            .original_track()
            .and_then(|track| track.data.lines.get(index))?;
        Some(LineInfo {
            start_time: line.start_time,
            end_time: line.end_time(),
            text: line.text(),
        })
    }

    fn focused_line(&self) -> Option<&LyricLine> {
        let index = self.current_line_index?;
        self.original_track()
            .and_then(|track| track.data.lines.get(index))
    }
}
