//! Extraction of the JSON metadata lines embedded in word-timed sources.
//!
//! Word-timed lyric text opens with a few lines of the form
//! `{"t":0,"c":[{"tx":"作词: "},{"tx":"someone"}]}` carrying credits and
//! artwork links. Malformed metadata must never abort lyric parsing, so
//! extraction is total and yields nothing on bad input.

use kashi_core::{LyricMetadata, MetadataKind};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct JsonMetadata {
    /// Time the record refers to, in milliseconds
    t: u64,
    /// Content entries
    c: Vec<JsonMetadataEntry>,
}

#[derive(Debug, Deserialize)]
struct JsonMetadataEntry {
    tx: Option<String>,
    /// Image link
    li: Option<String>,
    /// Orpheus deep link
    or: Option<String>,
}

/// Extract metadata records from a single `{`-prefixed raw line.
#[must_use]
pub fn extract_metadata(raw: &str) -> Vec<LyricMetadata> {
    let parsed: JsonMetadata = match serde_json::from_str(raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!("Discarding malformed lyric metadata line: {err}");
            return Vec::new();
        }
    };

    parsed
        .c
        .into_iter()
        .map(|entry| LyricMetadata {
            kind: MetadataKind::LyricsInfo,
            time: parsed.t,
            text: entry.tx.unwrap_or_default(),
            image_url: entry.li,
            orpheus_url: entry.or,
        })
        .collect()
}
