//! Typed view of the raw lyric API payload.
//!
//! The Netease lyric endpoint returns up to six text fields, each a
//! `{ "lyric": "...", "version": n }` object or null. Which fields carry
//! usable text varies per song; the entry point in [`crate::parse`]
//! decides precedence.

use kashi_core::Result;
use serde::Deserialize;

/// One raw lyric text field with its revision number
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LyricBlob {
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub lyric: String,
}

impl LyricBlob {
    /// Whether the field carries non-whitespace text
    #[must_use]
    pub fn has_text(&self) -> bool {
        !self.lyric.trim().is_empty()
    }
}

/// The raw lyric payload, as fetched by the host application.
///
/// Unknown sibling fields in the API response (contributor records,
/// status flags) are ignored by serde.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLyricResponse {
    /// Line-timed original lyric
    pub lrc: Option<LyricBlob>,
    /// Line-timed translation
    pub tlyric: Option<LyricBlob>,
    /// Line-timed romanization
    pub romalrc: Option<LyricBlob>,
    /// Word-timed (karaoke) original lyric
    pub yrc: Option<LyricBlob>,
    /// Translation aligned to the word-timed lyric
    pub ytlrc: Option<LyricBlob>,
    /// Romanization aligned to the word-timed lyric
    pub yromalrc: Option<LyricBlob>,
}

impl RawLyricResponse {
    /// Deserialize a raw lyric API JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`kashi_core::CoreError::ResponseParse`] when the document
    /// is not valid JSON of this shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Word-timed source text, if present and non-empty
    #[must_use]
    pub fn yrc_text(&self) -> Option<&str> {
        Self::present(self.yrc.as_ref())
    }

    /// Line-timed source text, if present and non-empty
    #[must_use]
    pub fn lrc_text(&self) -> Option<&str> {
        Self::present(self.lrc.as_ref())
    }

    /// Translation text, if present and non-empty
    #[must_use]
    pub fn translation_text(&self) -> Option<&str> {
        Self::present(self.tlyric.as_ref())
    }

    /// Romanization text, if present and non-empty
    #[must_use]
    pub fn romaji_text(&self) -> Option<&str> {
        Self::present(self.romalrc.as_ref())
    }

    fn present(field: Option<&LyricBlob>) -> Option<&str> {
        field
            .filter(|blob| blob.has_text())
            .map(|blob| blob.lyric.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_full_payload() {
        let json = r#"{
            "sgc": false,
            "lrc": { "version": 7, "lyric": "[00:24.00]line" },
            "tlyric": { "version": 2, "lyric": "[00:24.00]translated" },
            "romalrc": null,
            "yrc": { "version": 26, "lyric": "[0,1000](0,500,0)word" },
            "ytlrc": null,
            "yromalrc": null,
            "code": 200
        }"#;

        let raw = RawLyricResponse::from_json(json).unwrap();
        assert_eq!(raw.lrc_text(), Some("[00:24.00]line"));
        assert_eq!(raw.translation_text(), Some("[00:24.00]translated"));
        assert_eq!(raw.romaji_text(), None);
        assert_eq!(raw.yrc_text(), Some("[0,1000](0,500,0)word"));
        assert_eq!(raw.lrc.as_ref().map(|blob| blob.version), Some(7));
    }

    #[test]
    fn test_from_json_missing_fields_default() {
        let raw = RawLyricResponse::from_json("{}").unwrap();
        assert_eq!(raw.lrc_text(), None);
        assert_eq!(raw.yrc_text(), None);
    }

    #[test]
    fn test_whitespace_only_text_counts_as_absent() {
        let raw = RawLyricResponse {
            lrc: Some(LyricBlob {
                version: 1,
                lyric: "  \n ".to_string(),
            }),
            ..RawLyricResponse::default()
        };
        assert_eq!(raw.lrc_text(), None);
    }

    #[test]
    fn test_from_json_malformed_is_an_error() {
        assert!(RawLyricResponse::from_json("not json").is_err());
    }
}
