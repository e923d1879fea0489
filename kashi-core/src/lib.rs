pub mod error;
pub mod model;
pub mod state;
pub mod sync;
pub mod time;

pub use error::{CoreError, Result};
pub use model::{
    LyricData, LyricItem, LyricKind, LyricLine, LyricMetadata, LyricParseResult, LyricState,
    LyricTrack, MetadataKind, SourceKind, TrackKind,
};
pub use state::LyricMode;
pub use sync::{CurrentLyrics, KaraokeProgress, LineInfo};
pub use time::{format_timestamp, parse_timestamp};
