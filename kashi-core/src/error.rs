use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // Raw payload errors
    #[error("Failed to parse lyric response document: {0}")]
    ResponseParse(#[from] serde_json::Error),

    // Persisted-setting errors
    #[error("Unknown lyric mode: {mode}")]
    UnknownMode { mode: String },

    #[error("Unknown track kind: {kind}")]
    UnknownTrackKind { kind: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
