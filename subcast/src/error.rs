use crate::detect::TranscriptFormat;

/// All errors that can occur in subcast.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unrecognized transcript format — expected Zencastr-style or time-range timestamps")]
    InvalidFormat,

    #[error("no timestamps found in {0} transcript")]
    NoTimestamps(TranscriptFormat),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("summarization error: {0}")]
    Summarization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
