//! Transcript normalization library — raw podcast transcripts in, SRT
//! captions and chapter markers out.
//!
//! **subcast** covers the pipeline end to end: detecting which timestamp
//! convention a transcript follows (bare Zencastr stamps or `start - end`
//! time ranges), parsing it into timed cues, serializing those as SRT,
//! WebVTT or JSON, and condensing long transcripts through sliding-window
//! summarization so chapter markers can be derived from them.
//!
//! # Quick start
//!
//! ```rust
//! # fn main() -> subcast::Result<()> {
//! let raw = "00:00:00 - 00:00:05 Welcome to the show\n\
//!            00:00:05 - 00:00:10 Today we talk about subtitles";
//!
//! // One call from raw transcript to canonical SRT text.
//! let srt = subcast::convert(raw)?;
//! assert!(srt.starts_with("1\n00:00:00 --> 00:00:05\nWelcome to the show\n"));
//! # Ok(())
//! # }
//! ```
//!
//! Condensing uses an external [`Summarizer`]; the built-in
//! [`ExtractiveSummarizer`] is deterministic and runs offline:
//!
//! ```rust
//! # #[tokio::main]
//! # async fn main() -> subcast::Result<()> {
//! use subcast::{CondenseOptions, ExtractiveSummarizer, TimestampedSegment};
//!
//! let segments = vec![
//!     TimestampedSegment::new("0:00", "intro and welcome"),
//!     TimestampedSegment::new("4:10", "first topic"),
//!     TimestampedSegment::new("9:45", "second topic"),
//! ];
//! let chapters = subcast::chapter_candidates(
//!     &segments,
//!     &CondenseOptions::default(),
//!     &ExtractiveSummarizer::new(),
//!     10,
//! )
//! .await?;
//! assert!(chapters.len() <= 10);
//! # Ok(())
//! # }
//! ```

pub mod condense;
pub mod config;
pub(crate) mod convert;
pub mod detect;
pub mod error;
pub mod timecode;
pub mod types;

pub use condense::{
    chapter_candidates, condense, enforce_min_spacing, reduce_to_target, ExtractiveSummarizer,
    Summarizer, CHAPTER_MIN_GAP_SECS, DEDUP_MIN_GAP_SECS,
};
pub use config::CondenseOptions;
pub use convert::parse_transcript;
pub use detect::{detect_format, TranscriptFormat};
pub use error::{Error, Result};
pub use types::{Cue, SubtitleDocument, TimestampedSegment};

use std::fs;
use std::path::Path;

/// Convert raw transcript text to canonical SRT subtitle text.
pub fn convert(raw: &str) -> Result<String> {
    Ok(parse_transcript(raw)?.to_srt())
}

/// Read a transcript file and convert it to SRT subtitle text.
pub fn convert_file(path: impl AsRef<Path>) -> Result<String> {
    let raw = fs::read_to_string(path)?;
    convert(&raw)
}

/// Extract condenser input from raw transcript text: one timestamped
/// segment per parsed cue, anchored at the cue's start.
pub fn extract_segments(raw: &str) -> Result<Vec<TimestampedSegment>> {
    Ok(parse_transcript(raw)?.segments())
}
