use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum number of lines sampled from the head of the input during detection.
pub const DETECT_SAMPLE_LINES: usize = 50;

/// A bare Zencastr stamp alone on a line: `M:SS.cc` or `H:MM:SS.cc`.
pub static ZENCASTR_STAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}:\d{2}(?::\d{2})?\.\d{2}$").unwrap());

/// Two `HH:MM:SS` timestamps joined by one or more `-`, `–` or `>` characters,
/// each side with an optional `.` or `,` fraction. Matches anywhere in a line,
/// so it also covers arrow-style `00:00:00,000 --> 00:00:05,000` lines.
pub static TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(\d{1,2}:\d{2}:\d{2}(?:[.,]\d{1,3})?)\s*[-–>]+\s*(\d{1,2}:\d{2}:\d{2}(?:[.,]\d{1,3})?)",
    )
    .unwrap()
});

/// Timestamp conventions subcast can recognize in raw transcript text.
///
/// `Zencastr` is the layout produced by Zencastr's transcript export: a bare
/// stamp like `0:00.29` alone on a line, an optional speaker name on the next
/// line, then the spoken text. `TimeRange` covers `start - end` layouts such
/// as `00:00:00 - 00:00:05 Welcome to the show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TranscriptFormat {
    Zencastr,
    TimeRange,
    /// Neither convention found in the sampled head of the input.
    Unknown,
}

impl TranscriptFormat {
    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            TranscriptFormat::Zencastr => "zencastr",
            TranscriptFormat::TimeRange => "time-range",
            TranscriptFormat::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TranscriptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify raw transcript text by its timestamp convention.
///
/// Samples at most the first [`DETECT_SAMPLE_LINES`] lines (trimmed) and
/// counts hits for each pattern family, then applies an ordered rule: more
/// than 2 bare Zencastr stamps that also outnumber the range hits win,
/// otherwise any range hit wins, otherwise the input is [`Unknown`].
/// Requiring at least 3 stamps keeps a stray numeric line from
/// misclassifying a range transcript.
///
/// Deterministic and total; never fails.
///
/// [`Unknown`]: TranscriptFormat::Unknown
pub fn detect_format(raw: &str) -> TranscriptFormat {
    let mut zencastr = 0usize;
    let mut range = 0usize;

    for line in raw.lines().take(DETECT_SAMPLE_LINES) {
        let line = line.trim();
        if ZENCASTR_STAMP.is_match(line) {
            zencastr += 1;
        }
        if TIME_RANGE.is_match(line) {
            range += 1;
        }
    }

    let format = if zencastr > range && zencastr > 2 {
        TranscriptFormat::Zencastr
    } else if range > 0 {
        TranscriptFormat::TimeRange
    } else {
        TranscriptFormat::Unknown
    };
    debug!(zencastr, range, format = %format, "detected transcript format");
    format
}
