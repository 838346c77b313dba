use std::mem;

use tracing::info;

use crate::detect::{detect_format, TranscriptFormat, TIME_RANGE, ZENCASTR_STAMP};
use crate::error::{Error, Result};
use crate::timecode::{format_centis, parse_centis};
use crate::types::{Cue, SubtitleDocument};

/// Span given to every Zencastr cue; the format carries no end marker.
const DEFAULT_CUE_CENTIS: u64 = 500;

/// Parse raw transcript text into a subtitle document.
///
/// Runs detection first and dispatches to the matching parser. Unknown input
/// fails with [`Error::InvalidFormat`] without attempting either parser; a
/// recognized format whose body yields no cues fails with
/// [`Error::NoTimestamps`]. There is no fallback from one parser to the
/// other, and no partial document on failure.
pub fn parse_transcript(raw: &str) -> Result<SubtitleDocument> {
    let format = detect_format(raw);
    let cues = match format {
        TranscriptFormat::Zencastr => parse_zencastr(raw),
        TranscriptFormat::TimeRange => parse_time_range(raw),
        TranscriptFormat::Unknown => return Err(Error::InvalidFormat),
    };
    if cues.is_empty() {
        return Err(Error::NoTimestamps(format));
    }
    info!(format = %format, cues = cues.len(), "transcript parsed");
    Ok(SubtitleDocument { format, cues })
}

/// A cue under construction while walking Zencastr lines.
struct PendingCue {
    start_centis: u64,
    speaker: Option<String>,
    lines: Vec<String>,
}

impl PendingCue {
    fn new(start_centis: u64) -> Self {
        Self {
            start_centis,
            speaker: None,
            lines: Vec::new(),
        }
    }

    /// Produce the finished cue, or `None` when no text accumulated.
    fn flush(self) -> Option<Cue> {
        if self.lines.is_empty() {
            return None;
        }
        Some(Cue {
            start: format_centis(self.start_centis),
            end: format_centis(self.start_centis + DEFAULT_CUE_CENTIS),
            speaker: self.speaker,
            text: self.lines.join(" "),
        })
    }
}

/// Zencastr walk state. The speaker slot is open only for the line
/// immediately after a stamp; an empty line closes it.
enum ZencastrState {
    AwaitingTimestamp,
    AwaitingSpeakerOrText(PendingCue),
    AccumulatingText(PendingCue),
}

impl ZencastrState {
    fn into_pending(self) -> Option<PendingCue> {
        match self {
            ZencastrState::AwaitingTimestamp => None,
            ZencastrState::AwaitingSpeakerOrText(p) | ZencastrState::AccumulatingText(p) => {
                Some(p)
            }
        }
    }
}

/// Parse the Zencastr layout: a bare stamp on its own line, optionally a
/// speaker name on the next line, then dialogue text until the next stamp.
///
/// Single forward pass. Prose before the first stamp has no span to attach
/// to and is ignored; stamps that accumulate no text produce no cue.
fn parse_zencastr(raw: &str) -> Vec<Cue> {
    let mut cues = Vec::new();
    let mut state = ZencastrState::AwaitingTimestamp;

    for line in raw.lines() {
        let line = line.trim();

        if let Some(start) = stamp_centis(line) {
            let prev = mem::replace(
                &mut state,
                ZencastrState::AwaitingSpeakerOrText(PendingCue::new(start)),
            );
            if let Some(cue) = prev.into_pending().and_then(PendingCue::flush) {
                cues.push(cue);
            }
            continue;
        }

        state = match state {
            ZencastrState::AwaitingTimestamp => ZencastrState::AwaitingTimestamp,
            ZencastrState::AwaitingSpeakerOrText(mut pending) => {
                if line.is_empty() {
                    // speaker slot closed, nothing buffered
                } else if looks_like_speaker(line) {
                    pending.speaker = Some(line.to_string());
                } else {
                    pending.lines.push(line.to_string());
                }
                ZencastrState::AccumulatingText(pending)
            }
            ZencastrState::AccumulatingText(mut pending) => {
                if !line.is_empty() {
                    pending.lines.push(line.to_string());
                }
                ZencastrState::AccumulatingText(pending)
            }
        };
    }

    if let Some(cue) = state.into_pending().and_then(PendingCue::flush) {
        cues.push(cue);
    }
    cues
}

/// Centiseconds of a line that is exactly a bare Zencastr stamp.
fn stamp_centis(line: &str) -> Option<u64> {
    if ZENCASTR_STAMP.is_match(line) {
        parse_centis(line)
    } else {
        None
    }
}

/// Speaker labels are short: at most two words, under 30 characters,
/// starting uppercase, with no sentence punctuation.
fn looks_like_speaker(line: &str) -> bool {
    line.chars().count() < 30
        && line.split_whitespace().count() <= 2
        && !line.contains('.')
        && !line.contains(',')
        && line.chars().next().is_some_and(char::is_uppercase)
}

/// Parse the time-range layout: each cue is a `start - end` range with its
/// text on the same line or, failing that, on the next non-empty line.
///
/// The matched range tokens pass through verbatim apart from turning a
/// period before the fraction into a comma; the writer later joins them
/// with `" --> "`, which canonicalizes whatever separator run the source
/// used. A trailing range with no text line left yields no cue.
fn parse_time_range(raw: &str) -> Vec<Cue> {
    let mut cues = Vec::new();
    let mut lines = raw.lines().map(str::trim).filter(|l| !l.is_empty());

    while let Some(line) = lines.next() {
        let Some(caps) = TIME_RANGE.captures(line) else {
            continue;
        };
        let (Some(whole), Some(start), Some(end)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };

        let remainder = format!("{}{}", &line[..whole.start()], &line[whole.end()..]);
        let text = match remainder.trim() {
            "" => match lines.next() {
                // one line of lookahead, consumed blindly
                Some(next) => next.to_string(),
                None => continue,
            },
            inline => inline.to_string(),
        };

        cues.push(Cue {
            // subtitle convention wants a comma before the fraction
            start: start.as_str().replace('.', ","),
            end: end.as_str().replace('.', ","),
            speaker: None,
            text,
        });
    }
    cues
}
