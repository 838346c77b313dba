use serde::{Deserialize, Serialize};

use crate::detect::TranscriptFormat;
use crate::timecode::parse_seconds;

/// A single timed caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// Start timestamp exactly as it will appear in the output,
    /// e.g. `00:00:00,290`.
    pub start: String,
    /// End timestamp exactly as it will appear in the output.
    pub end: String,
    /// Speaker name when the source format carries one.
    pub speaker: Option<String>,
    /// Spoken text without the speaker prefix. Never empty.
    pub text: String,
}

impl Cue {
    /// Text as rendered into subtitle output, speaker prefix included.
    pub fn display_text(&self) -> String {
        match &self.speaker {
            Some(speaker) => format!("{speaker}: {}", self.text),
            None => self.text.clone(),
        }
    }

    /// Start time in seconds.
    pub fn start_seconds(&self) -> f64 {
        parse_seconds(&self.start)
    }

    /// End time in seconds.
    pub fn end_seconds(&self) -> f64 {
        parse_seconds(&self.end)
    }
}

/// A converted transcript: ordered cues plus the format they were parsed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleDocument {
    pub format: TranscriptFormat,
    pub cues: Vec<Cue>,
}

impl SubtitleDocument {
    /// Full text (all cues concatenated, speaker prefixes included).
    pub fn text(&self) -> String {
        self.cues
            .iter()
            .map(|c| c.display_text())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Format as SRT subtitles.
    ///
    /// Blocks are numbered from 1 at write time, separated by exactly one
    /// blank line, with a trailing blank line after the last block.
    /// Timestamps appear exactly as stored on each cue.
    pub fn to_srt(&self) -> String {
        let mut out = String::new();
        for (i, cue) in self.cues.iter().enumerate() {
            out.push_str(&format!("{}\n", i + 1));
            out.push_str(&format!("{} --> {}\n", cue.start, cue.end));
            out.push_str(&cue.display_text());
            out.push_str("\n\n");
        }
        out
    }

    /// Format as WebVTT subtitles.
    pub fn to_vtt(&self) -> String {
        let mut out = String::from("WEBVTT\n\n");
        for cue in &self.cues {
            out.push_str(&format!(
                "{} --> {}\n",
                format_vtt_time(cue.start_seconds()),
                format_vtt_time(cue.end_seconds())
            ));
            out.push_str(&cue.display_text());
            out.push_str("\n\n");
        }
        out
    }

    /// Format as JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Format as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Condenser input: one segment per cue, anchored at the cue's start.
    pub fn segments(&self) -> Vec<TimestampedSegment> {
        self.cues
            .iter()
            .map(|c| TimestampedSegment {
                timestamp: c.start.clone(),
                text: c.display_text(),
            })
            .collect()
    }
}

/// A span of transcript text anchored to a single timestamp.
///
/// The condenser's unit of work. The timestamp keeps its raw textual form
/// (`MM:SS`, `MM:SS.ss`, `HH:MM:SS`, `HH:MM:SS.ss`, or SRT-style with a
/// comma); [`seconds`](TimestampedSegment::seconds) interprets it leniently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampedSegment {
    pub timestamp: String,
    pub text: String,
}

impl TimestampedSegment {
    pub fn new(timestamp: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            text: text.into(),
        }
    }

    /// Anchor time in seconds.
    pub fn seconds(&self) -> f64 {
        parse_seconds(&self.timestamp)
    }
}

/// Format seconds as VTT timestamp: HH:MM:SS.mmm
fn format_vtt_time(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0).round() as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doc() -> SubtitleDocument {
        SubtitleDocument {
            format: TranscriptFormat::Zencastr,
            cues: vec![
                Cue {
                    start: "00:00:00,290".into(),
                    end: "00:00:05,290".into(),
                    speaker: Some("James".into()),
                    text: "Welcome back everyone.".into(),
                },
                Cue {
                    start: "00:00:08,360".into(),
                    end: "00:00:13,360".into(),
                    speaker: None,
                    text: "I am the other host.".into(),
                },
            ],
        }
    }

    #[test]
    fn test_display_text_with_speaker() {
        let doc = sample_doc();
        assert_eq!(doc.cues[0].display_text(), "James: Welcome back everyone.");
        assert_eq!(doc.cues[1].display_text(), "I am the other host.");
    }

    #[test]
    fn test_to_srt_block_shape() {
        let srt = sample_doc().to_srt();
        assert_eq!(
            srt,
            "1\n00:00:00,290 --> 00:00:05,290\nJames: Welcome back everyone.\n\n\
             2\n00:00:08,360 --> 00:00:13,360\nI am the other host.\n\n"
        );
    }

    #[test]
    fn test_to_srt_trailing_blank_line() {
        let srt = sample_doc().to_srt();
        assert!(srt.ends_with("\n\n"));
        assert!(!srt.ends_with("\n\n\n"));
    }

    #[test]
    fn test_to_vtt_header_and_decimal_times() {
        let vtt = sample_doc().to_vtt();
        assert!(vtt.starts_with("WEBVTT\n\n"));
        assert!(vtt.contains("00:00:00.290 --> 00:00:05.290\n"));
        assert!(!vtt.contains(','));
    }

    #[test]
    fn test_to_vtt_pads_fractionless_times() {
        let doc = SubtitleDocument {
            format: TranscriptFormat::TimeRange,
            cues: vec![Cue {
                start: "00:00:00".into(),
                end: "00:00:05".into(),
                speaker: None,
                text: "Welcome to the show".into(),
            }],
        };
        assert!(doc.to_vtt().contains("00:00:00.000 --> 00:00:05.000\n"));
    }

    #[test]
    fn test_document_text_joins_cues() {
        let doc = sample_doc();
        assert_eq!(
            doc.text(),
            "James: Welcome back everyone. I am the other host."
        );
    }

    #[test]
    fn test_segments_anchor_at_cue_start() {
        let segments = sample_doc().segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].timestamp, "00:00:00,290");
        assert_eq!(segments[0].text, "James: Welcome back everyone.");
        assert!((segments[1].seconds() - 8.36).abs() < 1e-9);
    }

    #[test]
    fn test_cue_seconds_parse_comma_times() {
        let doc = sample_doc();
        assert!((doc.cues[0].start_seconds() - 0.29).abs() < 1e-9);
        assert!((doc.cues[0].end_seconds() - 5.29).abs() < 1e-9);
    }

    #[test]
    fn test_json_round_trip() {
        let doc = sample_doc();
        let json = doc.to_json().unwrap();
        let back: SubtitleDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back.format, TranscriptFormat::Zencastr);
        assert_eq!(back.cues, doc.cues);
    }

    #[test]
    fn test_segment_new_and_seconds() {
        let seg = TimestampedSegment::new("12:34", "text");
        assert_eq!(seg.seconds(), 754.0);
        assert_eq!(TimestampedSegment::new("bogus", "x").seconds(), 0.0);
    }
}
