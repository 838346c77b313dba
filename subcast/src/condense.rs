use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::CondenseOptions;
use crate::error::Result;
use crate::types::TimestampedSegment;

/// Minimum spacing between chapter markers, in seconds.
pub const CHAPTER_MIN_GAP_SECS: f64 = 180.0;

/// Minimum spacing for general deduplication, in seconds.
pub const DEDUP_MIN_GAP_SECS: f64 = 30.0;

/// External per-window summarizer.
///
/// Implementations reduce one window of segments to a shorter list. The
/// contract the condenser relies on: every returned timestamp is one of the
/// window's own timestamps (never synthesized), and the output is no longer
/// than the input. The condenser trusts the contract instead of checking it;
/// a violation is a bug in the implementation, not in the caller.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Reduce one window of segments to its most important entries.
    async fn summarize_window(
        &self,
        window: &[TimestampedSegment],
    ) -> Result<Vec<TimestampedSegment>>;
}

/// Condense a transcript by summarizing sliding windows and merging the
/// reduced outputs.
///
/// Windows are processed sequentially in order; the first summarizer failure
/// aborts the whole run with no partial output and no internal retry. When
/// the input fits in a single window its reduction is returned exactly as
/// produced. Empty input yields empty output without calling the summarizer.
pub async fn condense<S>(
    segments: &[TimestampedSegment],
    options: &CondenseOptions,
    summarizer: &S,
) -> Result<Vec<TimestampedSegment>>
where
    S: Summarizer + ?Sized,
{
    options.validate()?;
    if segments.is_empty() {
        return Ok(Vec::new());
    }

    let windows = build_windows(segments, options);
    info!(
        segments = segments.len(),
        windows = windows.len(),
        window_size = options.window_size,
        "condensing transcript"
    );

    let mut merged: Vec<TimestampedSegment> = Vec::new();
    for (i, window) in windows.iter().enumerate() {
        let reduced = summarizer.summarize_window(window).await?;
        debug!(
            window = i,
            input = window.len(),
            output = reduced.len(),
            "window summarized"
        );
        // Windows after the first drop their leading share already covered
        // by the previous window's tail.
        let drop = if i == 0 {
            0
        } else {
            (reduced.len() as f64 * options.overlap).floor() as usize
        };
        merged.extend(reduced.into_iter().skip(drop));
    }
    Ok(merged)
}

/// Split segments into overlapping windows.
///
/// A sequence that fits within `window_size` stays a single window.
/// Otherwise windows start every `step_size` indices, the final window may
/// be short, and windowing stops as soon as a window reaches the end.
fn build_windows<'a>(
    segments: &'a [TimestampedSegment],
    options: &CondenseOptions,
) -> Vec<&'a [TimestampedSegment]> {
    if segments.len() <= options.window_size {
        return vec![segments];
    }

    let step = options.step_size();
    let mut windows = Vec::new();
    let mut start = 0;
    loop {
        let end = usize::min(start + options.window_size, segments.len());
        windows.push(&segments[start..end]);
        if end == segments.len() {
            break;
        }
        start += step;
    }
    windows
}

/// Enforce a minimum spacing between segments.
///
/// Sorts by anchor time (stable, so equal times keep their source order),
/// always keeps the earliest entry, then keeps each further entry only when
/// it is at least `min_gap_secs` after the last *kept* one. The invariant is
/// global: every pair of consecutive survivors is at least the gap apart,
/// not merely pairs that were adjacent in the input.
pub fn enforce_min_spacing(
    segments: &[TimestampedSegment],
    min_gap_secs: f64,
) -> Vec<TimestampedSegment> {
    let mut timed: Vec<(f64, &TimestampedSegment)> =
        segments.iter().map(|s| (s.seconds(), s)).collect();
    timed.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut kept: Vec<TimestampedSegment> = Vec::new();
    let mut last_kept = 0.0;
    for (secs, segment) in timed {
        if kept.is_empty() || secs - last_kept >= min_gap_secs {
            kept.push(segment.clone());
            last_kept = secs;
        }
    }
    kept
}

/// Cut a segment list down to at most `target` entries spread across the
/// full time span.
///
/// Returns the input unchanged when it is already within `target`. The
/// earliest entry is always kept. A greedy pass keeps entries at least 0.7
/// of the ideal spacing (`last / (target - 1)`) past the previous survivor;
/// if that leaves the result short, the widest gaps between survivors are
/// filled with the dropped candidate closest to each gap's midpoint, until
/// the target is met or no gap holds a candidate.
pub fn reduce_to_target(
    segments: &[TimestampedSegment],
    target: usize,
) -> Vec<TimestampedSegment> {
    if segments.len() <= target {
        return segments.to_vec();
    }
    if target == 0 {
        return Vec::new();
    }

    let mut timed: Vec<(f64, &TimestampedSegment)> =
        segments.iter().map(|s| (s.seconds(), s)).collect();
    timed.sort_by(|a, b| a.0.total_cmp(&b.0));

    if target == 1 {
        return vec![timed[0].1.clone()];
    }

    let last_secs = timed[timed.len() - 1].0;
    let threshold = 0.7 * (last_secs / (target - 1) as f64);

    let mut keep = vec![false; timed.len()];
    keep[0] = true;
    let mut kept_count = 1;
    let mut last_kept = timed[0].0;
    for i in 1..timed.len() {
        if kept_count == target {
            break;
        }
        if timed[i].0 - last_kept >= threshold {
            keep[i] = true;
            kept_count += 1;
            last_kept = timed[i].0;
        }
    }

    while kept_count < target {
        if !fill_widest_gap(&timed, &mut keep) {
            break;
        }
        kept_count += 1;
    }

    timed
        .into_iter()
        .zip(keep)
        .filter_map(|((_, segment), k)| k.then(|| segment.clone()))
        .collect()
}

/// Mark one dropped candidate inside the widest survivor gap that has any,
/// preferring the candidate closest to the gap's midpoint. Returns `false`
/// when no gap can be filled.
fn fill_widest_gap(timed: &[(f64, &TimestampedSegment)], keep: &mut [bool]) -> bool {
    let kept_idx: Vec<usize> = (0..timed.len()).filter(|&i| keep[i]).collect();

    let mut gaps: Vec<(f64, usize, usize)> = kept_idx
        .windows(2)
        .map(|w| (timed[w[1]].0 - timed[w[0]].0, w[0], w[1]))
        .collect();
    gaps.sort_by(|a, b| b.0.total_cmp(&a.0));

    for (_, lo, hi) in gaps {
        let lo_secs = timed[lo].0;
        let hi_secs = timed[hi].0;
        let midpoint = (lo_secs + hi_secs) / 2.0;

        let best = (lo + 1..hi)
            .filter(|&i| !keep[i] && timed[i].0 > lo_secs && timed[i].0 < hi_secs)
            .min_by(|&a, &b| {
                (timed[a].0 - midpoint)
                    .abs()
                    .total_cmp(&(timed[b].0 - midpoint).abs())
            });
        if let Some(i) = best {
            keep[i] = true;
            return true;
        }
    }
    false
}

/// Derive chapter-marker candidates from condensed segments.
///
/// Condenses, spreads the survivors at least [`CHAPTER_MIN_GAP_SECS`] apart,
/// then cuts the list down to `max_markers`.
pub async fn chapter_candidates<S>(
    segments: &[TimestampedSegment],
    options: &CondenseOptions,
    summarizer: &S,
    max_markers: usize,
) -> Result<Vec<TimestampedSegment>>
where
    S: Summarizer + ?Sized,
{
    let condensed = condense(segments, options, summarizer).await?;
    let spaced = enforce_min_spacing(&condensed, CHAPTER_MIN_GAP_SECS);
    Ok(reduce_to_target(&spaced, max_markers))
}

/// Offline summarizer that keeps an evenly strided subset of each window.
///
/// No AI backend involved: it selects segments at a fixed stride and
/// truncates long text at a word boundary. The deterministic default for the
/// CLI and examples, and the reference implementation of the [`Summarizer`]
/// contract: returned timestamps always come from the window, and the
/// output is never longer than the input.
#[derive(Debug, Clone)]
pub struct ExtractiveSummarizer {
    /// Fraction of each window to keep. Out-of-range values are clamped so
    /// at least one segment per window survives.
    pub keep_ratio: f64,
    /// Maximum text length per kept segment, in characters.
    pub max_text_chars: usize,
}

impl Default for ExtractiveSummarizer {
    fn default() -> Self {
        Self {
            keep_ratio: 0.2,
            max_text_chars: 120,
        }
    }
}

impl ExtractiveSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keep_ratio(mut self, ratio: f64) -> Self {
        self.keep_ratio = ratio;
        self
    }

    pub fn max_text_chars(mut self, chars: usize) -> Self {
        self.max_text_chars = chars;
        self
    }
}

#[async_trait]
impl Summarizer for ExtractiveSummarizer {
    async fn summarize_window(
        &self,
        window: &[TimestampedSegment],
    ) -> Result<Vec<TimestampedSegment>> {
        if window.is_empty() {
            return Ok(Vec::new());
        }
        let keep = ((window.len() as f64 * self.keep_ratio).ceil() as usize)
            .clamp(1, window.len());
        let stride = window.len() as f64 / keep as f64;

        let mut out = Vec::with_capacity(keep);
        for k in 0..keep {
            let idx = ((k as f64 * stride) as usize).min(window.len() - 1);
            let segment = &window[idx];
            out.push(TimestampedSegment {
                timestamp: segment.timestamp.clone(),
                text: truncate_words(&segment.text, self.max_text_chars),
            });
        }
        Ok(out)
    }
}

/// Truncate to at most `max_chars` characters, cutting at a word boundary
/// where possible.
fn truncate_words(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let hard: String = text.chars().take(max_chars).collect();
    let cut = match hard.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => &hard[..pos],
        _ => hard.as_str(),
    };
    format!("{}…", cut.trim_end())
}
