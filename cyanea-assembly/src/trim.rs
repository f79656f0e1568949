//! End trimming by base quality.
//!
//! Bases below the quality threshold are removed from both ends of a read.
//! Low-quality bases between two good ones are kept. Reads left shorter
//! than the length threshold are dropped; with a threshold of 0 a read
//! trimmed to nothing survives as an empty read.

use std::ops::Range;

use tracing::debug;

use crate::quality::ScoredRead;

/// Span from the first to the last base with quality at least `min_quality`.
///
/// Empty (`0..0`) when no base qualifies.
pub fn high_quality_span(quality: &[u8], min_quality: u8) -> Range<usize> {
    let Some(first) = quality.iter().position(|&q| q >= min_quality) else {
        return 0..0;
    };
    // `first` qualifies, so a last qualifying base exists.
    let last = quality.iter().rposition(|&q| q >= min_quality).unwrap_or(first);
    first..last + 1
}

/// Trim both ends of `read`; `None` if fewer than `min_length` bases remain.
pub fn quality_trim(read: &ScoredRead, min_quality: u8, min_length: usize) -> Option<ScoredRead> {
    let span = high_quality_span(read.quality().as_slice(), min_quality);
    if span.len() < min_length {
        return None;
    }
    Some(read.slice(span.start, span.end))
}

/// Trim every read and keep the survivors in input order.
pub fn quality_trim_reads(reads: &[ScoredRead], min_quality: u8, min_length: usize) -> Vec<ScoredRead> {
    let kept: Vec<ScoredRead> = reads
        .iter()
        .filter_map(|r| quality_trim(r, min_quality, min_length))
        .collect();
    debug!(
        input = reads.len(),
        dropped = reads.len() - kept.len(),
        min_quality,
        min_length,
        "quality trimming finished"
    );
    kept
}
