//! Pairwise suffix/prefix overlap detection.
//!
//! Every ordered pair of reads `(i, j)` is compared by brute force: for each
//! candidate length from `min(len_i, len_j)` down to `min_overlap`, the last
//! `len` bases of read `i` are compared to the first `len` bases of read `j`,
//! and the first (longest) length whose identity reaches `min_identity` is
//! reported. The work is O(N² · L²) in the worst case; the de Bruijn path is
//! the scalable alternative.
//!
//! With the `parallel` feature the outer loop over `i` is split across rayon
//! workers. Each worker polls the cancellation token on its own.

use cyanea_core::{Result, RunControl, CANCEL_CHECK_INTERVAL};
use tracing::{debug, info};

use crate::read::Read;

/// A directed overlap: a suffix of `read1` matches a prefix of `read2`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Overlap {
    /// Index of the read contributing the suffix.
    pub read1: usize,
    /// Index of the read contributing the prefix.
    pub read2: usize,
    /// Number of overlapping bases.
    pub length: usize,
    /// Start of the overlap within `read1`.
    pub position1: usize,
    /// Start of the overlap within `read2` (always 0 for suffix/prefix overlaps).
    pub position2: usize,
    /// Fraction of matching bases within the overlap.
    pub identity: f64,
}

/// Fraction of equal bytes between two equal-length slices.
///
/// Reads are normalized to uppercase on construction, so this is plain byte
/// equality; raw callers should uppercase first.
pub fn identity(a: &[u8], b: &[u8]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    if a.is_empty() {
        return 0.0;
    }
    let matches = a
        .iter()
        .zip(b)
        .filter(|(x, y)| x.eq_ignore_ascii_case(y))
        .count();
    matches as f64 / a.len() as f64
}

/// Longest suffix of `a` matching a prefix of `b` at `min_identity` or better.
///
/// Returns `(length, identity)`, scanning lengths from longest to shortest.
pub fn best_overlap(a: &[u8], b: &[u8], min_overlap: usize, min_identity: f64) -> Option<(usize, f64)> {
    let max_len = a.len().min(b.len());
    if max_len < min_overlap || min_overlap == 0 {
        return None;
    }
    (min_overlap..=max_len).rev().find_map(|len| {
        let id = identity(&a[a.len() - len..], &b[..len]);
        (id >= min_identity).then_some((len, id))
    })
}

/// All overlaps whose suffix comes from read `i`.
fn overlaps_from(
    i: usize,
    reads: &[Read],
    min_overlap: usize,
    min_identity: f64,
    control: &RunControl,
) -> Result<Vec<Overlap>> {
    let mut found = Vec::new();
    let a = &reads[i];
    for (j, b) in reads.iter().enumerate() {
        if j % CANCEL_CHECK_INTERVAL == 0 {
            control.check()?;
        }
        if i == j {
            continue;
        }
        if let Some((length, identity)) = best_overlap(a, b, min_overlap, min_identity) {
            found.push(Overlap {
                read1: i,
                read2: j,
                length,
                position1: a.len() - length,
                position2: 0,
                identity,
            });
        }
    }
    Ok(found)
}

/// Find the longest qualifying overlap for every ordered pair of distinct reads.
///
/// Progress is reported once per read row. Overlaps are returned grouped by
/// `read1` in ascending order, then by `read2`.
///
/// # Errors
///
/// Returns [`cyanea_core::CyaneaError::Cancelled`] if the token in `control`
/// is cancelled before the search completes; no partial overlaps are returned.
pub fn find_overlaps(
    reads: &[Read],
    min_overlap: usize,
    min_identity: f64,
    control: &RunControl,
) -> Result<Vec<Overlap>> {
    control.check()?;
    info!(reads = reads.len(), min_overlap, min_identity, "detecting read overlaps");
    let tracker = control.tracker(reads.len());

    #[cfg(feature = "parallel")]
    let rows = {
        use rayon::prelude::*;
        (0..reads.len())
            .into_par_iter()
            .map(|i| -> Result<Vec<Overlap>> {
                let row = overlaps_from(i, reads, min_overlap, min_identity, control)?;
                tracker.advance(1);
                Ok(row)
            })
            .collect::<Result<Vec<_>>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let rows = {
        let mut rows = Vec::with_capacity(reads.len());
        for i in 0..reads.len() {
            rows.push(overlaps_from(i, reads, min_overlap, min_identity, control)?);
            tracker.advance(1);
        }
        rows
    };

    // A request that arrived while the last rows were finishing still aborts.
    control.check()?;
    let overlaps: Vec<Overlap> = rows.into_iter().flatten().collect();
    tracker.finish();
    debug!(overlaps = overlaps.len(), "overlap detection finished");
    Ok(overlaps)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use cyanea_core::CancellationToken;

    use super::*;
    use crate::testing::reads;

    #[test]
    fn identity_counts_matches() {
        assert!((identity(b"ACGT", b"ACGA") - 0.75).abs() < 1e-12);
        assert!((identity(b"acgt", b"ACGT") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn best_overlap_prefers_longest() {
        // Suffix "ACAC" and "AC" both match, the longest wins.
        let got = best_overlap(b"GGACAC", b"ACACTT", 2, 1.0);
        assert_eq!(got.map(|(l, _)| l), Some(4));
    }

    #[test]
    fn best_overlap_respects_identity() {
        // 9/10 matching over the full overlap.
        let a = b"TTTTTACGTACGTAC";
        let b = b"ACGTACGTAGGGGG";
        assert_eq!(best_overlap(a, b, 10, 1.0), None);
        let (len, id) = best_overlap(a, b, 10, 0.9).unwrap();
        assert_eq!(len, 10);
        assert!((id - 0.9).abs() < 1e-12);
    }

    #[test]
    fn no_overlap_below_min_length() {
        assert_eq!(best_overlap(b"AAAACG", b"CGTTTT", 3, 1.0), None);
        assert_eq!(best_overlap(b"AC", b"AC", 3, 1.0), None);
    }

    #[test]
    fn finds_directed_overlap() {
        let r = reads(&["AAAAACCCCC", "CCCCCGGGGG"]);
        let overlaps = find_overlaps(&r, 5, 1.0, &RunControl::new()).unwrap();
        assert_eq!(overlaps.len(), 1);
        let o = overlaps[0];
        assert_eq!((o.read1, o.read2, o.length, o.position1, o.position2), (0, 1, 5, 5, 0));
    }

    #[test]
    fn overlap_is_directional() {
        let forward = find_overlaps(&reads(&["AAAAACCCCC", "CCCCCGGGGG"]), 5, 1.0, &RunControl::new())
            .unwrap();
        assert!(forward.iter().any(|o| o.read1 == 0 && o.read2 == 1));
        assert!(!forward.iter().any(|o| o.read1 == 1 && o.read2 == 0));

        // Swapping the reads swaps the indices; the suffix still comes from the A-read.
        let swapped = find_overlaps(&reads(&["CCCCCGGGGG", "AAAAACCCCC"]), 5, 1.0, &RunControl::new())
            .unwrap();
        assert_eq!(swapped.len(), 1);
        assert_eq!((swapped[0].read1, swapped[0].read2), (1, 0));
    }

    #[test]
    fn cancelled_before_start_returns_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let control = RunControl::new().with_cancellation(token);
        let r = reads(&["AAAAACCCCC", "CCCCCGGGGG", "GGGGGTTTTT"]);
        let err = find_overlaps(&r, 5, 1.0, &control).unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn cancellation_during_search_aborts() {
        let token = CancellationToken::new();
        let trigger = token.clone();
        // Cancel from the progress callback after the first finished row.
        let control = RunControl::new()
            .with_cancellation(token)
            .with_progress(move |_| trigger.cancel());
        let r: Vec<Read> = (0..8).map(|_| Read::new("ACGTACGTACGT").unwrap()).collect();
        let err = find_overlaps(&r, 4, 1.0, &control).unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn progress_reaches_one() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let control = RunControl::new().with_progress(move |f| sink.lock().unwrap().push(f));
        let r = reads(&["AAAAACCCCC", "CCCCCGGGGG", "GGGGGTTTTT"]);
        find_overlaps(&r, 5, 1.0, &control).unwrap();
        let seen = seen.lock().unwrap();
        assert_eq!(seen.last().copied(), Some(1.0));
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn empty_input_has_no_overlaps() {
        assert!(find_overlaps(&[], 5, 1.0, &RunControl::new()).unwrap().is_empty());
    }
}
