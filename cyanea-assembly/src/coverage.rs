//! Reference-free coverage estimation.
//!
//! Each read is placed at its single best ungapped position on a reference
//! (usually an assembled contig) by exhaustive sliding-window match counting.
//! The scan runs left to right and only a strictly higher match count moves
//! the placement, so on ties the leftmost position wins. The first
//! placement must reach `min_overlap - 1` matches. Reads longer than the
//! reference, or with no qualifying window, are not placed.
//!
//! With the `parallel` feature reads are placed on rayon workers; each polls
//! the cancellation token itself.

use cyanea_core::{Result, RunControl, CANCEL_CHECK_INTERVAL};
use tracing::{debug, info};

/// Where a read landed on the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Reference offset of the read's first base.
    pub position: usize,
    /// Matching bases at that offset.
    pub matches: usize,
}

/// Per-base read depth over a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageProfile {
    /// One depth value per reference base.
    pub depth: Vec<u32>,
    /// Number of reads that were placed.
    pub placed_reads: usize,
}

impl CoverageProfile {
    /// Mean depth over all reference bases (0.0 for an empty reference).
    pub fn mean_depth(&self) -> f64 {
        if self.depth.is_empty() {
            return 0.0;
        }
        self.depth.iter().map(|&d| d as u64).sum::<u64>() as f64 / self.depth.len() as f64
    }

    /// Fraction of bases covered at least `min_depth` times.
    pub fn breadth(&self, min_depth: u32) -> f64 {
        if self.depth.is_empty() {
            return 0.0;
        }
        let covered = self.depth.iter().filter(|&&d| d >= min_depth).count();
        covered as f64 / self.depth.len() as f64
    }
}

fn count_matches(window: &[u8], read: &[u8]) -> usize {
    window
        .iter()
        .zip(read)
        .filter(|(a, b)| a.eq_ignore_ascii_case(b))
        .count()
}

/// Best ungapped placement of `read` on `reference`.
///
/// Polls `control` every [`CANCEL_CHECK_INTERVAL`] offsets.
pub fn best_placement(
    reference: &[u8],
    read: &[u8],
    min_overlap: usize,
    control: &RunControl,
) -> Result<Option<Placement>> {
    if read.is_empty() || read.len() > reference.len() {
        return Ok(None);
    }
    let threshold = min_overlap.saturating_sub(1);
    let mut best: Option<Placement> = None;
    for (position, window) in reference.windows(read.len()).enumerate() {
        if position % CANCEL_CHECK_INTERVAL == 0 {
            control.check()?;
        }
        let matches = count_matches(window, read);
        let better = match best {
            None => matches >= threshold,
            Some(b) => matches > b.matches,
        };
        if better {
            best = Some(Placement { position, matches });
        }
    }
    Ok(best)
}

/// Place every read on `reference`, in read order.
pub fn place_reads<S: AsRef<[u8]> + Sync>(
    reference: &[u8],
    reads: &[S],
    min_overlap: usize,
    control: &RunControl,
) -> Result<Vec<Option<Placement>>> {
    control.check()?;
    let tracker = control.tracker(reads.len());

    #[cfg(feature = "parallel")]
    let placements = {
        use rayon::prelude::*;
        reads
            .par_iter()
            .map(|read| -> Result<Option<Placement>> {
                let p = best_placement(reference, read.as_ref(), min_overlap, control)?;
                tracker.advance(1);
                Ok(p)
            })
            .collect::<Result<Vec<_>>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let placements = {
        let mut placements = Vec::with_capacity(reads.len());
        for read in reads {
            placements.push(best_placement(reference, read.as_ref(), min_overlap, control)?);
            tracker.advance(1);
        }
        placements
    };

    control.check()?;
    tracker.finish();
    Ok(placements)
}

/// Per-base depth of `reads` aligned onto `reference`.
///
/// # Errors
///
/// Returns [`cyanea_core::CyaneaError::Cancelled`] if cancelled before completion.
pub fn calculate_coverage<S: AsRef<[u8]> + Sync>(
    reference: &[u8],
    reads: &[S],
    min_overlap: usize,
    control: &RunControl,
) -> Result<CoverageProfile> {
    info!(reference_len = reference.len(), reads = reads.len(), "calculating coverage");
    let placements = place_reads(reference, reads, min_overlap, control)?;
    let mut depth = vec![0u32; reference.len()];
    let mut placed_reads = 0;
    for (read, placement) in reads.iter().zip(&placements) {
        if let Some(p) = placement {
            let end = p.position + read.as_ref().len();
            for d in &mut depth[p.position..end] {
                *d += 1;
            }
            placed_reads += 1;
        }
    }
    debug!(placed_reads, unplaced = reads.len() - placed_reads, "coverage finished");
    Ok(CoverageProfile { depth, placed_reads })
}
