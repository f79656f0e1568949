//! Column-wise consensus calling and contig polishing.

use cyanea_core::{CyaneaError, Result, RunControl};
use tracing::debug;

use crate::coverage::place_reads;

/// Symbol written into pileup columns a read does not cover.
pub const GAP: u8 = b'-';

/// Majority symbol of one column, skipping gaps and `N`.
///
/// Ties go to the symbol encountered first in the column. Returns `None`
/// when nothing votes.
fn column_consensus(column: impl Iterator<Item = u8>) -> Option<u8> {
    // Insertion-ordered counts; columns rarely hold more than five symbols.
    let mut counts: Vec<(u8, usize)> = Vec::with_capacity(5);
    for b in column {
        let b = b.to_ascii_uppercase();
        if b == GAP || b == b'N' {
            continue;
        }
        match counts.iter_mut().find(|(s, _)| *s == b) {
            Some((_, c)) => *c += 1,
            None => counts.push((b, 1)),
        }
    }
    let mut best: Option<(u8, usize)> = None;
    for &(s, c) in &counts {
        if best.map_or(true, |(_, bc)| c > bc) {
            best = Some((s, c));
        }
    }
    best.map(|(s, _)| s)
}

/// Majority-vote consensus of equal-length pre-aligned sequences.
///
/// Gap (`-`) and `N` symbols do not vote; a column without votes yields `N`.
/// An empty input yields an empty consensus.
///
/// # Errors
///
/// Returns an error if the aligned sequences differ in length.
pub fn compute_consensus<S: AsRef<[u8]>>(aligned: &[S]) -> Result<Vec<u8>> {
    let Some(first) = aligned.first() else {
        return Ok(Vec::new());
    };
    let width = first.as_ref().len();
    if let Some((i, s)) = aligned
        .iter()
        .enumerate()
        .find(|(_, s)| s.as_ref().len() != width)
    {
        return Err(CyaneaError::InvalidInput(format!(
            "aligned sequence {} has length {}, expected {}",
            i,
            s.as_ref().len(),
            width
        )));
    }
    Ok((0..width)
        .map(|col| column_consensus(aligned.iter().map(|s| s.as_ref()[col])).unwrap_or(b'N'))
        .collect())
}

/// Polish `contig` with the consensus of reads placed onto it.
///
/// Reads are placed with the coverage aligner, padded with gaps into a
/// pileup together with the contig itself, and every column where at least
/// one read votes takes the column consensus. Columns no read covers keep
/// the contig base.
pub fn polish_contig<S: AsRef<[u8]> + Sync>(
    contig: &[u8],
    reads: &[S],
    min_overlap: usize,
    control: &RunControl,
) -> Result<Vec<u8>> {
    let placements = place_reads(contig, reads, min_overlap, control)?;
    let mut pileup: Vec<Vec<u8>> = vec![contig.to_ascii_uppercase()];
    let mut covered = vec![false; contig.len()];
    for (read, placement) in reads.iter().zip(&placements) {
        let Some(p) = placement else { continue };
        let read = read.as_ref();
        let mut row = vec![GAP; contig.len()];
        row[p.position..p.position + read.len()].copy_from_slice(read);
        covered[p.position..p.position + read.len()].fill(true);
        pileup.push(row);
    }
    let consensus = compute_consensus(&pileup)?;
    let mut changed = 0usize;
    let polished: Vec<u8> = consensus
        .iter()
        .zip(contig)
        .zip(&covered)
        .map(|((&c, &orig), &cov)| {
            let orig = orig.to_ascii_uppercase();
            if cov && c != orig {
                changed += 1;
                c
            } else {
                orig
            }
        })
        .collect();
    debug!(reads_in_pileup = pileup.len() - 1, changed, "polished contig");
    Ok(polished)
}
