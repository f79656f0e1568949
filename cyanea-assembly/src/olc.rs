//! Overlap-layout-consensus contig construction.
//!
//! Each read keeps only its single best (longest) outgoing overlap, giving a
//! successor map. Reads that no other read's best edge points to start a
//! chain; each chain is walked until a read without a successor or an
//! already-visited read. Reads left unvisited (members of pure cycles)
//! become singleton contigs.
//!
//! This is greedy chaining, not an optimal layout: repeats and cycles
//! yield fragmented contigs rather than maximal ones.

use cyanea_core::BitSet;
use tracing::debug;

use crate::overlap::Overlap;
use crate::read::Read;

/// A contig chained from reads.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contig {
    /// Assembled bases.
    pub sequence: Vec<u8>,
    /// Read indices in chaining order.
    pub layout: Vec<usize>,
}

impl Contig {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Best outgoing overlap of every read.
///
/// On equal lengths the overlap listed first wins.
pub fn best_successors(n_reads: usize, overlaps: &[Overlap]) -> Vec<Option<Overlap>> {
    let mut best: Vec<Option<Overlap>> = vec![None; n_reads];
    for o in overlaps {
        let slot = &mut best[o.read1];
        if slot.map_or(true, |b| o.length > b.length) {
            *slot = Some(*o);
        }
    }
    best
}

/// Follow the successor map from `start` until it ends or revisits a read.
fn walk_chain(
    start: usize,
    reads: &[Read],
    successors: &[Option<Overlap>],
    visited: &mut BitSet,
) -> Contig {
    let mut sequence = reads[start].to_vec();
    let mut layout = vec![start];
    visited.insert(start);

    let mut current = start;
    while let Some(edge) = successors[current] {
        let next = edge.read2;
        if visited.contains(next) {
            break;
        }
        let tail = &reads[next][edge.length.min(reads[next].len())..];
        sequence.extend_from_slice(tail);
        layout.push(next);
        visited.insert(next);
        current = next;
    }
    Contig { sequence, layout }
}

/// Chain reads into contigs using their best outgoing overlaps.
///
/// Contigs shorter than `min_contig_length` are dropped.
///
/// # Panics
///
/// Panics if an overlap refers to a read index outside `reads`.
pub fn build_contigs(reads: &[Read], overlaps: &[Overlap], min_contig_length: usize) -> Vec<Contig> {
    let n = reads.len();
    let successors = best_successors(n, overlaps);

    let mut has_predecessor = BitSet::new(n);
    for edge in successors.iter().flatten() {
        has_predecessor.insert(edge.read2);
    }

    let mut visited = BitSet::new(n);
    let mut contigs = Vec::new();
    for start in 0..n {
        if has_predecessor.contains(start) || visited.contains(start) {
            continue;
        }
        contigs.push(walk_chain(start, reads, &successors, &mut visited));
    }
    let chained = contigs.len();

    for i in 0..n {
        if !visited.contains(i) && reads[i].len() >= min_contig_length {
            visited.insert(i);
            contigs.push(Contig {
                sequence: reads[i].to_vec(),
                layout: vec![i],
            });
        }
    }
    debug!(chained, singletons = contigs.len() - chained, "OLC layout finished");

    contigs.retain(|c| c.len() >= min_contig_length);
    contigs
}
