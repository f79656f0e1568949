//! Contig-set metrics.
//!
//! [`AssemblyResult`] is what every assembly call returns: the contigs plus
//! the headline numbers. [`assembly_stats`] goes further (L50, N90/L90, GC
//! content, auN) for callers comparing assemblies.
//!
//! Nx is the length of the contig at which the running sum of contig
//! lengths, taken longest first, first reaches `x` of the total. Lx is how
//! many contigs that took.

use cyanea_core::{CyaneaError, Result, Summarizable};

/// Contigs of one assembly run plus their headline metrics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssemblyResult {
    /// Contig sequences in the order they were built.
    pub contigs: Vec<Vec<u8>>,
    /// Number of input reads.
    pub total_reads: usize,
    /// Reads that contributed to at least one reported contig.
    pub assembled_reads: usize,
    /// N50 of the contig lengths (0 with no contigs).
    pub n50: usize,
    /// Length of the longest contig.
    pub longest_contig: usize,
    /// Sum of contig lengths.
    pub total_length: usize,
}

impl AssemblyResult {
    /// Summarize `contigs`. An empty contig list gives all-zero metrics.
    pub fn from_contigs(contigs: Vec<Vec<u8>>, total_reads: usize, assembled_reads: usize) -> Self {
        let lengths = ContigLengths::new(contigs.iter().map(Vec::len));
        Self {
            n50: lengths.nx(0.5).0,
            longest_contig: lengths.longest(),
            total_length: lengths.total,
            contigs,
            total_reads,
            assembled_reads,
        }
    }

    /// The result for an empty read set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Full statistics over the contigs, or `None` if there are none.
    pub fn stats(&self) -> Option<AssemblyStats> {
        let contigs: Vec<&[u8]> = self.contigs.iter().map(Vec::as_slice).collect();
        assembly_stats(&contigs).ok()
    }
}

impl Summarizable for AssemblyResult {
    fn summary(&self) -> String {
        format!(
            "{} contigs ({} bp, N50 {}, longest {}) from {}/{} reads",
            self.contigs.len(),
            self.total_length,
            self.n50,
            self.longest_contig,
            self.assembled_reads,
            self.total_reads
        )
    }
}

/// Contig lengths sorted longest first, with their sum.
struct ContigLengths {
    sorted: Vec<usize>,
    total: usize,
}

impl ContigLengths {
    fn new(lengths: impl IntoIterator<Item = usize>) -> Self {
        let mut sorted: Vec<usize> = lengths.into_iter().collect();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        let total = sorted.iter().sum();
        Self { sorted, total }
    }

    fn longest(&self) -> usize {
        self.sorted.first().copied().unwrap_or(0)
    }

    fn shortest(&self) -> usize {
        self.sorted.last().copied().unwrap_or(0)
    }

    /// `(Nx, Lx)`; `(0, 0)` when there are no contigs.
    fn nx(&self, x: f64) -> (usize, usize) {
        let target = (self.total as f64 * x).ceil() as usize;
        let mut running = 0;
        self.sorted
            .iter()
            .position(|&len| {
                running += len;
                running >= target
            })
            .map_or((self.shortest(), self.sorted.len()), |i| {
                (self.sorted[i], i + 1)
            })
    }

    /// Σ length² / total.
    fn area_under_nx(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let squares: f64 = self.sorted.iter().map(|&l| (l as f64) * (l as f64)).sum();
        squares / self.total as f64
    }
}

/// Quality metrics for a contig set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(non_snake_case)]
pub struct AssemblyStats {
    /// Contigs summarized.
    pub n_contigs: usize,
    /// Bases across all contigs.
    pub total_length: usize,
    /// Longest contig length.
    pub largest_contig: usize,
    /// Shortest contig length.
    pub smallest_contig: usize,
    /// G+C over A+C+G+T; other symbols are not counted.
    pub gc_content: f64,
    /// Length of the contig at which half the total length is reached,
    /// taking contigs longest first.
    pub n50: usize,
    /// How many of the longest contigs it takes to reach `n50`.
    pub l50: usize,
    /// Like `n50` at 90% of the total length.
    pub n90: usize,
    /// Contig count behind `n90`.
    pub l90: usize,
    /// Length-weighted mean contig length.
    pub auN: f64,
}

fn gc_fraction(contigs: &[&[u8]]) -> f64 {
    let (gc, acgt) = contigs
        .iter()
        .flat_map(|c| c.iter())
        .fold((0usize, 0usize), |(gc, acgt), &b| match b.to_ascii_uppercase() {
            b'G' | b'C' => (gc + 1, acgt + 1),
            b'A' | b'T' => (gc, acgt + 1),
            _ => (gc, acgt),
        });
    if acgt == 0 {
        0.0
    } else {
        gc as f64 / acgt as f64
    }
}

fn require_contigs(contigs: &[&[u8]]) -> Result<()> {
    if contigs.is_empty() {
        return Err(CyaneaError::InvalidInput(
            "contig statistics need at least one contig".into(),
        ));
    }
    Ok(())
}

/// Compute [`AssemblyStats`] for `contigs`.
///
/// # Errors
///
/// Returns an error for an empty contig set.
pub fn assembly_stats(contigs: &[&[u8]]) -> Result<AssemblyStats> {
    require_contigs(contigs)?;
    let lengths = ContigLengths::new(contigs.iter().map(|c| c.len()));
    let (n50, l50) = lengths.nx(0.5);
    let (n90, l90) = lengths.nx(0.9);
    Ok(AssemblyStats {
        n_contigs: contigs.len(),
        total_length: lengths.total,
        largest_contig: lengths.longest(),
        smallest_contig: lengths.shortest(),
        gc_content: gc_fraction(contigs),
        n50,
        l50,
        n90,
        l90,
        auN: lengths.area_under_nx(),
    })
}

/// `(Nx, Lx)` for a fraction `x` in `(0, 1]`.
///
/// # Errors
///
/// Returns an error for an empty contig set or an `x` outside `(0, 1]`.
pub fn nx_values(contigs: &[&[u8]], x: f64) -> Result<(usize, usize)> {
    require_contigs(contigs)?;
    if !(x > 0.0 && x <= 1.0) {
        return Err(CyaneaError::InvalidInput(format!(
            "Nx fraction must lie in (0, 1], got {}",
            x
        )));
    }
    Ok(ContigLengths::new(contigs.iter().map(|c| c.len())).nx(x))
}

/// N50 of a set of lengths in any order (0 when empty).
pub fn n50(lengths: &[usize]) -> usize {
    ContigLengths::new(lengths.iter().copied()).nx(0.5).0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn n50_hand_computed() {
        // total 320, half 160: 100 + 90 = 190 ≥ 160.
        assert_eq!(n50(&[30, 100, 20, 90, 80]), 90);
    }

    #[test]
    fn n50_empty_is_zero() {
        assert_eq!(n50(&[]), 0);
    }

    #[test]
    fn n50_exact_half() {
        // 60 + 40 reaches exactly half of 200.
        assert_eq!(n50(&[60, 40, 50, 50]), 50);
        assert_eq!(n50(&[100, 100]), 100);
    }

    #[test]
    fn result_from_contigs() {
        let contigs = vec![vec![b'A'; 100], vec![b'C'; 90], vec![b'G'; 80], vec![b'T'; 30], vec![b'A'; 20]];
        let result = AssemblyResult::from_contigs(contigs, 50, 40);
        assert_eq!(result.n50, 90);
        assert_eq!(result.longest_contig, 100);
        assert_eq!(result.total_length, 320);
        assert_eq!(result.summary(), "5 contigs (320 bp, N50 90, longest 100) from 40/50 reads");
    }

    #[test]
    fn empty_result_is_zeroed() {
        let result = AssemblyResult::empty();
        assert!(result.contigs.is_empty());
        assert_eq!(
            (result.total_reads, result.assembled_reads, result.n50, result.longest_contig, result.total_length),
            (0, 0, 0, 0, 0)
        );
        assert!(result.stats().is_none());
    }

    #[test]
    fn full_stats() {
        let long = vec![b'G'; 300];
        let mid = vec![b'A'; 200];
        let short = b"ACGTN".to_vec();
        let contigs: Vec<&[u8]> = vec![&mid, &short, &long];
        let stats = assembly_stats(&contigs).unwrap();
        assert_eq!(stats.n_contigs, 3);
        assert_eq!(stats.total_length, 505);
        assert_eq!((stats.largest_contig, stats.smallest_contig), (300, 5));
        // half of 505 rounds up to 253: 300 alone suffices.
        assert_eq!((stats.n50, stats.l50), (300, 1));
        // 0.9 × 505 → 455: 300 + 200.
        assert_eq!((stats.n90, stats.l90), (200, 2));
        // G: 300 + 1, C: 1 over 504 unambiguous bases.
        assert!((stats.gc_content - 302.0 / 504.0).abs() < 1e-12);
        let expected_aun = (300.0f64 * 300.0 + 200.0 * 200.0 + 25.0) / 505.0;
        assert!((stats.auN - expected_aun).abs() < 1e-9);
    }

    #[test]
    fn nx_bounds() {
        let a = vec![b'A'; 12];
        let b = vec![b'A'; 4];
        let contigs: Vec<&[u8]> = vec![&b, &a];
        assert_eq!(nx_values(&contigs, 1.0).unwrap(), (4, 2));
        assert_eq!(nx_values(&contigs, 0.75).unwrap(), (12, 1));
        assert!(nx_values(&contigs, 0.0).is_err());
        assert!(nx_values(&contigs, 1.5).is_err());
        assert!(nx_values(&contigs, f64::NAN).is_err());
        assert!(nx_values(&[], 0.5).is_err());
    }
}
