//! K-mer iteration and abundance spectra.
//!
//! [`kmers`] yields the windows of a read after checking `k`.
//! [`KmerSpectrum`] counts every k-mer of a read set; it is the frequency
//! table consulted by spectrum-based error correction.

use std::collections::{BTreeMap, HashMap};
use std::slice::Windows;

use cyanea_core::{CyaneaError, Result};

use crate::read::Read;

/// The k-mers of `seq`, left to right.
///
/// A sequence shorter than `k` has none.
///
/// # Errors
///
/// Returns an error if `k` is zero.
pub fn kmers(seq: &[u8], k: usize) -> Result<Windows<'_, u8>> {
    if k == 0 {
        return Err(CyaneaError::InvalidInput("k-mers need k >= 1".into()));
    }
    Ok(seq.windows(k))
}

/// Abundance of every k-mer across a set of reads.
#[derive(Debug, Clone)]
pub struct KmerSpectrum {
    k: usize,
    counts: HashMap<Vec<u8>, u32>,
    total: usize,
}

impl KmerSpectrum {
    /// Count all k-mers of `reads`. Reads shorter than `k` contribute nothing.
    pub fn from_reads(reads: &[Read], k: usize) -> Result<Self> {
        let mut counts: HashMap<Vec<u8>, u32> = HashMap::new();
        let mut total = 0usize;
        for read in reads {
            for kmer in kmers(read, k)? {
                // Avoid allocating a key for k-mers already present.
                match counts.get_mut(kmer) {
                    Some(c) => *c += 1,
                    None => {
                        counts.insert(kmer.to_vec(), 1);
                    }
                }
                total += 1;
            }
        }
        Ok(Self { k, counts, total })
    }

    /// The k-mer length.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Occurrences of `kmer` (0 if absent or of the wrong length).
    pub fn count(&self, kmer: &[u8]) -> u32 {
        self.counts.get(kmer).copied().unwrap_or(0)
    }

    /// Number of distinct k-mers.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Total k-mer occurrences, duplicates included.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Abundance histogram: multiplicity → number of distinct k-mers seen that often.
    pub fn histogram(&self) -> BTreeMap<u32, usize> {
        let mut hist = BTreeMap::new();
        for &c in self.counts.values() {
            *hist.entry(c).or_insert(0) += 1;
        }
        hist
    }

    /// Fraction of distinct k-mers seen at least `min_count` times.
    pub fn solid_fraction(&self, min_count: u32) -> f64 {
        if self.counts.is_empty() {
            return 0.0;
        }
        let solid = self.counts.values().filter(|&&c| c >= min_count).count();
        solid as f64 / self.counts.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::reads;

    #[test]
    fn windows_in_order() {
        let found: Vec<&[u8]> = kmers(b"GATTACA", 4).unwrap().collect();
        assert_eq!(found, [&b"GATT"[..], b"ATTA", b"TTAC", b"TACA"]);
        assert_eq!(kmers(b"GATTACA", 4).unwrap().rev().next(), Some(&b"TACA"[..]));
    }

    #[test]
    fn short_read_has_no_kmers() {
        assert_eq!(kmers(b"GAT", 4).unwrap().len(), 0);
        assert!(kmers(b"GAT", 0).is_err());
    }

    #[test]
    fn spectrum_counts() {
        let spectrum = KmerSpectrum::from_reads(&reads(&["ACGTAC", "CGTA"]), 3).unwrap();
        // ACG CGT GTA TAC + CGT GTA
        assert_eq!(spectrum.total(), 6);
        assert_eq!(spectrum.distinct(), 4);
        assert_eq!(spectrum.count(b"CGT"), 2);
        assert_eq!(spectrum.count(b"ACG"), 1);
        assert_eq!(spectrum.count(b"TTT"), 0);
    }

    #[test]
    fn spectrum_histogram() {
        let spectrum = KmerSpectrum::from_reads(&reads(&["ACGTAC", "CGTA"]), 3).unwrap();
        let hist = spectrum.histogram();
        assert_eq!(hist.get(&1), Some(&2));
        assert_eq!(hist.get(&2), Some(&2));
        assert!((spectrum.solid_fraction(2) - 0.5).abs() < 1e-12);
    }
}
