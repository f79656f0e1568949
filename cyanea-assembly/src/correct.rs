//! K-mer spectrum error correction.
//!
//! A global [`KmerSpectrum`] is counted over all reads once. Each read is
//! then scanned window by window; a window whose k-mer occurs fewer than
//! `min_kmer_frequency` times has its middle base (offset `k / 2`) replaced
//! by each alternative base in `ACGT` order, keeping the first substitution
//! that makes the window solid and reverting otherwise. Later windows see
//! earlier corrections.
//!
//! Only the middle base of a weak window is ever tried. An error lying
//! closer than `k / 2` to a read end is never the middle of any window and
//! stays uncorrected.

use cyanea_core::{CyaneaError, Result};
use tracing::{debug, info};

use crate::kmer::KmerSpectrum;
use crate::read::{Read, BASES};

/// Outcome of a correction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionReport {
    /// Corrected reads, in input order.
    pub reads: Vec<Read>,
    /// Bases changed across all reads.
    pub corrected_bases: usize,
    /// Weak windows for which no single substitution helped.
    pub uncorrectable_windows: usize,
}

/// Correct one read in place against `spectrum`.
///
/// Returns `(corrected_bases, uncorrectable_windows)`.
fn correct_read(seq: &mut [u8], spectrum: &KmerSpectrum, min_kmer_frequency: u32) -> (usize, usize) {
    let k = spectrum.k();
    if seq.len() < k {
        return (0, 0);
    }
    let mid = k / 2;
    let mut corrected = 0;
    let mut failed = 0;
    for start in 0..=seq.len() - k {
        if spectrum.count(&seq[start..start + k]) >= min_kmer_frequency {
            continue;
        }
        let pos = start + mid;
        let original = seq[pos];
        let mut fixed = false;
        for &alt in BASES.iter().filter(|&&b| b != original) {
            seq[pos] = alt;
            if spectrum.count(&seq[start..start + k]) >= min_kmer_frequency {
                fixed = true;
                break;
            }
        }
        if fixed {
            corrected += 1;
        } else {
            seq[pos] = original;
            failed += 1;
        }
    }
    (corrected, failed)
}

/// Correct low-frequency k-mers in `reads` using their own k-mer spectrum.
///
/// # Errors
///
/// Returns an error if `k < 2` or `min_kmer_frequency` is zero.
pub fn correct_errors(reads: &[Read], k: usize, min_kmer_frequency: u32) -> Result<CorrectionReport> {
    if k < 2 {
        return Err(CyaneaError::InvalidInput(format!(
            "k-mer size for error correction must be at least 2, got {}",
            k
        )));
    }
    if min_kmer_frequency == 0 {
        return Err(CyaneaError::InvalidInput(
            "minimum k-mer frequency must be at least 1".into(),
        ));
    }
    info!(reads = reads.len(), k, min_kmer_frequency, "correcting read errors");
    let spectrum = KmerSpectrum::from_reads(reads, k)?;
    debug!(distinct = spectrum.distinct(), total = spectrum.total(), "counted k-mer spectrum");

    let mut corrected_bases = 0;
    let mut uncorrectable_windows = 0;
    let corrected = reads
        .iter()
        .map(|read| {
            let mut seq = read.to_vec();
            let (fixed, failed) = correct_read(&mut seq, &spectrum, min_kmer_frequency);
            corrected_bases += fixed;
            uncorrectable_windows += failed;
            Read::from_normalized(seq)
        })
        .collect();
    debug!(corrected_bases, uncorrectable_windows, "error correction finished");
    Ok(CorrectionReport {
        reads: corrected,
        corrected_bases,
        uncorrectable_windows,
    })
}
