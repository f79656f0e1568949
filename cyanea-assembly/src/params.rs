//! Assembly configuration.

use cyanea_core::{CyaneaError, Result};
use tracing::debug;

/// Parameters for one assembly run.
///
/// All fields are read-only inputs to a single call; nothing here is
/// mutated while an assembly is in progress.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssemblyParameters {
    /// Minimum suffix/prefix overlap length between two reads.
    pub min_overlap: usize,
    /// Minimum fraction of matching bases within an overlap (0.0–1.0).
    pub min_identity: f64,
    /// K-mer length for de Bruijn graph construction.
    pub kmer_size: usize,
    /// Contigs shorter than this are dropped from the result.
    pub min_contig_length: usize,
}

impl Default for AssemblyParameters {
    fn default() -> Self {
        Self {
            min_overlap: 20,
            min_identity: 0.9,
            kmer_size: 31,
            min_contig_length: 100,
        }
    }
}

impl AssemblyParameters {
    /// Shortest suffix/prefix overlap accepted between two reads.
    pub fn with_min_overlap(mut self, min_overlap: usize) -> Self {
        self.min_overlap = min_overlap;
        self
    }

    /// Fraction of matching bases an overlap needs, in `[0, 1]`.
    pub fn with_min_identity(mut self, min_identity: f64) -> Self {
        self.min_identity = min_identity;
        self
    }

    /// Edge length `k` of the de Bruijn graph.
    pub fn with_kmer_size(mut self, kmer_size: usize) -> Self {
        self.kmer_size = kmer_size;
        self
    }

    /// Contigs shorter than this are discarded by both strategies.
    pub fn with_min_contig_length(mut self, min_contig_length: usize) -> Self {
        self.min_contig_length = min_contig_length;
        self
    }

    /// Check the parameters independently of any input.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_overlap` is zero, `min_identity` is not a
    /// finite value in `[0, 1]`, or `kmer_size < 2`.
    pub fn validate(&self) -> Result<()> {
        if self.min_overlap == 0 {
            return Err(CyaneaError::InvalidInput(
                "minimum overlap must be at least 1".into(),
            ));
        }
        if !self.min_identity.is_finite() || !(0.0..=1.0).contains(&self.min_identity) {
            return Err(CyaneaError::InvalidInput(format!(
                "minimum identity must be in [0, 1], got {}",
                self.min_identity
            )));
        }
        if self.kmer_size < 2 {
            return Err(CyaneaError::InvalidInput(format!(
                "k-mer size must be at least 2, got {}",
                self.kmer_size
            )));
        }
        Ok(())
    }

    /// Check that `kmer_size` is usable with reads whose longest is `max_read_len`.
    pub fn validate_kmer_for(&self, max_read_len: usize) -> Result<()> {
        if self.kmer_size >= max_read_len {
            return Err(CyaneaError::InvalidInput(format!(
                "k-mer size {} must be smaller than the longest read ({} bp)",
                self.kmer_size, max_read_len
            )));
        }
        Ok(())
    }

    pub(crate) fn log(&self) {
        debug!(
            min_overlap = self.min_overlap,
            min_identity = self.min_identity,
            kmer_size = self.kmer_size,
            min_contig_length = self.min_contig_length,
            "assembly parameters"
        );
    }
}
