//! Top-level assembly entry points.
//!
//! [`Assembler`] validates its [`AssemblyParameters`] once, then runs either
//! the overlap-layout-consensus path (overlaps → greedy chaining) or the
//! de Bruijn path (graph → greedy tracing) over a read set. Both return an
//! [`AssemblyResult`] and discard every intermediate structure on return.

use std::collections::HashSet;

use cyanea_core::{Result, RunControl, Summarizable};
use tracing::info;

use crate::debruijn::DeBruijnGraph;
use crate::olc::build_contigs;
use crate::overlap::find_overlaps;
use crate::params::AssemblyParameters;
use crate::read::{normalize_reads, Read};
use crate::stats::AssemblyResult;
use crate::tracer::trace_contigs;

/// Which contig construction path to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssemblyStrategy {
    /// Pairwise overlaps chained greedily. O(N²) in the number of reads.
    #[default]
    Olc,
    /// K-mer graph traced greedily. Scales with total read length.
    DeBruijn,
}

/// Runs assemblies with fixed parameters.
#[derive(Debug, Clone)]
pub struct Assembler {
    params: AssemblyParameters,
    control: RunControl,
}

impl Assembler {
    /// Create an assembler.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` fails [`AssemblyParameters::validate`].
    pub fn new(params: AssemblyParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            control: RunControl::default(),
        })
    }

    /// Attach cancellation and progress reporting.
    pub fn with_control(mut self, control: RunControl) -> Self {
        self.control = control;
        self
    }

    pub fn params(&self) -> &AssemblyParameters {
        &self.params
    }

    /// Assemble `reads` with the chosen strategy.
    pub fn assemble<S: AsRef<[u8]>>(
        &self,
        reads: &[S],
        strategy: AssemblyStrategy,
    ) -> Result<AssemblyResult> {
        match strategy {
            AssemblyStrategy::Olc => self.assemble_olc(reads),
            AssemblyStrategy::DeBruijn => self.assemble_debruijn(reads),
        }
    }

    /// Overlap-layout-consensus assembly.
    ///
    /// # Errors
    ///
    /// Returns an error if a read contains a non-nucleotide byte, or
    /// [`cyanea_core::CyaneaError::Cancelled`] if the run is cancelled.
    pub fn assemble_olc<S: AsRef<[u8]>>(&self, reads: &[S]) -> Result<AssemblyResult> {
        let reads = normalize_reads(reads)?;
        if reads.is_empty() {
            return Ok(AssemblyResult::empty());
        }
        self.params.log();
        info!(reads = reads.len(), "starting OLC assembly");

        let overlaps = find_overlaps(
            &reads,
            self.params.min_overlap,
            self.params.min_identity,
            &self.control,
        )?;
        let contigs = build_contigs(&reads, &overlaps, self.params.min_contig_length);
        let assembled_reads = contigs.iter().map(|c| c.layout.len()).sum();
        let result = AssemblyResult::from_contigs(
            contigs.into_iter().map(|c| c.sequence).collect(),
            reads.len(),
            assembled_reads,
        );
        info!("OLC assembly: {}", result.summary());
        Ok(result)
    }

    /// De Bruijn graph assembly.
    ///
    /// # Errors
    ///
    /// Returns an error if a read contains a non-nucleotide byte, if
    /// `kmer_size` is not smaller than the longest read, or
    /// [`cyanea_core::CyaneaError::Cancelled`] if the run is cancelled.
    pub fn assemble_debruijn<S: AsRef<[u8]>>(&self, reads: &[S]) -> Result<AssemblyResult> {
        let reads = normalize_reads(reads)?;
        let Some(max_len) = reads.iter().map(|r| r.len()).max() else {
            return Ok(AssemblyResult::empty());
        };
        self.params.validate_kmer_for(max_len)?;
        self.params.log();
        info!(reads = reads.len(), k = self.params.kmer_size, "starting de Bruijn assembly");

        self.control.check()?;
        let graph = DeBruijnGraph::build(&reads, self.params.kmer_size)?;
        self.control.check()?;
        let mut contigs = trace_contigs(&graph);
        contigs.retain(|c| c.len() >= self.params.min_contig_length);
        let assembled_reads = count_assembled(&reads, &contigs, self.params.kmer_size);
        let result = AssemblyResult::from_contigs(contigs, reads.len(), assembled_reads);
        info!("de Bruijn assembly: {}", result.summary());
        Ok(result)
    }
}

/// Reads sharing at least one k-mer with a reported contig.
fn count_assembled(reads: &[Read], contigs: &[Vec<u8>], k: usize) -> usize {
    let kmers: HashSet<&[u8]> = contigs.iter().flat_map(|c| c.windows(k)).collect();
    reads
        .iter()
        .filter(|r| r.windows(k).any(|kmer| kmers.contains(kmer)))
        .count()
}

/// Assemble `reads` with default control and the given strategy.
pub fn assemble<S: AsRef<[u8]>>(
    reads: &[S],
    params: &AssemblyParameters,
    strategy: AssemblyStrategy,
) -> Result<AssemblyResult> {
    Assembler::new(params.clone())?.assemble(reads, strategy)
}

#[cfg(test)]
mod tests {
    use cyanea_core::CancellationToken;

    use super::*;
    use crate::testing::synthetic;

    fn tiled_reads(genome: &[u8], read_len: usize, step: usize) -> Vec<Vec<u8>> {
        (0..=genome.len() - read_len)
            .step_by(step)
            .map(|s| genome[s..s + read_len].to_vec())
            .collect()
    }

    #[test]
    fn olc_reconstructs_tiled_genome() {
        let genome = synthetic(200, 7);
        let reads = tiled_reads(&genome, 40, 20);
        let params = AssemblyParameters::default().with_min_overlap(15).with_min_identity(1.0);
        let result = assemble(&reads, &params, AssemblyStrategy::Olc).unwrap();
        assert_eq!(result.contigs, vec![genome]);
        assert_eq!(result.total_reads, 9);
        assert_eq!(result.assembled_reads, 9);
        assert_eq!(result.n50, 200);
        assert_eq!(result.longest_contig, 200);
        assert_eq!(result.total_length, 200);
    }

    #[test]
    fn debruijn_reconstructs_tiled_genome() {
        let genome = synthetic(200, 7);
        let reads = tiled_reads(&genome, 40, 20);
        let params = AssemblyParameters::default().with_kmer_size(11);
        let result = assemble(&reads, &params, AssemblyStrategy::DeBruijn).unwrap();
        assert_eq!(result.contigs[0], genome);
        assert_eq!(result.assembled_reads, 9);
    }

    #[test]
    fn lowercase_reads_are_normalized() {
        let genome = synthetic(200, 7);
        let reads: Vec<Vec<u8>> = tiled_reads(&genome, 40, 20)
            .into_iter()
            .map(|r| r.to_ascii_lowercase())
            .collect();
        let params = AssemblyParameters::default().with_min_overlap(15).with_min_identity(1.0);
        let result = assemble(&reads, &params, AssemblyStrategy::Olc).unwrap();
        assert_eq!(result.contigs, vec![genome]);
    }

    #[test]
    fn empty_input_is_empty_result() {
        let none: Vec<&str> = Vec::new();
        for strategy in [AssemblyStrategy::Olc, AssemblyStrategy::DeBruijn] {
            let result = assemble(&none, &AssemblyParameters::default(), strategy).unwrap();
            assert_eq!(result, AssemblyResult::empty());
        }
    }

    #[test]
    fn invalid_params_fail_fast() {
        let params = AssemblyParameters::default().with_min_identity(2.0);
        assert!(Assembler::new(params).is_err());
    }

    #[test]
    fn kmer_not_smaller_than_reads_fails() {
        let params = AssemblyParameters::default().with_kmer_size(31);
        let err = assemble(&["ACGTACGTAC"], &params, AssemblyStrategy::DeBruijn).unwrap_err();
        assert!(!err.is_cancelled());
    }

    #[test]
    fn invalid_read_rejected() {
        let err = assemble(&["ACGTXX"], &AssemblyParameters::default(), AssemblyStrategy::Olc);
        assert!(err.is_err());
    }

    #[test]
    fn cancelled_olc_aborts() {
        let token = CancellationToken::new();
        token.cancel();
        let assembler = Assembler::new(AssemblyParameters::default())
            .unwrap()
            .with_control(RunControl::new().with_cancellation(token));
        let genome = synthetic(200, 7);
        let err = assembler.assemble_olc(&tiled_reads(&genome, 40, 20)).unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn short_contigs_filtered_from_result() {
        let genome = synthetic(200, 7);
        let reads = tiled_reads(&genome, 40, 20);
        let params = AssemblyParameters::default()
            .with_min_overlap(15)
            .with_min_contig_length(500);
        let result = assemble(&reads, &params, AssemblyStrategy::Olc).unwrap();
        assert!(result.contigs.is_empty());
        assert_eq!(result.total_reads, 9);
        assert_eq!(result.n50, 0);
    }
}
