//! Genome assembly from short reads for the Cyanea bioinformatics ecosystem.
//!
//! Two contig construction paths share one configuration type
//! ([`AssemblyParameters`]) and one result type ([`AssemblyResult`]):
//!
//! - **Overlap-layout-consensus**: [`find_overlaps`] then [`build_contigs`]
//! - **De Bruijn graph**: [`DeBruijnGraph::build`] then [`trace_contigs`]
//!
//! Around them sits a small assembly toolkit:
//!
//! - **Scaffolding**: [`Scaffolder`] joins contigs along [`ScaffoldLink`]s
//! - **Coverage**: [`calculate_coverage`] places reads on a reference
//! - **Consensus**: [`compute_consensus`] and [`polish_contig`]
//! - **Preprocessing**: [`quality_trim_reads`] and [`correct_errors`]
//! - **Statistics**: [`assembly_stats`], [`n50`] and [`KmerSpectrum`]
//!
//! Long-running operations accept a [`RunControl`] for cancellation and
//! progress reporting. Enable the `parallel` feature to spread overlap
//! detection and read placement across a rayon thread pool.
//!
//! # Example
//!
//! ```
//! use cyanea_assembly::{assemble, AssemblyParameters, AssemblyStrategy};
//!
//! let reads = ["ACGTTGCATC", "GCATCCGAAGT"];
//! let params = AssemblyParameters::default()
//!     .with_min_overlap(4)
//!     .with_min_identity(1.0)
//!     .with_min_contig_length(10);
//!
//! let result = assemble(&reads, &params, AssemblyStrategy::Olc).unwrap();
//! assert_eq!(result.contigs, vec![b"ACGTTGCATCCGAAGT".to_vec()]);
//! assert_eq!(result.n50, 16);
//! assert_eq!(result.assembled_reads, 2);
//! ```

pub mod assembler;
pub mod consensus;
pub mod correct;
pub mod coverage;
pub mod debruijn;
pub mod kmer;
pub mod olc;
pub mod overlap;
pub mod params;
pub mod quality;
pub mod read;
pub mod scaffold;
pub mod stats;
pub mod tracer;
pub mod trim;

#[cfg(test)]
mod testing;

// Re-export the top-level entry points
pub use assembler::{assemble, Assembler, AssemblyStrategy};
pub use params::AssemblyParameters;
pub use read::{normalize_reads, Read};
pub use stats::{assembly_stats, n50, nx_values, AssemblyResult, AssemblyStats};

// Re-export the OLC path
pub use olc::{build_contigs, Contig};
pub use overlap::{find_overlaps, Overlap};

// Re-export the de Bruijn path
pub use debruijn::{DeBruijnGraph, NodeId};
pub use tracer::trace_contigs;

// Re-export downstream and preprocessing stages
pub use consensus::{compute_consensus, polish_contig};
pub use correct::{correct_errors, CorrectionReport};
pub use coverage::{calculate_coverage, CoverageProfile};
pub use kmer::{kmers, KmerSpectrum};
pub use quality::{PhredEncoding, QualityScores, ScoredRead};
pub use scaffold::{build_scaffolds, Scaffold, ScaffoldLink, Scaffolder};
pub use trim::quality_trim_reads;

pub use cyanea_core::{CancellationToken, CyaneaError, Result, RunControl};
