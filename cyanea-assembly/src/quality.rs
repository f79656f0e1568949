//! Per-base Phred qualities attached to reads.
//!
//! Qualities are decoded once at construction; everything downstream
//! (trimming, expected-error filters) works on plain Phred values.

use cyanea_core::{CyaneaError, Result, Scored, Sequence};

use crate::read::Read;

/// ASCII offset used to print Phred values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhredEncoding {
    /// Offset 33, used by current FASTQ producers.
    #[default]
    Phred33,
    /// Offset 64, found in older Illumina output.
    Phred64,
}

impl PhredEncoding {
    pub fn offset(self) -> u8 {
        match self {
            Self::Phred33 => b'!',
            Self::Phred64 => b'@',
        }
    }

    /// Phred value of one quality character, if it is not below the offset.
    pub fn decode(self, ch: u8) -> Option<u8> {
        ch.checked_sub(self.offset())
    }

    /// Quality character for a Phred value, saturating at `0xFF`.
    pub fn encode(self, phred: u8) -> u8 {
        phred.saturating_add(self.offset())
    }
}

/// Probability that a base called at `phred` is wrong.
pub fn phred_error_probability(phred: u8) -> f64 {
    10f64.powf(f64::from(phred) / -10.0)
}

/// Decoded Phred values for one read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QualityScores(Vec<u8>);

impl QualityScores {
    /// Wrap values that are already Phred scores.
    pub fn from_raw(phred: Vec<u8>) -> Self {
        Self(phred)
    }

    /// Decode a quality line.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first character below the encoding's offset.
    pub fn from_ascii(line: &[u8], encoding: PhredEncoding) -> Result<Self> {
        line.iter()
            .enumerate()
            .map(|(pos, &ch)| {
                encoding.decode(ch).ok_or_else(|| {
                    CyaneaError::InvalidInput(format!(
                        "quality character {:?} at position {} is invalid for {:?}",
                        ch as char, pos, encoding
                    ))
                })
            })
            .collect::<Result<Vec<u8>>>()
            .map(Self)
    }

    pub fn to_ascii(&self, encoding: PhredEncoding) -> Vec<u8> {
        self.0.iter().map(|&q| encoding.encode(q)).collect()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Arithmetic mean of the Phred values (0.0 when empty).
    pub fn mean(&self) -> f64 {
        match self.0.len() {
            0 => 0.0,
            n => self.0.iter().map(|&q| f64::from(q)).sum::<f64>() / n as f64,
        }
    }

    /// Expected number of miscalled bases.
    pub fn expected_errors(&self) -> f64 {
        self.0.iter().map(|&q| phred_error_probability(q)).sum()
    }

    fn slice(&self, start: usize, end: usize) -> Self {
        Self(self.0[start..end].to_vec())
    }
}

impl Scored for QualityScores {
    fn score(&self) -> f64 {
        self.mean()
    }
}

/// A read with one quality score per base.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredRead {
    sequence: Read,
    quality: QualityScores,
}

impl ScoredRead {
    /// Pair a read with its qualities.
    ///
    /// # Errors
    ///
    /// Returns an error if the lengths differ.
    pub fn new(sequence: Read, quality: QualityScores) -> Result<Self> {
        if sequence.len() != quality.len() {
            return Err(CyaneaError::InvalidInput(format!(
                "read has {} bases but {} quality values",
                sequence.len(),
                quality.len()
            )));
        }
        Ok(Self { sequence, quality })
    }

    /// Build from raw bases and a Phred+33 quality line.
    pub fn from_phred33(sequence: impl AsRef<[u8]>, quality: &[u8]) -> Result<Self> {
        Self::new(
            Read::new(sequence)?,
            QualityScores::from_ascii(quality, PhredEncoding::Phred33)?,
        )
    }

    pub fn sequence(&self) -> &Read {
        &self.sequence
    }

    pub fn quality(&self) -> &QualityScores {
        &self.quality
    }

    /// Keep bases `[start, end)`.
    pub(crate) fn slice(&self, start: usize, end: usize) -> Self {
        Self {
            sequence: Read::from_normalized(self.sequence[start..end].to_vec()),
            quality: self.quality.slice(start, end),
        }
    }

    pub fn into_read(self) -> Read {
        self.sequence
    }
}

impl Sequence for ScoredRead {
    fn as_bytes(&self) -> &[u8] {
        self.sequence.as_bytes()
    }
}
