//! Normalized sequencing reads.
//!
//! [`Read`] is a newtype over `Vec<u8>` whose bytes are always uppercase
//! members of the nucleotide alphabet `ACGTN`. Construction uppercases and
//! validates every byte, so downstream comparisons are plain byte equality.

use std::fmt;
use std::ops::Deref;

use cyanea_core::{CyaneaError, Result, Sequence, Summarizable};

/// Valid (uppercase) read bytes.
pub const NUCLEOTIDES: &[u8] = b"ACGTN";

/// The four unambiguous bases, in substitution order.
pub const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Whether `b` (already uppercased) is a valid read byte.
pub fn is_nucleotide(b: u8) -> bool {
    NUCLEOTIDES.contains(&b)
}

/// An immutable, uppercase nucleotide read.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Read {
    data: Vec<u8>,
}

impl Read {
    /// Create a read from raw bytes.
    ///
    /// Input is uppercased, then every byte is checked against `ACGTN`.
    pub fn new(bytes: impl AsRef<[u8]>) -> Result<Self> {
        let data: Vec<u8> = bytes.as_ref().iter().map(|b| b.to_ascii_uppercase()).collect();
        if let Some(i) = data.iter().position(|&b| !is_nucleotide(b)) {
            return Err(CyaneaError::InvalidInput(format!(
                "invalid nucleotide '{}' (0x{:02X}) at position {}",
                data[i] as char, data[i], i
            )));
        }
        Ok(Self { data })
    }

    /// Wrap bytes already known to be uppercase nucleotides.
    pub(crate) fn from_normalized(data: Vec<u8>) -> Self {
        debug_assert!(data.iter().all(|&b| is_nucleotide(b)));
        Self { data }
    }

    /// Consume the read and return the inner byte vector.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Normalize a batch of raw reads, failing on the first invalid one.
pub fn normalize_reads<S: AsRef<[u8]>>(reads: &[S]) -> Result<Vec<Read>> {
    reads
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Read::new(r).map_err(|e| match e {
                CyaneaError::InvalidInput(msg) => {
                    CyaneaError::InvalidInput(format!("read {}: {}", i, msg))
                }
                other => other,
            })
        })
        .collect()
}

impl Deref for Read {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl AsRef<[u8]> for Read {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl Sequence for Read {
    fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Summarizable for Read {
    fn summary(&self) -> String {
        let preview_len = self.data.len().min(20);
        let preview = String::from_utf8_lossy(&self.data[..preview_len]);
        if self.data.len() > 20 {
            format!("read ({} bp): {}...", self.data.len(), preview)
        } else {
            format!("read ({} bp): {}", self.data.len(), preview)
        }
    }
}

impl fmt::Debug for Read {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Read(\"{}\")", String::from_utf8_lossy(&self.data))
    }
}

impl fmt::Display for Read {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.data))
    }
}
