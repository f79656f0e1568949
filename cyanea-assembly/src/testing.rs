//! Shared fixtures for unit tests.

use crate::read::Read;

/// Deterministic pseudo-random DNA (64-bit LCG).
pub(crate) fn synthetic(len: usize, seed: u64) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            bases[((state >> 33) % 4) as usize]
        })
        .collect()
}

pub(crate) fn reads(seqs: &[&str]) -> Vec<Read> {
    seqs.iter().map(|s| Read::new(s).unwrap()).collect()
}
