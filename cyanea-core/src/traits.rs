//! Traits shared by the assembly types.

/// Byte-level view of a nucleotide sequence.
pub trait Sequence {
    fn as_bytes(&self) -> &[u8];

    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Fraction of `G`/`C` among unambiguous bases (0.0 if there are none).
    fn gc_fraction(&self) -> f64 {
        let (gc, acgt) = self.as_bytes().iter().fold((0usize, 0usize), |(gc, n), b| {
            match b.to_ascii_uppercase() {
                b'G' | b'C' => (gc + 1, n + 1),
                b'A' | b'T' => (gc, n + 1),
                _ => (gc, n),
            }
        });
        if acgt == 0 {
            0.0
        } else {
            gc as f64 / acgt as f64
        }
    }
}

/// A value reducible to one number, such as mean base quality.
pub trait Scored {
    fn score(&self) -> f64;
}

/// One-line, human-readable description used in log lines.
pub trait Summarizable {
    fn summary(&self) -> String;
}
