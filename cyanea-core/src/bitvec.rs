//! Fixed-size mutable bitset.
//!
//! [`BitSet`] packs one flag per index into u64 blocks. It backs the
//! "used edge" and "visited read" bookkeeping of graph walks, where a
//! `HashSet<usize>` would hash on every step of the hot loop.

/// A fixed-capacity set of indices in `[0, len)`, one bit per index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSet {
    blocks: Vec<u64>,
    len: usize,
}

impl BitSet {
    /// Create a bitset of `len` bits, all cleared.
    pub fn new(len: usize) -> Self {
        Self {
            blocks: vec![0u64; len.div_ceil(64)],
            len,
        }
    }

    /// Whether bit `i` is set.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len`.
    pub fn contains(&self, i: usize) -> bool {
        assert!(i < self.len, "index out of bounds");
        (self.blocks[i / 64] >> (i % 64)) & 1 == 1
    }

    /// Set bit `i`. Returns `true` if it was previously clear.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len`.
    pub fn insert(&mut self, i: usize) -> bool {
        assert!(i < self.len, "index out of bounds");
        let mask = 1u64 << (i % 64);
        let block = &mut self.blocks[i / 64];
        let was_clear = *block & mask == 0;
        *block |= mask;
        was_clear
    }

    /// First clear bit in `[start, end)`, if any.
    ///
    /// Skips fully-set blocks with a single comparison, so scanning a long
    /// run of used edges costs one step per 64 edges.
    pub fn first_clear_in(&self, start: usize, end: usize) -> Option<usize> {
        let end = end.min(self.len);
        let mut i = start;
        while i < end {
            let block = self.blocks[i / 64];
            let offset = i % 64;
            // Bits below `offset` are outside the range; treat them as set.
            let free = !(block | ((1u64 << offset) - 1));
            if free != 0 {
                let pos = (i - offset) + free.trailing_zeros() as usize;
                return (pos < end).then_some(pos);
            }
            i = i - offset + 64;
        }
        None
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.blocks.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Number of clear bits.
    pub fn count_zeros(&self) -> usize {
        self.len - self.count_ones()
    }

    /// Total number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the bitset has zero capacity.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_contains() {
        let mut set = BitSet::new(130);
        assert!(set.insert(0));
        assert!(set.insert(64));
        assert!(set.insert(129));
        assert!(!set.insert(64));
        assert!(set.contains(0));
        assert!(set.contains(129));
        assert!(!set.contains(1));
        assert_eq!(set.count_ones(), 3);
        assert_eq!(set.count_zeros(), 127);
    }

    #[test]
    fn first_clear_skips_full_blocks() {
        let mut set = BitSet::new(200);
        for i in 0..150 {
            set.insert(i);
        }
        assert_eq!(set.first_clear_in(0, 200), Some(150));
        assert_eq!(set.first_clear_in(10, 150), None);
        assert_eq!(set.first_clear_in(160, 170), Some(160));
    }

    #[test]
    fn first_clear_respects_range_start() {
        let set = BitSet::new(10);
        assert_eq!(set.first_clear_in(7, 10), Some(7));
        assert_eq!(set.first_clear_in(10, 10), None);
    }

    #[test]
    fn empty_set() {
        let set = BitSet::new(0);
        assert!(set.is_empty());
        assert_eq!(set.first_clear_in(0, 5), None);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn out_of_bounds_panics() {
        let set = BitSet::new(4);
        set.contains(4);
    }
}
