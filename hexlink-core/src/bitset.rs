//! Dense bitset over cell indices
//!
//! Occupancy and reachability are per-cell flags over at most
//! `MAX_BOARD_SIZE^2` cells, so a handful of words with bitwise ops covers
//! membership, cardinality and intersection. Length is fixed at
//! construction; `resize` on the board swaps in a fresh bitset.

/// Fixed-capacity bitset indexed by cell index
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitSet {
    bits: Vec<u64>,
    len: usize,
}

impl BitSet {
    /// Create an empty bitset holding `len` cells
    pub fn new(len: usize) -> Self {
        Self {
            bits: vec![0; len.div_ceil(64)],
            len,
        }
    }

    /// Number of cells this set can hold
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn set(&mut self, index: usize) {
        debug_assert!(index < self.len);
        self.bits[index / 64] |= 1u64 << (index % 64);
    }

    #[inline]
    pub fn get(&self, index: usize) -> bool {
        debug_assert!(index < self.len);
        (self.bits[index / 64] >> (index % 64)) & 1 == 1
    }

    /// Clear every bit, keeping capacity
    pub fn clear_all(&mut self) {
        self.bits.fill(0);
    }

    /// Count set bits (popcount)
    pub fn count_ones(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    /// True iff the two sets share at least one member
    pub fn intersects(&self, other: &BitSet) -> bool {
        self.bits
            .iter()
            .zip(&other.bits)
            .any(|(a, b)| a & b != 0)
    }

    /// True iff every member of `self` is also in `other`
    pub fn is_subset_of(&self, other: &BitSet) -> bool {
        self.bits
            .iter()
            .zip(&other.bits)
            .all(|(a, b)| a & !b == 0)
    }

    /// Iterate over set bit indices in increasing order
    pub fn ones(&self) -> Ones<'_> {
        Ones {
            bits: &self.bits,
            word_idx: 0,
            current_word: self.bits.first().copied().unwrap_or(0),
        }
    }
}

/// Iterator over set bits
pub struct Ones<'a> {
    bits: &'a [u64],
    word_idx: usize,
    current_word: u64,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.current_word == 0 {
            self.word_idx += 1;
            if self.word_idx >= self.bits.len() {
                return None;
            }
            self.current_word = self.bits[self.word_idx];
        }
        let bit = self.current_word.trailing_zeros() as usize;
        // Drop the lowest set bit
        self.current_word &= self.current_word - 1;
        Some(self.word_idx * 64 + bit)
    }
}
