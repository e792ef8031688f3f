use crate::{Bitwise, BitwiseMut, BitwisePair, BitwisePairMut};
use sorted_iter::SortedIterator;
use sorted_iter::assume::AssumeSortedByItemExt;
use std::fmt;
use std::str::FromStr;

pub type Word = u64;

pub(crate) const WORD_BIT_LEN: usize = Word::BITS as usize;

/// A fixed-length vector of bits packed into 64-bit words.
///
/// Bits past `len()` are always zero, so equality and hashing only see the
/// logical contents.
///
/// ```
/// use gf2::{BitVec, Bitwise, BitwiseMut};
///
/// let mut v = BitVec::zeros(70);
/// v.assign_index(3, true);
/// v.assign_index(68, true);
/// assert_eq!(v.weight(), 2);
/// assert_eq!(v.support().collect::<Vec<_>>(), vec![3, 68]);
/// ```
#[must_use]
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitVec {
    words: Vec<Word>,
    bit_len: usize,
}

impl BitVec {
    pub fn zeros(bit_len: usize) -> Self {
        Self {
            words: vec![0; word_count_for(bit_len)],
            bit_len,
        }
    }

    pub fn ones(bit_len: usize) -> Self {
        let mut res = Self {
            words: vec![Word::MAX; word_count_for(bit_len)],
            bit_len,
        };
        res.clear_tail();
        res
    }

    /// A vector of length `bit_len` with exactly the bits in `support` set.
    ///
    /// # Panics
    ///
    /// Panics if an index in `support` is not below `bit_len`.
    pub fn from_support(bit_len: usize, support: impl IntoIterator<Item = usize>) -> Self {
        let mut res = Self::zeros(bit_len);
        for index in support {
            res.assign_index(index, true);
        }
        res
    }

    pub fn random(bit_len: usize, random_number_generator: &mut impl rand::Rng) -> Self {
        let mut res = Self::zeros(bit_len);
        res.assign_random(bit_len, random_number_generator);
        res
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bit_len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    #[must_use]
    pub fn as_words(&self) -> &[Word] {
        &self.words
    }

    pub fn push(&mut self, value: bool) {
        if self.bit_len == self.words.len() * WORD_BIT_LEN {
            self.words.push(0);
        }
        self.bit_len += 1;
        self.assign_index(self.bit_len - 1, value);
    }

    /// The bits at `indexes`, in that order.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range.
    pub fn selected(&self, indexes: &[usize]) -> Self {
        indexes.iter().map(|&index| self.index(index)).collect()
    }

    /// The concatenation `self ++ other`.
    pub fn concatenated(&self, other: &BitVec) -> Self {
        let mut res = self.clone();
        res.extend(other.iter());
        res
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = bool> + '_ {
        (0..self.bit_len).map(|index| self.index(index))
    }

    fn clear_tail(&mut self) {
        let used = self.bit_len % WORD_BIT_LEN;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= ((1 as Word) << used) - 1;
            }
        }
    }
}

fn word_count_for(bit_len: usize) -> usize {
    bit_len.div_ceil(WORD_BIT_LEN)
}

fn split_index(index: usize) -> (usize, Word) {
    (index / WORD_BIT_LEN, 1 << (index % WORD_BIT_LEN))
}

impl Bitwise for BitVec {
    #[inline]
    fn index(&self, index: usize) -> bool {
        assert!(index < self.bit_len, "bit index {index} out of range for length {}", self.bit_len);
        let (word_index, mask) = split_index(index);
        self.words[word_index] & mask != 0
    }

    fn support(&self) -> impl SortedIterator<Item = usize> {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(word_index, &word)| WordSupport {
                word,
                offset: word_index * WORD_BIT_LEN,
            })
            .assume_sorted_by_item()
    }

    #[inline]
    fn weight(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.words.iter().all(|&word| word == 0)
    }
}

impl BitwiseMut for BitVec {
    #[inline]
    fn assign_index(&mut self, index: usize, to: bool) {
        assert!(index < self.bit_len, "bit index {index} out of range for length {}", self.bit_len);
        let (word_index, mask) = split_index(index);
        if to {
            self.words[word_index] |= mask;
        } else {
            self.words[word_index] &= !mask;
        }
    }

    #[inline]
    fn negate_index(&mut self, index: usize) {
        assert!(index < self.bit_len, "bit index {index} out of range for length {}", self.bit_len);
        let (word_index, mask) = split_index(index);
        self.words[word_index] ^= mask;
    }

    fn clear_bits(&mut self) {
        self.words.fill(0);
    }
}

impl BitwisePair for BitVec {
    fn dot(&self, other: &BitVec) -> bool {
        (self.and_weight(other) % 2) == 1
    }

    fn and_weight(&self, other: &BitVec) -> usize {
        self.words
            .iter()
            .zip(&other.words)
            .map(|(left, right)| (left & right).count_ones() as usize)
            .sum()
    }

    fn xor_weight(&self, other: &BitVec) -> usize {
        debug_assert_eq!(self.bit_len, other.bit_len);
        self.words
            .iter()
            .zip(&other.words)
            .map(|(left, right)| (left ^ right).count_ones() as usize)
            .sum()
    }
}

impl BitwisePairMut for BitVec {
    fn assign(&mut self, other: &BitVec) {
        self.words.clone_from(&other.words);
        self.bit_len = other.bit_len;
    }

    fn bitand_assign(&mut self, other: &BitVec) {
        debug_assert_eq!(self.bit_len, other.bit_len);
        for (left, right) in self.words.iter_mut().zip(&other.words) {
            *left &= right;
        }
    }

    fn bitxor_assign(&mut self, other: &BitVec) {
        debug_assert_eq!(self.bit_len, other.bit_len);
        for (left, right) in self.words.iter_mut().zip(&other.words) {
            *left ^= right;
        }
    }
}

struct WordSupport {
    word: Word,
    offset: usize,
}

impl Iterator for WordSupport {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.word == 0 {
            return None;
        }
        let position = self.word.trailing_zeros() as usize;
        self.word &= self.word - 1;
        Some(self.offset + position)
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<Iterator: IntoIterator<Item = bool>>(iterator: Iterator) -> Self {
        let mut res = BitVec::default();
        res.extend(iterator);
        res
    }
}

impl Extend<bool> for BitVec {
    fn extend<Iterator: IntoIterator<Item = bool>>(&mut self, iterator: Iterator) {
        for value in iterator {
            self.push(value);
        }
    }
}

impl fmt::Display for BitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.iter() {
            write!(f, "{}", u8::from(value))?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitVec(len={},value={})", self.bit_len, self)
    }
}

impl FromStr for BitVec {
    type Err = char;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut res = BitVec::default();
        for char in s.chars() {
            match char {
                '0' | '.' => res.push(false),
                '1' => res.push(true),
                ' ' | ',' | '_' => {}
                other => return Err(other),
            }
        }
        Ok(res)
    }
}
