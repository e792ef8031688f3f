use sorted_iter::SortedIterator;

/// Read access to a finite sequence of bits.
///
/// See also [`BitwiseMut`], [`BitwisePair`], and [`BitwisePairMut`].
pub trait Bitwise {
    fn index(&self, index: usize) -> bool;

    /// Ascending positions of the set bits.
    fn support(&self) -> impl SortedIterator<Item = usize>;

    #[inline]
    fn min_support(&self) -> Option<usize> {
        self.support().next()
    }

    #[inline]
    fn max_support(&self) -> Option<usize> {
        self.support().last()
    }

    #[inline]
    fn weight(&self) -> usize {
        self.support().count()
    }

    #[inline]
    fn parity(&self) -> bool {
        (self.weight() % 2) == 1
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.weight() == 0
    }
}

/// See also [`Bitwise`], [`BitwisePair`], and [`BitwisePairMut`].
pub trait BitwiseMut: Bitwise {
    fn assign_index(&mut self, index: usize, to: bool);
    fn negate_index(&mut self, index: usize);
    fn clear_bits(&mut self);

    fn assign_random(&mut self, bit_count: usize, random_number_generator: &mut impl rand::Rng) {
        for j in 0..bit_count {
            self.assign_index(j, random_number_generator.r#gen());
        }
    }
}

/// See also [`Bitwise`], [`BitwiseMut`], and [`BitwisePairMut`].
pub trait BitwisePair<Other: ?Sized = Self> {
    /// Inner product over GF(2).
    fn dot(&self, other: &Other) -> bool;
    fn and_weight(&self, other: &Other) -> usize;
    fn xor_weight(&self, other: &Other) -> usize;
}

/// See also [`Bitwise`], [`BitwiseMut`], and [`BitwisePair`].
pub trait BitwisePairMut<Other: ?Sized + Bitwise = Self>: Bitwise + BitwiseMut + BitwisePair<Other> {
    fn assign(&mut self, other: &Other);
    fn bitand_assign(&mut self, other: &Other);
    fn bitxor_assign(&mut self, other: &Other);
}
