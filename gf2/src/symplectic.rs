//! Parity-check matrices in symplectic form.
//!
//! A matrix with `2n` columns describes a stabilizer group on `n` legs: the
//! first `n` columns are the X block, the last `n` the Z block, and leg `i`
//! owns columns `i` and `n + i`. The functions here combine and trace such
//! matrices; their results are reduced with zero rows removed.

use crate::error::{Gf2Error, Result};
use crate::setwise::complement;
use crate::{BitMatrix, BitVec, Bitwise, BitwisePairMut};

/// Number of legs of a symplectic matrix.
///
/// # Errors
///
/// Returns [`Gf2Error::OddColumnCount`] if the column count is odd.
pub fn leg_count(matrix: &BitMatrix) -> Result<usize> {
    let column_count = matrix.column_count();
    if column_count % 2 == 1 {
        return Err(Gf2Error::OddColumnCount { column_count });
    }
    Ok(column_count / 2)
}

/// Symplectic inner product of two rows of the same length `2n`.
#[must_use]
pub fn symplectic_product(left: &BitVec, right: &BitVec) -> bool {
    debug_assert_eq!(left.len(), right.len());
    let n = left.len() / 2;
    let mut anticommutes = false;
    for index in left.support() {
        let partner = if index < n { index + n } else { index - n };
        anticommutes ^= right.index(partner);
    }
    anticommutes
}

/// Whether all rows pairwise commute.
#[must_use]
pub fn is_isotropic(matrix: &BitMatrix) -> bool {
    let rows: Vec<&BitVec> = matrix.rows().collect();
    rows.iter()
        .enumerate()
        .all(|(index, left)| rows[..index].iter().all(|right| !symplectic_product(left, right)))
}

/// Disjoint union of two stabilizer groups.
///
/// With `h1 = [X1 | Z1]` on `n1` legs and `h2 = [X2 | Z2]` on `n2` legs the
/// result is
///
/// ```text
/// [ X1  0  | Z1  0  ]
/// [ 0   X2 | 0   Z2 ]
/// ```
///
/// on `n1 + n2` legs, where leg `i` of `h2` becomes leg `n1 + i`. The result
/// is not reduced.
///
/// # Errors
///
/// Returns [`Gf2Error::OddColumnCount`] if either column count is odd.
pub fn tensor_product(h1: &BitMatrix, h2: &BitMatrix) -> Result<BitMatrix> {
    let n1 = leg_count(h1)?;
    let n2 = leg_count(h2)?;
    let n = n1 + n2;
    let mut res = BitMatrix::zeros(h1.row_count() + h2.row_count(), 2 * n);
    for (row_index, row) in h1.rows().enumerate() {
        for column_index in row.support() {
            let target = if column_index < n1 { column_index } else { column_index + n2 };
            res.set((row_index, target), true);
        }
    }
    for (row_index, row) in h2.rows().enumerate() {
        for column_index in row.support() {
            let target = if column_index < n2 { n1 + column_index } else { n + n1 + column_index - n2 };
            res.set((h1.row_count() + row_index, target), true);
        }
    }
    Ok(res)
}

/// Traces leg `leg1` with leg `leg2` of the same matrix.
///
/// The result generates every element of the group that acts identically on
/// both legs (equal X parts and equal Z parts), restricted to the remaining
/// `n - 2` legs. Remaining legs keep their relative order.
///
/// # Errors
///
/// Fails if the column count is odd, a leg is out of range, or both legs
/// are the same.
pub fn self_trace(matrix: &BitMatrix, leg1: usize, leg2: usize) -> Result<BitMatrix> {
    let n = leg_count(matrix)?;
    for leg in [leg1, leg2] {
        if leg >= n {
            return Err(Gf2Error::LegOutOfRange { leg, leg_count: n });
        }
    }
    if leg1 == leg2 {
        return Err(Gf2Error::IdenticalLegs { leg: leg1 });
    }

    let mut rows: Vec<BitVec> = matrix.rows().cloned().collect();
    for (left, right) in [(leg1, leg2), (n + leg1, n + leg2)] {
        let disagrees = |row: &BitVec| row.index(left) != row.index(right);
        if let Some(pivot_index) = rows.iter().position(disagrees) {
            let pivot = rows.remove(pivot_index);
            for row in &mut rows {
                if row.index(left) != row.index(right) {
                    row.bitxor_assign(&pivot);
                }
            }
        }
    }

    let mut traced_columns = [leg1, leg2, n + leg1, n + leg2];
    traced_columns.sort_unstable();
    let kept_columns = complement(&traced_columns, 2 * n);
    let kept_rows = rows.iter().map(|row| row.selected(&kept_columns)).collect();
    let projected = BitMatrix::from_rows(kept_rows, kept_columns.len());
    Ok(projected.reduced().without_zero_rows())
}

/// Contracts leg `leg1` of `h1` with leg `leg2` of `h2`.
///
/// Equivalent to [`self_trace`] of [`tensor_product`]; the remaining legs
/// of `h1` come first, then those of `h2`.
///
/// # Errors
///
/// Fails if a column count is odd or a leg is out of range for its matrix.
pub fn conjoin(h1: &BitMatrix, h2: &BitMatrix, leg1: usize, leg2: usize) -> Result<BitMatrix> {
    let n1 = leg_count(h1)?;
    let n2 = leg_count(h2)?;
    if leg1 >= n1 {
        return Err(Gf2Error::LegOutOfRange { leg: leg1, leg_count: n1 });
    }
    if leg2 >= n2 {
        return Err(Gf2Error::LegOutOfRange { leg: leg2, leg_count: n2 });
    }
    self_trace(&tensor_product(h1, h2)?, leg1, n1 + leg2)
}
