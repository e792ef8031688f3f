use crate::{BitMatrix, BitVec, Bitwise, BitwiseMut, BitwisePairMut};
use derive_more::Deref;

/// Reduced row echelon form together with the row operations that produced it.
///
/// Dereferences to the reduced matrix.
///
/// ```
/// use gf2::{BitMatrix, BitVec, EchelonForm};
///
/// let m: BitMatrix = "110|011|101".parse().unwrap();
/// let echelon = EchelonForm::new(m.clone());
/// assert_eq!(echelon.rank(), 2);
///
/// let b: BitVec = "011".parse().unwrap();
/// let x = echelon.solve(&b).unwrap();
/// assert_eq!(&m * &x, b);
/// ```
#[derive(Debug, Clone, Deref)]
pub struct EchelonForm {
    #[deref]
    matrix: BitMatrix,
    /// `transform * original == matrix`
    transform: BitMatrix,
    pivots: Vec<usize>,
}

impl EchelonForm {
    #[must_use]
    pub fn new(mut matrix: BitMatrix) -> Self {
        let row_count = matrix.row_count();
        let mut transform = BitMatrix::identity(row_count);
        let mut pivots = Vec::<usize>::with_capacity(matrix.column_count().min(row_count));
        let mut row_index = 0;

        for column_index in 0..matrix.column_count() {
            if row_index == row_count {
                break;
            }
            let Some(pivot_row) = (row_index..row_count).find(|&candidate| matrix.get((candidate, column_index)))
            else {
                continue;
            };
            matrix.swap_rows(pivot_row, row_index);
            transform.swap_rows(pivot_row, row_index);
            for other_row in 0..row_count {
                if other_row != row_index && matrix.get((other_row, column_index)) {
                    matrix.add_into_row(other_row, row_index);
                    transform.add_into_row(other_row, row_index);
                }
            }
            pivots.push(column_index);
            row_index += 1;
        }

        Self {
            matrix,
            transform,
            pivots,
        }
    }

    #[must_use]
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    #[must_use]
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    pub fn matrix(&self) -> &BitMatrix {
        &self.matrix
    }

    pub fn transform(&self) -> &BitMatrix {
        &self.transform
    }

    pub fn into_matrix(self) -> BitMatrix {
        self.matrix
    }

    /// Solves `A x = target` for the original matrix `A`, if a solution exists.
    ///
    /// # Panics
    ///
    /// Panics if the target length does not equal the row count.
    #[must_use]
    pub fn solve(&self, target: &BitVec) -> Option<BitVec> {
        assert_eq!(target.len(), self.matrix.row_count());
        let residual = &self.transform * target;
        let mut solution = BitVec::zeros(self.matrix.column_count());
        for (row_index, &column_index) in self.pivots.iter().enumerate() {
            solution.assign_index(column_index, residual.index(row_index));
        }
        (self.pivots.len()..residual.len())
            .all(|row_index| !residual.index(row_index))
            .then_some(solution)
    }

    /// Solves `Aᵀ x = target`, i.e. expresses `target` as a combination of
    /// the original rows, if it lies in their span.
    ///
    /// # Panics
    ///
    /// Panics if the target length does not equal the column count.
    #[must_use]
    pub fn transpose_solve(&self, target: &BitVec) -> Option<BitVec> {
        assert_eq!(target.len(), self.matrix.column_count());
        let mut residual = target.clone();
        let mut reduced_coefficients = BitVec::zeros(self.matrix.row_count());
        for (row_index, &column_index) in self.pivots.iter().enumerate() {
            if residual.index(column_index) {
                residual.bitxor_assign(self.matrix.row(row_index));
                reduced_coefficients.assign_index(row_index, true);
            }
        }
        residual
            .is_zero()
            .then(|| &self.transform.transposed() * &reduced_coefficients)
    }

    /// Whether `row` lies in the row space of the original matrix.
    #[must_use]
    pub fn row_space_contains(&self, row: &BitVec) -> bool {
        self.transpose_solve(row).is_some()
    }
}
