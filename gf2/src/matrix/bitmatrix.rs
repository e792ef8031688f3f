use crate::error::{Gf2Error, Result};
use crate::{BitVec, Bitwise, BitwiseMut, BitwisePair, BitwisePairMut};
use std::ops::{Add, AddAssign, BitXor, BitXorAssign, Index, Mul};
use std::str::FromStr;

/// A dense matrix over GF(2), stored as packed rows.
///
/// Addition is XOR and multiplication is AND; nothing here ever touches
/// floating point. Rows are [`BitVec`]s, so row operations cost one word
/// operation per 64 columns.
///
/// # Construction
///
/// ```
/// use gf2::BitMatrix;
///
/// let zeros = BitMatrix::zeros(2, 4);
/// let identity = BitMatrix::identity(3);
/// let checks = BitMatrix::try_from_rows(&[[1u8, 1, 0, 0], [0, 0, 1, 1]]).unwrap();
/// assert_eq!(checks.shape(), (2, 4));
/// assert_eq!(checks, "1100|0011".parse::<BitMatrix>().unwrap());
/// ```
///
/// # Linear algebra
///
/// ```
/// use gf2::BitMatrix;
///
/// let m: BitMatrix = "110|011|101".parse().unwrap();
/// assert_eq!(m.rank(), 2);
/// assert_eq!(m.kernel().shape(), (1, 3));
/// assert!(m.is_gauss_equivalent(&"101|011".parse().unwrap()));
/// ```
#[must_use]
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    rows: Vec<BitVec>,
    column_count: usize,
}

impl BitMatrix {
    pub fn zeros(row_count: usize, column_count: usize) -> Self {
        Self {
            rows: vec![BitVec::zeros(column_count); row_count],
            column_count,
        }
    }

    pub fn identity(dimension: usize) -> Self {
        let mut res = Self::zeros(dimension, dimension);
        for index in 0..dimension {
            res.set((index, index), true);
        }
        res
    }

    /// Builds a matrix from nested 0/1 rows.
    ///
    /// The column count is taken from the first row; an empty slice gives
    /// the 0×0 matrix.
    ///
    /// # Errors
    ///
    /// Returns [`Gf2Error::RaggedRow`] when rows have inconsistent lengths and
    /// [`Gf2Error::InvalidEntry`] when an entry is neither 0 nor 1.
    pub fn try_from_rows<Row: AsRef<[u8]>>(rows: &[Row]) -> Result<Self> {
        let column_count = rows.first().map_or(0, |row| row.as_ref().len());
        let mut res = Vec::with_capacity(rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != column_count {
                return Err(Gf2Error::RaggedRow {
                    row: row_index,
                    expected: column_count,
                    found: row.len(),
                });
            }
            let mut bits = BitVec::zeros(column_count);
            for (column_index, &value) in row.iter().enumerate() {
                match value {
                    0 => {}
                    1 => bits.assign_index(column_index, true),
                    _ => {
                        return Err(Gf2Error::InvalidEntry {
                            row: row_index,
                            column: column_index,
                            value,
                        });
                    }
                }
            }
            res.push(bits);
        }
        Ok(Self {
            rows: res,
            column_count,
        })
    }

    /// Creates a matrix from nested iterators of booleans; missing trailing
    /// entries of a row are zero.
    ///
    /// # Panics
    ///
    /// Panics if a row yields more than `column_count` values.
    pub fn from_iter<Row, Rows>(rows: Rows, column_count: usize) -> Self
    where
        Row: IntoIterator<Item = bool>,
        Rows: IntoIterator<Item = Row>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                let mut bits = BitVec::zeros(column_count);
                for (column_index, value) in row.into_iter().enumerate() {
                    bits.assign_index(column_index, value);
                }
                bits
            })
            .collect();
        Self { rows, column_count }
    }

    /// # Panics
    ///
    /// Panics if some row does not have length `column_count`.
    pub fn from_rows(rows: Vec<BitVec>, column_count: usize) -> Self {
        assert!(
            rows.iter().all(|row| row.len() == column_count),
            "every row must have {column_count} columns"
        );
        Self { rows, column_count }
    }

    pub fn random(row_count: usize, column_count: usize, random_number_generator: &mut impl rand::Rng) -> Self {
        let rows = (0..row_count)
            .map(|_| BitVec::random(column_count, random_number_generator))
            .collect();
        Self { rows, column_count }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.rows.iter().all(Bitwise::is_zero)
    }

    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[must_use]
    pub fn get(&self, index: (usize, usize)) -> bool {
        self.rows[index.0].index(index.1)
    }

    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn set(&mut self, index: (usize, usize), to: bool) {
        self.rows[index.0].assign_index(index.1, to);
    }

    pub fn row(&self, index: usize) -> &BitVec {
        &self.rows[index]
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &BitVec> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<BitVec> {
        self.rows
    }

    pub fn column(&self, index: usize) -> BitVec {
        self.rows.iter().map(|row| row.index(index)).collect()
    }

    /// The matrix as nested 0/1 rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(u8::from).collect())
            .collect()
    }

    pub fn push_row(&mut self, row: BitVec) {
        assert_eq!(row.len(), self.column_count);
        self.rows.push(row);
    }

    pub fn swap_rows(&mut self, left_row_index: usize, right_row_index: usize) {
        self.rows.swap(left_row_index, right_row_index);
    }

    /// After this call row `i` holds what was previously row `permutation[i]`.
    pub fn permute_rows(&mut self, permutation: &[usize]) {
        let old_rows = std::mem::take(&mut self.rows);
        self.rows = permutation.iter().map(|&index| old_rows[index].clone()).collect();
    }

    /// Performs `row[to_index] ^= row[from_index]`.
    pub fn add_into_row(&mut self, to_index: usize, from_index: usize) {
        assert_ne!(to_index, from_index, "cannot add a row into itself");
        let (to_row, from_row) = if to_index < from_index {
            let (head, tail) = self.rows.split_at_mut(from_index);
            (&mut head[to_index], &tail[0])
        } else {
            let (head, tail) = self.rows.split_at_mut(to_index);
            (&mut tail[0], &head[from_index])
        };
        to_row.bitxor_assign(from_row);
    }

    /// Reduces the matrix to reduced row echelon form in place and returns
    /// the pivot columns.
    ///
    /// For each pivot column the first row at or below the current row with
    /// a one in that column is swapped into place and added into every other
    /// row that has a one there. Reducing an already reduced matrix leaves it
    /// unchanged.
    pub fn echelonize(&mut self) -> Vec<usize> {
        let mut pivot = pivot_of(self, (0, 0));
        let mut rank_profile = Vec::<usize>::with_capacity(self.column_count.min(self.row_count()));

        for row_index in 0..self.row_count() {
            if pivot.1 >= self.column_count() {
                break;
            }
            self.swap_rows(pivot.0, row_index);
            pivot.0 = row_index;
            rank_profile.push(pivot.1);
            reduce(self, pivot);
            pivot = pivot_of(self, (pivot.0 + 1, pivot.1 + 1));
        }
        rank_profile
    }

    /// A reduced copy of the matrix; zero rows are kept at the bottom.
    pub fn reduced(&self) -> Self {
        let mut res = self.clone();
        res.echelonize();
        res
    }

    #[must_use]
    pub fn rank(&self) -> usize {
        self.clone().echelonize().len()
    }

    pub fn without_zero_rows(&self) -> Self {
        Self {
            rows: self.rows.iter().filter(|row| !row.is_zero()).cloned().collect(),
            column_count: self.column_count,
        }
    }

    /// Whether both matrices have the same row space.
    ///
    /// Column counts must agree; the nonzero rows of both reduced forms are
    /// then compared one by one, so zero rows on either side do not matter.
    #[must_use]
    pub fn is_gauss_equivalent(&self, other: &BitMatrix) -> bool {
        if self.column_count != other.column_count {
            return false;
        }
        let mut left = self.clone();
        let mut right = other.clone();
        let rank = left.echelonize().len();
        if right.echelonize().len() != rank {
            return false;
        }
        left.rows.iter().take(rank).eq(right.rows.iter().take(rank))
    }

    pub fn transposed(&self) -> Self {
        let mut res = Self::zeros(self.column_count, self.row_count());
        for (row_index, row) in self.rows.iter().enumerate() {
            for column_index in row.support() {
                res.set((column_index, row_index), true);
            }
        }
        res
    }

    pub fn submatrix(&self, rows: &[usize], columns: &[usize]) -> Self {
        Self {
            rows: rows.iter().map(|&row| self.rows[row].selected(columns)).collect(),
            column_count: columns.len(),
        }
    }

    /// All rows restricted to `columns`, in that order.
    pub fn with_columns(&self, columns: &[usize]) -> Self {
        Self {
            rows: self.rows.iter().map(|row| row.selected(columns)).collect(),
            column_count: columns.len(),
        }
    }

    /// A basis of the right null space, one vector per row.
    pub fn kernel(&self) -> BitMatrix {
        let mut reduced = self.clone();
        let rank_profile = reduced.echelonize();
        let free_columns = crate::setwise::complement(&rank_profile, self.column_count);
        let mut res = BitMatrix::zeros(free_columns.len(), self.column_count);
        for (kernel_index, &free_column) in free_columns.iter().enumerate() {
            res.set((kernel_index, free_column), true);
            for (pivot_row, &pivot_column) in rank_profile.iter().enumerate() {
                if reduced.get((pivot_row, free_column)) {
                    res.set((kernel_index, pivot_column), true);
                }
            }
        }
        res
    }

    /// Computes `self * other^T`.
    ///
    /// # Panics
    ///
    /// Panics if the column counts differ.
    pub fn mul_transpose(&self, other: &BitMatrix) -> BitMatrix {
        assert_eq!(self.column_count, other.column_count);
        let rows = self
            .rows
            .iter()
            .map(|left| other.rows.iter().map(|right| left.dot(right)).collect())
            .collect();
        BitMatrix {
            rows,
            column_count: other.row_count(),
        }
    }
}

fn pivot_of(matrix: &BitMatrix, starting_at: (usize, usize)) -> (usize, usize) {
    let (mut row_index, mut column_index) = starting_at;
    if row_index >= matrix.row_count() || column_index >= matrix.column_count() {
        return (row_index, column_index);
    }
    while !matrix.get((row_index, column_index)) {
        row_index += 1;
        if row_index == matrix.row_count() {
            column_index += 1;
            row_index = starting_at.0;
            if column_index == matrix.column_count() {
                break;
            }
        }
    }
    (row_index, column_index)
}

fn reduce(matrix: &mut BitMatrix, pivot: (usize, usize)) {
    for row_index in 0..matrix.row_count() {
        if row_index != pivot.0 && matrix.get((row_index, pivot.1)) {
            matrix.add_into_row(row_index, pivot.0);
        }
    }
}

impl Index<(usize, usize)> for BitMatrix {
    type Output = bool;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        if self.get(index) { &true } else { &false }
    }
}

impl AddAssign<&BitMatrix> for BitMatrix {
    fn add_assign(&mut self, other: &BitMatrix) {
        assert_eq!(self.shape(), other.shape());
        for (left, right) in self.rows.iter_mut().zip(&other.rows) {
            left.bitxor_assign(right);
        }
    }
}

impl Add for &BitMatrix {
    type Output = BitMatrix;

    fn add(self, other: Self) -> Self::Output {
        let mut clone = self.clone();
        clone += other;
        clone
    }
}

impl BitXor for &BitMatrix {
    type Output = BitMatrix;

    fn bitxor(self, other: Self) -> Self::Output {
        self.add(other)
    }
}

impl BitXorAssign<&BitMatrix> for BitMatrix {
    fn bitxor_assign(&mut self, other: &BitMatrix) {
        self.add_assign(other);
    }
}

impl Mul for &BitMatrix {
    type Output = BitMatrix;

    fn mul(self, other: Self) -> Self::Output {
        assert_eq!(self.column_count, other.row_count());
        let rows = self
            .rows
            .iter()
            .map(|left| {
                let mut product = BitVec::zeros(other.column_count);
                for index in left.support() {
                    product.bitxor_assign(&other.rows[index]);
                }
                product
            })
            .collect();
        BitMatrix {
            rows,
            column_count: other.column_count,
        }
    }
}

impl Mul<&BitVec> for &BitMatrix {
    type Output = BitVec;

    fn mul(self, right: &BitVec) -> Self::Output {
        assert_eq!(right.len(), self.column_count);
        self.rows.iter().map(|row| row.dot(right)).collect()
    }
}

impl std::fmt::Display for BitMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            write!(f, "[")?;
        }
        for row in &self.rows {
            write!(f, "{row}")?;
            if f.alternate() {
                write!(f, "|")?;
            } else {
                writeln!(f)?;
            }
        }
        if f.alternate() {
            write!(f, "]")?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for BitMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BitMatrix(shape={:?},value={:#})", self.shape(), self)
    }
}

impl FromStr for BitMatrix {
    type Err = Gf2Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut rows = Vec::<Vec<u8>>::new();
        for (row_index, row_string) in s.split(&['|', '[', ']', ';', '\n']).enumerate() {
            let mut row = Vec::<u8>::new();
            for char in row_string.chars() {
                match char {
                    '0' | '.' => row.push(0),
                    '1' => row.push(1),
                    ' ' | ',' | '_' => {}
                    _ => {
                        return Err(Gf2Error::InvalidEntry {
                            row: row_index,
                            column: row.len(),
                            value: u8::try_from(u32::from(char)).unwrap_or(u8::MAX),
                        });
                    }
                }
            }
            if !row.is_empty() {
                rows.push(row);
            }
        }
        Self::try_from_rows(&rows)
    }
}

/// Stacks matrices with equal column counts on top of each other.
///
/// # Panics
///
/// Panics if the column counts differ.
pub fn row_stacked<'t, Matrices>(matrices: Matrices) -> BitMatrix
where
    Matrices: IntoIterator<Item = &'t BitMatrix>,
{
    let mut column_count: Option<usize> = None;
    let mut rows = Vec::new();
    for matrix in matrices {
        assert!(column_count.is_none_or(|count| count == matrix.column_count()));
        column_count = Some(matrix.column_count());
        rows.extend(matrix.rows.iter().cloned());
    }
    BitMatrix {
        rows,
        column_count: column_count.unwrap_or(0),
    }
}

/// The block-diagonal matrix with the given blocks along its diagonal.
pub fn directly_summed<'t, Matrices>(matrices: Matrices) -> BitMatrix
where
    Matrices: IntoIterator<Item = &'t BitMatrix>,
{
    let vec_matrices = Vec::from_iter(matrices);
    let column_count = vec_matrices.iter().map(|matrix| matrix.column_count()).sum();
    let mut rows = Vec::new();
    let mut column_offset = 0;
    for matrix in &vec_matrices {
        for row in &matrix.rows {
            let mut summed = BitVec::zeros(column_count);
            for column_index in row.support() {
                summed.assign_index(column_offset + column_index, true);
            }
            rows.push(summed);
        }
        column_offset += matrix.column_count();
    }
    BitMatrix { rows, column_count }
}
