use std::collections::{BTreeMap, BTreeSet};

use gf2::BitMatrix;
use gf2::symplectic;
use log::trace;

use crate::error::{LegoError, Result};
use crate::Leg;

/// A parity-check matrix in symplectic form together with the legs its
/// column pairs belong to.
///
/// Leg `legs()[i]` owns column `i` of the X block and column `i` of the Z
/// block. The leg list always has exactly `matrix.column_count() / 2`
/// distinct entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StabilizerCodeTensor {
    matrix: BitMatrix,
    owner_id: String,
    legs: Vec<Leg>,
}

impl StabilizerCodeTensor {
    /// # Errors
    ///
    /// Fails if the matrix has an odd column count, if the number of legs
    /// differs from the number of column pairs, or if a leg is repeated.
    pub fn new(matrix: BitMatrix, owner_id: impl Into<String>, legs: Vec<Leg>) -> Result<Self> {
        let owner_id = owner_id.into();
        let column_count = matrix.column_count();
        if column_count % 2 == 1 {
            return Err(LegoError::OddColumnCount { owner_id, column_count });
        }
        if legs.len() != column_count / 2 {
            return Err(LegoError::LegCountMismatch {
                owner_id,
                leg_count: legs.len(),
                column_count,
            });
        }
        if let Some(leg) = first_repeated(&legs) {
            return Err(LegoError::DuplicateLeg { leg: leg.clone() });
        }
        Ok(Self { matrix, owner_id, legs })
    }

    /// A tensor owned by `owner_id` with legs `owner_id:0 .. owner_id:n-1`.
    ///
    /// # Errors
    ///
    /// Fails if the matrix has an odd column count.
    pub fn with_default_legs(matrix: BitMatrix, owner_id: impl Into<String>) -> Result<Self> {
        let owner_id = owner_id.into();
        let legs = (0..matrix.column_count() / 2)
            .map(|leg_index| Leg::new(owner_id.clone(), leg_index))
            .collect();
        Self::new(matrix, owner_id, legs)
    }

    pub fn matrix(&self) -> &BitMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    #[must_use]
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Column pair of `leg`, if it is a leg of this tensor.
    #[must_use]
    pub fn position_of(&self, leg: &Leg) -> Option<usize> {
        self.legs.iter().position(|candidate| candidate == leg)
    }

    #[must_use]
    pub fn into_parts(self) -> (BitMatrix, String, Vec<Leg>) {
        (self.matrix, self.owner_id, self.legs)
    }

    /// The same tensor with its matrix in reduced row echelon form and zero
    /// rows removed.
    #[must_use]
    pub fn reduced(&self) -> Self {
        Self {
            matrix: self.matrix.reduced().without_zero_rows(),
            owner_id: self.owner_id.clone(),
            legs: self.legs.clone(),
        }
    }

    /// Contracts `legs1[i]` of `self` with `legs2[i]` of `other` for every `i`.
    ///
    /// The result keeps the owner id of `self`; its legs are the untouched
    /// legs of `self` followed by the untouched legs of `other`. When both
    /// tensors have the same owner id this is [`self_trace`](Self::self_trace),
    /// and an empty pair list gives [`tensor_with`](Self::tensor_with).
    ///
    /// # Errors
    ///
    /// Fails if the lists differ in length, a leg is missing from its tensor,
    /// a leg is named twice, or the tensors share a leg.
    pub fn conjoin(&self, other: &StabilizerCodeTensor, legs1: &[Leg], legs2: &[Leg]) -> Result<Self> {
        check_pair_lengths(legs1, legs2)?;
        if self.owner_id == other.owner_id {
            return self.self_trace(legs1, legs2);
        }
        if legs1.is_empty() {
            return self.tensor_with(other);
        }
        self.check_disjoint_from(other)?;
        for leg in legs1 {
            self.require_leg(leg)?;
        }
        for leg in legs2 {
            other.require_leg(leg)?;
        }
        check_distinct(legs1.iter().chain(legs2))?;

        trace!(
            left:% = self.owner_id, right:% = other.owner_id, pairs = legs1.len();
            "Conjoining tensors"
        );
        let mut columns = self.column_map();
        let offset = self.leg_count();
        for (leg_index, leg) in other.legs.iter().enumerate() {
            columns.insert(leg.clone(), offset + leg_index);
        }

        let first1 = columns[&legs1[0]];
        let first2 = columns[&legs2[0]] - offset;
        let mut matrix = symplectic::conjoin(&self.matrix, &other.matrix, first1, first2)?;
        remove_column(&mut columns, &legs1[0]);
        remove_column(&mut columns, &legs2[0]);

        for (leg1, leg2) in legs1.iter().zip(legs2).skip(1) {
            matrix = symplectic::self_trace(&matrix, columns[leg1], columns[leg2])?;
            remove_column(&mut columns, leg1);
            remove_column(&mut columns, leg2);
        }

        Ok(Self {
            matrix,
            owner_id: self.owner_id.clone(),
            legs: legs_in_column_order(columns),
        })
    }

    /// Traces `legs1[i]` with `legs2[i]` for every `i`, closing one loop per
    /// pair. The traced legs disappear; the others keep their order.
    ///
    /// # Errors
    ///
    /// Fails if the lists differ in length, a leg is missing, or a leg is
    /// named twice.
    pub fn self_trace(&self, legs1: &[Leg], legs2: &[Leg]) -> Result<Self> {
        check_pair_lengths(legs1, legs2)?;
        for leg in legs1.iter().chain(legs2) {
            self.require_leg(leg)?;
        }
        check_distinct(legs1.iter().chain(legs2))?;

        let mut columns = self.column_map();
        let mut matrix = self.matrix.clone();
        for (leg1, leg2) in legs1.iter().zip(legs2) {
            trace!(owner:% = self.owner_id, leg1:% = leg1, leg2:% = leg2; "Tracing legs");
            matrix = symplectic::self_trace(&matrix, columns[leg1], columns[leg2])?;
            remove_column(&mut columns, leg1);
            remove_column(&mut columns, leg2);
        }

        Ok(Self {
            matrix,
            owner_id: self.owner_id.clone(),
            legs: legs_in_column_order(columns),
        })
    }

    /// Disjoint union with `other`.
    ///
    /// The matrix is `[[X1, 0, Z1, 0], [0, X2, 0, Z2]]`, so leg `i` of
    /// `other` occupies column pair `self.leg_count() + i` while keeping its
    /// identity. The result keeps the owner id of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`LegoError::SharedLeg`] if both tensors have a leg in common.
    pub fn tensor_with(&self, other: &StabilizerCodeTensor) -> Result<Self> {
        self.check_disjoint_from(other)?;
        trace!(left:% = self.owner_id, right:% = other.owner_id; "Taking tensor product");
        let matrix = symplectic::tensor_product(&self.matrix, &other.matrix)?;
        let legs = self.legs.iter().chain(&other.legs).cloned().collect();
        Ok(Self {
            matrix,
            owner_id: self.owner_id.clone(),
            legs,
        })
    }

    fn column_map(&self) -> BTreeMap<Leg, usize> {
        self.legs
            .iter()
            .enumerate()
            .map(|(column, leg)| (leg.clone(), column))
            .collect()
    }

    fn require_leg(&self, leg: &Leg) -> Result<()> {
        if self.position_of(leg).is_none() {
            return Err(LegoError::LegNotFound {
                leg: leg.clone(),
                owner_id: self.owner_id.clone(),
            });
        }
        Ok(())
    }

    fn check_disjoint_from(&self, other: &StabilizerCodeTensor) -> Result<()> {
        let own: BTreeSet<&Leg> = self.legs.iter().collect();
        match other.legs.iter().find(|leg| own.contains(leg)) {
            Some(leg) => Err(LegoError::SharedLeg { leg: leg.clone() }),
            None => Ok(()),
        }
    }
}

fn check_pair_lengths(legs1: &[Leg], legs2: &[Leg]) -> Result<()> {
    if legs1.len() != legs2.len() {
        return Err(LegoError::PairLengthMismatch {
            left: legs1.len(),
            right: legs2.len(),
        });
    }
    Ok(())
}

fn check_distinct<'a>(legs: impl IntoIterator<Item = &'a Leg>) -> Result<()> {
    match first_repeated(legs) {
        Some(leg) => Err(LegoError::DuplicateLeg { leg: leg.clone() }),
        None => Ok(()),
    }
}

fn first_repeated<'a>(legs: impl IntoIterator<Item = &'a Leg>) -> Option<&'a Leg> {
    let mut seen = BTreeSet::new();
    legs.into_iter().find(|leg| !seen.insert(*leg))
}

/// Drops `leg` and shifts every later column down by one.
fn remove_column(columns: &mut BTreeMap<Leg, usize>, leg: &Leg) {
    if let Some(removed) = columns.remove(leg) {
        for column in columns.values_mut() {
            if *column > removed {
                *column -= 1;
            }
        }
    }
}

fn legs_in_column_order(columns: BTreeMap<Leg, usize>) -> Vec<Leg> {
    let mut legs: Vec<(Leg, usize)> = columns.into_iter().collect();
    legs.sort_by_key(|(_, column)| *column);
    legs.into_iter().map(|(leg, _)| leg).collect()
}
