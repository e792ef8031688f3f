//! Predefined lego tensors.
//!
//! Every lego is a parity-check matrix over its legs. Fixed legos have a
//! single matrix; repetition codes are parameterized by their distance,
//! which is also their leg count.

use derive_more::Display;
use gf2::BitMatrix;

use crate::error::{LegoError, Result};
use crate::network::NodeDefinition;

const DEFAULT_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum LegoKind {
    #[display("h")]
    Hadamard,
    #[display("identity")]
    Identity,
    #[display("stopper_x")]
    StopperX,
    #[display("stopper_z")]
    StopperZ,
    #[display("stopper_i")]
    StopperI,
    /// `X_i X_{i+1}` checks and `Z` on every leg.
    #[display("x_rep_code")]
    XRepCode(usize),
    /// `Z_i Z_{i+1}` checks and `X` on every leg.
    #[display("z_rep_code")]
    ZRepCode(usize),
    /// [[4,2,2]] encoding tensor; legs 4 and 5 are logical.
    #[display("t6")]
    T6,
    /// [[5,1,2]] subspace tensor; leg 4 is logical.
    #[display("t5")]
    T5,
    /// Steane code encoding tensor; leg 7 is logical.
    #[display("steane")]
    Steane,
    /// [[5,1,3]] encoding tensor; leg 5 is logical.
    #[display("perfect_513")]
    Perfect513,
}

impl LegoKind {
    pub const FIXED: [LegoKind; 9] = [
        LegoKind::Hadamard,
        LegoKind::Identity,
        LegoKind::StopperX,
        LegoKind::StopperZ,
        LegoKind::StopperI,
        LegoKind::T6,
        LegoKind::T5,
        LegoKind::Steane,
        LegoKind::Perfect513,
    ];

    /// Looks up a lego by type id. Repetition codes take `distance`,
    /// defaulting to 3; fixed legos ignore it.
    ///
    /// # Errors
    ///
    /// Fails on an unknown type id or a repetition code of distance 0.
    ///
    /// ```
    /// use legonet::LegoKind;
    ///
    /// assert_eq!(LegoKind::from_type_id("steane", None).unwrap(), LegoKind::Steane);
    /// assert_eq!(LegoKind::from_type_id("x_rep_code", Some(5)).unwrap(), LegoKind::XRepCode(5));
    /// assert!(LegoKind::from_type_id("z_rep_code", Some(0)).is_err());
    /// ```
    pub fn from_type_id(type_id: &str, distance: Option<usize>) -> Result<Self> {
        let repetition = |make: fn(usize) -> LegoKind| {
            let distance = distance.unwrap_or(DEFAULT_DISTANCE);
            if distance == 0 {
                return Err(LegoError::InvalidDistance {
                    type_id: type_id.to_owned(),
                    distance,
                });
            }
            Ok(make(distance))
        };
        match type_id {
            "x_rep_code" => repetition(LegoKind::XRepCode),
            "z_rep_code" => repetition(LegoKind::ZRepCode),
            _ => LegoKind::FIXED
                .into_iter()
                .find(|kind| kind.type_id() == type_id)
                .ok_or_else(|| LegoError::UnknownLegoType {
                    type_id: type_id.to_owned(),
                }),
        }
    }

    #[must_use]
    pub fn type_id(&self) -> String {
        self.to_string()
    }

    #[must_use]
    pub fn short_name(&self) -> String {
        match self {
            LegoKind::Hadamard => "H".to_owned(),
            LegoKind::Identity => "Id".to_owned(),
            LegoKind::StopperX => "X".to_owned(),
            LegoKind::StopperZ => "Z".to_owned(),
            LegoKind::StopperI => "I".to_owned(),
            LegoKind::XRepCode(distance) => format!("XREP{distance}"),
            LegoKind::ZRepCode(distance) => format!("ZREP{distance}"),
            LegoKind::T6 => "T6".to_owned(),
            LegoKind::T5 => "T5".to_owned(),
            LegoKind::Steane => "STN".to_owned(),
            LegoKind::Perfect513 => "513".to_owned(),
        }
    }

    #[must_use]
    pub fn leg_count(&self) -> usize {
        match self {
            LegoKind::StopperX | LegoKind::StopperZ | LegoKind::StopperI => 1,
            LegoKind::Hadamard | LegoKind::Identity => 2,
            LegoKind::XRepCode(distance) | LegoKind::ZRepCode(distance) => *distance,
            LegoKind::T5 => 5,
            LegoKind::T6 | LegoKind::Perfect513 => 6,
            LegoKind::Steane => 8,
        }
    }

    #[must_use]
    pub fn logical_legs(&self) -> Vec<usize> {
        match self {
            LegoKind::T6 => vec![4, 5],
            LegoKind::T5 => vec![4],
            LegoKind::Steane => vec![7],
            LegoKind::Perfect513 => vec![5],
            _ => Vec::new(),
        }
    }

    pub fn parity_check_matrix(&self) -> BitMatrix {
        match self {
            LegoKind::Hadamard => from_paulis(&["XZ", "ZX"]),
            LegoKind::Identity => from_paulis(&["XX", "ZZ"]),
            LegoKind::StopperX => from_paulis(&["X"]),
            LegoKind::StopperZ => from_paulis(&["Z"]),
            LegoKind::StopperI => from_paulis(&["I"]),
            LegoKind::XRepCode(distance) => repetition_code(*distance, 'X', 'Z'),
            LegoKind::ZRepCode(distance) => repetition_code(*distance, 'Z', 'X'),
            LegoKind::T6 => from_paulis(&["XXXXII", "ZZZZII", "XXIIXI", "IZZIZI", "IXXIIX", "ZZIIIZ"]),
            LegoKind::T5 => from_paulis(&["XXXXI", "ZZZZI", "XXIIX", "IZZIZ"]),
            LegoKind::Steane => from_paulis(&[
                "XIIXIXXI", "IXIXXIXI", "IIXIXXXI", "ZIIZIZZI", "IZIZZIZI", "IIZIZZZI", "XXXXXXXX", "ZZZZZZZZ",
            ]),
            LegoKind::Perfect513 => from_paulis(&["XZZXII", "IXZZXI", "XIXZZI", "ZXIXZI", "XXXXXX", "ZZZZZZ"]),
        }
    }

    pub fn node_definition(&self) -> NodeDefinition {
        NodeDefinition::new(self.type_id(), self.parity_check_matrix())
            .with_name(self.short_name())
            .with_logical_legs(self.logical_legs())
    }
}

/// The catalog lego whose matrix has the same row space as `matrix`.
///
/// Fixed legos are tried first, so a matrix that is both the identity and a
/// distance-2 repetition code is reported as [`LegoKind::Identity`].
#[must_use]
pub fn recognize(matrix: &BitMatrix) -> Option<LegoKind> {
    if matrix.column_count() % 2 == 1 {
        return None;
    }
    let distance = matrix.column_count() / 2;
    let repetition_codes = (distance > 0).then_some([LegoKind::XRepCode(distance), LegoKind::ZRepCode(distance)]);
    LegoKind::FIXED
        .into_iter()
        .chain(repetition_codes.into_iter().flatten())
        .find(|kind| kind.leg_count() == distance && kind.parity_check_matrix().is_gauss_equivalent(matrix))
}

fn repetition_code(distance: usize, check: char, global: char) -> BitMatrix {
    let mut paulis: Vec<String> = (0..distance.saturating_sub(1))
        .map(|index| {
            (0..distance)
                .map(|leg| if leg == index || leg == index + 1 { check } else { 'I' })
                .collect()
        })
        .collect();
    paulis.push(std::iter::repeat_n(global, distance).collect());
    from_paulis(&paulis)
}

/// Dense Pauli strings as symplectic rows; all strings have the same length.
fn from_paulis<Pauli: AsRef<str>>(paulis: &[Pauli]) -> BitMatrix {
    let leg_count = paulis.first().map_or(0, |pauli| pauli.as_ref().chars().count());
    let mut res = BitMatrix::zeros(paulis.len(), 2 * leg_count);
    for (row_index, pauli) in paulis.iter().enumerate() {
        for (leg, operator) in pauli.as_ref().chars().enumerate() {
            let (x, z) = match operator {
                'X' => (true, false),
                'Z' => (false, true),
                'Y' => (true, true),
                _ => (false, false),
            };
            res.set((row_index, leg), x);
            res.set((row_index, leg_count + leg), z);
        }
    }
    res
}
