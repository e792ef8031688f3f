use thiserror::Error;

/// Errors reported by fallible constructors and the symplectic primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Gf2Error {
    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("entry ({row}, {column}) is {value}, expected 0 or 1")]
    InvalidEntry { row: usize, column: usize, value: u8 },

    #[error("a symplectic matrix needs an even column count, got {column_count}")]
    OddColumnCount { column_count: usize },

    #[error("leg {leg} is out of range for a matrix with {leg_count} legs")]
    LegOutOfRange { leg: usize, leg_count: usize },

    #[error("cannot trace leg {leg} with itself")]
    IdenticalLegs { leg: usize },
}

pub type Result<T> = std::result::Result<T, Gf2Error>;
