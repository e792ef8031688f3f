pub mod bit;
pub use bit::{Bitwise, BitwiseMut, BitwisePair, BitwisePairMut};

pub mod vec;
pub use vec::{BitVec, Word};

pub mod matrix;
pub use matrix::{BitMatrix, EchelonForm, directly_summed, row_stacked};

pub mod setwise;
pub mod symplectic;

mod error;
pub use error::{Gf2Error, Result};

#[cfg(feature = "serde")]
mod serde;
