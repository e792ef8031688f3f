mod bitmatrix;
mod echelon;

pub use bitmatrix::{BitMatrix, directly_summed, row_stacked};
pub use echelon::EchelonForm;
