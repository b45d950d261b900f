//! Matrix module: dense and banded stores plus the experiment families.

pub mod banded;
pub mod dense;
pub mod family;

pub use banded::TridiagonalMatrix;
pub use dense::DenseMatrix;
pub use family::{Family, FamilyParams, reference_solution};
