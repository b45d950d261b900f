//! Kernel traits, precision model, and element-wise operations.

pub mod ops;
pub mod precision;
pub mod traits;

pub use ops::{max_abs_diff, max_abs_error};
pub use precision::{Precision, WorkingScalar};
pub use traits::{Indexing, MatVec};
