//! Core linear-algebra traits for numlab.

/// Matrix–vector product: y ← A x.
///
/// Implementations accumulate in the working precision, so every partial sum
/// is rounded before the next term is added.
pub trait MatVec<V> {
    /// Compute y = A · x.
    fn matvec(&self, x: &V, y: &mut V);
}

/// Uniform indexing into matrices and vectors.
pub trait Indexing {
    /// Number of rows (or length for a vector).
    fn nrows(&self) -> usize;
}
