use thiserror::Error;

// Unified error type for numlab
//
// Numerical degradation (singular factors, zero pivots, overflow) is not an
// error value: it stays in-band as NaN/±∞ in the affected record fields.
// Errors here are the fatal kind: bad configuration, shape mismatches at a
// construction seam, and sink I/O. Memory accounting mismatches share the
// type but are non-fatal to already-emitted records.

#[derive(Error, Debug)]
pub enum LabError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("result sink i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("memory accounting mismatch: {0}")]
    MemoryAccounting(String),
}
