//! Experiment records and the sink contract.

use std::fmt;
use std::time::Duration;

use crate::core::precision::Precision;
use crate::error::LabError;
use crate::matrix::family::Family;

/// Solution method used for one experiment sub-cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Dense Gaussian elimination with scaled partial pivoting.
    GaussSpp,
    /// Tridiagonal Thomas sweep over the banded store.
    Thomas,
}

impl Method {
    /// Tag used in records and CSV output.
    pub fn label(self) -> &'static str {
        match self {
            Method::GaussSpp => "gauss_spp",
            Method::Thomas => "thomas",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One measured experiment sub-cell.
///
/// Error and condition number are extended-range reals: non-finite values
/// mean the algorithm ran but produced no usable answer, and they propagate
/// to the sink unchanged. A `None` condition number means the harness does
/// not compute κ for this method/family (the tridiagonal case).
#[derive(Debug, Clone)]
pub struct ExperimentRecord {
    pub family: Family,
    pub method: Method,
    pub size: usize,
    pub precision: Precision,
    /// max_i |x̂_i − x*_i| with x* rounded to the working precision.
    pub max_abs_error: f64,
    /// κ₁(A) = ‖A‖₁·‖A⁻¹‖₁ at the working precision.
    pub condition_number: Option<f64>,
    pub time_solve: Duration,
    pub time_cond: Option<Duration>,
    /// Peak tracked bytes between the sub-cell reset and release of all
    /// cell state; zero when no tracking allocator is registered.
    pub peak_memory_bytes: usize,
}

/// Downstream consumer of experiment records.
///
/// The harness delivers records in (size, precision, method) order within a
/// family run; implementations may rely on that order. All formatting
/// belongs to the implementation, not the harness.
pub trait RecordSink {
    fn write(&mut self, record: &ExperimentRecord) -> Result<(), LabError>;
}

/// Sink that collects records in memory, for tests and post-processing.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<ExperimentRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink::default()
    }
}

impl RecordSink for MemorySink {
    fn write(&mut self, record: &ExperimentRecord) -> Result<(), LabError> {
        self.records.push(record.clone());
        Ok(())
    }
}
