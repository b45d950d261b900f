//! Experiment harness: grid iteration, measurement, and the record sink.

pub mod record;
pub mod runner;

pub use record::{ExperimentRecord, MemorySink, Method, RecordSink};
pub use runner::{collect_experiments, run_experiments};
