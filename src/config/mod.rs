//! Configuration for the experiment harness.

pub mod options;

pub use options::LabOptions;
