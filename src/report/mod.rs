//! Reporting collaborators: CSV sink and gnuplot script emission.
//!
//! Everything here is downstream of the harness; the core only requires the
//! [`RecordSink`](crate::harness::record::RecordSink) contract.

pub mod csv;
pub mod gnuplot;

pub use csv::CsvSink;
pub use gnuplot::write_plot_script;
