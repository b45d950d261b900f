//! CSV rendering of experiment records.
//!
//! One row per record, in delivery order. Non-finite numerics keep their
//! IEEE-754 identity in the output (`inf`, `-inf`, `NaN`); a condition
//! number the core does not compute renders as an empty field.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use crate::error::LabError;
use crate::harness::record::{ExperimentRecord, RecordSink};

pub const CSV_HEADER: &str =
    "family,method,size,precision,max_abs_error,condition_number,time_solve_sec,time_cond_sec,peak_memory_bytes";

/// Sink that renders records as CSV rows.
pub struct CsvSink<W: Write> {
    out: W,
    header_written: bool,
}

impl<W: Write> CsvSink<W> {
    pub fn new(out: W) -> Self {
        CsvSink {
            out,
            header_written: false,
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl CsvSink<BufWriter<File>> {
    /// Create the output file, making parent directories as needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, LabError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(CsvSink::new(BufWriter::new(File::create(path)?)))
    }
}

fn opt_cond(v: Option<f64>) -> String {
    v.map(|c| format!("{c:e}")).unwrap_or_default()
}

fn opt_secs(v: Option<Duration>) -> String {
    v.map(|d| format!("{:.9}", d.as_secs_f64())).unwrap_or_default()
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write(&mut self, r: &ExperimentRecord) -> Result<(), LabError> {
        if !self.header_written {
            writeln!(self.out, "{CSV_HEADER}")?;
            self.header_written = true;
        }
        writeln!(
            self.out,
            "{},{},{},{},{:e},{},{:.9},{},{}",
            r.family,
            r.method,
            r.size,
            r.precision,
            r.max_abs_error,
            opt_cond(r.condition_number),
            r.time_solve.as_secs_f64(),
            opt_secs(r.time_cond),
            r.peak_memory_bytes,
        )?;
        Ok(())
    }
}
