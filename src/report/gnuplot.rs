//! Gnuplot script emission for result CSVs.
//!
//! Emits a script with one error plot and one solve-time plot against the
//! long-format CSV the [`CsvSink`](crate::report::csv::CsvSink) writes.
//! Zero errors and non-finite values are remapped so the log-scaled axes
//! stay plottable.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::LabError;

/// Write a `.gp` script that plots `csv_path` into `<plot_base>_error.png`
/// and `<plot_base>_time.png`.
pub fn write_plot_script<P: AsRef<Path>>(
    script_path: P,
    csv_path: &str,
    plot_base: &str,
) -> Result<(), LabError> {
    let script_path = script_path.as_ref();
    if let Some(parent) = script_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut gp = BufWriter::new(File::create(script_path)?);

    writeln!(gp, "# Gnuplot script for numlab results: {csv_path}")?;
    writeln!(gp, "set terminal pngcairo enhanced size 1280,960 font 'Arial,10'")?;
    writeln!(gp, "set datafile separator ','")?;
    writeln!(gp, "set key top left spacing 1.2 font ',9'")?;
    writeln!(gp, "set grid")?;
    writeln!(gp)?;
    writeln!(gp, "error_floor = 1e-18")?;
    writeln!(
        gp,
        "clamp_err(v) = (v == 0.0 ? error_floor : (isinf(v) || isnan(v) ? 1e18 : v))"
    )?;
    writeln!(
        gp,
        "pick(m, p, v) = (strcol(2) eq m && strcol(4) eq p ? v : 1/0.0)"
    )?;
    writeln!(gp)?;
    writeln!(gp, "set output '{plot_base}_error.png'")?;
    writeln!(gp, "set title 'Max Abs Error vs Size'")?;
    writeln!(gp, "set xlabel 'Matrix Size (N)'")?;
    writeln!(gp, "set ylabel 'Max Absolute Error (log scale)'")?;
    writeln!(gp, "set logscale y")?;
    writeln!(gp, "set format y '10^{{%L}}'")?;
    writeln!(gp, "set yrange [error_floor/10 : 1e20]")?;
    writeln!(
        gp,
        "plot '{csv_path}' skip 1 u 3:(pick('gauss_spp', 'f32', clamp_err(column(5)))) w lp pt 7 lc 'blue' t 'Gauss Err (f32)', \\"
    )?;
    writeln!(
        gp,
        "     '' skip 1 u 3:(pick('thomas', 'f32', clamp_err(column(5)))) w lp pt 6 lc 'cyan' t 'Thomas Err (f32)', \\"
    )?;
    writeln!(
        gp,
        "     '' skip 1 u 3:(pick('gauss_spp', 'f64', clamp_err(column(5)))) w lp pt 5 lc 'red' t 'Gauss Err (f64)', \\"
    )?;
    writeln!(
        gp,
        "     '' skip 1 u 3:(pick('thomas', 'f64', clamp_err(column(5)))) w lp pt 4 lc 'magenta' t 'Thomas Err (f64)'"
    )?;
    writeln!(gp)?;
    writeln!(gp, "set output '{plot_base}_time.png'")?;
    writeln!(gp, "set title 'Solve Time vs Size'")?;
    writeln!(gp, "set ylabel 'Time (seconds, log scale)'")?;
    writeln!(gp, "set yrange [1e-9 : *]")?;
    writeln!(
        gp,
        "plot '{csv_path}' skip 1 u 3:(pick('gauss_spp', 'f32', column(7))) w lp pt 7 lc 'blue' t 'Gauss Time (f32)', \\"
    )?;
    writeln!(
        gp,
        "     '' skip 1 u 3:(pick('thomas', 'f32', column(7))) w lp pt 6 lc 'cyan' t 'Thomas Time (f32)', \\"
    )?;
    writeln!(
        gp,
        "     '' skip 1 u 3:(pick('gauss_spp', 'f64', column(7))) w lp pt 5 lc 'red' t 'Gauss Time (f64)', \\"
    )?;
    writeln!(
        gp,
        "     '' skip 1 u 3:(pick('thomas', 'f64', column(7))) w lp pt 4 lc 'magenta' t 'Thomas Time (f64)'"
    )?;
    gp.flush()?;
    Ok(())
}
