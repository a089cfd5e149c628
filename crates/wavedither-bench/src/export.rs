//! CSV export of scaling results.
//!
//! Layout, one row per run:
//!
//! ```text
//! Threads,Time_ms,Speedup,Type
//! 1,812,1.00,Sequential
//! 1,901,0.90,Parallel_Overhead
//! 2,455,1.78,Parallel
//! ```
//!
//! Times are whole milliseconds; speedups have two decimals.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use crate::error::BenchError;
use crate::scaling::{RunKind, ScalingReport};

/// Column names of the exported table.
pub const CSV_HEADER: [&str; 4] = ["Threads", "Time_ms", "Speedup", "Type"];

/// Serialize `report` to `writer`.
pub fn write_csv<W: io::Write>(report: &ScalingReport, writer: W) -> Result<(), BenchError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(CSV_HEADER)?;
    out.write_record([
        "1".to_string(),
        report.sequential.as_millis().to_string(),
        "1.00".to_string(),
        RunKind::Sequential.csv_type().to_string(),
    ])?;
    for m in report.parallel.values() {
        out.write_record([
            m.workers.to_string(),
            m.elapsed.as_millis().to_string(),
            format!("{:.2}", m.speedup),
            m.kind().csv_type().to_string(),
        ])?;
    }
    out.flush()?;
    Ok(())
}

/// Write `report` as CSV to the file at `path`, replacing it.
pub fn export_csv(report: &ScalingReport, path: impl AsRef<Path>) -> Result<(), BenchError> {
    let file = File::create(path.as_ref())?;
    write_csv(report, BufWriter::new(file))
}
