//! Output formatting for the order report.
//!
//! Supports pretty-printing, JSON serialization to any writer or file, and
//! raw passthrough of the order export itself.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::report::Report;

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &Report) {
    debug!("{:#?}", report);
}

/// Writes `value` as JSON followed by a newline.
pub fn write_json<W: Write>(mut writer: W, value: &impl Serialize, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Writes the report as JSON to `path`, replacing any existing file.
pub fn write_report(path: &Path, report: &Report, pretty: bool) -> Result<()> {
    debug!(path = %path.display(), "Writing report");
    let file = File::create(path)?;
    write_json(BufWriter::new(file), report, pretty)
}

/// Copies the order export to `writer` unchanged and returns the byte count.
pub fn copy_source<W: Write>(path: &Path, writer: &mut W) -> Result<u64> {
    if !path.exists() {
        return Err(ReportError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut file = File::open(path)?;
    let bytes = io::copy(&mut file, writer)?;
    writer.flush()?;

    debug!(path = %path.display(), bytes, "Order export copied");
    Ok(bytes)
}

/// Writes the plain-text failure message for the raw export passthrough.
pub fn write_passthrough_error<W: Write>(writer: &mut W, err: &ReportError) -> Result<()> {
    writeln!(writer, "{}", err.message())?;
    writer.flush()?;
    Ok(())
}
