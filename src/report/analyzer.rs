use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ReportError, Result};
use crate::report::aggregate::aggregate_rows;
use crate::report::reader::order_rows;
use crate::report::types::Report;

/// Reads the order export at `path` once and builds the report.
///
/// # Errors
///
/// [`ReportError::NotFound`] when the file is absent, before any parsing.
/// [`ReportError::ReadFailure`] when reading fails part way through; no
/// partial report is returned.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn build_report_blocking(path: &Path) -> Result<Report> {
    if !path.exists() {
        return Err(ReportError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ReportError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ReportError::ReadFailure {
            path: path.to_path_buf(),
            source: csv::Error::from(e),
        },
    })?;
    debug!("Order export opened");

    let mut rows = order_rows(file);
    let report = aggregate_rows(&mut rows).map_err(|source| ReportError::ReadFailure {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        users = report.sorted_user_orders.len(),
        foods = report.pie_chart_data.len(),
        skipped = rows.skipped(),
        "Report built"
    );

    Ok(report)
}

/// Async entry point for request handlers.
///
/// The existence check runs on the caller's task; the single read pass runs
/// on the blocking pool so the caller yields while the file is streamed.
pub async fn build_report(path: impl Into<PathBuf>) -> Result<Report> {
    let path = path.into();

    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return Err(ReportError::NotFound { path });
    }

    tokio::task::spawn_blocking(move || build_report_blocking(&path)).await?
}
