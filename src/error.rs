use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while building or serving the order report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The order export does not exist.
    #[error("CSV file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Reading the order export failed part way through.
    #[error("Error reading CSV {}: {source}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The blocking read task did not run to completion.
    #[error("Report task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// JSON body returned to an HTTP caller when a report request fails.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl ReportError {
    /// HTTP-equivalent status: 404 for a missing export, 500 otherwise.
    pub fn status_code(&self) -> u16 {
        match self {
            ReportError::NotFound { .. } => 404,
            _ => 500,
        }
    }

    /// Generic message without paths or partial data. The raw export
    /// passthrough sends this as plain text.
    pub fn message(&self) -> &'static str {
        match self {
            ReportError::NotFound { .. } => "CSV file not found",
            _ => "Error reading CSV",
        }
    }

    /// JSON body for the report endpoint.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ReportError::NotFound {
            path: PathBuf::from("/missing/extract_data.csv"),
        };
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.body().error, "CSV file not found");
        assert!(err.to_string().contains("/missing/extract_data.csv"));
    }

    #[test]
    fn test_read_failure_maps_to_500() {
        let io_err = std::io::Error::other("disk gone");
        let err = ReportError::ReadFailure {
            path: PathBuf::from("orders.csv"),
            source: csv::Error::from(io_err),
        };
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.body().error, "Error reading CSV");
        assert!(err.to_string().contains("disk gone"));
    }

    #[test]
    fn test_body_serializes_as_error_object() {
        let err = ReportError::NotFound {
            path: PathBuf::from("x.csv"),
        };
        let json = serde_json::to_string(&err.body()).unwrap();
        assert_eq!(json, r#"{"error":"CSV file not found"}"#);
    }

    #[test]
    fn test_plain_message_matches_body() {
        let err = ReportError::NotFound {
            path: PathBuf::from("x.csv"),
        };
        assert_eq!(err.message(), "CSV file not found");
        assert_eq!(err.body().error, err.message());

        let err: ReportError = std::io::Error::other("boom").into();
        assert_eq!(err.message(), "Error reading CSV");
    }

    #[test]
    fn test_io_error_is_internal() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ReportError = io_err.into();
        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().contains("denied"));
    }
}
