//! Order report built from the canteen's CSV order export.
//!
//! One pass over the export joins each row against the calorie table and
//! groups it two ways: per user (order lines plus a calorie total) and per
//! food (cumulative quantity, for the popularity chart).

pub mod aggregate;
pub mod analyzer;
pub mod collate;
pub mod reader;
pub mod types;

pub use analyzer::{build_report, build_report_blocking};
pub use types::Report;
