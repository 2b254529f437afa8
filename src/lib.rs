pub mod calories;
pub mod error;
pub mod export;
pub mod output;
pub mod report;
