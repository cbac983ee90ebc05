//! Reads OCLint XML reports and turns them into normalized, deduplicated
//! violation records.

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalizer;
pub mod output;
pub mod parsers;

pub use error::ReportError;
pub use models::{ViolationRecord, ViolationReport};
pub use normalizer::{fill_message, normalize};
pub use parsers::{parse_report, parse_report_file, read_violations, ParseOutcome, ReaderOptions};

#[cfg(test)]
mod tests;
