pub mod oclint;

pub use oclint::{parse_report, parse_report_file, read_violations, ParseOutcome, ReaderOptions};
