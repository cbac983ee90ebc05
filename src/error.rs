//! Error types for report reading.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Failures the report reader recovers from. They are logged and carried in
/// [`crate::parsers::ParseOutcome::Partial`], never returned to the caller as `Err`.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report file could not be opened or read.
    #[error("error processing file named {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The XML stream is malformed.
    #[error("error while parsing XML stream at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// The document ended before its open elements were closed.
    #[error("XML stream ended with {open} unclosed element(s) at byte {position}")]
    Truncated { open: usize, position: u64 },

    /// The stream holds no root element (empty or not XML).
    #[error("XML stream has no root element")]
    NoRoot,

    /// Character data outside the root element.
    #[error("unexpected text outside the root element at byte {position}")]
    TextOutsideRoot { position: u64 },
}
