use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::ReportError;
use crate::models::ViolationRecord;
use crate::normalizer::normalize;

/// Name used in diagnostics when reading from an already-open stream.
const STREAM_NAME: &str = "<stream>";

#[derive(Debug, Clone, Default)]
pub struct ReaderOptions {
    /// File names under this directory are reported relative to it.
    pub base_dir: Option<PathBuf>,
}

/// Result of reading a report. Failures never escape as `Err`: they are logged
/// and the caller keeps whatever records were produced before the failure.
#[derive(Debug)]
pub enum ParseOutcome {
    Complete(Vec<ViolationRecord>),
    Partial {
        violations: Vec<ViolationRecord>,
        error: ReportError,
    },
}

impl ParseOutcome {
    pub fn violations(&self) -> &[ViolationRecord] {
        match self {
            Self::Complete(violations) | Self::Partial { violations, .. } => violations,
        }
    }

    pub fn into_violations(self) -> Vec<ViolationRecord> {
        match self {
            Self::Complete(violations) | Self::Partial { violations, .. } => violations,
        }
    }

    pub fn error(&self) -> Option<&ReportError> {
        match self {
            Self::Complete(_) => None,
            Self::Partial { error, .. } => Some(error),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    fn map(self, f: impl FnOnce(Vec<ViolationRecord>) -> Vec<ViolationRecord>) -> Self {
        match self {
            Self::Complete(violations) => Self::Complete(f(violations)),
            Self::Partial { violations, error } => Self::Partial {
                violations: f(violations),
                error,
            },
        }
    }
}

/// Opens `path` and parses it as an OCLint report. An unreadable file yields an
/// empty `Partial` outcome.
pub fn parse_report_file(path: &Path, options: &ReaderOptions) -> ParseOutcome {
    match File::open(path) {
        Ok(file) => parse_file_reader(BufReader::new(file), path, options),
        Err(e) => io_failure(path, Arc::new(e)),
    }
}

/// Parses and normalizes a report from an open stream.
pub fn parse_report<R: BufRead>(reader: R, options: &ReaderOptions) -> ParseOutcome {
    log_failure(STREAM_NAME, read_named(reader, STREAM_NAME, options)).map(normalize)
}

/// Reads raw violations in document order, without fallback messages or dedup.
pub fn read_violations<R: BufRead>(reader: R, options: &ReaderOptions) -> ParseOutcome {
    log_failure(STREAM_NAME, read_named(reader, STREAM_NAME, options))
}

/// Read errors on a file drop every record; XML errors keep the ones read so far.
fn parse_file_reader<R: BufRead>(reader: R, path: &Path, options: &ReaderOptions) -> ParseOutcome {
    let name = path.display().to_string();
    match read_named(reader, &name, options) {
        ParseOutcome::Partial {
            error:
                ReportError::Xml {
                    source: quick_xml::Error::Io(cause),
                    ..
                },
            ..
        } => io_failure(path, cause),
        outcome => log_failure(&name, outcome).map(normalize),
    }
}

fn io_failure(path: &Path, source: Arc<std::io::Error>) -> ParseOutcome {
    let error = ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    tracing::error!(path = %path.display(), error = %error, "Error processing report file");
    ParseOutcome::Partial {
        violations: Vec::new(),
        error,
    }
}

fn log_failure(name: &str, outcome: ParseOutcome) -> ParseOutcome {
    if let ParseOutcome::Partial { violations, error } = &outcome {
        tracing::error!(
            report = name,
            error = %error,
            recovered = violations.len(),
            "Error while parsing XML stream"
        );
    }
    outcome
}

fn read_named<R: BufRead>(reader: R, name: &str, options: &ReaderOptions) -> ParseOutcome {
    let mut xml = Reader::from_reader(reader);
    let mut violations = Vec::new();

    match read_into(&mut xml, name, options, &mut violations) {
        Ok(()) => {
            tracing::debug!(report = name, count = violations.len(), "Read report");
            ParseOutcome::Complete(violations)
        }
        Err(error) => ParseOutcome::Partial { violations, error },
    }
}

fn read_into<R: BufRead>(
    xml: &mut Reader<R>,
    name: &str,
    options: &ReaderOptions,
    out: &mut Vec<ViolationRecord>,
) -> Result<(), ReportError> {
    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut has_root = false;
    let mut current_file: Option<String> = None;
    let mut pending: Option<PendingViolation> = None;

    loop {
        let event = match xml.read_event_into(&mut buf) {
            Ok(ev) => ev,
            Err(source) => return Err(xml_error(xml, source)),
        };

        match event {
            Event::Start(e) => {
                depth += 1;
                has_root = true;
                match e.local_name().as_ref() {
                    b"file" => {
                        current_file = file_resource(&e, options).map_err(|err| xml_error(xml, err))?;
                    }
                    b"violation" => {
                        pending = Some(
                            PendingViolation::from_element(&e, current_file.clone())
                                .map_err(|err| xml_error(xml, err))?,
                        );
                    }
                    _ => {}
                }
            }
            Event::Empty(e) => {
                has_root = true;
                if e.local_name().as_ref() == b"violation" {
                    let v = PendingViolation::from_element(&e, current_file.clone())
                        .map_err(|err| xml_error(xml, err))?;
                    v.finish(name, out);
                }
            }
            Event::Text(t) => {
                if depth == 0 && t.iter().any(|b| !b.is_ascii_whitespace()) {
                    return Err(ReportError::TextOutsideRoot {
                        position: xml.buffer_position() as u64,
                    });
                }
                if let Some(p) = pending.as_mut() {
                    let text = t.unescape().map_err(|err| xml_error(xml, err))?;
                    p.text.push_str(&text);
                }
            }
            Event::CData(c) => {
                if let Some(p) = pending.as_mut() {
                    let text = c.decode().map_err(|err| xml_error(xml, err))?;
                    p.text.push_str(&text);
                }
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                match e.local_name().as_ref() {
                    b"violation" => {
                        if let Some(p) = pending.take() {
                            p.finish(name, out);
                        }
                    }
                    b"file" => current_file = None,
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !has_root {
        return Err(ReportError::NoRoot);
    }
    if depth > 0 {
        return Err(ReportError::Truncated {
            open: depth,
            position: xml.buffer_position() as u64,
        });
    }
    Ok(())
}

fn xml_error<R>(xml: &Reader<R>, source: impl Into<quick_xml::Error>) -> ReportError {
    ReportError::Xml {
        position: xml.buffer_position() as u64,
        source: source.into(),
    }
}

fn attribute(e: &BytesStart<'_>, key: &str) -> Result<Option<String>, quick_xml::Error> {
    match e.try_get_attribute(key)? {
        Some(a) => Ok(Some(a.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn file_resource(e: &BytesStart<'_>, options: &ReaderOptions) -> Result<Option<String>, quick_xml::Error> {
    Ok(attribute(e, "name")?.map(|name| resolve_resource(&name, options)))
}

fn resolve_resource(name: &str, options: &ReaderOptions) -> String {
    if let Some(base) = &options.base_dir {
        if let Ok(rel) = Path::new(name).strip_prefix(base) {
            return rel.to_string_lossy().into_owned();
        }
    }
    name.to_string()
}

/// A violation element whose content has not been fully read yet.
#[derive(Debug)]
struct PendingViolation {
    resource: Option<String>,
    line: Option<u32>,
    rule: Option<String>,
    description: Option<String>,
    message: Option<String>,
    text: String,
}

impl PendingViolation {
    fn from_element(e: &BytesStart<'_>, resource: Option<String>) -> Result<Self, quick_xml::Error> {
        let line = match attribute(e, "beginline")? {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) => Some(n),
                Err(_) => {
                    tracing::warn!(value = %raw, "Ignoring invalid beginline attribute");
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            resource,
            line,
            rule: attribute(e, "rule")?,
            description: attribute(e, "description")?,
            message: attribute(e, "message")?,
            text: String::new(),
        })
    }

    fn finish(self, report: &str, out: &mut Vec<ViolationRecord>) {
        let resource_key = match self.resource.filter(|r| !r.trim().is_empty()) {
            Some(r) => r,
            None => {
                tracing::warn!(report, rule = ?self.rule, "Skipping violation without a file name");
                return;
            }
        };
        let rule_key = match self.rule.filter(|r| !r.trim().is_empty()) {
            Some(r) => r,
            None => {
                tracing::warn!(report, resource = %resource_key, "Skipping violation without a rule");
                return;
            }
        };

        let message = self
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.text.trim().to_string());

        out.push(ViolationRecord {
            resource_key,
            line: self.line,
            rule_key,
            rule_description: self.description,
            message: Some(message).filter(|m| !m.is_empty()),
        });
    }
}
