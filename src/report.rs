//! Specs report model and plain-text rendering
//!
//! A report is an ordered list of labelled values. Scalars render as
//! `Label: value`, record lists render as a `Label:` header followed by
//! each record's fields indented by four spaces.

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::hardware::CollectError;

/// Label used for the single entry of a degraded report
pub const ERROR_LABEL: &str = "Error";

const RECORD_INDENT: &str = "    ";

/// One nested record, e.g. a single GPU
pub type Record = Vec<(String, String)>;

/// Value stored under a report label
#[derive(Debug, Clone, PartialEq)]
pub enum ReportValue {
    Scalar(String),
    Records(Vec<Record>),
}

impl From<String> for ReportValue {
    fn from(value: String) -> Self {
        ReportValue::Scalar(value)
    }
}

impl From<&str> for ReportValue {
    fn from(value: &str) -> Self {
        ReportValue::Scalar(value.to_string())
    }
}

/// Ordered label -> value mapping produced once per run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecsReport {
    entries: Vec<(String, ReportValue)>,
}

impl SpecsReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report carrying only the collection failure message
    pub fn error(message: impl Into<String>) -> Self {
        let message: String = message.into();
        let mut report = Self::new();
        report.insert(ERROR_LABEL, message);
        report
    }

    /// Build the report from a whole collection attempt.
    ///
    /// A failed attempt never yields partial data: the report collapses to
    /// a single `Error` entry.
    pub fn from_collection<T>(result: Result<T, CollectError>) -> Self
    where
        T: Into<SpecsReport>,
    {
        match result {
            Ok(specs) => specs.into(),
            Err(err) => {
                tracing::warn!(error = %err, "specs collection failed");
                Self::error(err.to_string())
            }
        }
    }

    /// Insert a value. Re-inserting a label replaces the value in place.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<ReportValue>) {
        let label = label.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((label, value)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<&ReportValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, value)| value)
    }

    #[cfg(test)]
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_error(&self) -> bool {
        self.entries.len() == 1 && self.entries[0].0 == ERROR_LABEL
    }

    /// Render the report as line-oriented text
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Write the rendering to `path` (truncating), then echo the same bytes to `out`.
    pub fn publish(&self, path: &Path, out: &mut impl Write) -> Result<()> {
        let text = self.render();

        fs::write(path, &text)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        tracing::info!(path = %path.display(), entries = self.len(), "report written");

        out.write_all(text.as_bytes())
            .and_then(|()| out.flush())
            .context("Failed to print report")?;

        Ok(())
    }
}

impl fmt::Display for SpecsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in &self.entries {
            match value {
                ReportValue::Scalar(text) => writeln!(f, "{}: {}", label, text)?,
                ReportValue::Records(records) => {
                    writeln!(f, "{}:", label)?;
                    for record in records {
                        for (key, text) in record {
                            writeln!(f, "{}{}: {}", RECORD_INDENT, key, text)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
