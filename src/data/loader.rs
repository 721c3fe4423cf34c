// ============================================================
// Layer 4 — UCR Table Loader
// ============================================================
// Loads the ECG5000 text tables (UCR archive format).
//
// What the files look like:
//   Each line is one record. The first field is the class
//   label, the remaining 140 fields are the heartbeat signal.
//   Values are written in scientific notation and padded so
//   that fields are separated by two or more spaces:
//
//     "   1.0000000e+00  -1.1252183e+00  -2.0812021e+00 ..."
//
//   A minus sign takes the place of one padding space, so
//   splitting on runs of 2+ whitespace characters keeps
//   negative numbers intact. There is no header row.
//
// The TRAIN and TEST files are concatenated (train first).
// The archive's own train/test split is discarded;
// the partitioner builds its own.
//
// Reference: regex crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use regex::Regex;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::record::Record;
use crate::domain::traits::RecordSource;

/// Field separator: runs of two or more whitespace characters.
const FIELD_SEPARATOR: &str = r"\s{2,}";

/// Loads and concatenates one or more UCR-format tables.
/// Implements the RecordSource trait from Layer 3.
pub struct UcrTableLoader {
    /// Tables to read, in concatenation order
    paths: Vec<PathBuf>,
}

impl UcrTableLoader {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl RecordSource for UcrTableLoader {
    fn load_all(&self) -> Result<Vec<Record>> {
        let separator = Regex::new(FIELD_SEPARATOR)?;
        let mut records: Vec<Record> = Vec::new();

        for path in &self.paths {
            let table = load_table(path, &separator)?;
            tracing::info!("Loaded {} rows from '{}'", table.len(), path.display());
            records.extend(table);
        }

        // Every row in the concatenated table must have the same width,
        // otherwise the feature matrix cannot be built.
        check_uniform_width(&records)?;

        tracing::info!(
            "Dataset: {} records, signal length {}",
            records.len(),
            records.first().map(Record::len).unwrap_or(0)
        );
        Ok(records)
    }
}

/// Read a single table file and parse every non-blank line.
fn load_table(path: &Path, separator: &Regex) -> Result<Vec<Record>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read table '{}'", path.display()))?;

    parse_table(&text, separator)
        .with_context(|| format!("Malformed table '{}'", path.display()))
}

/// Parse the contents of a UCR table.
pub fn parse_table(text: &str, separator: &Regex) -> Result<Vec<Record>> {
    let mut records = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let record = parse_row(line, separator)
            .with_context(|| format!("line {}", line_no + 1))?;
        records.push(record);
    }

    Ok(records)
}

/// Parse one trimmed line into a Record.
fn parse_row(line: &str, separator: &Regex) -> Result<Record> {
    let mut fields = separator.split(line);

    // The first field always exists because the line is non-empty
    let label_field = fields.next().unwrap_or_default();
    let label = parse_label(label_field)?;

    let signal = fields
        .map(|f| {
            f.parse::<f64>()
                .with_context(|| format!("'{f}' is not a number"))
        })
        .collect::<Result<Vec<f64>>>()?;

    if signal.is_empty() {
        bail!("row has a label but no signal values");
    }

    Ok(Record::new(label, signal))
}

/// Labels are written as floats (1.0000000e+00) but must be whole numbers.
fn parse_label(field: &str) -> Result<i64> {
    let value: f64 = field
        .parse()
        .with_context(|| format!("label '{field}' is not a number"))?;

    if !value.is_finite() || value.fract() != 0.0 {
        bail!("label '{field}' is not an integer class");
    }

    Ok(value as i64)
}

fn check_uniform_width(records: &[Record]) -> Result<()> {
    let Some(first) = records.first() else {
        return Ok(());
    };

    let width = first.len();
    if let Some((idx, bad)) = records.iter().enumerate().find(|(_, r)| r.len() != width) {
        bail!(
            "record {} has {} signal values, expected {}",
            idx,
            bad.len(),
            width
        );
    }
    Ok(())
}
