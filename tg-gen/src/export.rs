//! Tabular (CSV) export of a previously written record file.
//!
//! The source format is sniffed from its first non-whitespace byte: `[` means a JSON array,
//! anything else is treated as JSON Lines. The two paths pick their columns differently:
//!
//! * array files are loaded whole and exported with the sorted subset of [`CANONICAL_COLUMNS`]
//!   that actually occurs in the records;
//! * line files are streamed, and the columns are the first record's own keys in their original
//!   order, minus the derived `level` field.
//!
// TODO: decide with downstream consumers whether the two column policies should converge; until
// then both are kept as-is so existing CSVs stay byte-compatible.

use std::fs::File;
use std::io::{
    BufRead,
    BufReader,
    Read,
};
use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    Context,
    Result,
};
use serde_json::{
    Map,
    Value,
};
use tracing::{
    info,
    instrument,
    warn,
};

use crate::output::OutputFormat;

/// Columns an array export may contain; `level` is never exported.
pub const CANONICAL_COLUMNS: [&str; 5] = ["timestamp", "id", "health", "session_id", "source"];

/// Fields dropped from line-file headers.
const DERIVED_COLUMNS: [&str; 1] = ["level"];

/// Result of an export attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// A CSV file was written.
    Written {
        /// Destination file.
        path: PathBuf,
        /// Number of data rows, header excluded.
        rows: usize,
        /// Header, in output order.
        columns: Vec<String>,
    },
    /// The source held no records; nothing was written.
    Empty,
}

/// Look at the first non-whitespace byte to tell an array file from a line file.
///
/// An empty or all-whitespace source reads as [`OutputFormat::Jsonl`].
pub fn detect_format<R: Read>(reader: R) -> Result<OutputFormat> {
    let mut reader = BufReader::new(reader);
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(OutputFormat::Jsonl);
        }
        if let Some(&b) = buf.iter().find(|b| !b.is_ascii_whitespace()) {
            return Ok(if b == b'[' { OutputFormat::Json } else { OutputFormat::Jsonl });
        }
        let consumed = buf.len();
        reader.consume(consumed);
    }
}

/// Render a JSON value as a CSV cell.
fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Open a CRLF-terminated CSV writer at `path`.
fn csv_writer(path: &Path) -> Result<csv::Writer<File>> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))
}

/// Load a whole JSON array and export it.
#[instrument]
pub fn json_array_to_csv(src: &Path, dst: &Path) -> Result<ExportOutcome> {
    let file = File::open(src).with_context(|| format!("opening {}", src.display()))?;
    let records: Vec<Map<String, Value>> =
        serde_json::from_reader(BufReader::new(file)).with_context(|| format!("parsing {}", src.display()))?;

    if records.is_empty() {
        warn!("No rows found in {}", src.display());
        return Ok(ExportOutcome::Empty);
    }

    let mut columns: Vec<String> = CANONICAL_COLUMNS
        .iter()
        .filter(|col| records.iter().any(|r| r.contains_key(**col)))
        .map(ToString::to_string)
        .collect();
    columns.sort();

    let mut writer = csv_writer(dst)?;
    writer.write_record(&columns)?;
    for record in &records {
        writer.write_record(columns.iter().map(|col| cell(record.get(col))))?;
    }
    writer.flush()?;

    Ok(ExportOutcome::Written { path: dst.to_owned(), rows: records.len(), columns })
}

/// Stream a JSON Lines file into CSV without holding all records in memory.
///
/// The destination is only created once the first record has been read.
#[instrument]
pub fn stream_jsonl_to_csv(src: &Path, dst: &Path) -> Result<ExportOutcome> {
    let file = File::open(src).with_context(|| format!("opening {}", src.display()))?;
    let mut sink: Option<(csv::Writer<File>, Vec<String>)> = None;
    let mut rows = 0;

    for (lineno, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let record: Map<String, Value> = serde_json::from_str(line)
            .with_context(|| format!("parsing {} line {}", src.display(), lineno + 1))?;

        if sink.is_none() {
            let columns: Vec<String> =
                record.keys().filter(|k| !DERIVED_COLUMNS.contains(&k.as_str())).cloned().collect();
            let mut writer = csv_writer(dst)?;
            writer.write_record(&columns)?;
            sink = Some((writer, columns));
        }

        if let Some((writer, columns)) = sink.as_mut() {
            writer.write_record(columns.iter().map(|col| cell(record.get(col))))?;
            rows += 1;
        }
    }

    let Some((mut writer, columns)) = sink else {
        warn!("No rows found in {}", src.display());
        return Ok(ExportOutcome::Empty);
    };
    writer.flush()?;

    Ok(ExportOutcome::Written { path: dst.to_owned(), rows, columns })
}

/// Export `src` to CSV at `dst`, picking the strategy from the file contents.
#[instrument]
pub fn export_csv(src: &Path, dst: &Path) -> Result<ExportOutcome> {
    let file = File::open(src).with_context(|| format!("opening {}", src.display()))?;
    match detect_format(file)? {
        OutputFormat::Json => {
            info!("Detected JSON array format (loads full file in memory)");
            json_array_to_csv(src, dst)
        },
        OutputFormat::Jsonl => {
            info!("Detected JSONL format (streaming line by line)");
            stream_jsonl_to_csv(src, dst)
        },
    }
}
