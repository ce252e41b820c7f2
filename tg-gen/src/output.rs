//! Writing generated records to disk.

use std::fmt;
use std::fs::File;
use std::io::{
    BufWriter,
    Write,
};
use std::path::Path;

use anyhow::{
    Context,
    Result,
};
use clap::ValueEnum;
use tracing::instrument;

use crate::model::NodeRecord;

/// On-disk layout of the primary output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line.
    #[default]
    Jsonl,
    /// A single JSON array, one object per line.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jsonl => f.write_str("JSONL"),
            Self::Json => f.write_str("JSON"),
        }
    }
}

/// Write each record as its own line.
pub fn write_jsonl<'a, W, I>(mut writer: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a NodeRecord>,
{
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write an enclosing array, streaming one record at a time.
pub fn write_json_array<'a, W, I>(mut writer: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a NodeRecord>,
{
    writer.write_all(b"[\n")?;
    for (i, record) in records.into_iter().enumerate() {
        if i > 0 {
            writer.write_all(b",\n")?;
        }
        serde_json::to_writer(&mut writer, record)?;
    }
    writer.write_all(b"\n]\n")?;
    writer.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write `records` in `format`.
#[instrument(skip(records))]
pub fn write_records<'a, I>(path: &Path, format: OutputFormat, records: I) -> Result<()>
where
    I: IntoIterator<Item = &'a NodeRecord>,
{
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let writer = BufWriter::new(file);
    let written = match format {
        OutputFormat::Jsonl => write_jsonl(writer, records),
        OutputFormat::Json => write_json_array(writer, records),
    };
    written.with_context(|| format!("writing {format} records to {}", path.display()))
}
