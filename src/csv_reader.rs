// CSV ingestion: header row + data rows, kept as strings until plotted

use crate::data::Dataset;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Read CSV with a header row from stdin
pub fn read_csv_from_stdin() -> Result<Dataset> {
    read_csv_from_reader(io::stdin().lock())
}

/// Read CSV with a header row from a file
pub fn read_csv_from_path<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let file = File::open(path.as_ref())
        .with_context(|| format!("Failed to open '{}'", path.as_ref().display()))?;
    read_csv_from_reader(file)
}

/// Read CSV with a header row from any reader
pub fn read_csv_from_reader<R: Read>(reader: R) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.context("Failed to read CSV record")?;
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }

    if rows.is_empty() {
        anyhow::bail!("CSV must contain at least one data row");
    }

    Ok(Dataset::new(headers, rows))
}
