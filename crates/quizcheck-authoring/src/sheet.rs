//! Reading the question sheet.
//!
//! The sheet is a CSV export with a header row. Multi-line cells (choices,
//! references) are quoted the usual CSV way.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// One data row of the question sheet.
#[derive(Debug, Clone, Default)]
pub struct SheetRow {
    /// 1-based row number in the sheet, header included.
    pub row: u64,
    cells: HashMap<String, String>,
}

impl SheetRow {
    pub fn new(row: u64) -> Self {
        Self {
            row,
            cells: HashMap::new(),
        }
    }

    /// Builder-style cell setter.
    pub fn with(mut self, header: &str, value: &str) -> Self {
        self.cells.insert(header.to_string(), value.to_string());
        self
    }

    /// The cell under `header`; missing columns read as empty.
    pub fn cell(&self, header: &str) -> &str {
        self.cells.get(header).map(String::as_str).unwrap_or("")
    }
}

/// Read every data row of a CSV sheet.
pub fn read_sheet(path: &Path) -> Result<Vec<SheetRow>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open sheet: {}", path.display()))?;
    read_sheet_from(file).with_context(|| format!("failed to read sheet: {}", path.display()))
}

/// Read every data row from CSV text.
pub fn read_sheet_from<R: Read>(reader: R) -> Result<Vec<SheetRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .context("sheet has no header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record.with_context(|| format!("malformed sheet row {}", index + 2))?;
        let cells = headers
            .iter()
            .cloned()
            .zip(record.iter().map(|cell| cell.replace("\r\n", "\n")))
            .collect();
        rows.push(SheetRow {
            row: index as u64 + 2,
            cells,
        });
    }

    tracing::debug!("read {} sheet row(s)", rows.len());
    Ok(rows)
}
