//! Sheet Decoding
//!
//! Turns an uploaded spreadsheet (XLSX or CSV) into a uniform table of
//! strings. All cells are stringified and blank cells become "", so the
//! rest of the pipeline never sees a null.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::domain::DomainError;

/// XLSX files are ZIP containers; this is the local-file-header magic.
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4b, 0x03, 0x04];

/// A decoded spreadsheet: header row plus string cells.
#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Decode uploaded bytes. XLSX is detected by its ZIP magic; anything
    /// else is parsed as UTF-8 CSV.
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self, DomainError> {
        if bytes.starts_with(&ZIP_MAGIC) {
            Self::from_xlsx(name, bytes)
        } else {
            Self::from_csv(name, bytes)
        }
    }

    fn from_xlsx(name: &str, bytes: &[u8]) -> Result<Self, DomainError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| DomainError::decode(name, e))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| DomainError::decode(name, "workbook has no sheets"))?
            .map_err(|e| DomainError::decode(name, e))?;

        let mut rows = range.rows().map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => String::new(),
                    other => other.to_string(),
                })
                .collect::<Vec<String>>()
        });

        let headers = rows
            .next()
            .ok_or_else(|| DomainError::decode(name, "sheet is empty"))?;

        Ok(Self {
            name: name.to_string(),
            headers,
            rows: rows.collect(),
        })
    }

    fn from_csv(name: &str, bytes: &[u8]) -> Result<Self, DomainError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes);

        let headers = reader
            .headers()
            .map_err(|e| DomainError::decode(name, e))?
            .iter()
            .map(str::to_string)
            .collect::<Vec<String>>();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| DomainError::decode(name, e))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self {
            name: name.to_string(),
            headers,
            rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Index of a column by exact trimmed header match.
    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == header)
    }

    /// Like [`Sheet::column`] but a missing column is an error that
    /// propagates to the user (malformed input is not tolerated).
    pub fn require_column(&self, header: &str) -> Result<usize, DomainError> {
        self.column(header)
            .ok_or_else(|| DomainError::missing_column(&self.name, header))
    }

    /// Cell value at (row, column index); out-of-range cells are "".
    pub fn field(row: &[String], index: Option<usize>) -> String {
        index
            .and_then(|i| row.get(i))
            .cloned()
            .unwrap_or_default()
    }
}
