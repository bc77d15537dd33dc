use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

pub mod load;
pub mod normalize;

pub use load::load_workbook;
pub use normalize::ensure_author_column;

/// Canonical name of the author column after normalization. Downstream
/// code reads the column under exactly this key.
pub const AUTHOR_COLUMN: &str = "Author";

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("spreadsheet `{path}` not found")]
    NotFound { path: PathBuf },

    #[error("workbook `{path}` has no worksheets")]
    NoWorksheet { path: PathBuf },

    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("required column `{column}` not found; columns present: {present:?}")]
    MissingColumn {
        column: &'static str,
        present: Vec<String>,
    },
}

/// In-memory form of one worksheet.
///
/// Column names keep the order they appear in the file; each row is one
/// `Value` per column. The table is built once by [`load_workbook`],
/// renamed once by [`ensure_author_column`], then consumed row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Value>>,
}

static NULL: Value = Value::Null;

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { headers, rows }
    }

    /// Column names in file order.
    pub fn columns(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Cell at (`row`, `column`), or `Null` when the column or cell is
    /// absent. Ragged rows from the workbook are treated as null-padded.
    pub fn value(&self, row: usize, column: &str) -> &Value {
        self.column_index(column)
            .and_then(|col| self.rows.get(row).and_then(|r| r.get(col)))
            .unwrap_or(&NULL)
    }

    /// Rename the first column matching `from` (exact match) to `to`.
    /// Returns false when no such column exists.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(idx) => {
                self.headers[idx] = to.to_string();
                true
            }
            None => false,
        }
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}
