use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use serde_json::{json, Value};
use tracing::debug;

use super::{SheetError, Table};

/// Load the first worksheet of the workbook at `path` into a [`Table`].
///
/// The first row is taken as the header row; every following row becomes a
/// data row. Column names are kept exactly as the file spells them. A
/// missing file is reported as [`SheetError::NotFound`] before any parsing
/// is attempted.
pub fn load_workbook(path: impl AsRef<Path>) -> Result<Table, SheetError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SheetError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| SheetError::NoWorksheet {
            path: path.to_path_buf(),
        })?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|header_row| header_row.iter().map(header_text).collect())
        .unwrap_or_default();
    let data: Vec<Vec<Value>> = rows
        .map(|row| row.iter().map(cell_to_value).collect())
        .collect();

    debug!(sheet = %sheet_name, columns = headers.len(), rows = data.len(), "parsed worksheet");
    Ok(Table::new(headers, data))
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Convert a worksheet cell to a JSON value. Whole-number floats come back
/// as integers; everything else stays as close to the source type as the
/// workbook allows.
fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => json!(*i),
        Data::Float(f) => {
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                json!(*f as i64)
            } else {
                json!(*f)
            }
        }
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => Value::String(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(_) => Value::Null,
    }
}
