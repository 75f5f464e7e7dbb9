use rusqlite::types::Value;

use crate::error::SqlLogError;
use crate::types::RowValues;

/// Extract a `RowValues` from a `SQLite` row.
///
/// # Errors
/// Returns `SqlLogError::SqliteError` if the column cannot be read.
pub fn sqlite_extract_value(row: &rusqlite::Row<'_>, idx: usize) -> Result<RowValues, SqlLogError> {
    let value: Value = row.get(idx)?;
    Ok(match value {
        Value::Null => RowValues::Null,
        Value::Integer(i) => RowValues::Int(i),
        Value::Real(f) => RowValues::Float(f),
        Value::Text(s) => RowValues::Text(s),
        Value::Blob(b) => RowValues::Blob(b),
    })
}

/// Read every row of `rows` into `RowValues`, `column_count` values per row.
///
/// # Errors
/// Returns `SqlLogError::SqliteError` if stepping or reading fails.
pub fn collect_rows(
    mut rows: rusqlite::Rows<'_>,
    column_count: usize,
) -> Result<Vec<Vec<RowValues>>, SqlLogError> {
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            values.push(sqlite_extract_value(row, idx)?);
        }
        out.push(values);
    }
    Ok(out)
}
