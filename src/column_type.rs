use std::fmt;
use std::sync::Arc;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::types::RowValues;

/// Renders a bound parameter value as SQL literal text.
///
/// The rendering is only ever used for log output; it is never sent back to a database.
/// Implementations should still match what the driver bound, or logged SQL will mislead.
pub trait ParameterType: fmt::Debug + Send + Sync {
    /// Declared SQL type name, used in diagnostics.
    fn sql_type(&self) -> &str;

    /// Render `value` as a SQL literal.
    fn value_to_sql(&self, value: &RowValues) -> String;
}

/// SQL dialect whose literal syntax the default catalog follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    /// `PostgreSQL` literals (`TRUE`, `'\x..'` bytea).
    #[default]
    Postgres,
    /// `SQLite` literals (`1`/`0` booleans, `X'..'` blobs).
    Sqlite,
}

/// Declared column kind in the default catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Integer,
    Real,
    Text,
    Boolean,
    Timestamp,
    Json,
    Blob,
}

/// Default [`ParameterType`] implementation: a column kind bound to a dialect.
///
/// `NULL` renders as `NULL` for every kind. `Text` and `Json` columns quote the textual form of
/// whatever they are given; every other kind renders a value by the value's own variant.
///
/// ```rust
/// use sql_statement_log::prelude::*;
///
/// let ty = ColumnType::sqlite(ColumnKind::Boolean);
/// assert_eq!(ty.value_to_sql(&RowValues::Bool(true)), "1");
/// assert_eq!(ColumnType::postgres(ColumnKind::Text).value_to_sql(&"it's".into()), "'it''s'");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnType {
    pub kind: ColumnKind,
    pub dialect: SqlDialect,
}

impl ColumnType {
    #[must_use]
    pub const fn new(kind: ColumnKind, dialect: SqlDialect) -> Self {
        Self { kind, dialect }
    }

    #[must_use]
    pub const fn postgres(kind: ColumnKind) -> Self {
        Self::new(kind, SqlDialect::Postgres)
    }

    #[must_use]
    pub const fn sqlite(kind: ColumnKind) -> Self {
        Self::new(kind, SqlDialect::Sqlite)
    }

    /// Wrap into the shared trait object stored in statement arguments.
    #[must_use]
    pub fn shared(self) -> Arc<dyn ParameterType> {
        Arc::new(self)
    }

    fn render_native(self, value: &RowValues) -> String {
        match value {
            RowValues::Null => "NULL".to_owned(),
            RowValues::Int(i) => i.to_string(),
            RowValues::Float(f) => render_float(*f),
            RowValues::Text(s) => quote(s),
            RowValues::Bool(b) => match self.dialect {
                SqlDialect::Postgres => (if *b { "TRUE" } else { "FALSE" }).to_owned(),
                SqlDialect::Sqlite => i64::from(*b).to_string(),
            },
            RowValues::Timestamp(dt) => quote(&dt.format("%F %T%.f").to_string()),
            RowValues::JSON(json) => quote(&json.to_string()),
            RowValues::Blob(bytes) => match self.dialect {
                SqlDialect::Postgres => format!("'\\x{}'", hex(bytes, false)),
                SqlDialect::Sqlite => format!("X'{}'", hex(bytes, true)),
            },
        }
    }
}

impl ParameterType for ColumnType {
    fn sql_type(&self) -> &str {
        match (self.kind, self.dialect) {
            (ColumnKind::Integer, SqlDialect::Postgres) => "BIGINT",
            (ColumnKind::Real, SqlDialect::Postgres) => "DOUBLE PRECISION",
            (ColumnKind::Boolean, SqlDialect::Postgres) => "BOOLEAN",
            (ColumnKind::Timestamp, SqlDialect::Postgres) => "TIMESTAMP",
            (ColumnKind::Json, SqlDialect::Postgres) => "JSONB",
            (ColumnKind::Blob, SqlDialect::Postgres) => "BYTEA",
            (ColumnKind::Integer | ColumnKind::Boolean, SqlDialect::Sqlite) => "INTEGER",
            (ColumnKind::Real, SqlDialect::Sqlite) => "REAL",
            (ColumnKind::Blob, SqlDialect::Sqlite) => "BLOB",
            (ColumnKind::Text, _)
            | (ColumnKind::Timestamp | ColumnKind::Json, SqlDialect::Sqlite) => "TEXT",
        }
    }

    fn value_to_sql(&self, value: &RowValues) -> String {
        match (self.kind, value) {
            (_, RowValues::Null) => "NULL".to_owned(),
            (ColumnKind::Text | ColumnKind::Json, RowValues::Int(i)) => quote(&i.to_string()),
            (ColumnKind::Text | ColumnKind::Json, RowValues::Float(f)) => quote(&f.to_string()),
            (ColumnKind::Text | ColumnKind::Json, RowValues::Bool(b)) => quote(&b.to_string()),
            _ => self.render_native(value),
        }
    }
}

/// Single-quote `text`, doubling embedded quotes.
#[must_use]
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for ch in text.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

fn render_float(value: f64) -> String {
    if value.is_nan() {
        "'NaN'".to_owned()
    } else if value.is_infinite() {
        (if value > 0.0 { "'Infinity'" } else { "'-Infinity'" }).to_owned()
    } else {
        value.to_string()
    }
}

fn hex(bytes: &[u8], upper: bool) -> String {
    let digits: &[u8; 16] = if upper {
        b"0123456789ABCDEF"
    } else {
        b"0123456789abcdef"
    };
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push(char::from(digits[usize::from(b >> 4)]));
        out.push(char::from(digits[usize::from(b & 0x0f)]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn null_is_bare_keyword_for_every_kind() {
        for kind in [ColumnKind::Integer, ColumnKind::Text, ColumnKind::Blob] {
            assert_eq!(ColumnType::postgres(kind).value_to_sql(&RowValues::Null), "NULL");
        }
    }

    #[test]
    fn text_doubles_embedded_quotes() {
        let ty = ColumnType::postgres(ColumnKind::Text);
        assert_eq!(ty.value_to_sql(&"O'Brien".into()), "'O''Brien'");
        assert_eq!(ty.value_to_sql(&RowValues::Int(42)), "'42'");
    }

    #[test]
    fn booleans_follow_dialect() {
        let value = RowValues::Bool(false);
        assert_eq!(ColumnType::postgres(ColumnKind::Boolean).value_to_sql(&value), "FALSE");
        assert_eq!(ColumnType::sqlite(ColumnKind::Boolean).value_to_sql(&value), "0");
    }

    #[test]
    fn blobs_follow_dialect() {
        let value = RowValues::Blob(vec![0xde, 0xad, 0x01]);
        assert_eq!(ColumnType::postgres(ColumnKind::Blob).value_to_sql(&value), "'\\xdead01'");
        assert_eq!(ColumnType::sqlite(ColumnKind::Blob).value_to_sql(&value), "X'DEAD01'");
    }

    #[test]
    fn timestamps_and_json_are_quoted() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(8, 5, 0)
            .unwrap();
        let ty = ColumnType::sqlite(ColumnKind::Timestamp);
        assert_eq!(ty.value_to_sql(&RowValues::Timestamp(dt)), "'2024-03-09 08:05:00'");

        let ty = ColumnType::postgres(ColumnKind::Json);
        assert_eq!(
            ty.value_to_sql(&RowValues::JSON(json!({"k": "it's"}))),
            r#"'{"k":"it''s"}'"#
        );
    }

    #[test]
    fn non_finite_floats_are_quoted() {
        let ty = ColumnType::postgres(ColumnKind::Real);
        assert_eq!(ty.value_to_sql(&RowValues::Float(f64::NAN)), "'NaN'");
        assert_eq!(ty.value_to_sql(&RowValues::Float(f64::NEG_INFINITY)), "'-Infinity'");
        assert_eq!(ty.value_to_sql(&RowValues::Float(1.5)), "1.5");
    }

    #[test]
    fn sql_type_names() {
        assert_eq!(ColumnType::postgres(ColumnKind::Blob).sql_type(), "BYTEA");
        assert_eq!(ColumnType::sqlite(ColumnKind::Boolean).sql_type(), "INTEGER");
        assert_eq!(ColumnType::sqlite(ColumnKind::Json).sql_type(), "TEXT");
    }
}
