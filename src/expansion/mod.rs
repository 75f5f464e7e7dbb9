use std::borrow::Cow;

mod scanner;

use scanner::placeholder_positions;

use crate::context::StatementArg;
use crate::error::SqlLogError;

/// Substitute rendered arguments into the unquoted `?` placeholders of `sql`.
///
/// Arguments are consumed left to right. A `?` inside a single- or double-quoted region is
/// copied through and does not consume an argument. Surplus arguments are ignored.
///
/// Returns a borrowed `Cow` when nothing was substituted.
///
/// Warning: quote tracking assumes quote characters are evenly paired inside each literal. A
/// lone `"` inside a `'...'` string (or the reverse) leaves the scanner inside a quoted region
/// for the rest of the statement, so later placeholders are not substituted.
///
/// ```rust
/// use sql_statement_log::prelude::*;
///
/// let int = ColumnType::postgres(ColumnKind::Integer).shared();
/// let args = [StatementArg::new(int, RowValues::Int(5))];
/// let sql = expand_args("select '?' from t where x = ?", &args).unwrap();
/// assert_eq!(sql, "select '?' from t where x = 5");
/// ```
///
/// # Errors
/// Returns `SqlLogError::MissingArgument` if there are more unquoted placeholders than
/// arguments. No partially expanded text is produced.
pub fn expand_args<'a>(sql: &'a str, args: &[StatementArg]) -> Result<Cow<'a, str>, SqlLogError> {
    if args.is_empty() {
        return Ok(Cow::Borrowed(sql));
    }

    let mut out: Option<String> = None;
    let mut last = 0;

    for (arg_index, idx) in placeholder_positions(sql.as_bytes()).enumerate() {
        let arg = args.get(arg_index).ok_or(SqlLogError::MissingArgument {
            index: arg_index,
            supplied: args.len(),
        })?;
        let buf = out.get_or_insert_with(|| String::with_capacity(sql.len() + args.len() * 8));
        // `?` and the quote characters are ASCII, so these offsets are char boundaries.
        buf.push_str(&sql[last..idx]);
        buf.push_str(&arg.to_sql());
        last = idx + 1;
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&sql[last..]);
            Ok(Cow::Owned(buf))
        }
        None => Ok(Cow::Borrowed(sql)),
    }
}

/// Count the `?` placeholders that [`expand_args`] would substitute.
#[must_use]
pub fn placeholder_count(sql: &str) -> usize {
    placeholder_positions(sql.as_bytes()).count()
}
