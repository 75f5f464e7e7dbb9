use std::borrow::Cow;
use std::sync::Arc;

use crate::column_type::ParameterType;
use crate::error::SqlLogError;
use crate::expansion::expand_args;
use crate::types::RowValues;

/// One bound parameter: its declared type and the value that was bound.
#[derive(Debug, Clone)]
pub struct StatementArg {
    pub ty: Arc<dyn ParameterType>,
    pub value: RowValues,
}

impl StatementArg {
    #[must_use]
    pub fn new(ty: Arc<dyn ParameterType>, value: RowValues) -> Self {
        Self { ty, value }
    }

    /// Render the value through its declared type.
    #[must_use]
    pub fn to_sql(&self) -> String {
        self.ty.value_to_sql(&self.value)
    }
}

/// An executed statement: the `?` template and its arguments in placeholder order.
///
/// ```rust
/// use sql_statement_log::prelude::*;
///
/// let ctx = StatementContext::new("update users set name = ? where id = ?")
///     .with_arg(ColumnType::postgres(ColumnKind::Text), "bob")
///     .with_arg(ColumnType::postgres(ColumnKind::Integer), 7_i64);
/// assert_eq!(
///     ctx.expand_args().unwrap(),
///     "update users set name = 'bob' where id = 7"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct StatementContext {
    sql: String,
    args: Vec<StatementArg>,
}

impl StatementContext {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument for the next placeholder.
    #[must_use]
    pub fn with_arg<T, V>(mut self, ty: T, value: V) -> Self
    where
        T: ParameterType + 'static,
        V: Into<RowValues>,
    {
        self.args.push(StatementArg::new(Arc::new(ty), value.into()));
        self
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[must_use]
    pub fn args(&self) -> &[StatementArg] {
        &self.args
    }

    /// Bound values without their types, in placeholder order.
    pub fn values(&self) -> impl Iterator<Item = &RowValues> {
        self.args.iter().map(|arg| &arg.value)
    }

    /// Expand the template with the rendered arguments.
    ///
    /// # Errors
    /// Returns `SqlLogError::MissingArgument` if the template has more unquoted placeholders
    /// than there are arguments.
    pub fn expand_args(&self) -> Result<Cow<'_, str>, SqlLogError> {
        expand_args(&self.sql, &self.args)
    }
}
