use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Parser, ValueEnum};
use sql_statement_log::{ColumnKind, ColumnType, RowValues, SqlDialect, StatementContext};

#[derive(Parser, Debug)]
#[command(author, version, about = "Expand a `?` SQL template with typed arguments")]
pub(crate) struct Args {
    /// SQL template with `?` placeholders.
    #[arg(long)]
    pub(crate) sql: String,
    #[arg(long, value_enum, default_value = "postgres")]
    pub(crate) dialect: SqlDialect,
    /// One argument per placeholder, as `<type>:<value>` or `null`.
    #[arg(long = "arg", value_parser = parse_arg)]
    pub(crate) args: Vec<CliArg>,
    /// Fail unless the argument count matches the placeholder count exactly.
    #[arg(long)]
    pub(crate) strict: bool,
    /// Emit through the tracing sink instead of printing to stdout.
    #[arg(long)]
    pub(crate) trace: bool,
    /// JSON logging configuration used with `--trace`.
    #[arg(long)]
    pub(crate) log_config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CliArg {
    pub(crate) kind: ColumnKind,
    pub(crate) value: RowValues,
}

impl Args {
    pub(crate) fn to_context(&self) -> StatementContext {
        self.args.iter().fold(StatementContext::new(&self.sql), |ctx, arg| {
            ctx.with_arg(ColumnType::new(arg.kind, self.dialect), arg.value.clone())
        })
    }
}

pub(crate) fn parse_arg(raw: &str) -> Result<CliArg, String> {
    if raw.eq_ignore_ascii_case("null") {
        return Ok(CliArg {
            kind: ColumnKind::Text,
            value: RowValues::Null,
        });
    }
    let (kind, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected <type>:<value>, got `{raw}`"))?;
    let kind = ColumnKind::from_str(kind, true).map_err(|err| format!("bad type `{kind}`: {err}"))?;
    let value = parse_value(kind, value)?;
    Ok(CliArg { kind, value })
}

fn parse_value(kind: ColumnKind, raw: &str) -> Result<RowValues, String> {
    let bad = |err: &dyn std::fmt::Display| format!("`{raw}`: {err}");
    let value = match kind {
        ColumnKind::Integer => RowValues::Int(raw.parse().map_err(|err| bad(&err))?),
        ColumnKind::Real => RowValues::Float(raw.parse().map_err(|err| bad(&err))?),
        ColumnKind::Boolean => RowValues::Bool(raw.parse().map_err(|err| bad(&err))?),
        ColumnKind::Text => RowValues::Text(raw.to_owned()),
        ColumnKind::Timestamp => RowValues::Timestamp(
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
                .map_err(|err| bad(&err))?,
        ),
        ColumnKind::Json => RowValues::JSON(serde_json::from_str(raw).map_err(|err| bad(&err))?),
        ColumnKind::Blob => RowValues::Blob(parse_hex(raw)?),
    };
    Ok(value)
}

fn parse_hex(raw: &str) -> Result<Vec<u8>, String> {
    if raw.len() % 2 != 0 {
        return Err(format!("`{raw}`: odd number of hex digits"));
    }
    (0..raw.len())
        .step_by(2)
        .map(|idx| {
            raw.get(idx..idx + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| format!("`{raw}`: invalid hex"))
        })
        .collect()
}
