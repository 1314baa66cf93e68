//! Date parsing for raw and cleaned tables.
//!
//! Raw exports carry dates in a handful of textual layouts. Columns are
//! parsed into the Date dtype; values that fail to parse become null rather
//! than aborting the stage.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;

/// Day-abbreviated-month-two-digit-year, e.g. `07-Jul-23` (employee dates).
pub const DMY_ABBREV: &str = "%d-%b-%y";
/// Day-month-four-digit-year, e.g. `14-02-2023` (engagement survey dates).
pub const DMY_NUMERIC: &str = "%d-%m-%Y";

/// Formats tried in order by the permissive parser. ISO first, since that is
/// what cleaned tables round-trip through.
const FLEX_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d-%m-%Y",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%b-%Y",
    "%d-%b-%y",
    "%Y/%m/%d",
];

const FLEX_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Days since the Unix epoch, the physical representation of the Date dtype.
pub fn date_to_days(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    (date - epoch).num_days() as i32
}

fn parse_one(value: &str, formats: &[&str]) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    for format in formats {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    for format in FLEX_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }
    None
}

fn parse_with(df: &mut DataFrame, column: &str, formats: &[&str]) -> Result<()> {
    let strings = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let ca = strings.str()?;
    let days: Int32Chunked = ca
        .iter()
        .map(|opt| opt.and_then(|v| parse_one(v, formats)).map(date_to_days))
        .collect();
    let parsed = days.with_name(column.into()).into_date().into_series();
    df.with_column(parsed)?;
    Ok(())
}

/// Parse a column with a single fixed format; unparseable values become null.
pub fn parse_date_column(df: &mut DataFrame, column: &str, format: &str) -> Result<()> {
    parse_with(df, column, &[format])
}

/// Parse a column trying the known formats in order; unparseable values
/// become null.
pub fn parse_date_column_flexible(df: &mut DataFrame, column: &str) -> Result<()> {
    parse_with(df, column, FLEX_DATE_FORMATS)
}
