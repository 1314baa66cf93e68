//! Column-name normalization and alias handling.
//!
//! Every raw header is reduced to a canonical lowercase-underscore form
//! before any other processing, so the rest of the pipeline can address
//! columns by stable names regardless of how the source system spelled them.

use anyhow::Result;
use polars::prelude::*;

use crate::pipeline::error::StageError;

/// Canonicalize a single header: trim, lowercase, and replace spaces,
/// hyphens and slashes with underscores. Other characters (e.g. parentheses
/// in `training_duration(days)`) pass through unchanged.
pub fn normalize_header(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-', '/'], "_")
}

/// Normalize every column name of the frame in place.
pub fn normalize_columns(df: &mut DataFrame) -> Result<()> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| normalize_header(name.as_str()))
        .collect();
    df.set_column_names(names)?;
    Ok(())
}

/// Apply fixed renames for known aliases. Aliases that are absent are
/// skipped; the frame is only touched where a source column exists.
pub fn rename_aliases(df: &mut DataFrame, aliases: &[(&str, &str)]) -> Result<()> {
    for (from, to) in aliases {
        if has_column(df, from) {
            df.rename(from, (*to).into())?;
        }
    }
    Ok(())
}

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Fail with a missing-column error when a mandatory column is absent.
pub fn require_column(df: &DataFrame, table: &str, column: &str) -> Result<()> {
    if has_column(df, column) {
        Ok(())
    } else {
        Err(StageError::MissingColumn {
            column: column.to_string(),
            table: table.to_string(),
        }
        .into())
    }
}
