//! Employee table cleaning stage.
//!
//! Normalizes headers, parses the three date columns, derives the
//! active-employee flag, coerces types and drops columns excluded from
//! downstream use.

use anyhow::{Context, Result};
use polars::prelude::*;

use crate::pipeline::dates::{parse_date_column, DMY_ABBREV};
use crate::pipeline::impute::fill_with_literal;
use crate::pipeline::loader::{display_table_stats, load_csv, save_csv};
use crate::pipeline::paths::{DataPaths, EMPLOYEE_CLEAN, EMPLOYEE_RAW};
use crate::pipeline::schema::{has_column, normalize_columns, rename_aliases, require_column};

/// Raw header aliases fixed up after snake_case normalization.
const EMPLOYEE_ALIASES: &[(&str, &str)] = &[
    ("empid", "emp_id"),
    ("ade_mail", "ad_email"),
    ("current_employee_rating", "current_rating"),
];

/// Columns excluded from downstream use (PII-adjacent or redundant).
const EMPLOYEE_DROPS: &[&str] = &["ad_email", "terminationtype"];

const EMPLOYEE_DATE_COLUMNS: &[&str] = &["startdate", "exitdate", "dob"];

/// Clean the raw employee table and persist it for the reporting stages.
pub fn clean_employee(paths: &DataPaths) -> Result<DataFrame> {
    let input = paths.raw_file(EMPLOYEE_RAW);
    let mut df = load_csv(&input)?;

    normalize_columns(&mut df)?;
    rename_aliases(&mut df, EMPLOYEE_ALIASES)?;

    for column in EMPLOYEE_DATE_COLUMNS {
        require_column(&df, "employee", column)?;
        parse_date_column(&mut df, column, DMY_ABBREV)?;
    }

    // Active employees are exactly those without an exit date.
    let is_active = df
        .column("exitdate")?
        .as_materialized_series()
        .is_null()
        .with_name("is_active".into());
    df.with_column(is_active.into_series())?;

    if has_column(&df, "terminationdescription") {
        fill_with_literal(&mut df, "terminationdescription", "Active")?;
    }

    require_column(&df, "employee", "locationcode")?;
    let location = df
        .column("locationcode")?
        .as_materialized_series()
        .cast(&DataType::String)?;
    df.with_column(location)?;

    // Ratings are assumed clean; a non-numeric value here is a fatal error,
    // not something to silently null out.
    require_column(&df, "employee", "current_rating")?;
    let rating = df
        .column("current_rating")?
        .as_materialized_series()
        .strict_cast(&DataType::Int64)
        .context("current_rating contains non-numeric values")?;
    df.with_column(rating)?;

    let drops: Vec<&str> = EMPLOYEE_DROPS
        .iter()
        .copied()
        .filter(|column| has_column(&df, column))
        .collect();
    if !drops.is_empty() {
        df = df.drop_many(drops);
    }

    display_table_stats(&df, "employee (cleaned)");

    paths.ensure_cleaned()?;
    save_csv(&mut df, &paths.cleaned_file(EMPLOYEE_CLEAN))?;
    Ok(df)
}
