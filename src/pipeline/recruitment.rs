//! Recruitment table cleaning stage.

use anyhow::Result;
use polars::prelude::*;

use crate::pipeline::dates::parse_date_column_flexible;
use crate::pipeline::impute::{fill_with_literal, fill_with_mean};
use crate::pipeline::loader::{display_null_counts, display_table_stats, load_csv, save_csv};
use crate::pipeline::paths::{DataPaths, RECRUITMENT_CLEAN, RECRUITMENT_RAW};
use crate::pipeline::schema::{has_column, normalize_columns};

const RECRUITMENT_DATE_COLUMNS: &[&str] = &["application_date", "date_of_birth"];

/// Clean the raw recruitment table and persist it for the reporting stages.
pub fn clean_recruitment(paths: &DataPaths) -> Result<DataFrame> {
    let input = paths.raw_file(RECRUITMENT_RAW);
    let mut df = load_csv(&input)?;

    normalize_columns(&mut df)?;

    // Application dates come from several source systems; parse permissively.
    for column in RECRUITMENT_DATE_COLUMNS {
        if has_column(&df, column) {
            parse_date_column_flexible(&mut df, column)?;
        }
    }

    display_null_counts(&df, "before imputation");
    if has_column(&df, "desired_salary") {
        fill_with_mean(&mut df, "desired_salary")?;
    }
    if has_column(&df, "status") {
        fill_with_literal(&mut df, "status", "Unknown")?;
    }
    display_null_counts(&df, "after imputation");

    display_table_stats(&df, "recruitment (cleaned)");

    paths.ensure_cleaned()?;
    save_csv(&mut df, &paths.cleaned_file(RECRUITMENT_CLEAN))?;
    Ok(df)
}
