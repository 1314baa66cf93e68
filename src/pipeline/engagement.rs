//! Engagement survey cleaning stage.
//!
//! The input is located by name pattern rather than a fixed file name, since
//! survey exports arrive with varying prefixes. The three score columns are
//! mean-imputed independently.

use anyhow::Result;
use polars::prelude::*;

use crate::pipeline::dates::{parse_date_column, DMY_NUMERIC};
use crate::pipeline::impute::fill_with_mean;
use crate::pipeline::loader::{
    display_null_counts, display_table_stats, find_raw_csv, load_csv, save_csv,
};
use crate::pipeline::paths::{DataPaths, ENGAGEMENT_CLEAN};
use crate::pipeline::schema::{normalize_columns, require_column};
use crate::utils::print_info;

/// File-name fragments that identify the engagement survey export.
const ENGAGEMENT_PATTERN: &[&str] = &["engagement", "survey"];

const SCORE_COLUMNS: &[&str] = &[
    "engagement_score",
    "satisfaction_score",
    "work_life_balance_score",
];

/// Clean the engagement survey table and persist it for the reporting stages.
pub fn clean_engagement(paths: &DataPaths) -> Result<DataFrame> {
    let input = find_raw_csv(&paths.raw, ENGAGEMENT_PATTERN)?;
    print_info(&format!("Using engagement survey file: {}", input.display()));
    let mut df = load_csv(&input)?;

    normalize_columns(&mut df)?;

    require_column(&df, "engagement", "survey_date")?;
    parse_date_column(&mut df, "survey_date", DMY_NUMERIC)?;

    display_null_counts(&df, "before imputation");
    for column in SCORE_COLUMNS {
        require_column(&df, "engagement", column)?;
        fill_with_mean(&mut df, column)?;
    }
    display_null_counts(&df, "after imputation");

    display_table_stats(&df, "engagement survey (cleaned)");

    paths.ensure_cleaned()?;
    save_csv(&mut df, &paths.cleaned_file(ENGAGEMENT_CLEAN))?;
    Ok(df)
}
