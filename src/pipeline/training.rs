//! Training and development table cleaning stage.

use anyhow::Result;
use polars::prelude::*;

use crate::pipeline::dates::parse_date_column_flexible;
use crate::pipeline::impute::{fill_with_literal, fill_with_median};
use crate::pipeline::loader::{display_null_counts, display_table_stats, load_csv, save_csv};
use crate::pipeline::paths::{DataPaths, TRAINING_CLEAN, TRAINING_RAW};
use crate::pipeline::schema::{has_column, normalize_columns};

/// Duration column as it appears after header normalization; the raw export
/// spells it `Training Duration(Days)`.
const DURATION_COLUMN: &str = "training_duration(days)";

/// Clean the raw training table and persist it for the reporting stages.
pub fn clean_training(paths: &DataPaths) -> Result<DataFrame> {
    let input = paths.raw_file(TRAINING_RAW);
    let mut df = load_csv(&input)?;

    normalize_columns(&mut df)?;

    if has_column(&df, "training_date") {
        parse_date_column_flexible(&mut df, "training_date")?;
    }

    display_null_counts(&df, "before imputation");
    if has_column(&df, "training_outcome") {
        fill_with_literal(&mut df, "training_outcome", "Unknown")?;
    }
    if has_column(&df, DURATION_COLUMN) {
        fill_with_median(&mut df, DURATION_COLUMN)?;
    }
    display_null_counts(&df, "after imputation");

    display_table_stats(&df, "training and development (cleaned)");

    paths.ensure_cleaned()?;
    save_csv(&mut df, &paths.cleaned_file(TRAINING_CLEAN))?;
    Ok(df)
}
