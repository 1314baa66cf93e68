//! Null imputation: column mean, column median, or a fixed literal.
//!
//! Statistics are always computed over the column's non-null values before
//! any filling happens, independently per column.

use anyhow::Result;
use polars::prelude::*;

/// Fill nulls with the column's arithmetic mean. Returns the imputed value,
/// or `None` when the column had no nulls or no non-null values to average.
pub fn fill_with_mean(df: &mut DataFrame, column: &str) -> Result<Option<f64>> {
    fill_numeric(df, column, |values| {
        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        }
    })
}

/// Fill nulls with the column's median (average of the two middle values for
/// even counts). Returns the imputed value, or `None` when nothing was
/// filled.
pub fn fill_with_median(df: &mut DataFrame, column: &str) -> Result<Option<f64>> {
    fill_numeric(df, column, |values| {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            Some((sorted[mid - 1] + sorted[mid]) / 2.0)
        } else {
            Some(sorted[mid])
        }
    })
}

/// Fill nulls in a text column with a fixed literal.
pub fn fill_with_literal(df: &mut DataFrame, column: &str, value: &str) -> Result<()> {
    let strings = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let ca = strings.str()?;
    if ca.null_count() == 0 {
        return Ok(());
    }
    let filled: StringChunked = ca.iter().map(|opt| opt.or(Some(value))).collect();
    df.with_column(filled.with_name(column.into()).into_series())?;
    Ok(())
}

fn fill_numeric(
    df: &mut DataFrame,
    column: &str,
    stat: impl Fn(&[f64]) -> Option<f64>,
) -> Result<Option<f64>> {
    let series = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let ca = series.f64()?;
    if ca.null_count() == 0 {
        return Ok(None);
    }
    let values: Vec<f64> = ca.iter().flatten().collect();
    let Some(fill) = stat(&values) else {
        // All-null column: nothing to derive a statistic from, leave as is.
        return Ok(None);
    };
    let filled: Float64Chunked = ca.iter().map(|opt| opt.or(Some(fill))).collect();
    df.with_column(filled.with_name(column.into()).into_series())?;
    Ok(Some(fill))
}
