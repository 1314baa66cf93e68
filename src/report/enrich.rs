//! Enrichment shared by both reporters: the ordinal performance scale,
//! tenure in years and experience bands.
//!
//! The scale and segment thresholds are business-rule constants. They are
//! kept here as named tables rather than inline literals so a future rating
//! scale only touches this module.

use anyhow::Result;
use chrono::NaiveDate;
use polars::prelude::*;

use crate::pipeline::dates::date_to_days;
use crate::pipeline::schema::require_column;
use crate::report::stats::round2;

/// Ordinal mapping of the categorical performance score.
pub const PERFORMANCE_SCALE: &[(&str, i64)] = &[
    ("PIP", 1),
    ("Needs Improvement", 2),
    ("Fully Meets", 3),
    ("Exceeds", 4),
    ("Outstanding", 5),
];

/// Lower bound (inclusive) of the high-performer segment.
pub const HIGH_PERFORMER_MIN: i64 = 4;
/// Upper bound (inclusive) of the low-performer segment.
pub const LOW_PERFORMER_MAX: i64 = 2;

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Experience bands: inclusive upper edges with their labels, then the open
/// band above the last edge.
pub const EXPERIENCE_BANDS: &[(f64, &str)] = &[(2.0, "0-2"), (5.0, "3-5"), (10.0, "6-10")];
pub const EXPERIENCE_BAND_OPEN: &str = ">10";

/// Map `performance_score` onto `performance_score_num` via the ordinal
/// scale. Values outside the scale become null; the distinct offending
/// values are returned for reporting.
pub fn map_performance_score(df: &mut DataFrame) -> Result<Vec<String>> {
    require_column(df, "employee", "performance_score")?;
    let strings = df
        .column("performance_score")?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let ca = strings.str()?;

    let mut unmapped: Vec<String> = Vec::new();
    let mapped: Int64Chunked = ca
        .iter()
        .map(|opt| {
            opt.and_then(|value| {
                match PERFORMANCE_SCALE.iter().find(|(name, _)| *name == value) {
                    Some((_, score)) => Some(*score),
                    None => {
                        if !unmapped.iter().any(|u| u == value) {
                            unmapped.push(value.to_string());
                        }
                        None
                    }
                }
            })
        })
        .collect();

    df.with_column(
        mapped
            .with_name("performance_score_num".into())
            .into_series(),
    )?;
    Ok(unmapped)
}

/// Derive `experience_years`: exit date (or `today` for active employees)
/// minus start date, in days over 365, rounded to 2 decimals.
pub fn add_experience_years(df: &mut DataFrame, today: NaiveDate) -> Result<()> {
    require_column(df, "employee", "startdate")?;
    require_column(df, "employee", "exitdate")?;

    let start = df
        .column("startdate")?
        .as_materialized_series()
        .cast(&DataType::Int32)?;
    let exit = df
        .column("exitdate")?
        .as_materialized_series()
        .cast(&DataType::Int32)?;
    let start = start.i32()?;
    let exit = exit.i32()?;
    let today_days = date_to_days(today);

    let years: Float64Chunked = start
        .iter()
        .zip(exit.iter())
        .map(|(start, exit)| {
            start.map(|start| {
                let end = exit.unwrap_or(today_days);
                round2(f64::from(end - start) / DAYS_PER_YEAR)
            })
        })
        .collect();

    df.with_column(years.with_name("experience_years".into()).into_series())?;
    Ok(())
}

/// Band label for a tenure value; negative tenure falls outside every band.
pub fn experience_band(years: f64) -> Option<&'static str> {
    if years < 0.0 {
        return None;
    }
    for (upper, label) in EXPERIENCE_BANDS {
        if years <= *upper {
            return Some(label);
        }
    }
    Some(EXPERIENCE_BAND_OPEN)
}

/// Derive the `exp_group` column from `experience_years`.
pub fn add_experience_band(df: &mut DataFrame) -> Result<()> {
    require_column(df, "employee", "experience_years")?;
    let years = df
        .column("experience_years")?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let ca = years.f64()?;
    let bands: StringChunked = ca.iter().map(|opt| opt.and_then(experience_band)).collect();
    df.with_column(bands.with_name("exp_group".into()).into_series())?;
    Ok(())
}
