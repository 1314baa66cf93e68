//! Performance insight reports: high/low performer segment profiles and the
//! high-performer distribution breakdowns.

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::Serialize;

use crate::pipeline::dates::parse_date_column_flexible;
use crate::pipeline::error::StageError;
use crate::pipeline::loader::{load_csv, save_csv};
use crate::pipeline::paths::{
    DataPaths, EMPLOYEE_CLEAN, ENGAGEMENT_CLEAN, RECRUITMENT_CLEAN, TRAINING_CLEAN,
};
use crate::pipeline::schema::{has_column, require_column};
use crate::report::enrich::{
    add_experience_years, map_performance_score, HIGH_PERFORMER_MIN, LOW_PERFORMER_MAX,
};
use crate::report::stats::{mean, numeric_values, round1, round2};

pub const PROFILES_REPORT: &str = "04_performance_profiles.csv";
pub const PROFILES_JSON: &str = "04_performance_profiles.json";
pub const DEPT_DISTRIBUTION_REPORT: &str = "04_high_perf_dept_distribution.csv";
pub const GENDER_DISTRIBUTION_REPORT: &str = "04_high_perf_gender_distribution.csv";

const TOP_DEPARTMENTS: usize = 3;

/// Aggregated profile of one performer segment.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentProfile {
    pub segment: String,
    pub count: usize,
    pub mean_experience_years: Option<f64>,
    pub female_ratio: Option<f64>,
    pub mean_current_rating: Option<f64>,
    pub mean_engagement_score: Option<f64>,
    pub mean_desired_salary: Option<f64>,
    pub mean_training_days: Option<f64>,
    pub top_3_departments: Vec<String>,
}

#[derive(Serialize)]
struct ProfilesExport {
    metadata: ExportMetadata,
    profiles: Vec<SegmentProfile>,
}

#[derive(Serialize)]
struct ExportMetadata {
    /// Timestamp of the report run (ISO 8601 format)
    timestamp: String,
    hrprep_version: String,
    high_performer_min: i64,
    low_performer_max: i64,
}

/// Run the performance insight stage over the cleaned tables. Returns the
/// written report file names with their row counts.
pub fn run_performance_insights(
    paths: &DataPaths,
    today: NaiveDate,
) -> Result<Vec<(String, usize)>> {
    let mut outputs = Vec::new();

    let mut df_emp = load_csv(&paths.cleaned_file(EMPLOYEE_CLEAN))?;
    for column in ["startdate", "exitdate"] {
        require_column(&df_emp, "employee", column)?;
        parse_date_column_flexible(&mut df_emp, column)?;
    }

    let mut df_eng = load_csv(&paths.cleaned_file(ENGAGEMENT_CLEAN))?;
    if has_column(&df_eng, "survey_date") {
        parse_date_column_flexible(&mut df_eng, "survey_date")?;
    }

    let df_rec = load_csv(&paths.cleaned_file(RECRUITMENT_CLEAN))?;

    let mut df_trn = load_csv(&paths.cleaned_file(TRAINING_CLEAN))?;
    if has_column(&df_trn, "training_date") {
        parse_date_column_flexible(&mut df_trn, "training_date")?;
    }

    // Any column containing "training_duration" qualifies; its absence means
    // the training table cannot support the profile computation at all.
    let duration_col = df_trn
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .find(|name| name.contains("training_duration"))
        .ok_or_else(|| StageError::MissingColumn {
            column: "training_duration".to_string(),
            table: "training".to_string(),
        })?;
    if duration_col != "training_duration_days" {
        df_trn.rename(&duration_col, "training_duration_days".into())?;
    }

    map_performance_score(&mut df_emp)?;
    add_experience_years(&mut df_emp, today)?;

    for column in ["emp_id", "current_rating", "gendercode", "departmenttype"] {
        require_column(&df_emp, "employee", column)?;
    }
    require_column(&df_eng, "engagement", "employee_id")?;
    require_column(&df_eng, "engagement", "engagement_score")?;
    require_column(&df_rec, "recruitment", "applicant_id")?;
    require_column(&df_rec, "recruitment", "desired_salary")?;
    require_column(&df_trn, "training", "employee_id")?;

    // Per-employee means, independent of segment membership.
    let eng_avg = df_eng
        .clone()
        .lazy()
        .group_by([col("employee_id")])
        .agg([col("engagement_score").mean().alias("avg_engagement")])
        .collect()?;
    let rec_avg = df_rec
        .clone()
        .lazy()
        .group_by([col("applicant_id")])
        .agg([col("desired_salary").mean().alias("avg_desired_salary")])
        .collect()?;
    let trn_avg = df_trn
        .clone()
        .lazy()
        .group_by([col("employee_id")])
        .agg([col("training_duration_days").mean().alias("avg_training_days")])
        .collect()?;

    let high = segment_rows(&df_emp, col("performance_score_num").gt_eq(lit(HIGH_PERFORMER_MIN)))?;
    let low = segment_rows(&df_emp, col("performance_score_num").lt_eq(lit(LOW_PERFORMER_MAX)))?;

    let profiles = vec![
        profile_segment(
            &high,
            &format!("High Performance (>={})", HIGH_PERFORMER_MIN),
            &eng_avg,
            &rec_avg,
            &trn_avg,
        )?,
        profile_segment(
            &low,
            &format!("Low Performance (<={})", LOW_PERFORMER_MAX),
            &eng_avg,
            &rec_avg,
            &trn_avg,
        )?,
    ];

    paths.ensure_reports()?;

    let mut profiles_df = profiles_table(&profiles)?;
    save_csv(&mut profiles_df, &paths.report_file(PROFILES_REPORT))?;
    outputs.push((PROFILES_REPORT.to_string(), profiles_df.height()));

    export_profiles_json(&profiles, &paths.report_file(PROFILES_JSON))?;
    outputs.push((PROFILES_JSON.to_string(), profiles.len()));

    // Distribution breakdowns for the high-performance segment only.
    let mut dept_dist = pct_distribution(&high, "departmenttype")?;
    save_csv(&mut dept_dist, &paths.report_file(DEPT_DISTRIBUTION_REPORT))?;
    outputs.push((DEPT_DISTRIBUTION_REPORT.to_string(), dept_dist.height()));

    let mut gender_dist = pct_distribution(&high, "gendercode")?;
    save_csv(&mut gender_dist, &paths.report_file(GENDER_DISTRIBUTION_REPORT))?;
    outputs.push((GENDER_DISTRIBUTION_REPORT.to_string(), gender_dist.height()));

    Ok(outputs)
}

fn segment_rows(df_emp: &DataFrame, predicate: Expr) -> Result<DataFrame> {
    Ok(df_emp.clone().lazy().filter(predicate).collect()?)
}

/// Join the per-employee means onto the segment rows and aggregate the
/// profile fields.
fn profile_segment(
    segment: &DataFrame,
    label: &str,
    eng_avg: &DataFrame,
    rec_avg: &DataFrame,
    trn_avg: &DataFrame,
) -> Result<SegmentProfile> {
    let joined = segment
        .clone()
        .lazy()
        .join(
            eng_avg.clone().lazy(),
            [col("emp_id")],
            [col("employee_id")],
            JoinArgs::new(JoinType::Left),
        )
        .join(
            rec_avg.clone().lazy(),
            [col("emp_id")],
            [col("applicant_id")],
            JoinArgs::new(JoinType::Left),
        )
        .join(
            trn_avg.clone().lazy(),
            [col("emp_id")],
            [col("employee_id")],
            JoinArgs::new(JoinType::Left),
        )
        .collect()?;

    let count = joined.height();

    let strings = joined
        .column("gendercode")?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let female = strings
        .str()?
        .iter()
        .filter(|value| *value == Some("Female"))
        .count();
    let female_ratio = if count > 0 {
        Some(round2(female as f64 / count as f64))
    } else {
        None
    };

    Ok(SegmentProfile {
        segment: label.to_string(),
        count,
        mean_experience_years: column_mean(&joined, "experience_years")?,
        female_ratio,
        mean_current_rating: column_mean(&joined, "current_rating")?,
        mean_engagement_score: column_mean(&joined, "avg_engagement")?,
        mean_desired_salary: column_mean(&joined, "avg_desired_salary")?,
        mean_training_days: column_mean(&joined, "avg_training_days")?,
        top_3_departments: top_values(&joined, "departmenttype", TOP_DEPARTMENTS)?,
    })
}

fn column_mean(df: &DataFrame, column: &str) -> Result<Option<f64>> {
    let values = numeric_values(df.column(column)?.as_materialized_series())?;
    Ok(mean(&values).map(round2))
}

/// Most frequent values of a text column; ties keep first-appearance order.
fn top_values(df: &DataFrame, column: &str, n: usize) -> Result<Vec<String>> {
    let pairs = frequency_table(df, column)?;
    Ok(pairs.into_iter().take(n).map(|(value, _)| value).collect())
}

fn frequency_table(df: &DataFrame, column: &str) -> Result<Vec<(String, usize)>> {
    let strings = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let ca = strings.str()?;

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in ca.iter().flatten() {
        if !counts.contains_key(value) {
            order.push(value.to_string());
        }
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }

    let mut pairs: Vec<(String, usize)> = order
        .into_iter()
        .map(|value| {
            let count = counts[&value];
            (value, count)
        })
        .collect();
    // Stable sort keeps first-appearance order within equal counts.
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(pairs)
}

/// Percentage distribution (1 decimal) over a column's non-null values.
fn pct_distribution(df: &DataFrame, column: &str) -> Result<DataFrame> {
    let pairs = frequency_table(df, column)?;
    let total: usize = pairs.iter().map(|(_, count)| count).sum();

    let mut values = Vec::with_capacity(pairs.len());
    let mut pcts = Vec::with_capacity(pairs.len());
    for (value, count) in pairs {
        values.push(value);
        pcts.push(round1(count as f64 / total as f64 * 100.0));
    }

    Ok(df!(
        column => values,
        "pct" => pcts,
    )?)
}

fn profiles_table(profiles: &[SegmentProfile]) -> Result<DataFrame> {
    let segments: Vec<String> = profiles.iter().map(|p| p.segment.clone()).collect();
    let counts: Vec<u32> = profiles.iter().map(|p| p.count as u32).collect();
    let experience: Vec<Option<f64>> =
        profiles.iter().map(|p| p.mean_experience_years).collect();
    let female: Vec<Option<f64>> = profiles.iter().map(|p| p.female_ratio).collect();
    let rating: Vec<Option<f64>> = profiles.iter().map(|p| p.mean_current_rating).collect();
    let engagement: Vec<Option<f64>> =
        profiles.iter().map(|p| p.mean_engagement_score).collect();
    let salary: Vec<Option<f64>> = profiles.iter().map(|p| p.mean_desired_salary).collect();
    let training: Vec<Option<f64>> = profiles.iter().map(|p| p.mean_training_days).collect();
    let departments: Vec<String> = profiles
        .iter()
        .map(|p| p.top_3_departments.join(", "))
        .collect();

    Ok(df!(
        "segment" => segments,
        "count" => counts,
        "mean_experience_years" => experience,
        "female_ratio" => female,
        "mean_current_rating" => rating,
        "mean_engagement_score" => engagement,
        "mean_desired_salary" => salary,
        "mean_training_days" => training,
        "top_3_departments" => departments,
    )?)
}

fn export_profiles_json(profiles: &[SegmentProfile], path: &std::path::Path) -> Result<()> {
    let export = ProfilesExport {
        metadata: ExportMetadata {
            timestamp: chrono::Utc::now().to_rfc3339(),
            hrprep_version: env!("CARGO_PKG_VERSION").to_string(),
            high_performer_min: HIGH_PERFORMER_MIN,
            low_performer_max: LOW_PERFORMER_MAX,
        },
        profiles: profiles.to_vec(),
    };

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize segment profiles to JSON")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write segment profiles to {}", path.display()))?;
    Ok(())
}
