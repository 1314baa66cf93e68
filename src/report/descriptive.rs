//! Descriptive statistics reports: summary statistics, grouped performance
//! breakdowns, IQR outliers and the cross-table correlation matrix.

use anyhow::Result;
use chrono::NaiveDate;
use polars::prelude::*;

use crate::pipeline::dates::parse_date_column_flexible;
use crate::pipeline::loader::{load_csv, save_csv};
use crate::pipeline::paths::{DataPaths, EMPLOYEE_CLEAN, RECRUITMENT_CLEAN, TRAINING_CLEAN};
use crate::pipeline::schema::{has_column, require_column};
use crate::report::enrich::{add_experience_band, add_experience_years, map_performance_score};
use crate::report::stats::{numeric_values, pearson, percentile, round2, SummaryStats};
use crate::utils::{print_info, print_warning};

pub const STATS_REPORT: &str = "03_performance_rating_stats.csv";
pub const GROUP_REPORT_PREFIX: &str = "03_perf_by_";
pub const OUTLIERS_REPORT: &str = "03_outliers_performance.csv";
pub const CORRELATION_REPORT: &str = "03_correlation_matrix.csv";

/// Multiplier applied to the IQR when deriving outlier bounds.
pub const IQR_OUTLIER_FACTOR: f64 = 1.5;

const RATING_COLUMNS: &[&str] = &["performance_score_num", "current_rating"];
const GROUP_COLUMNS: &[&str] = &["exp_group", "departmenttype", "gendercode"];
const CORRELATION_COLUMNS: &[&str] = &[
    "performance_score_num",
    "current_rating",
    "desired_salary",
    "training_duration_days",
];

/// Run the descriptive statistics stage over the cleaned tables. Returns the
/// written report file names with their row counts.
pub fn run_descriptive_statistics(
    paths: &DataPaths,
    today: NaiveDate,
) -> Result<Vec<(String, usize)>> {
    let mut outputs = Vec::new();

    let mut df_emp = load_csv(&paths.cleaned_file(EMPLOYEE_CLEAN))?;
    for column in ["startdate", "exitdate", "dob"] {
        require_column(&df_emp, "employee", column)?;
        parse_date_column_flexible(&mut df_emp, column)?;
    }

    let unmapped = map_performance_score(&mut df_emp)?;
    if !unmapped.is_empty() {
        print_warning(&format!(
            "performance_score values outside the ordinal scale: {:?}",
            unmapped
        ));
    }
    add_experience_years(&mut df_emp, today)?;

    paths.ensure_reports()?;

    // Summary statistics for the two rating columns.
    let mut stats_df = summary_stats_table(&df_emp)?;
    save_csv(&mut stats_df, &paths.report_file(STATS_REPORT))?;
    outputs.push((STATS_REPORT.to_string(), stats_df.height()));

    // Grouped breakdowns by experience band, department and gender.
    add_experience_band(&mut df_emp)?;
    for &group in GROUP_COLUMNS {
        if !has_column(&df_emp, group) {
            continue;
        }
        let mut grouped = group_performance(&df_emp, group)?;
        let name = format!("{}{}.csv", GROUP_REPORT_PREFIX, group);
        save_csv(&mut grouped, &paths.report_file(&name))?;
        outputs.push((name, grouped.height()));
    }

    // IQR-based outliers on the numeric performance score.
    let mut outliers = performance_outliers(&df_emp)?;
    save_csv(&mut outliers, &paths.report_file(OUTLIERS_REPORT))?;
    outputs.push((OUTLIERS_REPORT.to_string(), outliers.height()));

    // Correlation across the employee, recruitment and training tables.
    let df_rec = load_csv(&paths.cleaned_file(RECRUITMENT_CLEAN))?;
    let df_trn = load_csv(&paths.cleaned_file(TRAINING_CLEAN))?;
    let mut corr = correlation_matrix(&df_emp, &df_rec, df_trn)?;
    save_csv(&mut corr, &paths.report_file(CORRELATION_REPORT))?;
    outputs.push((CORRELATION_REPORT.to_string(), corr.height()));

    Ok(outputs)
}

fn summary_stats_table(df_emp: &DataFrame) -> Result<DataFrame> {
    let mut names = Vec::new();
    let mut counts = Vec::new();
    let mut means = Vec::new();
    let mut stds = Vec::new();
    let mut mins = Vec::new();
    let mut q25s = Vec::new();
    let mut q50s = Vec::new();
    let mut q75s = Vec::new();
    let mut maxs = Vec::new();
    let mut iqrs = Vec::new();

    for &column in RATING_COLUMNS {
        require_column(df_emp, "employee", column)?;
        let values = numeric_values(df_emp.column(column)?.as_materialized_series())?;
        let stats = SummaryStats::compute(&values);
        names.push(column.to_string());
        counts.push(stats.count as u32);
        means.push(stats.mean);
        stds.push(stats.std);
        mins.push(stats.min);
        q25s.push(stats.q25);
        q50s.push(stats.q50);
        q75s.push(stats.q75);
        maxs.push(stats.max);
        iqrs.push(stats.iqr());
    }

    Ok(df!(
        "column" => names,
        "count" => counts,
        "mean" => means,
        "std" => stds,
        "min" => mins,
        "25%" => q25s,
        "50%" => q50s,
        "75%" => q75s,
        "max" => maxs,
        "iqr" => iqrs,
    )?)
}

/// Mean/median/std/count of the numeric performance score per group value,
/// sorted descending by mean. Null group keys are excluded.
fn group_performance(df_emp: &DataFrame, group: &str) -> Result<DataFrame> {
    let grouped = df_emp
        .clone()
        .lazy()
        .filter(col(group).is_not_null())
        .group_by([col(group)])
        .agg([
            col("performance_score_num").mean().round(2).alias("mean"),
            col("performance_score_num").median().round(2).alias("median"),
            col("performance_score_num").std(1).round(2).alias("std"),
            col("performance_score_num").count().alias("count"),
        ])
        .sort(
            ["mean"],
            SortMultipleOptions::default().with_order_descending(true),
        )
        .collect()?;
    Ok(grouped)
}

fn performance_outliers(df_emp: &DataFrame) -> Result<DataFrame> {
    require_column(df_emp, "employee", "emp_id")?;
    let scores = numeric_values(
        df_emp
            .column("performance_score_num")?
            .as_materialized_series(),
    )?;

    let (lower, upper) = match (percentile(&scores, 0.25), percentile(&scores, 0.75)) {
        (Some(q1), Some(q3)) => {
            let iqr = q3 - q1;
            (
                q1 - IQR_OUTLIER_FACTOR * iqr,
                q3 + IQR_OUTLIER_FACTOR * iqr,
            )
        }
        // Empty population: nothing can be an outlier.
        _ => (f64::NEG_INFINITY, f64::INFINITY),
    };

    let outliers = df_emp
        .clone()
        .lazy()
        .filter(
            col("performance_score_num")
                .lt(lit(lower))
                .or(col("performance_score_num").gt(lit(upper))),
        )
        .select([
            col("emp_id"),
            col("performance_score"),
            col("performance_score_num"),
        ])
        .collect()?;

    print_info(&format!(
        "Outliers (<{:.1} or >{:.1}): {} row(s)",
        lower,
        upper,
        outliers.height()
    ));
    Ok(outliers)
}

/// Left-join recruitment and training data onto the employee rows and
/// compute the pairwise Pearson matrix over the four numeric columns.
fn correlation_matrix(
    df_emp: &DataFrame,
    df_rec: &DataFrame,
    mut df_trn: DataFrame,
) -> Result<DataFrame> {
    if has_column(&df_trn, "training_duration(days)") {
        df_trn.rename("training_duration(days)", "training_duration_days".into())?;
    }
    require_column(df_rec, "recruitment", "applicant_id")?;
    require_column(df_rec, "recruitment", "desired_salary")?;
    require_column(&df_trn, "training", "employee_id")?;
    require_column(&df_trn, "training", "training_duration_days")?;

    let joined = df_emp
        .clone()
        .lazy()
        .select([
            col("emp_id"),
            col("performance_score_num"),
            col("current_rating"),
        ])
        .join(
            df_rec
                .clone()
                .lazy()
                .select([col("applicant_id"), col("desired_salary")]),
            [col("emp_id")],
            [col("applicant_id")],
            JoinArgs::new(JoinType::Left),
        )
        .join(
            df_trn
                .lazy()
                .select([col("employee_id"), col("training_duration_days")]),
            [col("emp_id")],
            [col("employee_id")],
            JoinArgs::new(JoinType::Left),
        )
        .collect()?;

    let n = CORRELATION_COLUMNS.len();
    let mut labels = Vec::with_capacity(n);
    let mut matrix: Vec<Vec<Option<f64>>> = vec![Vec::with_capacity(n); n];

    for &row_col in CORRELATION_COLUMNS {
        labels.push(row_col.to_string());
        for (j, &col_col) in CORRELATION_COLUMNS.iter().enumerate() {
            let r = pearson(
                joined.column(row_col)?.as_materialized_series(),
                joined.column(col_col)?.as_materialized_series(),
            )?;
            matrix[j].push(r.map(round2));
        }
    }

    Ok(df!(
        "" => labels,
        "performance_score_num" => matrix[0].clone(),
        "current_rating" => matrix[1].clone(),
        "desired_salary" => matrix[2].clone(),
        "training_duration_days" => matrix[3].clone(),
    )?)
}
