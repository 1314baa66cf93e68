//! Integration tests for the four cleaning stages

use hrprep::pipeline::{
    clean_employee, clean_engagement, clean_recruitment, clean_training, DataPaths,
    EMPLOYEE_CLEAN, ENGAGEMENT_CLEAN, RECRUITMENT_CLEAN, TRAINING_CLEAN,
};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_clean_employee_normalizes_and_derives() {
    let (_temp_dir, root) = project_root();
    seed_all_raw(&root);
    let paths = DataPaths::new(&root);

    let df = clean_employee(&paths).unwrap();

    assert_has_columns(
        &df,
        &[
            "emp_id",
            "startdate",
            "exitdate",
            "dob",
            "is_active",
            "performance_score",
            "current_rating",
            "locationcode",
            "departmenttype",
            "gendercode",
        ],
    );
    assert_missing_columns(&df, &["ad_email", "terminationtype"]);

    assert_eq!(df.column("current_rating").unwrap().dtype(), &DataType::Int64);
    assert_eq!(df.column("locationcode").unwrap().dtype(), &DataType::String);
    assert_eq!(df.column("startdate").unwrap().dtype(), &DataType::Date);
}

#[test]
fn test_clean_employee_is_active_iff_exit_date_null() {
    let (_temp_dir, root) = project_root();
    seed_all_raw(&root);
    let paths = DataPaths::new(&root);

    let df = clean_employee(&paths).unwrap();

    let exit_nulls: Vec<bool> = df
        .column("exitdate")
        .unwrap()
        .as_materialized_series()
        .is_null()
        .iter()
        .map(|v| v.unwrap())
        .collect();
    let active: Vec<bool> = df
        .column("is_active")
        .unwrap()
        .bool()
        .unwrap()
        .iter()
        .map(|v| v.unwrap())
        .collect();

    assert_eq!(exit_nulls, active);
    // Employee 2 exited; employee 5's exit date was unparseable and is
    // therefore null, which counts as active
    assert_eq!(active, vec![true, false, true, true, true]);
}

#[test]
fn test_clean_employee_fills_termination_description() {
    let (_temp_dir, root) = project_root();
    seed_all_raw(&root);
    let paths = DataPaths::new(&root);

    let df = clean_employee(&paths).unwrap();

    let desc = df.column("terminationdescription").unwrap();
    assert_eq!(desc.null_count(), 0);
    assert_eq!(desc.str().unwrap().get(0), Some("Active"));
    assert_eq!(desc.str().unwrap().get(1), Some("Resignation"));
}

#[test]
fn test_clean_employee_missing_file() {
    let (_temp_dir, root) = project_root();
    let paths = DataPaths::new(&root);

    let err = clean_employee(&paths).unwrap_err();
    assert!(
        err.to_string().contains("not found"),
        "unexpected error: {}",
        err
    );
}

#[test]
fn test_clean_engagement_locates_file_by_pattern() {
    let (_temp_dir, root) = project_root();
    seed_all_raw(&root);
    // A decoy that matches only one of the two fragments
    write_raw(&root, "salary_survey_2022.csv", "a,b\n1,2\n");
    let paths = DataPaths::new(&root);

    let df = clean_engagement(&paths).unwrap();

    assert_eq!(df.height(), 5);
    assert_has_columns(
        &df,
        &[
            "employee_id",
            "survey_date",
            "engagement_score",
            "satisfaction_score",
            "work_life_balance_score",
        ],
    );
}

#[test]
fn test_clean_engagement_no_matching_file() {
    let (_temp_dir, root) = project_root();
    write_raw(&root, "salary_survey_2022.csv", "a,b\n1,2\n");
    let paths = DataPaths::new(&root);

    let err = clean_engagement(&paths).unwrap_err();
    assert!(
        err.to_string().contains("no CSV matching"),
        "unexpected error: {}",
        err
    );
}

#[test]
fn test_clean_engagement_mean_imputes_each_score_column() {
    let (_temp_dir, root) = project_root();
    seed_all_raw(&root);
    let paths = DataPaths::new(&root);

    let df = clean_engagement(&paths).unwrap();

    for column in [
        "engagement_score",
        "satisfaction_score",
        "work_life_balance_score",
    ] {
        assert_eq!(
            df.column(column).unwrap().null_count(),
            0,
            "{} still has nulls",
            column
        );
    }

    // engagement_score null was filled with the mean of the other four values
    let expected = (4.5 + 3.5 + 2.5 + 4.0) / 4.0;
    let got = df.column("engagement_score").unwrap().f64().unwrap().get(1);
    assert_eq!(got, Some(expected));
}

#[test]
fn test_clean_recruitment_imputes_salary_and_status() {
    let (_temp_dir, root) = project_root();
    seed_all_raw(&root);
    let paths = DataPaths::new(&root);

    let df = clean_recruitment(&paths).unwrap();

    assert_eq!(df.column("desired_salary").unwrap().null_count(), 0);
    assert_eq!(df.column("status").unwrap().null_count(), 0);

    let expected = (55000.0 + 62000.0 + 58000.0) / 3.0;
    let got = df.column("desired_salary").unwrap().f64().unwrap().get(1).unwrap();
    assert!((got - expected).abs() < 1e-6, "got {}", got);

    assert_eq!(df.column("status").unwrap().str().unwrap().get(2), Some("Unknown"));
}

#[test]
fn test_clean_training_imputes_duration_and_outcome() {
    let (_temp_dir, root) = project_root();
    seed_all_raw(&root);
    let paths = DataPaths::new(&root);

    let df = clean_training(&paths).unwrap();

    let duration = df.column("training_duration(days)").unwrap();
    assert_eq!(duration.null_count(), 0);
    // Median of [3, 5, 4, 2]
    assert_eq!(duration.f64().unwrap().get(1), Some(3.5));

    let outcome = df.column("training_outcome").unwrap();
    assert_eq!(outcome.null_count(), 0);
    assert_eq!(outcome.str().unwrap().get(2), Some("Unknown"));
}

#[test]
fn test_clean_training_missing_file() {
    let (_temp_dir, root) = project_root();
    let paths = DataPaths::new(&root);

    let err = clean_training(&paths).unwrap_err();
    assert!(
        err.to_string().contains("not found"),
        "unexpected error: {}",
        err
    );
}

#[test]
fn test_cleaned_tables_round_trip() {
    let (_temp_dir, root) = project_root();
    seed_all_raw(&root);
    let paths = DataPaths::new(&root);

    let written = [
        (clean_employee(&paths).unwrap(), EMPLOYEE_CLEAN),
        (clean_engagement(&paths).unwrap(), ENGAGEMENT_CLEAN),
        (clean_recruitment(&paths).unwrap(), RECRUITMENT_CLEAN),
        (clean_training(&paths).unwrap(), TRAINING_CLEAN),
    ];

    for (df, name) in &written {
        let reread = read_csv(&paths.cleaned_file(name));
        assert_eq!(reread.height(), df.height(), "{} row count changed", name);
        assert_eq!(
            reread.get_column_names(),
            df.get_column_names(),
            "{} column set changed",
            name
        );
    }
}
