//! Integration tests for the performance insight stage

use chrono::NaiveDate;
use hrprep::pipeline::{
    clean_employee, clean_engagement, clean_recruitment, clean_training, DataPaths,
};
use hrprep::report::run_performance_insights;
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn cleaned_project() -> (tempfile::TempDir, DataPaths) {
    let (temp_dir, root) = project_root();
    seed_all_raw(&root);
    let paths = DataPaths::new(&root);
    clean_employee(&paths).unwrap();
    clean_engagement(&paths).unwrap();
    clean_recruitment(&paths).unwrap();
    clean_training(&paths).unwrap();
    (temp_dir, paths)
}

#[test]
fn test_stage_writes_all_reports() {
    let (_temp_dir, paths) = cleaned_project();

    let outputs = run_performance_insights(&paths, fixed_today()).unwrap();

    let names: Vec<&str> = outputs.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "04_performance_profiles.csv",
            "04_performance_profiles.json",
            "04_high_perf_dept_distribution.csv",
            "04_high_perf_gender_distribution.csv",
        ]
    );
    for (name, _) in &outputs {
        assert!(paths.report_file(name).exists(), "{} was not written", name);
    }
}

#[test]
fn test_segment_profiles() {
    let (_temp_dir, paths) = cleaned_project();
    run_performance_insights(&paths, fixed_today()).unwrap();

    let profiles = read_csv(&paths.report_file("04_performance_profiles.csv"));
    assert_eq!(profiles.height(), 2);

    let segments: Vec<&str> = profiles
        .column("segment")
        .unwrap()
        .str()
        .unwrap()
        .iter()
        .map(|v| v.unwrap())
        .collect();
    assert_eq!(
        segments,
        vec!["High Performance (>=4)", "Low Performance (<=2)"]
    );

    // High performers: Outstanding (emp 1) and Exceeds (emp 5), both female
    let counts: Vec<i64> = profiles
        .column("count")
        .unwrap()
        .i64()
        .unwrap()
        .iter()
        .map(|v| v.unwrap())
        .collect();
    assert_eq!(counts, vec![2, 1]);

    let female = profiles.column("female_ratio").unwrap().f64().unwrap();
    assert_eq!(female.get(0), Some(1.0));
    assert_eq!(female.get(1), Some(1.0));

    // Employee 1 started 2020-01-01 (4.0 years to the fixed today); employee
    // 5 started 2018-10-10 (5.23 years)
    let exp = profiles
        .column("mean_experience_years")
        .unwrap()
        .f64()
        .unwrap()
        .get(0)
        .unwrap();
    assert!((exp - 4.615).abs() < 0.01, "got {}", exp);

    // Only employee 1 has engagement rows: (4.5 + 2.5) / 2
    assert_eq!(
        profiles.column("mean_engagement_score").unwrap().f64().unwrap().get(0),
        Some(3.5)
    );
    // Only employee 1 has training rows: (3 + 4) / 2
    assert_eq!(
        profiles.column("mean_training_days").unwrap().f64().unwrap().get(0),
        Some(3.5)
    );
    // Only employee 1 appears in recruitment
    assert_eq!(
        profiles.column("mean_desired_salary").unwrap().f64().unwrap().get(0),
        Some(55000.0)
    );

    // Tie between Production and Sales resolved by first appearance
    assert_eq!(
        profiles.column("top_3_departments").unwrap().str().unwrap().get(0),
        Some("Production, Sales")
    );
    assert_eq!(
        profiles.column("top_3_departments").unwrap().str().unwrap().get(1),
        Some("IT/IS")
    );
}

#[test]
fn test_high_performer_distributions() {
    let (_temp_dir, paths) = cleaned_project();
    run_performance_insights(&paths, fixed_today()).unwrap();

    let dept = read_csv(&paths.report_file("04_high_perf_dept_distribution.csv"));
    assert_has_columns(&dept, &["departmenttype", "pct"]);
    let pcts: Vec<f64> = dept
        .column("pct")
        .unwrap()
        .f64()
        .unwrap()
        .iter()
        .map(|v| v.unwrap())
        .collect();
    assert_eq!(pcts, vec![50.0, 50.0]);
    assert!((pcts.iter().sum::<f64>() - 100.0).abs() < 1e-9);

    let gender = read_csv(&paths.report_file("04_high_perf_gender_distribution.csv"));
    assert_eq!(gender.height(), 1);
    assert_eq!(
        gender.column("gendercode").unwrap().str().unwrap().get(0),
        Some("Female")
    );
    assert_eq!(gender.column("pct").unwrap().f64().unwrap().get(0), Some(100.0));
}

#[test]
fn test_profiles_json_export() {
    let (_temp_dir, paths) = cleaned_project();
    run_performance_insights(&paths, fixed_today()).unwrap();

    let raw = std::fs::read_to_string(paths.report_file("04_performance_profiles.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json["profiles"].as_array().unwrap().len(), 2);
    assert_eq!(json["profiles"][0]["segment"], "High Performance (>=4)");
    assert_eq!(json["profiles"][0]["count"], 2);
    assert_eq!(
        json["profiles"][0]["top_3_departments"],
        serde_json::json!(["Production", "Sales"])
    );
    assert_eq!(json["metadata"]["high_performer_min"], 4);
}

#[test]
fn test_missing_training_duration_column_is_fatal() {
    let (_temp_dir, paths) = cleaned_project();

    // Rewrite the cleaned training table without any duration-like column
    std::fs::write(
        paths.cleaned_file("training_and_development_clean.csv"),
        "employee_id,training_date,training_outcome\n1,2023-05-01,Passed\n",
    )
    .unwrap();

    let err = run_performance_insights(&paths, fixed_today()).unwrap_err();
    assert!(
        err.to_string().contains("training_duration"),
        "unexpected error: {}",
        err
    );
}

#[test]
fn test_outstanding_active_employee_lands_in_high_segment() {
    // End-to-end: a single Outstanding, still-active employee must appear in
    // the high-performance profile with its department counted
    let (_temp_dir, root) = project_root();
    write_raw(
        &root,
        "employee_data.csv",
        "\
EmpID,StartDate,ExitDate,DOB,LocationCode,Performance Score,Current Employee Rating,DepartmentType,GenderCode
9,01-Jan-20,,07-Jul-85,100,Outstanding,5,Engineering,Female
",
    );
    write_raw(
        &root,
        ENGAGEMENT_RAW_NAME,
        "Employee ID,Survey Date,Engagement Score,Satisfaction Score,Work-Life Balance Score\n9,14-02-2023,4.0,4.0,4.0\n",
    );
    write_raw(
        &root,
        "recruitment_data.csv",
        "Applicant ID,Application Date,Date of Birth,Desired Salary,Status\n9,2019-12-01,1985-07-07,50000,Hired\n",
    );
    write_raw(
        &root,
        "training_and_development_data.csv",
        "Employee ID,Training Date,Training Outcome,Training Duration(Days)\n9,2023-05-01,Passed,3\n",
    );
    let paths = DataPaths::new(&root);
    clean_employee(&paths).unwrap();
    clean_engagement(&paths).unwrap();
    clean_recruitment(&paths).unwrap();
    clean_training(&paths).unwrap();

    run_performance_insights(&paths, fixed_today()).unwrap();

    let profiles = read_csv(&paths.report_file("04_performance_profiles.csv"));
    assert_eq!(profiles.column("count").unwrap().i64().unwrap().get(0), Some(1));
    assert_eq!(profiles.column("count").unwrap().i64().unwrap().get(1), Some(0));
    assert_eq!(
        profiles.column("top_3_departments").unwrap().str().unwrap().get(0),
        Some("Engineering")
    );
    // (2024-01-01 - 2020-01-01) = 1461 days over 365, rounded to 2 decimals
    assert_eq!(
        profiles.column("mean_experience_years").unwrap().f64().unwrap().get(0),
        Some(4.0)
    );
    assert_eq!(profiles.column("mean_current_rating").unwrap().f64().unwrap().get(0), Some(5.0));
}
