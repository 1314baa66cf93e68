//! Shared test utilities and fixture generators

use std::path::{Path, PathBuf};

use polars::prelude::*;
use tempfile::TempDir;

/// Raw employee export with messy headers, fixed-format dates, one
/// unparseable exit date and one terminated employee.
pub const EMPLOYEE_RAW_CSV: &str = "\
EmpID,StartDate,ExitDate,DOB,TerminationDescription,TerminationType,LocationCode,Performance Score,Current Employee Rating,DepartmentType,GenderCode,ADE Mail
1,01-Jan-20,,07-Jul-85,,,34904,Outstanding,5,Production,Female,a@corp.example
2,15-Mar-21,30-Jun-23,12-Feb-90,Resignation,Voluntary,2100,Fully Meets,3,Sales,Male,b@corp.example
3,05-May-19,,23-Aug-88,,,2100,Fully Meets,3,Production,Male,c@corp.example
4,20-Sep-22,,01-Dec-95,,,78200,PIP,2,IT/IS,Female,d@corp.example
5,10-Oct-18,notadate,30-Apr-80,,,34904,Exceeds,4,Sales,Female,e@corp.example
";

/// Engagement survey export: repeated employee 1, one null per score column.
pub const ENGAGEMENT_RAW_CSV: &str = "\
Employee ID,Survey Date,Engagement Score,Satisfaction Score,Work-Life Balance Score
1,14-02-2023,4.5,4.0,3.5
2,14-02-2023,,3.0,4.0
3,15-02-2023,3.5,,4.5
1,20-08-2023,2.5,5.0,
4,21-08-2023,4.0,4.0,4.0
";

/// Recruitment export: one null salary, one null status.
pub const RECRUITMENT_RAW_CSV: &str = "\
Applicant ID,Application Date,Date of Birth,Desired Salary,Status
1,2023-01-15,1985-07-07,55000,Hired
2,2023-02-20,1990-02-12,,Rejected
3,2023-03-05,1988-08-23,62000,
4,2023-04-11,1995-12-01,58000,In Review
";

/// Training export: repeated employee 1, one null duration, one null outcome.
pub const TRAINING_RAW_CSV: &str = "\
Employee ID,Training Date,Training Outcome,Training Duration(Days)
1,2023-05-01,Passed,3
2,2023-05-02,Failed,
3,2023-05-03,,5
1,2023-06-10,Passed,4
4,2023-06-11,Incomplete,2
";

/// File name the engagement cleaner should discover by pattern.
pub const ENGAGEMENT_RAW_NAME: &str = "2023_engagement_survey_results.csv";

/// Create a temporary project root with an empty data/raw directory.
pub fn project_root() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    std::fs::create_dir_all(root.join("data").join("raw")).unwrap();
    (temp_dir, root)
}

/// Write a raw CSV into <root>/data/raw.
pub fn write_raw(root: &Path, name: &str, content: &str) {
    std::fs::write(root.join("data").join("raw").join(name), content).unwrap();
}

/// Seed all four raw tables under <root>/data/raw.
pub fn seed_all_raw(root: &Path) {
    write_raw(root, "employee_data.csv", EMPLOYEE_RAW_CSV);
    write_raw(root, ENGAGEMENT_RAW_NAME, ENGAGEMENT_RAW_CSV);
    write_raw(root, "recruitment_data.csv", RECRUITMENT_RAW_CSV);
    write_raw(root, "training_and_development_data.csv", TRAINING_RAW_CSV);
}

/// Read a CSV back for assertions.
pub fn read_csv(path: &Path) -> DataFrame {
    LazyCsvReader::new(path)
        .finish()
        .unwrap()
        .collect()
        .unwrap()
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
