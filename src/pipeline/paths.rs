//! Conventional project layout: raw inputs, cleaned tables and reports.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Raw employee table file name.
pub const EMPLOYEE_RAW: &str = "employee_data.csv";
/// Raw recruitment table file name.
pub const RECRUITMENT_RAW: &str = "recruitment_data.csv";
/// Raw training and development table file name.
pub const TRAINING_RAW: &str = "training_and_development_data.csv";

/// Cleaned employee table file name.
pub const EMPLOYEE_CLEAN: &str = "employee_data_clean.csv";
/// Cleaned engagement survey table file name.
pub const ENGAGEMENT_CLEAN: &str = "engagement_survey_clean.csv";
/// Cleaned recruitment table file name.
pub const RECRUITMENT_CLEAN: &str = "recruitment_clean.csv";
/// Cleaned training and development table file name.
pub const TRAINING_CLEAN: &str = "training_and_development_clean.csv";

/// Directory layout anchored at a project root: `data/raw` holds the inputs,
/// `data/cleaned` the normalized tables, `reports` the derived CSVs.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub raw: PathBuf,
    pub cleaned: PathBuf,
    pub reports: PathBuf,
}

impl DataPaths {
    pub fn new(root: &Path) -> Self {
        let data = root.join("data");
        Self {
            raw: data.join("raw"),
            cleaned: data.join("cleaned"),
            reports: root.join("reports"),
        }
    }

    pub fn raw_file(&self, name: &str) -> PathBuf {
        self.raw.join(name)
    }

    pub fn cleaned_file(&self, name: &str) -> PathBuf {
        self.cleaned.join(name)
    }

    pub fn report_file(&self, name: &str) -> PathBuf {
        self.reports.join(name)
    }

    /// Create the cleaned-data directory if needed.
    pub fn ensure_cleaned(&self) -> Result<()> {
        std::fs::create_dir_all(&self.cleaned).with_context(|| {
            format!("Failed to create directory: {}", self.cleaned.display())
        })
    }

    /// Create the reports directory if needed.
    pub fn ensure_reports(&self) -> Result<()> {
        std::fs::create_dir_all(&self.reports).with_context(|| {
            format!("Failed to create directory: {}", self.reports.display())
        })
    }
}
