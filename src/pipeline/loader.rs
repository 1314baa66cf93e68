//! CSV loading and saving for all pipeline stages.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use polars::prelude::*;

use crate::pipeline::error::StageError;
use crate::utils::{create_spinner, finish_with_success};

/// Load a CSV file into memory, failing with a missing-file error when the
/// path does not exist.
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(StageError::MissingFile {
            path: path.to_path_buf(),
        }
        .into());
    }

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("input")
        .to_string();
    let spinner = create_spinner(&format!("Loading {}...", name));

    let df = LazyCsvReader::new(path)
        .finish()
        .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        .collect()
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;

    finish_with_success(&spinner, &format!("Loaded {} ({} rows)", name, df.height()));
    Ok(df)
}

/// Write a table as CSV, creating parent directories as needed.
pub fn save_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .finish(df)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    Ok(())
}

/// Locate a raw CSV whose file name contains all of `needles`
/// (case-insensitive). Candidates are sorted by name so the first match is
/// deterministic.
pub fn find_raw_csv(dir: &Path, needles: &[&str]) -> Result<PathBuf> {
    let pattern = format!("*{}*", needles.join("*"));
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().and_then(|e| e.to_str()).map(str::to_lowercase)
                == Some("csv".to_string())
        })
        .filter(|path| {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("")
                .to_lowercase();
            needles.iter().all(|needle| name.contains(needle))
        })
        .collect();
    candidates.sort();

    candidates.into_iter().next().ok_or_else(|| {
        StageError::NoMatchingFile {
            pattern,
            dir: dir.to_path_buf(),
        }
        .into()
    })
}

/// Print shape, dtypes and null counts for operator visibility. Diagnostic
/// only; nothing downstream depends on this output.
pub fn display_table_stats(df: &DataFrame, label: &str) {
    let (rows, cols) = df.shape();
    println!(
        "\n    {} {}: {} rows x {} columns",
        style("✧").cyan(),
        label,
        rows,
        cols
    );
    for (name, dtype) in df.schema().iter() {
        let nulls = df.column(name.as_str()).map(|c| c.null_count()).unwrap_or(0);
        println!("      {:<30} {:<14} {} null(s)", name, format!("{}", dtype), nulls);
    }
}

/// Print per-column null counts, used around imputation steps.
pub fn display_null_counts(df: &DataFrame, label: &str) {
    println!("\n    Null counts {}:", label);
    for name in df.get_column_names() {
        let nulls = df.column(name.as_str()).map(|c| c.null_count()).unwrap_or(0);
        println!("      {:<30} {}", name, nulls);
    }
}
