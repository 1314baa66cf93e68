//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// hrprep - Clean raw HR tables and derive statistical reports
#[derive(Parser, Debug)]
#[command(name = "hrprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project root. Raw inputs are read from <root>/data/raw; cleaned
    /// tables and reports are written to <root>/data/cleaned and
    /// <root>/reports.
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean the raw employee table
    CleanEmployee,
    /// Clean the engagement survey table (input located by name pattern)
    CleanEngagement,
    /// Clean the raw recruitment table
    CleanRecruitment,
    /// Clean the raw training and development table
    CleanTraining,
    /// Run all four cleaning stages
    Clean,
    /// Descriptive statistics: summary stats, group breakdowns, outliers,
    /// correlation matrix
    Stats,
    /// Performance insights: segment profiles and distribution breakdowns
    Insights,
    /// Run both reporting stages
    Report,
    /// Full pipeline: all cleaners, then all reports
    Run,
}
