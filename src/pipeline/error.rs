//! Typed errors for fatal stage failures.
//!
//! Only conditions that must abort a stage live here: a raw input that cannot
//! be located, or a mandatory column that is absent. Unparseable dates and
//! unmapped performance categories are not errors; they become nulls and are
//! reported on stdout.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions raised by cleaning and reporting stages.
#[derive(Debug, Error)]
pub enum StageError {
    /// A raw input at a fixed path does not exist.
    #[error("input file not found: {path}")]
    MissingFile {
        /// Path that was probed
        path: PathBuf,
    },

    /// A pattern-located input matched zero candidates.
    #[error("no CSV matching '{pattern}' found in {dir}")]
    NoMatchingFile {
        /// Human-readable pattern description (e.g. "*engagement*survey*")
        pattern: String,
        /// Directory that was searched
        dir: PathBuf,
    },

    /// A column the computation depends on is absent from a table.
    #[error("required column '{column}' not found in {table} table")]
    MissingColumn {
        /// Canonical (normalized) column name
        column: String,
        /// Table the column was expected in
        table: String,
    },
}
