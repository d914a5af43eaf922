//! Error types for survey table ingestion.

use std::path::PathBuf;

use cohort_search::{CatalogError, FormatError};
use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while loading tables or evaluating cohorts against them.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Polars could not parse the file.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    // === DataFrame Errors ===
    /// A required column is missing.
    #[error("column '{column}' not found in table")]
    ColumnNotFound { column: String },

    /// Values and dimension indices of a filter do not pair up.
    #[error("filter has {values} values for {dimensions} dimensions")]
    FilterArity { values: usize, dimensions: usize },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] PolarsError),

    // === Domain Errors ===
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
