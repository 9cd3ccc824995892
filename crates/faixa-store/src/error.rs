//! Error types for workbook access.

use std::path::PathBuf;

use faixa_model::ModelError;
use thiserror::Error;

/// Errors raised by a [`Workbook`](crate::Workbook) implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    // === Sheet Errors ===
    /// No sheet with this name.
    #[error("sheet '{name}' not found")]
    SheetNotFound { name: String },

    /// A sheet with this name already exists.
    #[error("sheet '{name}' already exists")]
    DuplicateSheet { name: String },

    /// Rows written in one call must share a width.
    #[error("row {row} written to '{sheet}' has {found} cells, expected {expected}")]
    RaggedRows {
        sheet: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Range(#[from] ModelError),

    // === File System Errors ===
    #[error("workbook directory not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    // === Configuration Errors ===
    #[error("invalid workbook config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("unknown time zone '{0}'")]
    InvalidTimeZone(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
