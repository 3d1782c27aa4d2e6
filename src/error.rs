//! Error types for the H1B report pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`SniffError`] - dialect/encoding detection errors
//! - [`SchemaError`] - missing or malformed header schema
//! - [`ReadError`] - record streaming errors
//! - [`ReportError`] - report writing errors
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Format Detection Errors
// =============================================================================

/// Errors during dialect and encoding detection.
#[derive(Debug, Error)]
pub enum SniffError {
    /// Failed to read the leading sample.
    #[error("Failed to read input sample: {0}")]
    Io(#[from] std::io::Error),

    /// The input contains no data to sample.
    #[error("Input file is empty")]
    EmptyInput,

    /// No candidate delimiter occurred consistently across the sample.
    #[error("Could not determine a consistent delimiter from the input sample")]
    NoDelimiter,
}

// =============================================================================
// Schema Errors
// =============================================================================

/// Missing or malformed header schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A required column is absent from the (possibly migrated) header.
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// A legacy-layout header does not have the expected column count.
    #[error("Legacy record layout has {found} columns, expected {expected}")]
    LegacyColumnCount { found: usize, expected: usize },
}

// =============================================================================
// Record Streaming Errors
// =============================================================================

/// Errors while streaming records from the input file.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Failed to read from the input stream.
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV lexer rejected a record.
    #[error("Invalid CSV record: {0}")]
    Csv(#[from] csv::Error),

    /// Header schema validation failed.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

// =============================================================================
// Report Errors
// =============================================================================

/// Errors while writing a ranked report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The destination directory does not exist.
    #[error("Invalid output path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// Failed to write the report file.
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV writer rejected a row.
    #[error("Failed to write report row: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to move the finished report into place.
    #[error("Failed to finalize report: {0}")]
    Persist(#[from] tempfile::PersistError),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by [`crate::pipeline::run`].
/// It wraps all lower-level errors and adds pipeline-specific variants.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Dialect/encoding detection error.
    #[error("Format detection error: {0}")]
    Sniff(#[from] SniffError),

    /// Record streaming error.
    #[error("Read error: {0}")]
    Read(#[from] ReadError),

    /// Report writing error.
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// Failed to open or reposition the input file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SchemaError> for PipelineError {
    fn from(err: SchemaError) -> Self {
        PipelineError::Read(ReadError::Schema(err))
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for sniffing operations.
pub type SniffResult<T> = Result<T, SniffError>;

/// Result type for record streaming operations.
pub type ReadResult<T> = Result<T, ReadError>;

/// Result type for report writing operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
