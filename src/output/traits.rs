//! Exporter traits and error types
//!
//! This module defines the interface shared by the JSON and CSV exporters.

use crate::model::ProductRecord;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during export
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes a result set in one file format
pub trait Exporter {
    /// File extension without the leading dot
    fn extension(&self) -> &'static str;

    /// Human-readable format name for diagnostics
    fn name(&self) -> &'static str;

    /// Serialises every record to `writer`, in order
    ///
    /// # Arguments
    ///
    /// * `records` - The records to export
    /// * `writer` - Destination; flushed before returning
    fn write_records(&self, records: &[ProductRecord], writer: &mut dyn Write) -> OutputResult<()>;
}
