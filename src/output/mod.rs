//! Output module for exporting scraped products
//!
//! This module handles:
//! - Writing the result set as JSON or CSV
//! - Turning an operator-supplied name into a safe file name
//! - Recording crawl statistics for the final summary

mod csv_output;
mod json_output;
pub mod stats;
mod traits;

pub use csv_output::{CsvExporter, CSV_HEADER};
pub use json_output::JsonExporter;
pub use stats::{format_statistics, CrawlStats};
pub use traits::{Exporter, OutputError, OutputResult};

use crate::model::ProductRecord;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Characters replaced when sanitising an export file name
const UNSAFE_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Name used when the operator's name is empty after trimming
const DEFAULT_FILENAME: &str = "products";

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// Maps the interactive menu choice (`"1"` or `"2"`) to a format
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::Json),
            "2" => Some(Self::Csv),
            _ => None,
        }
    }

    /// The exporter writing this format
    pub fn exporter(&self) -> &'static dyn Exporter {
        match self {
            Self::Json => &JsonExporter,
            Self::Csv => &CsvExporter,
        }
    }
}

/// Replaces every filesystem-unsafe character with `_`
///
/// # Example
///
/// ```
/// use payhip_scraper::output::sanitize_filename;
///
/// assert_eq!(sanitize_filename("my:shop/items?"), "my_shop_items_");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return DEFAULT_FILENAME.to_string();
    }

    trimmed
        .chars()
        .map(|c| if UNSAFE_FILENAME_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Exports `records` to `<dir>/<sanitised name>.<extension>`
///
/// # Arguments
///
/// * `records` - The result set, in scrape order
/// * `format` - Target file format
/// * `dir` - Directory the file is created in
/// * `name` - Operator-supplied file name without extension
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(OutputError)` - Failed to create or write the file
pub fn export_records(
    records: &[ProductRecord],
    format: ExportFormat,
    dir: &Path,
    name: &str,
) -> OutputResult<PathBuf> {
    let exporter = format.exporter();
    let path = dir.join(format!("{}.{}", sanitize_filename(name), exporter.extension()));

    let mut writer = BufWriter::new(File::create(&path)?);
    exporter.write_records(records, &mut writer)?;

    tracing::info!(
        "Data exported to {} ({})",
        path.display(),
        exporter.name()
    );
    Ok(path)
}
