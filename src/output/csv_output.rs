//! CSV exporter

use crate::model::ProductRecord;
use crate::output::traits::{Exporter, OutputResult};
use std::io::Write;

/// Column headers, in record field order
pub const CSV_HEADER: [&str; 5] = ["Title", "Price", "Link", "Image", "Description"];

/// Writes records as CSV with a header row
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn name(&self) -> &'static str {
        "CSV"
    }

    fn write_records(&self, records: &[ProductRecord], writer: &mut dyn Write) -> OutputResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(CSV_HEADER)?;
        for record in records {
            csv_writer.write_record(record.to_row())?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
