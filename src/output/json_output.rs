//! JSON exporter

use crate::model::ProductRecord;
use crate::output::traits::{Exporter, OutputResult};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;

/// Writes records as a pretty-printed JSON array
///
/// Objects are indented by four spaces and non-ASCII text is written as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn name(&self) -> &'static str {
        "JSON"
    }

    fn write_records(&self, records: &[ProductRecord], writer: &mut dyn Write) -> OutputResult<()> {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut *writer, formatter);
        records.serialize(&mut serializer)?;
        writer.flush()?;
        Ok(())
    }
}
