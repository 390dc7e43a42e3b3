//! IO implementations for [`EventLog`]
//!
//! CSV logs contain one trace per row and one activity per cell (no header row).
//! Empty cells are skipped, surrounding whitespace is trimmed.

use std::io::{Read, Write};

use crate::core::event_data::{Activity, EventLog, Trace};
use crate::core::io::{Exportable, ExtensionWithMime, Importable};

/// Error type for [`EventLog`] IO operations
#[derive(Debug, thiserror::Error)]
pub enum EventLogIOError {
    /// IO Error
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV Parsing Error
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
    /// JSON Parsing Error
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
    /// Unsupported Format
    #[error("Unsupported Format: {0}")]
    UnsupportedFormat(String),
}

/// Parse an [`EventLog`] from CSV data
pub fn import_csv_reader<R: Read>(reader: R) -> Result<EventLog, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut traces = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let trace: Trace = record
            .iter()
            .filter(|cell| !cell.is_empty())
            .map(Activity::from)
            .collect();
        traces.push(trace);
    }
    Ok(EventLog::new(traces))
}

/// Write an [`EventLog`] as CSV data (one trace per row)
pub fn export_csv_writer<W: Write>(log: &EventLog, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(writer);
    for trace in &log.traces {
        csv_writer.write_record(trace.iter().map(Activity::as_str))?;
    }
    csv_writer.flush()?;
    Ok(())
}

impl Importable for EventLog {
    type Error = EventLogIOError;

    fn import_from_reader<R: Read>(reader: R, format: &str) -> Result<Self, Self::Error> {
        match format {
            _ if format.ends_with("json") => Ok(serde_json::from_reader(reader)?),
            _ if format.ends_with("csv.gz") => {
                let gz = flate2::read::GzDecoder::new(reader);
                Ok(import_csv_reader(gz)?)
            }
            _ if format.ends_with("csv") => Ok(import_csv_reader(reader)?),
            _ => Err(EventLogIOError::UnsupportedFormat(format.to_string())),
        }
    }

    fn known_import_formats() -> Vec<ExtensionWithMime> {
        vec![
            ExtensionWithMime::new("csv", "text/csv"),
            ExtensionWithMime::new("csv.gz", "application/gzip"),
            ExtensionWithMime::new("json", "application/json"),
        ]
    }
}

impl Exportable for EventLog {
    type Error = EventLogIOError;

    fn export_to_writer<W: Write>(&self, writer: W, format: &str) -> Result<(), Self::Error> {
        if format.ends_with("json") {
            serde_json::to_writer(writer, self)?;
            Ok(())
        } else if format.ends_with("csv.gz") {
            let mut encoder = flate2::write::GzEncoder::new(writer, flate2::Compression::default());
            export_csv_writer(self, &mut encoder)?;
            encoder.finish()?;
            Ok(())
        } else if format.ends_with("csv") {
            export_csv_writer(self, writer)?;
            Ok(())
        } else {
            Err(EventLogIOError::UnsupportedFormat(format.to_string()))
        }
    }

    fn known_export_formats() -> Vec<ExtensionWithMime> {
        vec![
            ExtensionWithMime::new("csv", "text/csv"),
            ExtensionWithMime::new("csv.gz", "application/gzip"),
            ExtensionWithMime::new("json", "application/json"),
        ]
    }
}
