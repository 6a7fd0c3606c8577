//! CSV annotation table.

use super::AnnotationSink;
use crate::error::Result;
use crate::model::AnnotationRecord;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Writes records as headerless CSV rows.
///
/// Columns: image name, page width, page height, label, xmin, ymin, xmax,
/// ymax, content.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    written: usize,
}

impl CsvSink<File> {
    /// Open `path` for appending, creating it if needed.
    pub fn append<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> CsvSink<W> {
    /// Wrap any writer.
    pub fn from_writer(writer: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .delimiter(b',')
            .quote(b'"')
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(writer);
        Self { writer, written: 0 }
    }

    /// Number of records written through this sink.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| crate::error::Error::Io(e.into_error()))
    }
}

impl<W: Write> AnnotationSink for CsvSink<W> {
    fn write_record(&mut self, record: &AnnotationRecord) -> Result<()> {
        self.writer.serialize(record)?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
