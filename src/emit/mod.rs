//! Annotation output.
//!
//! Matches are turned into flat [`AnnotationRecord`] rows and appended to an
//! [`AnnotationSink`]. Rows are written in the order they are produced and are
//! never deduplicated.

mod csv_sink;

pub use csv_sink::CsvSink;

use crate::error::Result;
use crate::model::{AnnotationRecord, Match, Page};

/// Append-only destination for annotation rows.
pub trait AnnotationSink {
    /// Append one record.
    fn write_record(&mut self, record: &AnnotationRecord) -> Result<()>;

    /// Flush buffered records.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl AnnotationSink for Vec<AnnotationRecord> {
    fn write_record(&mut self, record: &AnnotationRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

impl<S: AnnotationSink + ?Sized> AnnotationSink for &mut S {
    fn write_record(&mut self, record: &AnnotationRecord) -> Result<()> {
        (**self).write_record(record)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

/// Identity of the page image an annotation belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct PageInfo {
    /// Image file name, e.g. `main-42-1.jpg`
    pub image_name: String,
    /// Page width
    pub width: f64,
    /// Page height
    pub height: f64,
}

impl PageInfo {
    pub fn new(image_name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            image_name: image_name.into(),
            width,
            height,
        }
    }

    /// Page info for a parsed page.
    pub fn for_page(image_name: impl Into<String>, page: &Page) -> Self {
        Self::new(image_name, page.width, page.height)
    }

    /// Build the record for one match on this page.
    pub fn record(&self, m: Match) -> AnnotationRecord {
        AnnotationRecord::new(self.image_name.clone(), self.width, self.height, m)
    }
}

/// Append one record per match, in order. Returns the number written.
pub fn emit_matches<S>(sink: &mut S, page: &PageInfo, matches: Vec<Match>) -> Result<usize>
where
    S: AnnotationSink + ?Sized,
{
    let count = matches.len();
    for m in matches {
        sink.write_record(&page.record(m))?;
    }
    Ok(count)
}
