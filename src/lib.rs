//! # bboxgen
//!
//! Ground-truth bounding boxes for document layout datasets.
//!
//! Given a rendered PDF and a JSON description of what it contains (title
//! and section headings), this library finds the text blocks that carry
//! those elements and writes one annotation row per match: page image name,
//! page size, label (`TITLE` or `SECTION`), pixel bounding box and the
//! canonical text.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> bboxgen::Result<()> {
//!     // Annotate every main-<id>.pdf / meta-<id>.json pair in a directory
//!     let summary = bboxgen::annotate_batch("batch/", "annotations.csv")?;
//!     println!("{} records", summary.record_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Matching a page directly
//!
//! ```
//! use bboxgen::{AnnotationRecord, DocumentAnnotator, DocumentMetadata};
//! use bboxgen::{MatchOptions, Page, TextBlock};
//!
//! let meta = DocumentMetadata::new("A Study of X", "42", ["1 INTRODUCTION"]);
//! let options = MatchOptions::default();
//! let mut annotator = DocumentAnnotator::new(&meta, &options);
//!
//! let page = Page::new(1, 612.0, 792.0)
//!     .with_block(TextBlock::single("A Study of X", 10.0, 20.0, 100.0, 15.0))
//!     .with_block(TextBlock::single("1 INTRODUCTION", 10.0, 60.0, 150.0, 15.0));
//!
//! let mut records: Vec<AnnotationRecord> = Vec::new();
//! annotator.annotate_page(&page, &mut records)?;
//! assert_eq!(records.len(), 2);
//! # Ok::<(), bboxgen::Error>(())
//! ```
//!
//! ## External tools
//!
//! The default page source needs `pdftk` (page splitting) and `pdf2xml`
//! (block extraction) on `PATH`, or configured through [`ToolOptions`].

pub mod annotate;
pub mod batch;
pub mod emit;
pub mod error;
pub mod matcher;
pub mod model;
pub mod source;

// Re-export commonly used types
pub use annotate::DocumentAnnotator;
pub use batch::{discover, BatchDriver, BatchEntry, BatchSummary, DocumentSummary};
pub use emit::{AnnotationSink, CsvSink, PageInfo};
pub use error::{Error, Result};
pub use matcher::{ContinuationMode, MatchOptions, MatchState, Matcher, BASIC_SECTIONS};
pub use model::{
    AnnotationRecord, BoundingBox, DocumentMetadata, Label, Match, Page, TextBlock, TextLine,
};
pub use source::{PageSource, ToolOptions, ToolSource};

use std::path::Path;

/// Annotate a batch directory with default settings, appending rows to the
/// CSV file at `output`.
///
/// # Example
///
/// ```no_run
/// let summary = bboxgen::annotate_batch("batch/", "annotations.csv").unwrap();
/// for doc in summary.missing_titles() {
///     eprintln!("no title in {}", doc.id);
/// }
/// ```
pub fn annotate_batch<P: AsRef<Path>, Q: AsRef<Path>>(dir: P, output: Q) -> Result<BatchSummary> {
    BboxGen::new().run(dir, output)
}

/// Builder for batch annotation runs.
///
/// # Example
///
/// ```no_run
/// use bboxgen::{BboxGen, ContinuationMode};
///
/// let summary = BboxGen::new()
///     .with_pdftk("/usr/local/bin/pdftk")
///     .with_continuation_mode(ContinuationMode::CandidateText)
///     .run("batch/", "annotations.csv")?;
/// # Ok::<(), bboxgen::Error>(())
/// ```
pub struct BboxGen {
    match_options: MatchOptions,
    tool_options: ToolOptions,
}

impl BboxGen {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            match_options: MatchOptions::default(),
            tool_options: ToolOptions::default(),
        }
    }

    /// Set the `pdftk` executable.
    pub fn with_pdftk(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.tool_options = self.tool_options.with_pdftk(path);
        self
    }

    /// Set the `pdf2xml` executable.
    pub fn with_pdf2xml(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.tool_options = self.tool_options.with_pdf2xml(path);
        self
    }

    /// Replace the matching options.
    pub fn with_match_options(mut self, options: MatchOptions) -> Self {
        self.match_options = options;
        self
    }

    /// Set the title continuation mode.
    pub fn with_continuation_mode(mut self, mode: ContinuationMode) -> Self {
        self.match_options = self.match_options.with_continuation_mode(mode);
        self
    }

    /// Build the batch driver.
    pub fn driver(self) -> BatchDriver<ToolSource> {
        BatchDriver::new(ToolSource::new(self.tool_options), self.match_options)
    }

    /// Annotate `dir`, appending rows to the CSV file at `output`.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(self, dir: P, output: Q) -> Result<BatchSummary> {
        let mut sink = CsvSink::append(output)?;
        self.driver().run(dir, &mut sink)
    }

    /// Annotate `dir` into any sink.
    pub fn run_into<P, K>(self, dir: P, sink: &mut K) -> Result<BatchSummary>
    where
        P: AsRef<Path>,
        K: AnnotationSink + ?Sized,
    {
        self.driver().run(dir, sink)
    }
}

impl Default for BboxGen {
    fn default() -> Self {
        Self::new()
    }
}
