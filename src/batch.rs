//! Batch processing.
//!
//! A batch directory holds pairs of `main-<id>.pdf` and `meta-<id>.json`.
//! Documents are processed one after the other; the first failure stops the
//! batch.

use crate::annotate::DocumentAnnotator;
use crate::emit::AnnotationSink;
use crate::error::{Error, Result};
use crate::matcher::MatchOptions;
use crate::model::DocumentMetadata;
use crate::source::PageSource;
use log::{info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::TempDir;

/// One document of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    /// Identifier taken from `main-<id>.pdf`
    pub id: String,
    /// Rendered document
    pub pdf: PathBuf,
    /// Its `meta-<id>.json`
    pub metadata: PathBuf,
}

impl BatchEntry {
    /// Entry for `<dir>/main-<id>.pdf` and `<dir>/meta-<id>.json`.
    pub fn new(dir: &Path, id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            pdf: dir.join(format!("main-{}.pdf", id)),
            metadata: dir.join(format!("meta-{}.json", id)),
            id,
        }
    }
}

/// Find all `main-*.pdf` documents in `dir`, sorted by path.
pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Vec<BatchEntry>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::InvalidBatch(format!("{} is not a directory", dir.display())));
    }

    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{}/main-*.pdf", escaped);

    let mut entries = Vec::new();
    for path in glob::glob(&pattern)? {
        let path = path.map_err(|e| Error::Io(e.into()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if let Some(id) = document_id(&name) {
            entries.push(BatchEntry::new(dir, id));
        }
    }
    entries.sort_by(|a, b| a.pdf.cmp(&b.pdf));
    Ok(entries)
}

fn document_id(file_name: &str) -> Option<String> {
    static MAIN_PDF: OnceLock<Regex> = OnceLock::new();
    let re = MAIN_PDF.get_or_init(|| Regex::new(r"^main-(.*)\.pdf$").unwrap());
    re.captures(file_name)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Outcome of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    pub pages: usize,
    pub records: usize,
    pub title_found: bool,
}

/// Outcome of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub documents: Vec<DocumentSummary>,
}

impl BatchSummary {
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn page_count(&self) -> usize {
        self.documents.iter().map(|d| d.pages).sum()
    }

    pub fn record_count(&self) -> usize {
        self.documents.iter().map(|d| d.records).sum()
    }

    /// Documents that produced no title record.
    pub fn missing_titles(&self) -> impl Iterator<Item = &DocumentSummary> {
        self.documents.iter().filter(|d| !d.title_found)
    }
}

/// Drives a [`PageSource`] and the matcher over a batch.
pub struct BatchDriver<S: PageSource> {
    source: S,
    options: MatchOptions,
}

impl<S: PageSource> BatchDriver<S> {
    pub fn new(source: S, options: MatchOptions) -> Self {
        Self { source, options }
    }

    /// Process every document in `dir`.
    pub fn run<P, K>(&self, dir: P, sink: &mut K) -> Result<BatchSummary>
    where
        P: AsRef<Path>,
        K: AnnotationSink + ?Sized,
    {
        self.run_with_progress(dir, sink, |_, _| {})
    }

    /// Like [`BatchDriver::run`], calling `progress(done, total)` after each
    /// finished document.
    pub fn run_with_progress<P, K, F>(
        &self,
        dir: P,
        sink: &mut K,
        mut progress: F,
    ) -> Result<BatchSummary>
    where
        P: AsRef<Path>,
        K: AnnotationSink + ?Sized,
        F: FnMut(usize, usize),
    {
        let entries = discover(dir)?;
        let total = entries.len();
        info!("Found {} documents", total);

        let mut summary = BatchSummary::default();
        for (done, entry) in entries.iter().enumerate() {
            summary.documents.push(self.process_document(entry, sink)?);
            progress(done + 1, total);
        }
        sink.flush()?;
        Ok(summary)
    }

    /// Annotate one document.
    ///
    /// Metadata problems abort the document before any page is touched. The
    /// scratch directory is removed whether or not annotation succeeded; a
    /// removal failure is returned only when annotation itself succeeded.
    pub fn process_document<K>(&self, entry: &BatchEntry, sink: &mut K) -> Result<DocumentSummary>
    where
        K: AnnotationSink + ?Sized,
    {
        let metadata = DocumentMetadata::from_path(&entry.metadata)?;

        let workdir = tempfile::Builder::new()
            .suffix(&format!("{}_files", entry.id))
            .tempdir()?;

        let outcome = self.annotate_pages(entry, &metadata, workdir.path(), sink);
        match remove_workdir(workdir) {
            Ok(()) => outcome,
            Err(e) if outcome.is_err() => {
                warn!("{}: could not remove scratch directory: {}", entry.id, e);
                outcome
            }
            Err(e) => Err(e),
        }
    }

    fn annotate_pages<K>(
        &self,
        entry: &BatchEntry,
        metadata: &DocumentMetadata,
        workdir: &Path,
        sink: &mut K,
    ) -> Result<DocumentSummary>
    where
        K: AnnotationSink + ?Sized,
    {
        let pages = self
            .source
            .load_pages(&entry.pdf, &metadata.body_id, workdir)?;

        let mut annotator = DocumentAnnotator::new(metadata, &self.options);
        let mut records = 0;
        for page in &pages {
            records += annotator.annotate_page(page, sink)?;
        }

        let page_count = pages.len();
        let title_found = annotator.title_found();
        if title_found {
            info!("{}: {} pages, {} records", entry.id, page_count, records);
        } else {
            warn!(
                "{}: title {:?} not found in {} pages",
                entry.id, metadata.title, page_count
            );
        }

        Ok(DocumentSummary {
            id: entry.id.clone(),
            pages: page_count,
            records,
            title_found,
        })
    }
}

/// Remove a scratch directory. A directory that is already gone is fine.
fn remove_workdir(dir: TempDir) -> Result<()> {
    match dir.close() {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Io(e)),
    }
}
