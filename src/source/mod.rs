//! Page sources.
//!
//! A [`PageSource`] turns one PDF into parsed pages with their text blocks.
//! The default [`ToolSource`] shells out to `pdftk` to split the document and
//! to `pdf2xml` to extract blocks from each page. Tests can substitute any
//! other implementation.

mod tools;
mod xml;

pub use tools::{natural_page_order, ToolOptions, ToolSource};
pub use xml::parse_pdf2xml;

use crate::error::Result;
use crate::model::Page;
use std::path::Path;

/// Abstract supplier of parsed pages.
pub trait PageSource {
    /// Load every page of `pdf`, numbered from 1 in document order.
    ///
    /// `body_id` names intermediate files; `workdir` is a scratch directory
    /// owned by the caller and removed after the document is processed.
    fn load_pages(&self, pdf: &Path, body_id: &str, workdir: &Path) -> Result<Vec<Page>>;
}

impl<S: PageSource + ?Sized> PageSource for &S {
    fn load_pages(&self, pdf: &Path, body_id: &str, workdir: &Path) -> Result<Vec<Page>> {
        (**self).load_pages(pdf, body_id, workdir)
    }
}
