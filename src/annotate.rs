//! Per-document annotation.

use crate::emit::{emit_matches, AnnotationSink, PageInfo};
use crate::error::Result;
use crate::matcher::{MatchOptions, MatchState, Matcher};
use crate::model::{DocumentMetadata, Match, Page};

/// Annotates the pages of one document.
///
/// Owns the document's [`MatchState`], so a title matched on one page is not
/// matched again on later pages, and a new document always starts fresh.
pub struct DocumentAnnotator<'a> {
    matcher: Matcher<'a>,
    metadata: &'a DocumentMetadata,
    state: MatchState,
}

impl<'a> DocumentAnnotator<'a> {
    pub fn new(metadata: &'a DocumentMetadata, options: &'a MatchOptions) -> Self {
        Self {
            matcher: Matcher::new(metadata, options),
            metadata,
            state: MatchState::new(),
        }
    }

    /// Matches for every block of `page`, in block order.
    pub fn match_page(&mut self, page: &Page) -> Vec<Match> {
        let mut matches = Vec::new();
        for block in &page.blocks {
            matches.extend(self.matcher.match_block(block, &mut self.state));
        }
        matches
    }

    /// Match `page` and append its records to `sink`. Returns the number of
    /// records written.
    pub fn annotate_page<S>(&mut self, page: &Page, sink: &mut S) -> Result<usize>
    where
        S: AnnotationSink + ?Sized,
    {
        let info = PageInfo::for_page(self.metadata.page_image_name(page.number), page);
        let matches = self.match_page(page);
        emit_matches(sink, &info, matches)
    }

    /// Whether the title has been matched so far.
    pub fn title_found(&self) -> bool {
        self.state.is_title_found()
    }
}
