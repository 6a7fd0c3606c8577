//! Block classification against document metadata.
//!
//! Every block of a page is checked against three rules, in order:
//!
//! 1. **Basic sections**: whole-text equality with a fixed heading such as
//!    `ABSTRACT`.
//! 2. **Title**: a loose edit-distance test against the document title, tried
//!    until the first success per document. The matched block may span
//!    several lines, see [`accumulate_title`].
//! 3. **Custom sections**: the block text starts with a section heading from
//!    the metadata, optionally after dropping one leading token.
//!
//! The rules are not exclusive; a single block can produce several matches.

mod options;
mod similarity;
mod title;

pub use options::{ContinuationMode, MatchOptions, BASIC_SECTIONS};
pub use similarity::{
    continuation_ratio, matching_chars, title_distance_ratio, MatchingBlock, SequenceMatcher,
    CONTINUATION_THRESHOLD, TITLE_DISTANCE_THRESHOLD,
};
pub use title::accumulate_title;

use crate::model::{DocumentMetadata, Match, TextBlock, TextLine};
use log::debug;

/// Per-document matching state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchState {
    title_found: bool,
}

impl MatchState {
    /// Fresh state for a new document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the title has already been matched in this document.
    pub fn is_title_found(&self) -> bool {
        self.title_found
    }

    /// Forget the title match, as when a new document begins.
    pub fn reset(&mut self) {
        self.title_found = false;
    }

    fn mark_title_found(&mut self) {
        self.title_found = true;
    }
}

/// Classifies blocks for one document.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    metadata: &'a DocumentMetadata,
    options: &'a MatchOptions,
}

impl<'a> Matcher<'a> {
    /// Create a matcher for a document.
    pub fn new(metadata: &'a DocumentMetadata, options: &'a MatchOptions) -> Self {
        Self { metadata, options }
    }

    /// Match a block, computing its text.
    pub fn match_block(&self, block: &TextBlock, state: &mut MatchState) -> Vec<Match> {
        let text = block.text();
        self.match_text(&text, &block.lines, state)
    }

    /// Match a block given its precomputed text and its lines.
    ///
    /// Geometry comes from the first line; the title rule may extend over the
    /// following ones.
    pub fn match_text(&self, text: &str, lines: &[TextLine], state: &mut MatchState) -> Vec<Match> {
        let mut matches = Vec::new();
        let Some(first) = lines.first() else {
            return matches;
        };
        if text.is_empty() {
            return matches;
        }

        for section in &self.options.basic_sections {
            if text == section {
                debug!("Basic section '{}' at {:?}", section, first.bounds());
                matches.push(Match::section(first.bounds(), section.as_str()));
            }
        }

        if !state.is_title_found() && self.is_title_start(text) {
            let title = &self.metadata.title;
            if let Some(bbox) = accumulate_title(title, text, lines, self.options) {
                debug!("Title '{}' at {:?}", title, bbox);
                matches.push(Match::title(bbox, title.as_str()));
                state.mark_title_found();
            }
        }

        let without_first_token = drop_first_token(text);
        for section in &self.metadata.sections {
            if text.starts_with(section.as_str())
                || without_first_token.starts_with(section.as_str())
            {
                debug!("Section '{}' at {:?}", section, first.bounds());
                matches.push(Match::section(first.bounds(), section.as_str()));
            }
        }

        matches
    }

    fn is_title_start(&self, text: &str) -> bool {
        title_distance_ratio(&self.metadata.title, text)
            .is_some_and(|ratio| ratio < self.options.title_threshold)
    }
}

/// Text with its first whitespace-delimited token removed, remaining tokens
/// joined by single spaces.
fn drop_first_token(text: &str) -> String {
    text.split_whitespace().skip(1).collect::<Vec<_>>().join(" ")
}
