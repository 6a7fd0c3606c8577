//! Matching options and configuration.

use super::similarity::{CONTINUATION_THRESHOLD, TITLE_DISTANCE_THRESHOLD};

/// Section headings shared by every generated document.
pub const BASIC_SECTIONS: [&str; 4] = ["ABSTRACT", "CCS CONCEPTS", "KEYWORDS", "REFERENCES"];

/// Options for matching blocks against document metadata.
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Headings matched by exact whole-block equality
    pub basic_sections: Vec<String>,

    /// A block starts the title when its distance ratio is below this
    pub title_threshold: f64,

    /// A line continues the title when its similarity ratio exceeds this
    pub continuation_threshold: f64,

    /// Which text the continuation ratio is computed on
    pub continuation_mode: ContinuationMode,
}

impl MatchOptions {
    /// Create new match options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the basic section headings.
    pub fn with_basic_sections(
        mut self,
        sections: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.basic_sections = sections.into_iter().map(Into::into).collect();
        self
    }

    /// Set the title distance threshold.
    pub fn with_title_threshold(mut self, threshold: f64) -> Self {
        self.title_threshold = threshold;
        self
    }

    /// Set the continuation similarity threshold.
    pub fn with_continuation_threshold(mut self, threshold: f64) -> Self {
        self.continuation_threshold = threshold;
        self
    }

    /// Set the continuation mode.
    pub fn with_continuation_mode(mut self, mode: ContinuationMode) -> Self {
        self.continuation_mode = mode;
        self
    }
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            basic_sections: BASIC_SECTIONS.iter().map(|s| s.to_string()).collect(),
            title_threshold: TITLE_DISTANCE_THRESHOLD,
            continuation_threshold: CONTINUATION_THRESHOLD,
            continuation_mode: ContinuationMode::BlockText,
        }
    }
}

/// Text compared against the title when deciding whether a line continues it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContinuationMode {
    /// The whole starting block's text, identical on every step
    #[default]
    BlockText,
    /// Each candidate line's own text
    CandidateText,
}
