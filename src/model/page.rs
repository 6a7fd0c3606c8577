//! Page-level types.

use super::BoundingBox;
use serde::{Deserialize, Serialize};

/// A single extracted page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in pixels
    pub width: f64,

    /// Page height in pixels
    pub height: f64,

    /// Text blocks in extraction order
    pub blocks: Vec<TextBlock>,
}

impl Page {
    /// Create a new empty page with the given dimensions.
    pub fn new(number: u32, width: f64, height: f64) -> Self {
        Self {
            number,
            width,
            height,
            blocks: Vec::new(),
        }
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: TextBlock) {
        self.blocks.push(block);
    }

    /// Builder-style variant of [`Page::add_block`].
    pub fn with_block(mut self, block: TextBlock) -> Self {
        self.blocks.push(block);
        self
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the number of blocks on the page.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Get page dimensions as (width, height) tuple.
    pub fn dimensions(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

/// A contiguous text region made of one or more lines.
///
/// The block's position is the position of its first line. Lines after the
/// first are the successors walked when a title spans several lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Lines in reading order
    pub lines: Vec<TextLine>,
}

impl TextBlock {
    /// Create a block from its lines.
    pub fn new(lines: Vec<TextLine>) -> Self {
        Self { lines }
    }

    /// Create a block holding a single line.
    pub fn single(text: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(vec![TextLine::new(text, x, y, width, height)])
    }

    /// Add a line to the block.
    pub fn push_line(&mut self, line: TextLine) {
        self.lines.push(line);
    }

    /// Whitespace-joined text of every line.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// First line of the block, which carries its geometry.
    pub fn first_line(&self) -> Option<&TextLine> {
        self.lines.first()
    }

    /// Bounds of the first line, if any.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.first_line().map(TextLine::bounds)
    }

    /// Check if the block has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// One line of text with its position and size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Token texts joined by single spaces
    pub text: String,

    /// Left edge
    pub x: f64,

    /// Top edge
    pub y: f64,

    /// Line width
    pub width: f64,

    /// Line height
    pub height: f64,
}

impl TextLine {
    /// Create a new line.
    pub fn new(text: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            height,
        }
    }

    /// Absolute bounds of the line.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_rect(self.x, self.y, self.width, self.height)
    }
}
