//! Title box accumulation.
//!
//! A title frequently wraps onto several lines. Starting from the line that
//! was matched as the title, successive lines are merged into one box while
//! they keep looking like title text.

use super::options::{ContinuationMode, MatchOptions};
use super::similarity::continuation_ratio;
use crate::model::{BoundingBox, TextLine};

/// Merge `lines[0]` and its continuation lines into one box.
///
/// `block_text` is the text of the whole block the lines belong to. Height is
/// summed over merged lines and width is the widest merged line, so the box
/// never shrinks below the starting line. Returns `None` when there is no
/// starting line.
pub fn accumulate_title(
    title: &str,
    block_text: &str,
    lines: &[TextLine],
    options: &MatchOptions,
) -> Option<BoundingBox> {
    let (start, successors) = lines.split_first()?;

    let x = start.x;
    let y = start.y;
    let mut height = start.height;
    let mut width = start.width;

    for next in successors {
        let compared = match options.continuation_mode {
            ContinuationMode::BlockText => block_text,
            ContinuationMode::CandidateText => next.text.as_str(),
        };
        match continuation_ratio(title, compared) {
            Some(ratio) if ratio > options.continuation_threshold => {
                height += next.height;
                width = width.max(next.width);
            }
            _ => break,
        }
    }

    Some(BoundingBox::from_rect(x, y, width, height))
}
