//! Data model for annotation generation.
//!
//! These types sit between the block source (pdf2xml output), the matcher
//! and the annotation table. Geometry is kept in the extractor's pixel space
//! as plain `f64` values.

mod annotation;
mod metadata;
mod page;

pub use annotation::{AnnotationRecord, BoundingBox, Label, Match};
pub use metadata::DocumentMetadata;
pub use page::{Page, TextBlock, TextLine};
