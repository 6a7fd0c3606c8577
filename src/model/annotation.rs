//! Labels, bounding boxes and annotation rows.

use serde::{Deserialize, Serialize};

/// Structural label of an annotated region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    /// Document title
    Title,
    /// Basic or custom section heading
    Section,
}

impl Label {
    /// Label as written to the annotation table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Title => "TITLE",
            Label::Section => "SECTION",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Absolute pixel bounds of a region.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BoundingBox {
    /// Create a box from its corners.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Create a box from a top-left position and a size.
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }
}

/// A confirmed match produced by the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Structural label
    pub label: Label,

    /// Region covered by the match
    pub bbox: BoundingBox,

    /// Canonical label text (title or section string), not the raw block text
    pub content: String,
}

impl Match {
    /// Create a title match.
    pub fn title(bbox: BoundingBox, content: impl Into<String>) -> Self {
        Self {
            label: Label::Title,
            bbox,
            content: content.into(),
        }
    }

    /// Create a section match.
    pub fn section(bbox: BoundingBox, content: impl Into<String>) -> Self {
        Self {
            label: Label::Section,
            bbox,
            content: content.into(),
        }
    }
}

/// One row of the annotation table.
///
/// Field order is the column order of the output table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub page_image_name: String,
    pub page_width: f64,
    pub page_height: f64,
    pub label: Label,
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
    pub content: String,
}

impl AnnotationRecord {
    /// Build a record from page identity and a match.
    pub fn new(
        page_image_name: impl Into<String>,
        page_width: f64,
        page_height: f64,
        m: Match,
    ) -> Self {
        Self {
            page_image_name: page_image_name.into(),
            page_width,
            page_height,
            label: m.label,
            xmin: m.bbox.xmin,
            ymin: m.bbox.ymin,
            xmax: m.bbox.xmax,
            ymax: m.bbox.ymax,
            content: m.content,
        }
    }

    /// Bounds of the annotated region.
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::new(self.xmin, self.ymin, self.xmax, self.ymax)
    }
}
