//! Per-document metadata describing the expected title and sections.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Expected content of one generated document.
///
/// Read from the document's `meta-<id>.json` record. All keys are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Document title
    pub title: String,

    /// Document identifier used in file and page image names
    #[serde(rename = "body")]
    pub body_id: String,

    /// Custom section headings in document order
    pub sections: Vec<String>,
}

impl DocumentMetadata {
    /// Create metadata directly.
    pub fn new(
        title: impl Into<String>,
        body_id: impl Into<String>,
        sections: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            title: title.into(),
            body_id: body_id.into(),
            sections: sections.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse metadata from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load metadata from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Metadata(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json).map_err(|e| match e {
            Error::Metadata(msg) => Error::Metadata(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Image name for a page of this document (1-indexed).
    pub fn page_image_name(&self, page_number: u32) -> String {
        format!("main-{}-{}.jpg", self.body_id, page_number)
    }
}
