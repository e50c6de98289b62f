//! Document chunk type

use serde::{Deserialize, Serialize};

/// Source tag recorded for chunks arriving through the upload boundary
pub const UPLOAD_SOURCE: &str = "upload";

/// A bounded-size slice of a document's text, produced by the chunker.
///
/// Immutable once created. Ordering within a document is preserved by the
/// ingestion loop but not persisted as an explicit index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text; never empty
    pub text: String,
    /// Where the chunk came from, stored as document metadata
    pub source_tag: String,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(text: impl Into<String>, source_tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_tag: source_tag.into(),
        }
    }

    /// Create a chunk tagged with the upload source
    pub fn from_upload(text: impl Into<String>) -> Self {
        Self::new(text, UPLOAD_SOURCE)
    }
}
