//! Request types for the HTTP boundary

use serde::{Deserialize, Serialize};

/// Ingestion request: raw extracted document text.
///
/// File-format extraction (PDF/DOC/DOCX/TXT) happens upstream of this
/// service; the boundary receives plain text only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    /// Extracted document text
    pub text: String,
}

/// Question request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// Free-text question
    pub question: String,
}
