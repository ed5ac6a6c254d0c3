//! Generator endpoint payload and the step's outcome type.

use serde::{Deserialize, Serialize};

/// The `data` payload of a successful generator response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDocument {
    pub job_title: String,
    /// Path of the rendered PDF, present once the document is downloadable.
    /// Absent means the request was accepted but no artifact exists yet.
    #[serde(default)]
    pub pdf_url: Option<String>,
}

/// What one generation attempt hands back to the surface: a download
/// reference when the document is ready, and the message to render either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub download_reference: Option<String>,
    pub summary_message: String,
}
