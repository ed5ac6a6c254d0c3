//! Structured recommendation payload returned by the analyzer endpoint.

use serde::{Deserialize, Serialize};

/// Output of one successful analysis call. Overwritten wholesale by the next
/// successful call, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub key_skills: Vec<String>,
    pub recommendations: Vec<String>,
    /// Fit confidence reported by the analyzer, 0.0 – 1.0.
    pub score: f32,
}
