//! The one state container behind the workflow surface.
//!
//! Created fresh per session and mutated only by the step handlers in
//! [`crate::workflow`]; nothing mutates it in the background.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;

use crate::models::analysis::AnalysisResult;

/// The step currently in flight. The surface disables triggers while a step
/// is running; the core itself assumes at most one in-flight call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Analyzing,
    Generating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    None,
    Success,
    Error,
}

/// Outcome of the most recent step, rendered verbatim by the surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// An uploaded logo: the raw blob plus the metadata the generator needs to
/// forward it as a multipart file field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl AssetUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Only images are accepted as logos.
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    /// Renders the blob as a `data:` URL the surface can hand straight to an
    /// image element.
    pub fn preview(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            BASE64.encode(&self.bytes)
        )
    }
}

/// Everything the workflow surface reads and the step handlers write.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowState {
    pub job_title: String,
    pub job_description: String,
    pub asset: Option<AssetUpload>,
    pub asset_preview: Option<String>,
    pub analysis_result: Option<AnalysisResult>,
    pub download_reference: Option<String>,
    pub phase: Phase,
    pub status: Status,
}

impl WorkflowState {
    /// Restores every field to its default. Idempotent: resetting twice is
    /// the same as resetting once.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
