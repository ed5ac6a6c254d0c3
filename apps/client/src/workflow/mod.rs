//! The workflow surface's step handlers.
//!
//! Each handler owns the full lifecycle of one user action: validate input,
//! call the service, and merge the outcome back into [`WorkflowState`]. No
//! error escapes a handler; every failure lands in `state.status`, and state
//! is only mutated after a successful response has been fully parsed.

pub mod state;

use crate::errors::StepError;
use crate::models::analysis::AnalysisResult;
use crate::models::generation::GenerationResult;
use crate::service_client::ServiceClient;
use crate::workflow::state::{AssetUpload, Phase, Status, WorkflowState};

// ────────────────────────────────────────────────────────────────────────────
// User-visible messages
// ────────────────────────────────────────────────────────────────────────────

const MSG_MISSING_TITLE: &str = "Please enter a job title.";
const MSG_MISSING_DESCRIPTION: &str = "Please enter a job description.";
const MSG_LOGO_OK: &str = "Logo uploaded successfully!";
const MSG_LOGO_INVALID: &str = "Please upload a valid image file.";
const MSG_ANALYSIS_DONE: &str = "Job description analyzed successfully!";
const MSG_ANALYSIS_FAILED: &str = "An error occurred while analyzing the job description.";
const MSG_CV_READY: &str = "CV generated successfully! You can now download it.";
const MSG_CV_FAILED: &str = "An error occurred while generating the CV.";

// ────────────────────────────────────────────────────────────────────────────
// Workflow
// ────────────────────────────────────────────────────────────────────────────

/// Hands a resolved download address to the hosting environment (a browser
/// tab, the system opener, ...). Side-effect only.
pub trait DownloadOpener {
    fn open_url(&self, url: &str);
}

/// One authenticated session's workflow: the state container plus the step
/// handlers that drive it. The surface triggers one step at a time and
/// renders `state` after each.
pub struct Workflow {
    client: ServiceClient,
    pub state: WorkflowState,
}

impl Workflow {
    pub fn new(client: ServiceClient) -> Self {
        Self {
            client,
            state: WorkflowState::default(),
        }
    }

    /// Stores an uploaded logo and its preview. Non-image uploads are refused
    /// and leave any previously attached asset in place.
    pub fn attach_asset(&mut self, asset: AssetUpload) {
        if asset.is_image() {
            self.state.asset_preview = Some(asset.preview());
            self.state.asset = Some(asset);
            self.state.status = Status::success(MSG_LOGO_OK);
        } else {
            self.state.status = Status::error(MSG_LOGO_INVALID);
        }
    }

    /// Runs one analysis attempt against the current form values. On success
    /// the previous analysis result is overwritten wholesale; on failure it
    /// is left untouched.
    pub async fn run_analysis(&mut self) {
        self.state.status.clear();
        self.state.phase = Phase::Analyzing;

        let outcome = self.analyze().await;

        self.state.phase = Phase::Idle;
        match outcome {
            Ok(result) => {
                self.state.analysis_result = Some(result);
                self.state.status = Status::success(MSG_ANALYSIS_DONE);
            }
            Err(e) => {
                self.state.status = Status::error(e.user_message(MSG_ANALYSIS_FAILED));
            }
        }
    }

    async fn analyze(&self) -> Result<AnalysisResult, StepError> {
        if self.state.job_description.trim().is_empty() {
            return Err(StepError::Validation(MSG_MISSING_DESCRIPTION.to_string()));
        }

        self.client
            .analyze_job(&self.state.job_title, &self.state.job_description)
            .await
    }

    /// Runs one generation attempt. The document is AI-optimized exactly when
    /// an analysis result is present in the state at this moment; generation
    /// itself never requires one.
    pub async fn run_generation(&mut self) {
        self.state.status.clear();
        self.state.phase = Phase::Generating;

        let outcome = self.generate().await;

        self.state.phase = Phase::Idle;
        match outcome {
            Ok(result) => {
                // "Accepted but not yet downloadable" keeps whatever reference
                // an earlier call produced.
                if result.download_reference.is_some() {
                    self.state.download_reference = result.download_reference;
                }
                self.state.status = Status::success(result.summary_message);
            }
            Err(e) => {
                self.state.status = Status::error(e.user_message(MSG_CV_FAILED));
            }
        }
    }

    async fn generate(&self) -> Result<GenerationResult, StepError> {
        if self.state.job_title.trim().is_empty() {
            return Err(StepError::Validation(MSG_MISSING_TITLE.to_string()));
        }

        let document = self
            .client
            .generate_cv(
                &self.state.job_title,
                &self.state.job_description,
                self.state.analysis_result.as_ref(),
                self.state.asset.as_ref(),
            )
            .await?;

        Ok(match document.pdf_url {
            Some(reference) => GenerationResult {
                download_reference: Some(reference),
                summary_message: MSG_CV_READY.to_string(),
            },
            None => GenerationResult {
                download_reference: None,
                summary_message: format!(
                    "CV processing completed for \"{}\".",
                    document.job_title
                ),
            },
        })
    }

    /// Opens the generated document if one is downloadable; no-op otherwise.
    pub fn open_download(&self, opener: &dyn DownloadOpener) {
        if let Some(reference) = &self.state.download_reference {
            opener.open_url(&self.client.download_url(reference));
        }
    }

    /// Clears the whole surface back to its initial state.
    pub fn reset(&mut self) {
        self.state.reset();
    }
}
