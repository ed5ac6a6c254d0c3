//! Service client — the single point of entry for all CV-service HTTP calls.
//!
//! ARCHITECTURAL RULE: no other module talks to the analyzer or generator
//! endpoints directly. Both workflow steps go through this client, so the
//! envelope decoding and error mapping live in exactly one place.

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::errors::StepError;
use crate::models::analysis::AnalysisResult;
use crate::models::generation::GeneratedDocument;
use crate::workflow::state::AssetUpload;

/// Fixed origin of the CV service. Download references resolve against this;
/// there is no environment-driven override.
pub const SERVICE_ORIGIN: &str = "https://shiner-tender-virtually.ngrok-free.app";

const ANALYZE_PATH: &str = "/api/analyze-job";
const GENERATE_PATH: &str = "/api/generate-cv";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest<'a> {
    job_title: &'a str,
    job_description: &'a str,
}

/// Envelope every service endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: serde_json::Value,
}

/// The HTTP client shared by both workflow steps. One attempt per call; no
/// retries, no internal timeout beyond the transport's.
#[derive(Clone)]
pub struct ServiceClient {
    client: Client,
    origin: String,
}

impl ServiceClient {
    pub fn new() -> Self {
        Self::with_origin(SERVICE_ORIGIN)
    }

    /// Points the client at a non-default origin. Tests use this to target a
    /// local mock server.
    pub fn with_origin(origin: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            origin: origin.into(),
        }
    }

    /// Resolves a server-supplied download reference to a retrievable
    /// address.
    pub fn download_url(&self, reference: &str) -> String {
        format!("{}{}", self.origin, reference)
    }

    /// Sends a job posting to the analyzer and returns its structured
    /// recommendation payload.
    pub async fn analyze_job(
        &self,
        job_title: &str,
        job_description: &str,
    ) -> Result<AnalysisResult, StepError> {
        let response = self
            .client
            .post(format!("{}{}", self.origin, ANALYZE_PATH))
            .json(&AnalyzeRequest {
                job_title,
                job_description,
            })
            .send()
            .await?;

        let result: AnalysisResult = decode(response).await?;
        debug!(score = result.score, "analysis call succeeded");
        Ok(result)
    }

    /// Sends the form fields, the optional analysis payload, and the optional
    /// logo to the generator as one multipart request.
    pub async fn generate_cv(
        &self,
        job_title: &str,
        job_description: &str,
        analysis: Option<&AnalysisResult>,
        logo: Option<&AssetUpload>,
    ) -> Result<GeneratedDocument, StepError> {
        let mut form = Form::new()
            .text("jobTitle", job_title.to_string())
            .text("jobDescription", job_description.to_string());

        if let Some(analysis) = analysis {
            let encoded =
                serde_json::to_string(analysis).expect("analysis result serializes to JSON");
            form = form.text("analysisResult", encoded);
        }

        if let Some(logo) = logo {
            let part = Part::bytes(logo.bytes.to_vec())
                .file_name(logo.file_name.clone())
                .mime_str(&logo.content_type)
                .map_err(|e| {
                    StepError::Validation(format!("invalid logo content type: {e}"))
                })?;
            form = form.part("logo", part);
        }

        let response = self
            .client
            .post(format!("{}{}", self.origin, GENERATE_PATH))
            .multipart(form)
            .send()
            .await?;

        let document: GeneratedDocument = decode(response).await?;
        debug!(
            downloadable = document.pdf_url.is_some(),
            "generation call succeeded"
        );
        Ok(document)
    }
}

impl Default for ServiceClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Unwraps the service envelope into the typed payload, mapping every failure
/// mode onto the step error taxonomy.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StepError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        // Prefer the server's own message; fall back to the HTTP status line.
        let message = serde_json::from_str::<ApiEnvelope>(&body)
            .ok()
            .and_then(|envelope| envelope.message)
            .unwrap_or_else(|| {
                format!(
                    "Server error: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                )
            });
        return Err(StepError::Server {
            status: status.as_u16(),
            message,
        });
    }

    let envelope: ApiEnvelope = serde_json::from_str(&body)
        .map_err(|e| StepError::MalformedResponse(format!("invalid response body: {e}")))?;

    if !envelope.success {
        return Err(StepError::Server {
            status: status.as_u16(),
            message: envelope
                .message
                .unwrap_or_else(|| "Server returned unsuccessful response".to_string()),
        });
    }

    serde_json::from_value(envelope.data)
        .map_err(|e| StepError::MalformedResponse(format!("unexpected payload shape: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn analysis_fixture() -> AnalysisResult {
        AnalysisResult {
            key_skills: vec!["Go".to_string()],
            recommendations: vec!["Add Go".to_string()],
            score: 0.8,
        }
    }

    #[tokio::test]
    async fn test_analyze_job_sends_camel_case_json_and_parses_payload() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/analyze-job")
            .match_body(Matcher::Json(json!({
                "jobTitle": "Intern",
                "jobDescription": "Build services",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"success":true,"data":{"keySkills":["Go"],"recommendations":["Add Go"],"score":0.8}}"#,
            )
            .create_async()
            .await;

        let client = ServiceClient::with_origin(server.url());
        let result = client.analyze_job("Intern", "Build services").await.unwrap();

        assert_eq!(result, analysis_fixture());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_success_false_maps_to_server_error_with_server_message() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/analyze-job")
            .with_status(200)
            .with_body(r#"{"success":false,"message":"Description too short"}"#)
            .create_async()
            .await;

        let client = ServiceClient::with_origin(server.url());
        let err = client.analyze_job("Intern", "x").await.unwrap_err();

        match err {
            StepError::Server { status, message } => {
                assert_eq!(status, 200);
                assert_eq!(message, "Description too short");
            }
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_success_false_without_message_uses_fixed_fallback() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/analyze-job")
            .with_status(200)
            .with_body(r#"{"success":false}"#)
            .create_async()
            .await;

        let client = ServiceClient::with_origin(server.url());
        let err = client.analyze_job("Intern", "Build services").await.unwrap_err();

        match err {
            StepError::Server { message, .. } => {
                assert_eq!(message, "Server returned unsuccessful response");
            }
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_error_prefers_json_body_message() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/analyze-job")
            .with_status(422)
            .with_body(r#"{"success":false,"message":"Unprocessable job posting"}"#)
            .create_async()
            .await;

        let client = ServiceClient::with_origin(server.url());
        let err = client.analyze_job("Intern", "Build services").await.unwrap_err();

        match err {
            StepError::Server { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "Unprocessable job posting");
            }
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_error_with_opaque_body_falls_back_to_status_line() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/analyze-job")
            .with_status(503)
            .with_body("<html>upstream down</html>")
            .create_async()
            .await;

        let client = ServiceClient::with_origin(server.url());
        let err = client.analyze_job("Intern", "Build services").await.unwrap_err();

        match err {
            StepError::Server { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Server error: 503 Service Unavailable");
            }
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_payload_fields_map_to_malformed_response() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/analyze-job")
            .with_status(200)
            .with_body(r#"{"success":true,"data":{"keySkills":["Go"]}}"#)
            .create_async()
            .await;

        let client = ServiceClient::with_origin(server.url());
        let err = client.analyze_job("Intern", "Build services").await.unwrap_err();

        assert!(matches!(err, StepError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_generate_cv_posts_multipart_with_all_parts() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate-cv")
            .match_header(
                "content-type",
                Matcher::Regex("multipart/form-data.*".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="jobTitle""#.to_string()),
                Matcher::Regex(r#"name="jobDescription""#.to_string()),
                Matcher::Regex(r#"name="analysisResult""#.to_string()),
                Matcher::Regex(r#"name="logo"; filename="logo.png""#.to_string()),
            ]))
            .with_status(200)
            .with_body(r#"{"success":true,"data":{"jobTitle":"Intern","pdfUrl":"/files/1.pdf"}}"#)
            .create_async()
            .await;

        let client = ServiceClient::with_origin(server.url());
        let analysis = analysis_fixture();
        let logo = AssetUpload::new("logo.png", "image/png", Bytes::from_static(b"\x89PNG"));

        let document = client
            .generate_cv("Intern", "Build services", Some(&analysis), Some(&logo))
            .await
            .unwrap();

        assert_eq!(document.pdf_url.as_deref(), Some("/files/1.pdf"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_cv_without_optional_parts_parses_missing_pdf_url() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate-cv")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="jobTitle""#.to_string()),
                Matcher::Regex(r#"name="jobDescription""#.to_string()),
            ]))
            .with_status(200)
            .with_body(r#"{"success":true,"data":{"jobTitle":"Intern"}}"#)
            .create_async()
            .await;

        let client = ServiceClient::with_origin(server.url());
        let document = client
            .generate_cv("Intern", "", None, None)
            .await
            .unwrap();

        assert!(document.pdf_url.is_none());
        mock.assert_async().await;
    }

    #[test]
    fn test_download_url_joins_origin_and_reference() {
        let client = ServiceClient::with_origin("https://cv.example.com");
        assert_eq!(
            client.download_url("/files/1.pdf"),
            "https://cv.example.com/files/1.pdf"
        );
    }

    #[test]
    fn test_default_client_uses_fixed_service_origin() {
        let client = ServiceClient::new();
        assert!(client.download_url("/x").starts_with(SERVICE_ORIGIN));
    }
}
