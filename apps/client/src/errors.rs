use thiserror::Error;

/// Everything a workflow step can fail with.
///
/// Every step catches these locally and converts them into the status line
/// rendered by the surface; no `StepError` escapes a step handler.
#[derive(Debug, Error)]
pub enum StepError {
    /// Missing or empty required user input. Never reaches the network.
    #[error("{0}")]
    Validation(String),

    /// Connectivity or transport-level fault from the HTTP client.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status, or a response that carried `success: false`.
    #[error("server error (status {status}): {message}")]
    Server { status: u16, message: String },

    /// 2xx response with `success: true` whose payload is missing required
    /// fields or is not valid JSON at all.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl StepError {
    /// The message shown to the user, selected in order: server-supplied
    /// text, then the step's generic fallback. Validation messages are
    /// already user-facing and pass through unchanged.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            StepError::Validation(message) => message.clone(),
            StepError::Server { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = StepError::Server {
            status: 422,
            message: "Job title too long".to_string(),
        };
        assert_eq!(err.user_message("fallback"), "Job title too long");
    }

    #[test]
    fn test_user_message_falls_back_when_server_text_empty() {
        let err = StepError::Server {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message("fallback"), "fallback");
    }

    #[test]
    fn test_user_message_passes_validation_text_through() {
        let err = StepError::Validation("Please enter a job title.".to_string());
        assert_eq!(err.user_message("fallback"), "Please enter a job title.");
    }

    #[test]
    fn test_user_message_uses_fallback_for_malformed_response() {
        let err = StepError::MalformedResponse("missing field `score`".to_string());
        assert_eq!(err.user_message("fallback"), "fallback");
    }
}
