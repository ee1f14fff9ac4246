use crate::prompt::GenerationRequest;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Longest slice of a raw error body quoted back to the user.
const MAX_BODY_EXCERPT: usize = 300;

/// generateContent request body
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Wrap the instruction as a single user turn.
    pub fn from_prompt(request: &GenerationRequest) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.as_str().to_string()),
                    thought: None,
                }],
            }],
        }
    }
}

/// generateContent response body
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Set on reasoning summaries, which are not part of the answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: Option<u16>,
    message: Option<String>,
    status: Option<String>,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    reason: Option<String>,
}

/// `ErrorInfo` reason sent with a 400 when the API key itself is wrong.
const API_KEY_INVALID: &str = "API_KEY_INVALID";

impl ApiError {
    fn has_reason(&self, reason: &str) -> bool {
        self.details
            .iter()
            .any(|detail| detail.reason.as_deref() == Some(reason))
    }
}

/// Why a call to the generation service failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The request never got an HTTP answer.
    Network,
    /// The service is busy or timed out.
    Overloaded,
    /// The API key ran out of quota or hit a rate limit.
    QuotaExhausted,
    /// The service refused the request as malformed (bad model name, bad body).
    BadRequest,
    /// The API key was missing, wrong, or lacks permission.
    Unauthorized,
    /// Any other server-side failure.
    Server,
    /// A status or body this client does not understand.
    Unexpected,
}

impl FailureKind {
    /// Whether pressing the button again later may succeed.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            FailureKind::Network | FailureKind::Overloaded | FailureKind::Server
        )
    }

    /// What the user can do about it.
    pub fn hint(self) -> &'static str {
        match self {
            FailureKind::Network => "Check the internet connection and try again.",
            FailureKind::Overloaded => {
                "The AI service is busy right now. Wait a moment and try again."
            }
            FailureKind::QuotaExhausted => {
                "The API quota is used up. Wait for it to reset or check the plan limits."
            }
            FailureKind::BadRequest => {
                "The service rejected the request. Trying again will not help; check the model name."
            }
            FailureKind::Unauthorized => "Check that the API key is correct and enabled.",
            FailureKind::Server => "Something went wrong on the service side. Try again later.",
            FailureKind::Unexpected => "The service answered in an unexpected way. Check the base URL and the model name.",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            FailureKind::Network => "network error",
            FailureKind::Overloaded => "service overloaded",
            FailureKind::QuotaExhausted => "quota exhausted",
            FailureKind::BadRequest => "malformed request",
            FailureKind::Unauthorized => "unauthorized",
            FailureKind::Server => "server error",
            FailureKind::Unexpected => "unexpected response",
        };
        f.write_str(text)
    }
}

/// A failed generation, as shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationError {
    /// The call itself failed.
    #[error("The AI service failed ({failure}): {message}")]
    Remote {
        failure: FailureKind,
        status: Option<u16>,
        message: String,
    },

    /// The call succeeded but carried no usable text.
    #[error("The AI service sent back no usable text: {reason}")]
    Empty { reason: String },
}

impl GenerationError {
    pub fn network(message: impl Into<String>) -> Self {
        GenerationError::Remote {
            failure: FailureKind::Network,
            status: None,
            message: message.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationError::Remote { failure, .. } => failure.is_retryable(),
            GenerationError::Empty { .. } => true,
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            GenerationError::Remote { failure, .. } => failure.hint(),
            GenerationError::Empty { .. } => "Try again, maybe with slightly different words.",
        }
    }

    /// Error text plus what to do about it.
    pub fn user_message(&self) -> String {
        format!("{} {}", self, self.hint())
    }

    /// What a kid sees after a failed click.
    ///
    /// Only invites another click when one may succeed.
    pub fn notice(&self) -> String {
        if self.is_retryable() {
            format!("Something went wrong. Shall we try again? {}", self.user_message())
        } else {
            format!(
                "Something went wrong that another click will not fix. {}",
                self.user_message()
            )
        }
    }
}

/// Build the generateContent URL for a model.
///
/// Accepts both `gemini-2.5-flash` and `models/gemini-2.5-flash`.
pub fn endpoint(base_url: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model.trim_start_matches("models/")
    )
}

/// Pull the answer text out of a successful response.
///
/// Joins the non-thought text parts of the first candidate. Blocked prompts,
/// missing candidates, and blank answers become [`GenerationError::Empty`].
pub fn extract_text(response: &GenerateContentResponse) -> Result<String, GenerationError> {
    let Some(candidate) = response.candidates.first() else {
        let reason = match response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            Some(block) => format!("the prompt was blocked ({block})"),
            None => "the response had no candidates".to_string(),
        };
        return Err(GenerationError::Empty { reason });
    };

    let text: String = candidate
        .content
        .as_ref()
        .map(|content| {
            content
                .parts
                .iter()
                .filter(|part| part.thought != Some(true))
                .filter_map(|part| part.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = match candidate.finish_reason.as_deref() {
            Some(finish) if finish != "STOP" => format!("generation stopped early ({finish})"),
            _ => "the answer was empty".to_string(),
        };
        return Err(GenerationError::Empty { reason });
    }

    Ok(text)
}

/// Decode a 2xx body, then extract its text.
pub fn parse_success(body: &str) -> Result<String, GenerationError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| GenerationError::Remote {
            failure: FailureKind::Unexpected,
            status: Some(200),
            message: format!("could not decode the response: {e}"),
        })?;
    extract_text(&response)
}

/// Map an HTTP status and the service's error status name to a failure kind.
pub fn classify_status(status: u16, api_status: Option<&str>) -> FailureKind {
    match api_status {
        Some("UNAVAILABLE") | Some("DEADLINE_EXCEEDED") => return FailureKind::Overloaded,
        Some("RESOURCE_EXHAUSTED") => return FailureKind::QuotaExhausted,
        Some("INVALID_ARGUMENT") | Some("FAILED_PRECONDITION") | Some("NOT_FOUND") => {
            return FailureKind::BadRequest
        }
        Some("UNAUTHENTICATED") | Some("PERMISSION_DENIED") => return FailureKind::Unauthorized,
        _ => {}
    }

    match status {
        429 => FailureKind::QuotaExhausted,
        500 | 503 | 504 => FailureKind::Overloaded,
        400 | 404 => FailureKind::BadRequest,
        401 | 403 => FailureKind::Unauthorized,
        501..=599 => FailureKind::Server,
        _ => FailureKind::Unexpected,
    }
}

/// Turn a non-2xx answer into a [`GenerationError`].
///
/// Prefers the message from the service's error envelope. Falls back to an
/// excerpt of the raw body, then to the bare status code.
pub fn classify_failure(status: u16, body: &str) -> GenerationError {
    let api_error = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error);

    let failure = match &api_error {
        Some(error) if error.has_reason(API_KEY_INVALID) => FailureKind::Unauthorized,
        _ => classify_status(status, api_error.as_ref().and_then(|e| e.status.as_deref())),
    };

    let message = api_error
        .as_ref()
        .and_then(|e| e.message.clone())
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            let excerpt: String = body.trim().chars().take(MAX_BODY_EXCERPT).collect();
            if excerpt.is_empty() {
                format!("HTTP status {status}")
            } else {
                excerpt
            }
        });

    GenerationError::Remote {
        failure,
        status: Some(api_error.and_then(|e| e.code).unwrap_or(status)),
        message,
    }
}
