use crate::config::Settings;
use async_trait::async_trait;
use vibeplay_core::gemini::{
    classify_failure, endpoint, parse_success, GenerateContentRequest, GenerationError,
    API_KEY_HEADER,
};
use vibeplay_core::prompt::GenerationRequest;

/// Something that turns an instruction into model text.
#[async_trait]
pub trait Generator: Send + Sync {
    /// One request, one answer. No retries.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

/// Generator backed by the Gemini generateContent endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: endpoint(&settings.base_url, &settings.model),
            api_key: settings.api_key.clone(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let body = GenerateContentRequest::from_prompt(request);

        log::debug!("POST {} ({} prompt chars)", self.url, request.len());

        let response = self
            .http
            .post(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GenerationError::network(format!("failed to read the response: {e}")))?;

        log::debug!("Received status {} ({} bytes)", status, text.len());

        if !status.is_success() {
            let error = classify_failure(status.as_u16(), &text);
            log::warn!("Generation failed: {}", error);
            return Err(error);
        }

        parse_success(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::HeaderMap, http::StatusCode, routing::post, Router};
    use vibeplay_core::gemini::FailureKind;
    use vibeplay_core::prompt::PromptOptions;

    const OK_BODY: &str = r#"{"candidates": [{"content": {"parts": [{"text": "[explanation]\nHi\n[code]\n```html\n<b>hi</b>\n```"}]}, "finishReason": "STOP"}]}"#;
    const OVERLOADED_BODY: &str = r#"{"error": {"code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE"}}"#;

    const INVALID_KEY_BODY: &str = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT", "details": [{"@type": "type.googleapis.com/google.rpc.ErrorInfo", "reason": "API_KEY_INVALID"}]}}"#;

    /// Fake generation service. The model name picks the canned answer.
    async fn fake_service(Path(call): Path<String>, headers: HeaderMap) -> (StatusCode, String) {
        if headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) != Some("test-key") {
            return (StatusCode::BAD_REQUEST, INVALID_KEY_BODY.to_string());
        }

        match call.as_str() {
            "ok:generateContent" => (StatusCode::OK, OK_BODY.to_string()),
            "busy:generateContent" => (StatusCode::SERVICE_UNAVAILABLE, OVERLOADED_BODY.to_string()),
            "empty:generateContent" => (StatusCode::OK, "{}".to_string()),
            _ => (StatusCode::NOT_FOUND, String::new()),
        }
    }

    async fn spawn_service() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = Router::new().route("/models/{call}", post(fake_service));
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str, model: &str, api_key: &str) -> GeminiClient {
        GeminiClient::new(&Settings {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.to_string(),
            prompt: PromptOptions::default(),
        })
    }

    fn request() -> GenerationRequest {
        let idea = vibeplay_core::idea::UserIdea::validate("a", "b", "c").unwrap();
        vibeplay_core::prompt::build_prompt(&idea, &PromptOptions::default())
    }

    #[tokio::test]
    async fn test_successful_generation() {
        let base = spawn_service().await;
        let text = client(&base, "ok", "test-key")
            .generate(&request())
            .await
            .unwrap();
        assert!(text.contains("<b>hi</b>"));
    }

    #[tokio::test]
    async fn test_overloaded_keeps_kind_and_message() {
        let base = spawn_service().await;
        let err = client(&base, "busy", "test-key")
            .generate(&request())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            GenerationError::Remote {
                failure: FailureKind::Overloaded,
                status: Some(503),
                message: "The model is overloaded.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_wrong_key_is_unauthorized() {
        let base = spawn_service().await;
        let err = client(&base, "ok", "wrong")
            .generate(&request())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Remote {
                failure: FailureKind::Unauthorized,
                status: Some(400),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_empty_answer() {
        let base = spawn_service().await;
        let err = client(&base, "empty", "test-key")
            .generate(&request())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Empty { .. }));
    }

    #[tokio::test]
    async fn test_unknown_model_is_bad_request() {
        let base = spawn_service().await;
        let err = client(&base, "nope", "test-key")
            .generate(&request())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Remote {
                failure: FailureKind::BadRequest,
                status: Some(404),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}"), "ok", "test-key")
            .generate(&request())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Remote {
                failure: FailureKind::Network,
                status: None,
                ..
            }
        ));
    }

    #[test]
    fn test_client_url() {
        let client = client("https://example.test/v1beta", "models/gemini-2.5-flash", "k");
        assert_eq!(
            client.url(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
