//! OpenAI-compatible Chat Completions provider.
//!
//! Serves both chat and vision: a vision request is a chat request whose only
//! user message carries a text part and an `image_url` part. Any endpoint that
//! speaks `/chat/completions` (OpenAI, OpenRouter, Groq, a local server) works.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::services::{
    ChatProvider, ChatTurn, CompletionRequest, Role, ServiceError, VisionProvider, VisionRequest,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

// ============================================================================
// Chat Completions API Types
// ============================================================================

/// Message content: plain text for chat, typed parts for vision.
#[derive(Serialize, Debug, Clone)]
#[serde(untagged)]
enum Content {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type")]
enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize, Debug, Clone)]
struct ImageUrl {
    url: String,
}

#[derive(Serialize, Debug, Clone)]
struct ApiMessage {
    role: Role,
    content: Content,
}

/// The request body for `/chat/completions`
#[derive(Serialize, Debug)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ApiMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

// ============================================================================
// Translation Layer
// ============================================================================

fn turns_to_messages(turns: &[ChatTurn]) -> Vec<ApiMessage> {
    turns
        .iter()
        .map(|turn| ApiMessage {
            role: turn.role,
            content: Content::Text(turn.content.clone()),
        })
        .collect()
}

fn vision_message(prompt: &str, image_url: &str) -> ApiMessage {
    ApiMessage {
        role: Role::User,
        content: Content::Parts(vec![
            ContentPart::Text {
                text: prompt.to_string(),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: image_url.to_string(),
                },
            },
        ]),
    }
}

/// Pulls the first choice's text. Empty or whitespace-only text counts as absent.
fn first_choice_text(response: ChatCompletionResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|text| !text.trim().is_empty())
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct OpenAiProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Creates a new provider.
    ///
    /// # Arguments
    /// * `api_key` - Bearer token for the API
    /// * `base_url` - Optional custom base URL (defaults to OpenAI's API)
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn send_request(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ServiceError> {
        let json_body = serde_json::to_string(request)
            .map_err(|e| ServiceError::Parse(format!("Request serialization failed: {e}")))?;
        debug!("Chat completion request body: {} bytes", json_body.len());

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .body(json_body)
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        debug!("Chat completion response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Chat completion API error: {} - {}", status, err_body);
            return Err(ServiceError::Api {
                status,
                message: err_body,
            });
        }

        response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Option<String>, ServiceError> {
        let body = ChatCompletionRequest {
            model: request.model.to_string(),
            messages: turns_to_messages(request.turns),
            max_tokens: request.max_output_tokens,
            temperature: Some(request.temperature),
            stream: false,
        };

        info!(
            "Chat completion request: model={}, turns={}, max_tokens={}",
            request.model,
            body.messages.len(),
            body.max_tokens,
        );

        let response = self.send_request(&body).await?;
        Ok(first_choice_text(response))
    }
}

#[async_trait]
impl VisionProvider for OpenAiProvider {
    async fn analyze(&self, request: VisionRequest<'_>) -> Result<Option<String>, ServiceError> {
        let body = ChatCompletionRequest {
            model: request.model.to_string(),
            messages: vec![vision_message(request.prompt, request.image_url)],
            max_tokens: request.max_output_tokens,
            temperature: None,
            stream: false,
        };

        info!(
            "Vision request: model={}, image_url={}",
            request.model, request.image_url
        );

        let response = self.send_request(&body).await?;
        Ok(first_choice_text(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_to_messages_preserves_order_and_roles() {
        let turns = vec![
            ChatTurn::new(Role::Assistant, "Hello!"),
            ChatTurn::new(Role::User, "What is bail?"),
        ];
        let messages = turns_to_messages(&turns);
        assert_eq!(messages.len(), 2);
        assert!(matches!(messages[0].role, Role::Assistant));
        assert!(matches!(&messages[1].content, Content::Text(t) if t == "What is bail?"));
    }

    #[test]
    fn test_chat_request_serializes_correctly() {
        let request = ChatCompletionRequest {
            model: "test".to_string(),
            messages: turns_to_messages(&[ChatTurn::new(Role::User, "hi")]),
            max_tokens: 500,
            temperature: Some(0.5),
            stream: false,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""messages":[{"role":"user","content":"hi"}]"#));
        assert!(json.contains(r#""max_tokens":500"#));
        assert!(json.contains(r#""temperature":0.5"#));
        assert!(json.contains(r#""stream":false"#));
    }

    #[test]
    fn test_vision_message_serializes_parts() {
        let message = vision_message("Describe this", "https://img.example/a.png");
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(json["role"], "user");
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][0]["text"], "Describe this");
        assert_eq!(json["content"][1]["type"], "image_url");
        assert_eq!(json["content"][1]["image_url"]["url"], "https://img.example/a.png");
    }

    #[test]
    fn test_vision_request_omits_temperature() {
        let request = ChatCompletionRequest {
            model: "vision".to_string(),
            messages: vec![],
            max_tokens: 100,
            temperature: None,
            stream: false,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn test_first_choice_text_extracts_content() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Bail is..."}}]}"#,
        )
        .unwrap();
        assert_eq!(first_choice_text(response).as_deref(), Some("Bail is..."));
    }

    #[test]
    fn test_first_choice_text_missing_content_is_none() {
        let null_content: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert_eq!(first_choice_text(null_content), None);

        let no_choices: ChatCompletionResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(first_choice_text(no_choices), None);

        let blank: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"  "}}]}"#).unwrap();
        assert_eq!(first_choice_text(blank), None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let provider = OpenAiProvider::new("k".into(), Some("http://localhost:1234/v1/".into()));
        assert_eq!(provider.base_url, "http://localhost:1234/v1");
    }
}
