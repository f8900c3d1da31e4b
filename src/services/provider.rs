use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::types::{ChatTurn, Language};

/// Errors that can occur while talking to a remote collaborator.
/// Every flow collapses these into one fixed user-facing message, so the
/// variants only need to be precise enough for the log.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Collaborator has no credentials or endpoint. Raised before any I/O.
    NotConfigured(String),
    /// Network-level failure (timeout, DNS, connection refused) or a local
    /// read of the file being uploaded.
    Network(String),
    /// Service answered with a non-2xx HTTP status.
    Api { status: u16, message: String },
    /// Service answered 2xx but reported failure in the body.
    Upstream { status: u16, message: String },
    /// Failed to decode the service's response.
    Parse(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::NotConfigured(msg) => write!(f, "not configured: {msg}"),
            ServiceError::Network(msg) => write!(f, "network error: {msg}"),
            ServiceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ServiceError::Upstream { status, message } => {
                write!(f, "upstream error (status {status}): {message}")
            }
            ServiceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Everything a chat provider needs to fulfill one completion.
pub struct CompletionRequest<'a> {
    pub turns: &'a [ChatTurn],
    pub model: &'a str,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Requests a single non-streamed completion.
    /// `Ok(None)` means the service answered but carried no text.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Option<String>, ServiceError>;
}

/// Everything a vision provider needs to describe one image.
pub struct VisionRequest<'a> {
    pub prompt: &'a str,
    pub image_url: &'a str,
    pub model: &'a str,
    pub max_output_tokens: u32,
}

#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Asks the model to respond to `prompt` about the image at `image_url`.
    async fn analyze(&self, request: VisionRequest<'_>) -> Result<Option<String>, ServiceError>;
}

#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Stores the bytes and returns a publicly fetchable URL.
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ServiceError>;
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, ServiceError>;
}

/// The remote collaborators the session talks to, built once at startup.
#[derive(Clone)]
pub struct Services {
    pub chat: Arc<dyn ChatProvider>,
    pub vision: Arc<dyn VisionProvider>,
    pub image_host: Arc<dyn ImageHost>,
    pub translator: Arc<dyn Translator>,
}
