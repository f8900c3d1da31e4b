//! Stand-in used when no chat API key is available.
//!
//! The session still starts and every other panel works; chat and document
//! analysis fail with `ServiceError::NotConfigured` until a key is supplied.

use async_trait::async_trait;

use crate::services::{
    ChatProvider, CompletionRequest, ServiceError, VisionProvider, VisionRequest,
};

pub struct Unconfigured {
    reason: String,
}

impl Unconfigured {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ChatProvider for Unconfigured {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn complete(&self, _request: CompletionRequest<'_>) -> Result<Option<String>, ServiceError> {
        Err(ServiceError::NotConfigured(self.reason.clone()))
    }
}

#[async_trait]
impl VisionProvider for Unconfigured {
    async fn analyze(&self, _request: VisionRequest<'_>) -> Result<Option<String>, ServiceError> {
        Err(ServiceError::NotConfigured(self.reason.clone()))
    }
}
