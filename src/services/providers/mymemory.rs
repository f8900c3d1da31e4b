//! MyMemory translation provider.
//!
//! The public endpoint needs no key. It reports application-level failures
//! inside a 200 response: `responseStatus` carries the real status code
//! (sometimes as a number, sometimes as a string) and `responseDetails` the
//! reason.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::services::{Language, ServiceError, Translator};

pub const DEFAULT_BASE_URL: &str = "https://api.mymemory.translated.net";

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct TranslationResponse {
    #[serde(default)]
    response_data: Option<ResponseData>,
    #[serde(default)]
    response_status: Option<serde_json::Value>,
    #[serde(default)]
    response_details: Option<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    #[serde(default)]
    translated_text: Option<String>,
}

/// Reads `responseStatus`, which arrives as `200` or `"403"` depending on the error path.
fn status_code(value: &serde_json::Value) -> Option<u16> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Maps a decoded body to the translated text or an upstream error.
fn interpret(body: TranslationResponse) -> Result<String, ServiceError> {
    let status = body.response_status.as_ref().and_then(status_code).unwrap_or(200);
    if status != 200 {
        let message = match body.response_details {
            Some(serde_json::Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => "translation service reported failure".to_string(),
        };
        return Err(ServiceError::Upstream { status, message });
    }

    body.response_data
        .and_then(|data| data.translated_text)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| ServiceError::Parse("response carried no translatedText".to_string()))
}

pub struct MyMemoryTranslator {
    base_url: String,
    client: reqwest::Client,
}

impl MyMemoryTranslator {
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, ServiceError> {
        let langpair = format!("{}|{}", source.code(), target.code());
        info!("Translation request: {} chars, langpair={}", text.len(), langpair);

        let response = self
            .client
            .get(format!("{}/get", self.base_url))
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        debug!("Translation response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Translation API error: {} - {}", status, err_body);
            return Err(ServiceError::Api {
                status,
                message: err_body,
            });
        }

        let body: TranslationResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))?;

        interpret(body).inspect_err(|e| warn!("Translation rejected: {}", e))
    }
}
