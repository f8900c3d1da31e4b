//! # Effect Runner
//!
//! Performs the I/O that `update()` asks for and turns the outcome into the
//! completion `Action` to feed back into `update()`. One remote round trip
//! per effect; no retry, no local timeout.

use std::path::Path;

use log::{info, warn};

use crate::core::action::{
    ANALYSIS_PROMPT, Action, AnalysisJob, ChatJob, Effect, TranslationJob,
};
use crate::services::{CompletionRequest, Language, ServiceError, Services, VisionRequest};

/// Runs a request effect. Returns `None` for effects with no I/O.
pub async fn perform(effect: Effect, services: &Services) -> Option<Action> {
    match effect {
        Effect::RequestChat(job) => Some(Action::ChatCompleted(run_chat(job, services).await)),
        Effect::RequestTranslation(job) => {
            let index = job.index;
            let language = job.target;
            let result = run_translation(job, services).await;
            Some(Action::TranslationCompleted {
                index,
                language,
                result,
            })
        }
        Effect::RequestAnalysis(job) => {
            Some(Action::AnalysisCompleted(run_analysis(job, services).await))
        }
        Effect::None | Effect::Quit => None,
    }
}

async fn run_chat(job: ChatJob, services: &Services) -> Result<Option<String>, ServiceError> {
    info!(
        "Chat request via {}: {} turns",
        services.chat.name(),
        job.turns.len()
    );
    let request = CompletionRequest {
        turns: &job.turns,
        model: &job.model,
        max_output_tokens: job.max_output_tokens,
        temperature: job.temperature,
    };
    services
        .chat
        .complete(request)
        .await
        .inspect_err(|e| warn!("Chat completion failed: {}", e))
}

async fn run_translation(job: TranslationJob, services: &Services) -> Result<String, ServiceError> {
    info!(
        "Translating message {} into {}",
        job.index,
        job.target.code()
    );
    services
        .translator
        .translate(&job.text, Language::SOURCE, job.target)
        .await
        .inspect_err(|e| warn!("Translation of message {} failed: {}", job.index, e))
}

/// Read → upload → analyze. The first failing step ends the flow.
async fn run_analysis(job: AnalysisJob, services: &Services) -> Result<Option<String>, ServiceError> {
    let bytes = tokio::fs::read(&job.path).await.map_err(|e| {
        ServiceError::Network(format!("failed to read {}: {e}", job.path.display()))
    })?;
    let file_name = file_name_of(&job.path);
    info!("Analyzing {} ({} bytes)", file_name, bytes.len());

    let image_url = services
        .image_host
        .upload(&file_name, bytes)
        .await
        .inspect_err(|e| warn!("Upload of {} failed: {}", file_name, e))?;
    info!("Uploaded {} to {}", file_name, image_url);

    services
        .vision
        .analyze(VisionRequest {
            prompt: ANALYSIS_PROMPT,
            image_url: &image_url,
            model: &job.model,
            max_output_tokens: job.max_output_tokens,
        })
        .await
        .inspect_err(|e| warn!("Vision analysis failed: {}", e))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}
