//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::lawyers::StaticDirectory;
use crate::core::state::{App, ChatOptions};
use crate::services::{
    ChatProvider, CompletionRequest, ImageHost, Language, ServiceError, Services, Translator,
    VisionProvider, VisionRequest,
};

/// Chat provider that replays a canned reply and counts calls.
pub struct FakeChat {
    pub reply: Mutex<Result<Option<String>, ServiceError>>,
    pub calls: AtomicUsize,
    pub last_turn_count: AtomicUsize,
}

#[async_trait]
impl ChatProvider for FakeChat {
    fn name(&self) -> &str {
        "fake"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Option<String>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_turn_count
            .store(request.turns.len(), Ordering::SeqCst);
        self.reply.lock().unwrap().clone()
    }
}

pub struct FakeVision {
    pub reply: Mutex<Result<Option<String>, ServiceError>>,
    pub calls: AtomicUsize,
    pub last_image_url: Mutex<Option<String>>,
}

#[async_trait]
impl VisionProvider for FakeVision {
    async fn analyze(&self, request: VisionRequest<'_>) -> Result<Option<String>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_image_url.lock().unwrap() = Some(request.image_url.to_string());
        self.reply.lock().unwrap().clone()
    }
}

/// Image host that answers `https://img.test/<file name>` unless told to fail.
pub struct FakeImageHost {
    pub reply: Mutex<Result<(), ServiceError>>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl ImageHost for FakeImageHost {
    async fn upload(&self, file_name: &str, _bytes: Vec<u8>) -> Result<String, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .lock()
            .unwrap()
            .clone()
            .map(|()| format!("https://img.test/{file_name}"))
    }
}

pub struct FakeTranslator {
    pub reply: Mutex<Result<String, ServiceError>>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(
        &self,
        _text: &str,
        _source: Language,
        _target: Language,
    ) -> Result<String, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.lock().unwrap().clone()
    }
}

/// One fake per collaborator, kept around so tests can inspect call counts
/// after handing `services()` to the code under test.
pub struct FakeServices {
    pub chat: Arc<FakeChat>,
    pub vision: Arc<FakeVision>,
    pub image_host: Arc<FakeImageHost>,
    pub translator: Arc<FakeTranslator>,
}

impl FakeServices {
    pub fn new() -> Self {
        Self {
            chat: Arc::new(FakeChat {
                reply: Mutex::new(Ok(Some("ok".into()))),
                calls: AtomicUsize::new(0),
                last_turn_count: AtomicUsize::new(0),
            }),
            vision: Arc::new(FakeVision {
                reply: Mutex::new(Ok(Some("report".into()))),
                calls: AtomicUsize::new(0),
                last_image_url: Mutex::new(None),
            }),
            image_host: Arc::new(FakeImageHost {
                reply: Mutex::new(Ok(())),
                calls: AtomicUsize::new(0),
            }),
            translator: Arc::new(FakeTranslator {
                reply: Mutex::new(Ok("translated".into())),
                calls: AtomicUsize::new(0),
            }),
        }
    }

    pub fn services(&self) -> Services {
        Services {
            chat: self.chat.clone(),
            vision: self.vision.clone(),
            image_host: self.image_host.clone(),
            translator: self.translator.clone(),
        }
    }
}

/// Creates a test App backed by the static lawyer directory.
pub fn test_app() -> App {
    App::new(
        Arc::new(StaticDirectory),
        ChatOptions {
            model: "test-model".to_string(),
            ..ChatOptions::default()
        },
    )
}
