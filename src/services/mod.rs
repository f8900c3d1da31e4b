//! # Remote Collaborators
//!
//! Traits for every external service the session depends on, plus their HTTP
//! implementations. Nothing in here knows about the transcript or the UI.
//!
//! ```text
//! ChatProvider    ──►  POST {base}/chat/completions
//! VisionProvider  ──►  POST {base}/chat/completions (image_url content part)
//! ImageHost       ──►  POST {upload_url} (multipart)
//! Translator      ──►  GET  {base}/get?q=..&langpair=en|hi
//! ```

pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{
    ChatProvider, CompletionRequest, ImageHost, ServiceError, Services, Translator,
    VisionProvider, VisionRequest,
};
pub use providers::{HttpImageHost, MyMemoryTranslator, OpenAiProvider, Unconfigured};
pub use types::{ChatTurn, Language, Role};
