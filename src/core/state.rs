//! # Application State
//!
//! Core session state for Nyaya. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── transcript: Transcript               // greeting + chat turns
//! ├── draft: String                        // chat input draft
//! ├── chat_loading: bool                   // chat request in flight
//! ├── analysis_loading: bool               // document analysis in flight
//! ├── error: Option<String>                // last flow error, overwritten
//! ├── language: Language                   // translation target
//! ├── analysis: Option<String>             // document analysis result
//! ├── lawyers: Option<Vec<LawyerRecord>>   // last lawyer search
//! ├── show_lawyers: bool                   // lawyer results visible
//! ├── pending_translations: HashSet<usize> // message indices being translated
//! ├── status_message: String               // status bar text
//! ├── chat: ChatOptions                    // model + sampling settings
//! └── directory: Arc<dyn LawyerDirectory>  // lawyer lookup
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::HashSet;
use std::sync::Arc;

use crate::core::config::{
    DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_VISION_MODEL,
    ResolvedConfig,
};
use crate::core::lawyers::{LawyerDirectory, LawyerRecord, StaticDirectory};
use crate::core::transcript::Transcript;
use crate::services::Language;

/// Model and sampling settings for chat and vision requests.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOptions {
    pub model: String,
    pub vision_model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub system_prompt: Option<String>,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            system_prompt: None,
        }
    }
}

pub struct App {
    pub transcript: Transcript,
    pub draft: String,
    pub chat_loading: bool,
    pub analysis_loading: bool,
    pub error: Option<String>,
    pub language: Language,
    pub analysis: Option<String>,
    pub lawyers: Option<Vec<LawyerRecord>>,
    pub show_lawyers: bool,
    pub pending_translations: HashSet<usize>,
    pub status_message: String,
    pub chat: ChatOptions,
    pub directory: Arc<dyn LawyerDirectory>,
}

impl App {
    pub fn new(directory: Arc<dyn LawyerDirectory>, chat: ChatOptions) -> Self {
        Self {
            transcript: Transcript::new(),
            draft: String::new(),
            chat_loading: false,
            analysis_loading: false,
            error: None,
            language: Language::default(),
            analysis: None,
            lawyers: None,
            show_lawyers: false,
            pending_translations: HashSet::new(),
            status_message: String::from("Welcome to Nyaya!"),
            chat,
            directory,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let chat = ChatOptions {
            model: config.model_name.clone(),
            vision_model: config.vision_model.clone(),
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
            system_prompt: config.system_prompt.clone(),
        };
        let mut app = Self::new(Arc::new(StaticDirectory), chat);
        app.language = config.language;
        app
    }

    /// True while any remote request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.chat_loading || self.analysis_loading || !self.pending_translations.is_empty()
    }
}
