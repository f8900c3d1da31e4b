//! # Transcript
//!
//! The ordered list of chat turns shown to the user. Append-only, except that
//! a single message may swap its displayed text with its cached translation.

use serde::Serialize;

use crate::services::{ChatTurn, Language, Role};

/// Synthetic assistant turn every session starts with.
pub const GREETING: &str = "Hello! How can I assist you with your legal questions today?";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    /// Text currently displayed.
    pub content: String,
    /// The other side of the translation pair, when one is cached.
    #[serde(rename = "translatedContent", skip_serializing_if = "Option::is_none")]
    pub translated_content: Option<String>,
    /// Language of the cached translation.
    #[serde(skip)]
    pub translated_into: Option<Language>,
    /// True while `content` holds the translation rather than the original.
    #[serde(skip)]
    pub showing_translation: bool,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            translated_content: None,
            translated_into: None,
            showing_translation: false,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn has_translation(&self) -> bool {
        self.translated_content.is_some()
    }

    /// The untranslated text, whichever side of the pair it is on.
    pub fn original(&self) -> &str {
        match (&self.translated_content, self.showing_translation) {
            (Some(original), true) => original,
            _ => &self.content,
        }
    }

    /// Stores a fresh translation: the current text moves to
    /// `translated_content` and the translation becomes `content`.
    pub fn apply_translation(&mut self, translated: String, language: Language) {
        let original = std::mem::replace(&mut self.content, translated);
        self.translated_content = Some(original);
        self.translated_into = Some(language);
        self.showing_translation = true;
    }

    /// Swaps `content` and `translated_content` in place.
    /// Returns false when there is nothing cached to swap with.
    pub fn swap_translation(&mut self) -> bool {
        let Some(other) = self.translated_content.as_mut() else {
            return false;
        };
        std::mem::swap(&mut self.content, other);
        self.showing_translation = !self.showing_translation;
        true
    }

    /// Restores the original text and forgets the cached translation.
    pub fn clear_translation(&mut self) {
        if self.showing_translation
            && let Some(original) = self.translated_content.take()
        {
            self.content = original;
        }
        self.translated_content = None;
        self.translated_into = None;
        self.showing_translation = false;
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Transcript {
    pub messages: Vec<Message>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    /// Creates a transcript holding only the assistant greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::assistant(GREETING)],
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Message> {
        self.messages.get_mut(index)
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Chat context for the completion service, built from original texts so
    /// a translated view never leaks into the prompt.
    pub fn to_turns(&self, system_prompt: Option<&str>) -> Vec<ChatTurn> {
        system_prompt
            .map(|prompt| ChatTurn::new(Role::System, prompt))
            .into_iter()
            .chain(
                self.messages
                    .iter()
                    .map(|m| ChatTurn::new(m.role, m.original())),
            )
            .collect()
    }

    /// Drops every cached translation, restoring original texts.
    /// Returns how many messages were affected.
    pub fn invalidate_translations(&mut self) -> usize {
        let mut cleared = 0;
        for message in self.messages.iter_mut().filter(|m| m.has_translation()) {
            message.clear_translation();
            cleared += 1;
        }
        cleared
    }
}
