use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Who authored a chat turn. Fixed when the turn is created.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Label shown in the message border.
    pub fn label(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "you",
            Role::Assistant => "nyaya",
        }
    }
}

/// A single `{role, content}` turn as sent to the chat-completion service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Languages a message can be translated into. English is the source
/// language of every message and doubles as "translation off".
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Bn,
    Te,
    Mr,
}

impl Language {
    /// The language every message is written in.
    pub const SOURCE: Language = Language::En;

    /// ISO 639-1 code used on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Bn => "bn",
            Language::Te => "te",
            Language::Mr => "mr",
        }
    }

    /// Returns a human-readable label for display
    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi",
            Language::Bn => "Bengali",
            Language::Te => "Telugu",
            Language::Mr => "Marathi",
        }
    }

    /// Cycles to the next language (wraps around)
    pub fn next(self) -> Language {
        match self {
            Language::En => Language::Hi,
            Language::Hi => Language::Bn,
            Language::Bn => Language::Te,
            Language::Te => Language::Mr,
            Language::Mr => Language::En,
        }
    }

    /// Parses a language code such as `"hi"`. Case-insensitive.
    pub fn from_code(code: &str) -> Option<Language> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "hi" => Some(Language::Hi),
            "bn" => Some(Language::Bn),
            "te" => Some(Language::Te),
            "mr" => Some(Language::Mr),
            _ => None,
        }
    }

    pub fn is_source(self) -> bool {
        self == Language::SOURCE
    }
}
