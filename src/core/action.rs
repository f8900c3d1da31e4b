//! # Actions
//!
//! Everything that can happen in Nyaya becomes an `Action`.
//! User presses Enter? That's `Action::SendMessage(text)`.
//! The chat service answers? That's `Action::ChatCompleted(result)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing the I/O (if any) the caller
//! must perform next. No side effects here. I/O happens in `effects.rs`.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//!                                              │
//!                  perform(effect) ◄───────────┘
//!                        │
//!                        └──►  completion Action  →  update() …
//! ```
//!
//! Single-flight rules live here, not in the UI: a chat or analysis request
//! is refused while one is pending, and a message with a translation in
//! flight cannot be toggled again until it lands.

use std::path::PathBuf;

use log::{debug, info, warn};

use crate::core::lawyers::LawyerQuery;
use crate::core::state::App;
use crate::core::transcript::Message;
use crate::services::{ChatTurn, Language, ServiceError};

pub const CHAT_FALLBACK: &str = "Sorry, I couldn't generate a response.";
pub const CHAT_ERROR: &str = "Failed to get a response from the assistant. Please try again.";
pub const TRANSLATION_ERROR: &str = "Translation failed. Please try again.";
pub const ANALYSIS_PROMPT: &str = "Analyze this legal document and provide a detailed report.";
pub const ANALYSIS_FALLBACK: &str = "No analysis could be generated for this document.";
pub const ANALYSIS_ERROR: &str = "Failed to analyze the document. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Input box content changed.
    UpdateDraft(String),
    SendMessage(String),
    ChatCompleted(Result<Option<String>, ServiceError>),
    SelectLanguage(Language),
    CycleLanguage,
    ToggleTranslation(usize),
    TranslationCompleted {
        index: usize,
        language: Language,
        result: Result<String, ServiceError>,
    },
    AnalyzeDocument(PathBuf),
    AnalysisCompleted(Result<Option<String>, ServiceError>),
    SearchLawyers(LawyerQuery),
    DismissError,
    Quit,
}

/// Snapshot of everything a chat request needs, detached from `App`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatJob {
    pub turns: Vec<ChatTurn>,
    pub model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationJob {
    pub index: usize,
    pub text: String,
    pub target: Language,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisJob {
    pub path: PathBuf,
    pub model: String,
    pub max_output_tokens: u32,
}

/// What the caller must do after `update()` returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    RequestChat(ChatJob),
    RequestTranslation(TranslationJob),
    RequestAnalysis(AnalysisJob),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::UpdateDraft(text) => {
            app.draft = text;
            Effect::None
        }
        Action::SendMessage(text) => send_message(app, text),
        Action::ChatCompleted(result) => {
            if !app.chat_loading {
                warn!("Chat completion arrived with no request pending, ignoring");
                return Effect::None;
            }
            app.chat_loading = false;
            match result {
                Ok(reply) => {
                    let text = reply.unwrap_or_else(|| CHAT_FALLBACK.to_string());
                    app.transcript.push(Message::assistant(text));
                    app.status_message = String::from("Ready");
                }
                Err(e) => {
                    warn!("Chat request failed: {}", e);
                    app.error = Some(CHAT_ERROR.to_string());
                    app.status_message = String::from("Chat failed");
                }
            }
            Effect::None
        }
        Action::SelectLanguage(language) => {
            select_language(app, language);
            Effect::None
        }
        Action::CycleLanguage => {
            let next = app.language.next();
            select_language(app, next);
            Effect::None
        }
        Action::ToggleTranslation(index) => toggle_translation(app, index),
        Action::TranslationCompleted {
            index,
            language,
            result,
        } => {
            app.pending_translations.remove(&index);
            if language != app.language {
                debug!(
                    "Discarding {} translation of message {}: language changed to {}",
                    language.code(),
                    index,
                    app.language.code()
                );
                return Effect::None;
            }
            match result {
                Ok(translated) => match app.transcript.get_mut(index) {
                    Some(message) if !message.has_translation() => {
                        message.apply_translation(translated, language);
                        app.status_message = format!("Translated to {}", language.label());
                    }
                    Some(_) => debug!("Message {} already has a translation", index),
                    None => warn!("Translation for missing message {}", index),
                },
                Err(e) => {
                    warn!("Translation of message {} failed: {}", index, e);
                    app.error = Some(TRANSLATION_ERROR.to_string());
                }
            }
            Effect::None
        }
        Action::AnalyzeDocument(path) => analyze_document(app, path),
        Action::AnalysisCompleted(result) => {
            if !app.analysis_loading {
                warn!("Analysis result arrived with no request pending, ignoring");
                return Effect::None;
            }
            app.analysis_loading = false;
            match result {
                Ok(report) => {
                    app.analysis = Some(report.unwrap_or_else(|| ANALYSIS_FALLBACK.to_string()));
                    app.status_message = String::from("Analysis complete");
                }
                Err(e) => {
                    warn!("Document analysis failed: {}", e);
                    app.error = Some(ANALYSIS_ERROR.to_string());
                    app.status_message = String::from("Analysis failed");
                }
            }
            Effect::None
        }
        Action::SearchLawyers(query) => {
            let results = app.directory.search(&query);
            info!("Lawyer search returned {} records", results.len());
            app.lawyers = Some(results);
            app.show_lawyers = true;
            Effect::None
        }
        Action::DismissError => {
            app.error = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn send_message(app: &mut App, text: String) -> Effect {
    if text.trim().is_empty() {
        return Effect::None;
    }
    if app.chat_loading {
        debug!("SendMessage ignored: chat request already pending");
        return Effect::None;
    }

    app.transcript.push(Message::user(text));
    app.draft.clear();
    app.chat_loading = true;
    app.error = None;
    app.status_message = String::from("Thinking...");

    Effect::RequestChat(ChatJob {
        turns: app.transcript.to_turns(app.chat.system_prompt.as_deref()),
        model: app.chat.model.clone(),
        max_output_tokens: app.chat.max_output_tokens,
        temperature: app.chat.temperature,
    })
}

fn select_language(app: &mut App, language: Language) {
    if language == app.language {
        return;
    }
    let cleared = app.transcript.invalidate_translations();
    info!(
        "Language changed {} -> {}, cleared {} cached translation(s)",
        app.language.code(),
        language.code(),
        cleared
    );
    app.language = language;
    app.status_message = format!("Language: {}", language.label());
}

fn toggle_translation(app: &mut App, index: usize) -> Effect {
    let language = app.language;
    if language.is_source() {
        return Effect::None;
    }
    if app.pending_translations.contains(&index) {
        debug!("Translation of message {} already in flight", index);
        return Effect::None;
    }
    let Some(message) = app.transcript.get_mut(index) else {
        warn!("ToggleTranslation for missing message {}", index);
        return Effect::None;
    };

    if message.swap_translation() {
        return Effect::None;
    }

    let text = message.content.clone();
    app.pending_translations.insert(index);
    app.error = None;
    Effect::RequestTranslation(TranslationJob {
        index,
        text,
        target: language,
    })
}

fn analyze_document(app: &mut App, path: PathBuf) -> Effect {
    if path.as_os_str().is_empty() {
        return Effect::None;
    }
    if app.analysis_loading {
        debug!("AnalyzeDocument ignored: analysis already pending");
        return Effect::None;
    }

    app.analysis_loading = true;
    app.error = None;
    app.analysis = None;
    app.status_message = String::from("Analyzing document...");

    Effect::RequestAnalysis(AnalysisJob {
        path,
        model: app.chat.vision_model.clone(),
        max_output_tokens: app.chat.max_output_tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::GREETING;
    use crate::services::Role;
    use crate::test_support::test_app;

    fn network_error() -> ServiceError {
        ServiceError::Network("connection refused".into())
    }

    #[test]
    fn test_send_message_appends_synchronously() {
        let mut app = test_app();
        app.draft = "What is bail?".into();

        let effect = update(&mut app, Action::SendMessage("What is bail?".into()));

        assert_eq!(app.transcript.len(), 2);
        assert_eq!(app.transcript.messages[1], Message::user("What is bail?"));
        assert!(app.chat_loading);
        assert!(app.draft.is_empty());
        let Effect::RequestChat(job) = effect else {
            panic!("expected RequestChat, got {effect:?}");
        };
        assert_eq!(job.turns.len(), 2);
        assert_eq!(job.turns[0].content, GREETING);
        assert_eq!(job.turns[1].role, Role::User);
        assert_eq!(job.model, "test-model");
    }

    #[test]
    fn test_send_message_keeps_text_verbatim() {
        let mut app = test_app();
        update(&mut app, Action::SendMessage("  spaced out  ".into()));
        assert_eq!(app.transcript.messages[1].content, "  spaced out  ");
    }

    #[test]
    fn test_send_message_rejects_blank() {
        let mut app = test_app();
        let effect = update(&mut app, Action::SendMessage("   \n".into()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.transcript.len(), 1);
        assert!(!app.chat_loading);
    }

    #[test]
    fn test_send_message_while_pending_is_noop() {
        let mut app = test_app();
        update(&mut app, Action::SendMessage("first".into()));
        let effect = update(&mut app, Action::SendMessage("second".into()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.transcript.len(), 2);
    }

    #[test]
    fn test_send_message_clears_prior_error() {
        let mut app = test_app();
        app.error = Some("old".into());
        update(&mut app, Action::SendMessage("hi".into()));
        assert!(app.error.is_none());
    }

    #[test]
    fn test_chat_success_appends_reply() {
        let mut app = test_app();
        update(&mut app, Action::SendMessage("What is bail?".into()));
        update(&mut app, Action::ChatCompleted(Ok(Some("Bail is...".into()))));

        assert_eq!(app.transcript.len(), 3);
        assert_eq!(app.transcript.messages[2], Message::assistant("Bail is..."));
        assert!(!app.chat_loading);
        assert!(app.error.is_none());
    }

    #[test]
    fn test_chat_empty_reply_uses_fallback() {
        let mut app = test_app();
        update(&mut app, Action::SendMessage("hi".into()));
        update(&mut app, Action::ChatCompleted(Ok(None)));
        assert_eq!(app.transcript.messages[2].content, CHAT_FALLBACK);
    }

    #[test]
    fn test_chat_failure_keeps_user_turn() {
        let mut app = test_app();
        update(&mut app, Action::SendMessage("hi".into()));
        update(&mut app, Action::ChatCompleted(Err(network_error())));

        assert_eq!(app.transcript.len(), 2);
        assert_eq!(app.error.as_deref(), Some(CHAT_ERROR));
        assert!(!app.chat_loading);
    }

    #[test]
    fn test_stale_chat_completion_ignored() {
        let mut app = test_app();
        update(&mut app, Action::ChatCompleted(Ok(Some("late".into()))));
        assert_eq!(app.transcript.len(), 1);
    }

    #[test]
    fn test_toggle_in_english_is_noop() {
        let mut app = test_app();
        let before = app.transcript.clone();
        let effect = update(&mut app, Action::ToggleTranslation(0));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.transcript, before);
        assert!(app.pending_translations.is_empty());
    }

    #[test]
    fn test_toggle_requests_translation_once() {
        let mut app = test_app();
        app.language = Language::Hi;

        let effect = update(&mut app, Action::ToggleTranslation(0));
        assert_eq!(
            effect,
            Effect::RequestTranslation(TranslationJob {
                index: 0,
                text: GREETING.into(),
                target: Language::Hi,
            })
        );
        assert!(app.pending_translations.contains(&0));

        // In-flight guard
        assert_eq!(update(&mut app, Action::ToggleTranslation(0)), Effect::None);
    }

    #[test]
    fn test_toggle_out_of_range_is_noop() {
        let mut app = test_app();
        app.language = Language::Te;
        assert_eq!(update(&mut app, Action::ToggleTranslation(7)), Effect::None);
        assert!(app.pending_translations.is_empty());
    }

    #[test]
    fn test_translation_swap_round_trip() {
        let mut app = test_app();
        app.transcript.messages[0] = Message::assistant("Hello");
        app.language = Language::Hi;

        update(&mut app, Action::ToggleTranslation(0));
        update(
            &mut app,
            Action::TranslationCompleted {
                index: 0,
                language: Language::Hi,
                result: Ok("नमस्ते".into()),
            },
        );
        let msg = &app.transcript.messages[0];
        assert_eq!(msg.content, "नमस्ते");
        assert_eq!(msg.translated_content.as_deref(), Some("Hello"));
        assert!(app.pending_translations.is_empty());

        // Show original: pure swap, no request
        assert_eq!(update(&mut app, Action::ToggleTranslation(0)), Effect::None);
        let msg = &app.transcript.messages[0];
        assert_eq!(msg.content, "Hello");
        assert_eq!(msg.translated_content.as_deref(), Some("नमस्ते"));

        assert_eq!(update(&mut app, Action::ToggleTranslation(0)), Effect::None);
        assert_eq!(app.transcript.messages[0].content, "नमस्ते");
    }

    #[test]
    fn test_translation_failure_leaves_message() {
        let mut app = test_app();
        app.language = Language::Bn;
        update(&mut app, Action::ToggleTranslation(0));
        update(
            &mut app,
            Action::TranslationCompleted {
                index: 0,
                language: Language::Bn,
                result: Err(ServiceError::Upstream {
                    status: 403,
                    message: "bad pair".into(),
                }),
            },
        );
        assert_eq!(app.transcript.messages[0], Message::assistant(GREETING));
        assert_eq!(app.error.as_deref(), Some(TRANSLATION_ERROR));
        assert!(app.pending_translations.is_empty());
    }

    #[test]
    fn test_language_change_invalidates_cached_translations() {
        let mut app = test_app();
        app.language = Language::Hi;
        update(&mut app, Action::ToggleTranslation(0));
        update(
            &mut app,
            Action::TranslationCompleted {
                index: 0,
                language: Language::Hi,
                result: Ok("नमस्ते".into()),
            },
        );

        update(&mut app, Action::SelectLanguage(Language::Mr));
        assert_eq!(app.transcript.messages[0], Message::assistant(GREETING));

        // Next toggle fetches a Marathi translation
        let effect = update(&mut app, Action::ToggleTranslation(0));
        assert!(matches!(
            effect,
            Effect::RequestTranslation(TranslationJob { target: Language::Mr, .. })
        ));
    }

    #[test]
    fn test_in_flight_translation_discarded_after_language_change() {
        let mut app = test_app();
        app.language = Language::Hi;
        update(&mut app, Action::ToggleTranslation(0));
        update(&mut app, Action::CycleLanguage);
        assert_eq!(app.language, Language::Bn);

        update(
            &mut app,
            Action::TranslationCompleted {
                index: 0,
                language: Language::Hi,
                result: Ok("नमस्ते".into()),
            },
        );
        assert!(!app.transcript.messages[0].has_translation());
        assert!(app.pending_translations.is_empty());
    }

    #[test]
    fn test_selecting_same_language_keeps_cache() {
        let mut app = test_app();
        app.language = Language::Hi;
        app.transcript.messages[0].apply_translation("नमस्ते".into(), Language::Hi);
        update(&mut app, Action::SelectLanguage(Language::Hi));
        assert!(app.transcript.messages[0].has_translation());
    }

    #[test]
    fn test_analyze_document_starts_pending() {
        let mut app = test_app();
        app.analysis = Some("old report".into());
        app.error = Some("old error".into());

        let effect = update(&mut app, Action::AnalyzeDocument("notice.png".into()));

        assert!(app.analysis_loading);
        assert!(app.analysis.is_none());
        assert!(app.error.is_none());
        assert!(matches!(effect, Effect::RequestAnalysis(AnalysisJob { ref path, .. }) if path == &PathBuf::from("notice.png")));

        // Single flight
        assert_eq!(update(&mut app, Action::AnalyzeDocument("other.png".into())), Effect::None);
    }

    #[test]
    fn test_analyze_document_requires_path() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::AnalyzeDocument(PathBuf::new())), Effect::None);
        assert!(!app.analysis_loading);
    }

    #[test]
    fn test_analysis_success_and_fallback() {
        let mut app = test_app();
        update(&mut app, Action::AnalyzeDocument("a.png".into()));
        update(&mut app, Action::AnalysisCompleted(Ok(Some("Report".into()))));
        assert_eq!(app.analysis.as_deref(), Some("Report"));
        assert!(!app.analysis_loading);

        update(&mut app, Action::AnalyzeDocument("b.png".into()));
        update(&mut app, Action::AnalysisCompleted(Ok(None)));
        assert_eq!(app.analysis.as_deref(), Some(ANALYSIS_FALLBACK));
    }

    #[test]
    fn test_analysis_failure_leaves_result_unset() {
        let mut app = test_app();
        update(&mut app, Action::AnalyzeDocument("a.png".into()));
        update(&mut app, Action::AnalysisCompleted(Err(network_error())));
        assert!(app.analysis.is_none());
        assert!(!app.analysis_loading);
        assert_eq!(app.error.as_deref(), Some(ANALYSIS_ERROR));
    }

    #[test]
    fn test_search_lawyers_always_three() {
        let mut app = test_app();
        app.lawyers = Some(vec![]);
        for _ in 0..2 {
            update(&mut app, Action::SearchLawyers(LawyerQuery::default()));
            assert_eq!(app.lawyers.as_ref().map(Vec::len), Some(3));
            assert!(app.show_lawyers);
        }
    }

    #[test]
    fn test_dismiss_error_and_quit() {
        let mut app = test_app();
        app.error = Some("boom".into());
        assert_eq!(update(&mut app, Action::DismissError), Effect::None);
        assert!(app.error.is_none());
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
