//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (any request outstanding): draws every ~80ms to animate the spinner.
//! - **Idle**: sleeps up to 500ms and only redraws on events.
//!
//! Request effects run on tokio tasks; each task sends its completion
//! `Action` back over an mpsc channel drained once per loop iteration.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::effects::perform;
use crate::core::lawyers::LawyerQuery;
use crate::core::state::App;
use crate::services::{
    ChatProvider, HttpImageHost, MyMemoryTranslator, OpenAiProvider, Services, Unconfigured,
    VisionProvider,
};
use crate::tui::component::EventHandler;
use crate::tui::components::panels::ACCEPTED_EXTENSIONS;
use crate::tui::components::{InputBox, InputEvent, MessageListState, Tab};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub tab: Tab,
    pub message_list: MessageListState,
    pub chat_input: InputBox,
    pub document_input: InputBox,
    /// Scroll offset of the analysis report
    pub document_scroll: u16,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            tab: Tab::Chat,
            message_list: MessageListState::new(),
            chat_input: InputBox::new(
                "Ask (Enter send · Ctrl+T translate · Ctrl+L language · Tab switch)",
                "Type a legal question...",
            ),
            document_input: InputBox::new("Document path (Enter to analyze)", "/path/to/document.png"),
            document_scroll: 0,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste, Hide);
    }
}

/// Build the remote collaborators from a resolved config.
///
/// A missing API key or upload URL does not stop startup; the affected
/// operations fail with a not-configured error and the user sees the
/// usual failure message.
pub fn build_services(config: &ResolvedConfig) -> Services {
    let chat: Arc<dyn ChatProvider>;
    let vision: Arc<dyn VisionProvider>;
    match &config.api_key {
        Some(key) => {
            let provider = Arc::new(OpenAiProvider::new(
                key.clone(),
                Some(config.chat_base_url.clone()),
            ));
            chat = provider.clone();
            vision = provider;
        }
        None => {
            warn!(
                "No API key configured (NYAYA_API_KEY / OPENAI_API_KEY); chat and analysis are disabled"
            );
            let unconfigured = Arc::new(Unconfigured::new("no API key configured"));
            chat = unconfigured.clone();
            vision = unconfigured;
        }
    }

    let upload_url = config.upload_url.clone().unwrap_or_else(|| {
        warn!("No upload URL configured (NYAYA_UPLOAD_URL); document analysis is disabled");
        String::new()
    });

    Services {
        chat,
        vision,
        image_host: Arc::new(HttpImageHost::new(upload_url)),
        translator: Arc::new(MyMemoryTranslator::new(Some(
            config.translation_base_url.clone(),
        ))),
    }
}

/// True when the path names a file type the Document tab accepts.
pub fn is_accepted_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
}

/// Run an effect on a tokio task and send its completion back to the loop.
fn spawn_effect(effect: Effect, services: &Services, tx: &mpsc::Sender<Action>) {
    if matches!(effect, Effect::None | Effect::Quit) {
        return;
    }
    debug!("Spawning effect: {:?}", effect);
    let services = services.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        if let Some(action) = perform(effect, &services).await
            && tx.send(action).is_err()
        {
            warn!("Failed to deliver effect result: receiver dropped");
        }
    });
}

/// Feed an action through the reducer and start whatever it asks for.
/// Returns true when the app should exit.
fn dispatch(
    app: &mut App,
    action: Action,
    services: &Services,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match update(app, action) {
        Effect::Quit => true,
        effect => {
            spawn_effect(effect, services, tx);
            false
        }
    }
}

/// Map a TUI event to the action it requests, given the current tab.
/// Tab-local events (editing, scrolling) are applied to `tui` directly.
fn handle_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::NextTab => {
            tui.tab = tui.tab.next();
            return None;
        }
        TuiEvent::PrevTab => {
            tui.tab = tui.tab.prev();
            return None;
        }
        TuiEvent::CycleLanguage => return Some(Action::CycleLanguage),
        TuiEvent::Escape => return app.error.is_some().then_some(Action::DismissError),
        _ => {}
    }

    match tui.tab {
        Tab::Chat => handle_chat_event(app, tui, event),
        Tab::Document => handle_document_event(app, tui, event),
        Tab::Lawyers => matches!(event, TuiEvent::Submit)
            .then(|| Action::SearchLawyers(LawyerQuery::default())),
        Tab::Forms | Tab::Livestreams => None,
    }
}

fn handle_chat_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    let message_count = app.transcript.len();
    match event {
        TuiEvent::ToggleTranslation => tui
            .message_list
            .target_index(message_count)
            .map(Action::ToggleTranslation),
        TuiEvent::CursorUp => {
            tui.message_list.select_previous(message_count);
            None
        }
        TuiEvent::CursorDown => {
            tui.message_list.select_next(message_count);
            None
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(event);
            None
        }
        // Keep the draft in the box until the pending reply lands
        TuiEvent::Submit if app.chat_loading => None,
        _ => match tui.chat_input.handle_event(event)? {
            InputEvent::Submit(text) => {
                tui.message_list.selected_index = None;
                tui.message_list.stick_to_bottom = true;
                Some(Action::SendMessage(text))
            }
            InputEvent::ContentChanged => Some(Action::UpdateDraft(tui.chat_input.buffer.clone())),
        },
    }
}

fn handle_document_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::ScrollUp | TuiEvent::CursorUp => {
            tui.document_scroll = tui.document_scroll.saturating_sub(1);
            None
        }
        TuiEvent::ScrollDown | TuiEvent::CursorDown => {
            tui.document_scroll = tui.document_scroll.saturating_add(1);
            None
        }
        TuiEvent::ScrollPageUp => {
            tui.document_scroll = tui.document_scroll.saturating_sub(10);
            None
        }
        TuiEvent::ScrollPageDown => {
            tui.document_scroll = tui.document_scroll.saturating_add(10);
            None
        }
        TuiEvent::Submit if app.analysis_loading => None,
        TuiEvent::Submit => {
            let path = PathBuf::from(tui.document_input.buffer.trim());
            if !is_accepted_document(&path) {
                tui.document_input.title = format!(
                    "Document path (accepted: {})",
                    ACCEPTED_EXTENSIONS.join(", ")
                );
                return None;
            }
            tui.document_input.clear();
            tui.document_scroll = 0;
            Some(Action::AnalyzeDocument(path))
        }
        _ => {
            tui.document_input.handle_event(event);
            None
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let services = build_services(&config);
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true;

    'main: loop {
        let animating = app.is_busy();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            if let Some(action) = handle_event(&app, &mut tui, &event)
                && dispatch(&mut app, action, &services, &tx)
            {
                break 'main;
            }
        }

        // Completions from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, action, &services, &tx) {
                break 'main;
            }
        }
    }

    info!("Nyaya shutting down");
    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::Message;
    use crate::services::Language;
    use crate::test_support::test_app;

    fn type_into(app: &App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            handle_event(app, tui, &TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_accepted_document_extensions() {
        assert!(is_accepted_document(Path::new("deed.PNG")));
        assert!(is_accepted_document(Path::new("/tmp/scan.jpeg")));
        assert!(!is_accepted_document(Path::new("contract.pdf")));
        assert!(!is_accepted_document(Path::new("noextension")));
    }

    #[test]
    fn test_tab_keys_cycle_tabs() {
        let app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(handle_event(&app, &mut tui, &TuiEvent::NextTab), None);
        assert_eq!(tui.tab, Tab::Document);
        handle_event(&app, &mut tui, &TuiEvent::PrevTab);
        handle_event(&app, &mut tui, &TuiEvent::PrevTab);
        assert_eq!(tui.tab, Tab::Lawyers);
    }

    #[test]
    fn test_chat_submit_sends_message() {
        let app = test_app();
        let mut tui = TuiState::new();
        type_into(&app, &mut tui, "Hi");
        assert_eq!(tui.chat_input.buffer, "Hi");

        let action = handle_event(&app, &mut tui, &TuiEvent::Submit);
        assert_eq!(action, Some(Action::SendMessage("Hi".into())));
        assert!(tui.chat_input.buffer.is_empty());
    }

    #[test]
    fn test_chat_submit_held_while_loading() {
        let mut app = test_app();
        app.chat_loading = true;
        let mut tui = TuiState::new();
        type_into(&app, &mut tui, "Next question");

        assert_eq!(handle_event(&app, &mut tui, &TuiEvent::Submit), None);
        assert_eq!(tui.chat_input.buffer, "Next question");
    }

    #[test]
    fn test_translate_key_targets_latest_then_selection() {
        let mut app = test_app();
        app.language = Language::Hi;
        app.transcript.push(Message::user("What is bail?"));
        let mut tui = TuiState::new();

        let action = handle_event(&app, &mut tui, &TuiEvent::ToggleTranslation);
        assert_eq!(action, Some(Action::ToggleTranslation(1)));

        handle_event(&app, &mut tui, &TuiEvent::CursorUp);
        let action = handle_event(&app, &mut tui, &TuiEvent::ToggleTranslation);
        assert_eq!(action, Some(Action::ToggleTranslation(0)));
    }

    #[test]
    fn test_escape_dismisses_only_when_error_shown() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(handle_event(&app, &mut tui, &TuiEvent::Escape), None);

        app.error = Some("boom".into());
        assert_eq!(
            handle_event(&app, &mut tui, &TuiEvent::Escape),
            Some(Action::DismissError)
        );
    }

    #[test]
    fn test_document_submit_filters_extensions() {
        let app = test_app();
        let mut tui = TuiState::new();
        tui.tab = Tab::Document;

        type_into(&app, &mut tui, "notes.txt");
        assert_eq!(handle_event(&app, &mut tui, &TuiEvent::Submit), None);
        assert!(tui.document_input.title.contains("accepted"));
        assert_eq!(tui.document_input.buffer, "notes.txt");

        tui.document_input.clear();
        type_into(&app, &mut tui, "lease.jpg");
        assert_eq!(
            handle_event(&app, &mut tui, &TuiEvent::Submit),
            Some(Action::AnalyzeDocument(PathBuf::from("lease.jpg")))
        );
    }

    #[test]
    fn test_lawyers_tab_enter_searches() {
        let app = test_app();
        let mut tui = TuiState::new();
        tui.tab = Tab::Lawyers;
        assert_eq!(
            handle_event(&app, &mut tui, &TuiEvent::Submit),
            Some(Action::SearchLawyers(LawyerQuery::default()))
        );
    }

    #[test]
    fn test_language_and_quit_work_on_any_tab() {
        let app = test_app();
        let mut tui = TuiState::new();
        tui.tab = Tab::Livestreams;
        assert_eq!(
            handle_event(&app, &mut tui, &TuiEvent::CycleLanguage),
            Some(Action::CycleLanguage)
        );
        assert_eq!(handle_event(&app, &mut tui, &TuiEvent::ForceQuit), Some(Action::Quit));
    }

    #[tokio::test]
    async fn test_dispatch_spawns_and_delivers_completion() {
        let fakes = crate::test_support::FakeServices::new();
        let services = fakes.services();
        let mut app = test_app();
        let (tx, rx) = mpsc::channel();

        assert!(!dispatch(&mut app, Action::SendMessage("Hi".into()), &services, &tx));
        assert!(app.chat_loading);

        let action = tokio::task::spawn_blocking(move || rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(action, Action::ChatCompleted(Ok(Some("ok".into()))));
        assert!(!dispatch(&mut app, action, &services, &tx));
        assert!(!app.chat_loading);
        assert_eq!(app.transcript.len(), 3);
    }

    fn unconfigured_config() -> ResolvedConfig {
        ResolvedConfig {
            language: Language::En,
            model_name: "gpt-4o-mini".into(),
            vision_model: "gpt-4o".into(),
            max_output_tokens: 500,
            temperature: 0.7,
            system_prompt: None,
            api_key: None,
            chat_base_url: "http://127.0.0.1:9/v1".into(),
            translation_base_url: "http://127.0.0.1:9".into(),
            upload_url: None,
        }
    }

    #[tokio::test]
    async fn test_build_services_without_key_or_upload_url_is_not_configured() {
        use crate::services::{CompletionRequest, ServiceError, VisionRequest};

        let services = build_services(&unconfigured_config());

        let chat = services
            .chat
            .complete(CompletionRequest {
                turns: &[],
                model: "gpt-4o-mini",
                max_output_tokens: 10,
                temperature: 0.7,
            })
            .await;
        assert!(matches!(chat, Err(ServiceError::NotConfigured(_))));

        let vision = services
            .vision
            .analyze(VisionRequest {
                prompt: "Explain this document",
                image_url: "https://img.example/a.png",
                model: "gpt-4o",
                max_output_tokens: 10,
            })
            .await;
        assert!(matches!(vision, Err(ServiceError::NotConfigured(_))));

        let upload = services.image_host.upload("deed.png", vec![1, 2, 3]).await;
        assert!(matches!(upload, Err(ServiceError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn test_build_services_with_key_uses_configured_endpoint() {
        use crate::services::{CompletionRequest, ServiceError};

        let config = ResolvedConfig {
            api_key: Some("sk-test".into()),
            ..unconfigured_config()
        };
        let services = build_services(&config);

        // Nothing listens on the discard port, so a real client fails on the network
        let chat = services
            .chat
            .complete(CompletionRequest {
                turns: &[],
                model: "gpt-4o-mini",
                max_output_tokens: 10,
                temperature: 0.7,
            })
            .await;
        assert!(matches!(chat, Err(ServiceError::Network(_))));
    }
}
