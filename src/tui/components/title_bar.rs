//! # TitleBar Component
//!
//! Top status line: application name, chat model, active translation
//! language and the latest status message. Purely presentational; every
//! field is a prop filled from `App` by the parent.
//!
//! Formats, in priority order:
//!
//! 1. **Busy**: `"Nyaya (model: gpt-4o-mini) | Language: Hindi | ⠙ Waiting for reply..."`
//! 2. **Status message**: `"Nyaya (model: gpt-4o-mini) | Language: Hindi | Ready"`
//! 3. **Default**: `"Nyaya (model: gpt-4o-mini) | Language: Hindi"`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;
use crate::tui::components::message_list::SPINNER;

pub struct TitleBar {
    pub model_name: String,
    pub language_label: &'static str,
    pub status_message: String,
    pub is_busy: bool,
    pub spinner_frame: usize,
}

impl TitleBar {
    pub fn new(
        model_name: String,
        language_label: &'static str,
        status_message: String,
        is_busy: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            model_name,
            language_label,
            status_message,
            is_busy,
            spinner_frame,
        }
    }

    fn text(&self) -> String {
        let base = format!(
            "Nyaya (model: {}) | Language: {}",
            self.model_name, self.language_label
        );
        if self.is_busy {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            format!("{base} | {spinner} {}", self.status_message)
        } else if self.status_message.is_empty() {
            base
        } else {
            format!("{base} | {}", self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(self.text(), Style::default().fg(Color::Cyan)));
        frame.render_widget(line, area);
    }
}
