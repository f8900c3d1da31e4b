//! # InputBox Component
//!
//! Single-line text field used for chat drafts and document paths.
//!
//! The buffer and cursor are internal state; the title and placeholder are
//! props set by the parent. When the text is wider than the box, the view
//! slides so the cursor stays visible.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Border (2) consumed horizontally by the bordered block.
const HORIZONTAL_OVERHEAD: u16 = 2;
/// Rows the input box occupies: one content line plus borders.
pub const INPUT_HEIGHT: u16 = 3;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Text content changed
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Byte offset of the cursor in `buffer`
    cursor: usize,
    /// Border title (Prop)
    pub title: String,
    /// Shown dimmed while the buffer is empty (Prop)
    pub placeholder: String,
    /// Rendered greyed out and without a cursor (Prop)
    pub disabled: bool,
}

impl InputBox {
    pub fn new(title: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            title: title.into(),
            placeholder: placeholder.into(),
            disabled: false,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Byte offset where the visible slice starts, chosen so the cursor fits.
    fn view_start(&self, inner_width: u16) -> usize {
        let max_cols = inner_width.saturating_sub(1) as usize;
        let mut start = 0;
        while self.buffer[start..self.cursor].width() > max_cols {
            start = next_char_boundary(&self.buffer, start);
        }
        start
    }

    fn insert_str(&mut self, text: &str) {
        // Single-line field: pasted newlines become spaces
        let flat = text.replace(['\r', '\n'], " ");
        self.buffer.insert_str(self.cursor, &flat);
        self.cursor += flat.len();
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let start = self.view_start(inner_width);

        let (text, style) = if self.buffer.is_empty() {
            (
                self.placeholder.as_str(),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )
        } else if self.disabled {
            (&self.buffer[start..], Style::default().fg(Color::DarkGray))
        } else {
            (&self.buffer[start..], Style::default().fg(Color::Green))
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(self.title.as_str());

        frame.render_widget(Paragraph::new(text).block(block).style(style), area);

        if !self.disabled {
            let col = self.buffer[start..self.cursor].width() as u16;
            let x = (area.x + 1 + col).min(area.right().saturating_sub(2));
            frame.set_cursor_position((x, area.y + 1));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.insert_str(text);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
