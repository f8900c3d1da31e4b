//! # MessageList Component
//!
//! Scrollable view of the transcript.
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the transcript (props).
//! Heights are measured every frame because toggling a translation swaps the
//! text of a message already on screen.

use std::collections::HashSet;

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::Transcript;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

/// Braille spinner used while waiting for the assistant.
pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Scroll and selection state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    /// Rendered height of each message, from the last frame
    pub heights: Vec<u16>,
    /// Running totals of `heights`; entry `i` is the bottom edge of message `i`
    pub prefix_heights: Vec<u16>,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Message the translate key acts on; `None` means the latest one
    pub selected_index: Option<usize>,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            stick_to_bottom: true,
            selected_index: None,
            viewport_height: 0,
        }
    }

    fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Index the translate key should act on.
    pub fn target_index(&self, message_count: usize) -> Option<usize> {
        if message_count == 0 {
            return None;
        }
        Some(
            self.selected_index
                .map_or(message_count - 1, |i| i.min(message_count - 1)),
        )
    }

    /// Move the selection one message up, starting from the latest.
    pub fn select_previous(&mut self, message_count: usize) {
        if let Some(current) = self.target_index(message_count) {
            self.selected_index = Some(current.saturating_sub(1));
            self.scroll_to_selected();
        }
    }

    /// Move the selection one message down. Stepping past the last message
    /// clears the selection and re-pins the view to the bottom.
    pub fn select_next(&mut self, message_count: usize) {
        match self.selected_index {
            Some(i) if i + 1 < message_count => {
                self.selected_index = Some(i + 1);
                self.scroll_to_selected();
            }
            _ => {
                self.selected_index = None;
                self.stick_to_bottom = true;
            }
        }
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll the viewport so the selected message is fully visible.
    /// If the message is taller than the viewport, align its top edge.
    pub fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected_index else {
            return;
        };
        if idx >= self.prefix_heights.len() {
            return;
        }

        let item_top = if idx == 0 { 0 } else { self.prefix_heights[idx - 1] };
        let item_bottom = self.prefix_heights[idx];
        let offset_y = self.scroll_state.offset().y;

        if item_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: item_top });
            self.stick_to_bottom = false;
        } else if item_bottom > offset_y + self.viewport_height {
            let new_y = item_bottom.saturating_sub(self.viewport_height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
            let max_y = self.total_height().saturating_sub(self.viewport_height);
            self.stick_to_bottom = new_y >= max_y;
        }
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    /// Messages overlapping the viewport, padded by half a screen each way.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    pub pending_translations: &'a HashSet<usize>,
    /// Assistant reply outstanding
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        transcript: &'a Transcript,
        pending_translations: &'a HashSet<usize>,
        is_loading: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            transcript,
            pending_translations,
            is_loading,
            spinner_frame,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // scrollbar column

        // 1. Measure
        self.state.heights = self
            .transcript
            .messages
            .iter()
            .map(|m| Message::calculate_height(m, content_width))
            .collect();
        self.state.rebuild_prefix_heights();
        let total_height = self.state.total_height();

        // One extra row at the bottom for the "Thinking..." line
        let canvas_height = total_height.saturating_add(u16::from(self.is_loading));

        // 2. Clamp
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.visible_range(scroll_offset, area.height);

        // 3. Render visible messages into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let selected = self.state.selected_index;
        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let height = self.state.heights[i];
            let rect = Rect::new(0, y_offset, content_width, height);
            let message = Message::new(
                &self.transcript.messages[i],
                selected == Some(i),
                self.pending_translations.contains(&i),
            );
            scroll_view.render_widget(message, rect);
            y_offset = y_offset.saturating_add(height);
        }

        if self.is_loading {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            let thinking = Span::styled(
                format!("{spinner} Thinking..."),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            );
            let row = canvas_height.saturating_sub(1);
            scroll_view.render_widget(thinking, Rect::new(0, row, content_width, 1));
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Scrolling needs the persistent state, so the handler lives on
/// `MessageListState` rather than the per-frame `MessageList`.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}
