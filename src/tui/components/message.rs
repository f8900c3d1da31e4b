use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::transcript::Message as TranscriptMessage;
use crate::services::Role;
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders one transcript message.
///
/// `Message` is a **transient component**: the parent `MessageList` builds one
/// per visible message each frame and passes in whether it is selected.
///
/// The border title carries the role label, plus a marker when a translation
/// is cached: `[hi]` while the translation is on screen, `[original]` after
/// swapping back.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a TranscriptMessage,
    /// Whether this message is the target of the translate key
    pub is_selected: bool,
    /// Whether a translation request for this message is in flight
    pub is_translating: bool,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a TranscriptMessage, is_selected: bool, is_translating: bool) -> Self {
        Self {
            message,
            is_selected,
            is_translating,
        }
    }

    /// Predict the rendered height without rendering.
    ///
    /// The wrapping options match Ratatui's `Paragraph` wrapping so the
    /// `MessageList` can size its scroll canvas up front.
    pub fn calculate_height(message: &TranscriptMessage, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let content = message.content.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }

    fn title(&self) -> String {
        let role = self.message.role.label();
        if self.is_translating {
            return format!("{role} · translating…");
        }
        match (self.message.showing_translation, self.message.translated_into) {
            (true, Some(language)) => format!("{role} [{}]", language.code()),
            (false, Some(_)) => format!("{role} [original]"),
            _ => role.to_string(),
        }
    }
}

pub fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Green),
        Role::Assistant => Style::default().fg(Color::Blue),
        Role::System => Style::default().fg(Color::Yellow),
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = role_style(self.message.role);

        let border_style = if self.is_selected {
            Style::default().fg(Color::Cyan)
        } else {
            style.add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .title(self.title())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.message.content.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::Language;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(message: &TranscriptMessage, is_selected: bool, is_translating: bool) -> String {
        let backend = TestBackend::new(40, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                f.render_widget(Message::new(message, is_selected, is_translating), f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn calculate_height_empty_content_returns_border_height() {
        let message = TranscriptMessage::user("   ");
        assert_eq!(Message::calculate_height(&message, 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        let message = TranscriptMessage::user("Hello world");
        assert_eq!(Message::calculate_height(&message, HORIZONTAL_OVERHEAD), 1);
    }

    #[test]
    fn calculate_height_wraps_at_width_boundary() {
        let message = TranscriptMessage::user("Hello world");
        // content_width = 9 - 4 = 5 → "Hello" | "world"
        assert_eq!(Message::calculate_height(&message, 9), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_breaks_long_words() {
        let message = TranscriptMessage::assistant("abcdefghij");
        // content_width = 4 → "abcd" | "efgh" | "ij"
        assert_eq!(Message::calculate_height(&message, 8), 3 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_saturates_for_huge_content() {
        let message = TranscriptMessage::assistant("x\n".repeat(70_000));
        assert_eq!(Message::calculate_height(&message, 40), u16::MAX);
    }

    #[test]
    fn role_styles_are_distinct() {
        assert_eq!(role_style(Role::User).fg, Some(Color::Green));
        assert_eq!(role_style(Role::Assistant).fg, Some(Color::Blue));
        assert_eq!(role_style(Role::System).fg, Some(Color::Yellow));
    }

    #[test]
    fn renders_role_label_and_content() {
        let text = rendered(&TranscriptMessage::assistant("Bail is granted"), false, false);
        assert!(text.contains("nyaya"));
        assert!(text.contains("Bail is granted"));
    }

    #[test]
    fn title_marks_translation_side() {
        let mut message = TranscriptMessage::assistant("Hello");
        message.apply_translation("नमस्ते".into(), Language::Hi);
        assert!(rendered(&message, false, false).contains("[hi]"));

        message.swap_translation();
        assert!(rendered(&message, false, false).contains("[original]"));
    }

    #[test]
    fn title_shows_pending_translation() {
        let message = TranscriptMessage::user("Hello");
        assert!(rendered(&message, true, true).contains("translating"));
    }
}
