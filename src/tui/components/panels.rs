//! Body panels for the non-chat tabs. All are stateless: the parent passes
//! the slice of `App` each one shows.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, Paragraph, Wrap};

use crate::core::lawyers::LawyerRecord;
use crate::core::resources::{LegalForm, Livestream};
use crate::tui::component::Component;
use crate::tui::components::message_list::SPINNER;

/// File extensions the Document tab accepts.
pub const ACCEPTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "gif"];

fn panel_block(title: &str) -> Block<'_> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
}

fn heading(text: &str) -> Span<'_> {
    Span::styled(text, Style::default().add_modifier(Modifier::BOLD))
}

fn link(url: &str) -> Span<'_> {
    Span::styled(
        url,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED),
    )
}

/// Analysis report, or a hint when there is none yet.
pub struct DocumentPanel<'a> {
    pub analysis: Option<&'a str>,
    pub is_loading: bool,
    pub spinner_frame: usize,
    /// Vertical scroll offset into the report, clamped while rendering
    pub scroll: &'a mut u16,
}

/// Furthest the report can scroll before its last line leaves the bottom
/// of an `inner` area. Wrapping mirrors `Wrap { trim: false }`.
pub fn max_report_scroll(report: &str, inner: Rect) -> u16 {
    if inner.width == 0 {
        return 0;
    }
    let options = textwrap::Options::new(inner.width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    let lines = u16::try_from(textwrap::wrap(report, options).len()).unwrap_or(u16::MAX);
    lines.saturating_sub(inner.height)
}

impl<'a> Component for DocumentPanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = panel_block("Document analysis");
        if let Some(report) = self.analysis {
            let max = max_report_scroll(report, block.inner(area));
            *self.scroll = (*self.scroll).min(max);
        }
        let paragraph = if self.is_loading {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            Paragraph::new(format!("{spinner} Analyzing document..."))
                .style(Style::default().fg(Color::DarkGray))
        } else if let Some(report) = self.analysis {
            Paragraph::new(report)
                .wrap(Wrap { trim: false })
                .scroll((*self.scroll, 0))
        } else {
            Paragraph::new(vec![
                Line::from("Enter the path of an image of a legal document below."),
                Line::from(format!("Accepted: {}", ACCEPTED_EXTENSIONS.join(", "))),
            ])
            .style(Style::default().fg(Color::DarkGray))
        };
        frame.render_widget(paragraph.block(block), area);
    }
}

pub struct FormsPanel<'a> {
    pub forms: &'a [LegalForm],
}

impl<'a> Component for FormsPanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .forms
            .iter()
            .map(|form| {
                ListItem::new(vec![
                    Line::from(heading(form.title)),
                    Line::from(form.description),
                    Line::from(link(form.url)),
                    Line::default(),
                ])
            })
            .collect();
        frame.render_widget(List::new(items).block(panel_block("Legal forms")), area);
    }
}

pub struct LivestreamPanel<'a> {
    pub streams: &'a [Livestream],
}

impl<'a> Component for LivestreamPanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .streams
            .iter()
            .map(|stream| {
                ListItem::new(vec![
                    Line::from(heading(stream.court)),
                    Line::from(link(stream.url)),
                    Line::default(),
                ])
            })
            .collect();
        frame.render_widget(
            List::new(items).block(panel_block("Court livestreams")),
            area,
        );
    }
}

/// Lawyer search results. Before the first search it shows a prompt instead.
pub struct LawyerPanel<'a> {
    pub lawyers: Option<&'a [LawyerRecord]>,
}

impl<'a> Component for LawyerPanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = panel_block("Find a lawyer");
        let Some(lawyers) = self.lawyers else {
            let hint = Paragraph::new("Press Enter to search the lawyer directory.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(hint, area);
            return;
        };

        if lawyers.is_empty() {
            frame.render_widget(Paragraph::new("No lawyers found.").block(block), area);
            return;
        }

        let items: Vec<ListItem> = lawyers
            .iter()
            .map(|lawyer| {
                ListItem::new(vec![
                    Line::from(heading(&lawyer.name)),
                    Line::from(format!(
                        "{} · {} · {} years",
                        lawyer.specialization, lawyer.location, lawyer.experience_years
                    )),
                    Line::from(Span::styled(
                        lawyer.contact.as_str(),
                        Style::default().fg(Color::Green),
                    )),
                    Line::default(),
                ])
            })
            .collect();
        frame.render_widget(List::new(items).block(block), area);
    }
}
