use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Tabs;

use crate::tui::component::Component;

/// The five screens of the interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Chat,
    Document,
    Forms,
    Livestreams,
    Lawyers,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Chat,
        Tab::Document,
        Tab::Forms,
        Tab::Livestreams,
        Tab::Lawyers,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Chat => "Chat",
            Tab::Document => "Document",
            Tab::Forms => "Forms",
            Tab::Livestreams => "Livestreams",
            Tab::Lawyers => "Lawyers",
        }
    }

    fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }

    /// Whether the tab has a text input at the bottom.
    pub fn has_input(self) -> bool {
        matches!(self, Tab::Chat | Tab::Document)
    }
}

pub struct TabBar {
    pub selected: Tab,
}

impl Component for TabBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()))
            .select(self.selected.index())
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("|");
        frame.render_widget(tabs, area);
    }
}
