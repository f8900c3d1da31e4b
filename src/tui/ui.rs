use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::resources::{LEGAL_FORMS, LIVESTREAMS};
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    DocumentPanel, FormsPanel, INPUT_HEIGHT, LawyerPanel, LivestreamPanel, MessageList, Tab,
    TabBar, TitleBar,
};

/// Screen regions for one frame.
struct Areas {
    title: Rect,
    tabs: Rect,
    main: Rect,
    error: Rect,
    input: Rect,
}

fn split(area: Rect, has_error: bool, has_input: bool) -> Areas {
    use Constraint::{Length, Min};
    let error_height = u16::from(has_error);
    let input_height = if has_input { INPUT_HEIGHT } else { 0 };
    let [title, tabs, main, error, input] = Layout::vertical([
        Length(1),
        Length(1),
        Min(0),
        Length(error_height),
        Length(input_height),
    ])
    .areas(area);
    Areas {
        title,
        tabs,
        main,
        error,
        input,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let areas = split(frame.area(), app.error.is_some(), tui.tab.has_input());

    TitleBar::new(
        app.chat.model.clone(),
        app.language.label(),
        app.status_message.clone(),
        app.is_busy(),
        spinner_frame,
    )
    .render(frame, areas.title);

    TabBar { selected: tui.tab }.render(frame, areas.tabs);

    match tui.tab {
        Tab::Chat => MessageList::new(
            &mut tui.message_list,
            &app.transcript,
            &app.pending_translations,
            app.chat_loading,
            spinner_frame,
        )
        .render(frame, areas.main),
        Tab::Document => DocumentPanel {
            analysis: app.analysis.as_deref(),
            is_loading: app.analysis_loading,
            spinner_frame,
            scroll: &mut tui.document_scroll,
        }
        .render(frame, areas.main),
        Tab::Forms => FormsPanel { forms: LEGAL_FORMS }.render(frame, areas.main),
        Tab::Livestreams => LivestreamPanel {
            streams: LIVESTREAMS,
        }
        .render(frame, areas.main),
        Tab::Lawyers => LawyerPanel {
            lawyers: app
                .show_lawyers
                .then_some(app.lawyers.as_deref())
                .flatten(),
        }
        .render(frame, areas.main),
    }

    if let Some(error) = &app.error {
        let line = Line::from(vec![
            Span::styled(
                "Error: ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(error.as_str(), Style::default().fg(Color::Red)),
            Span::styled(" (Esc to dismiss)", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(line, areas.error);
    }

    match tui.tab {
        Tab::Chat => {
            tui.chat_input.disabled = app.chat_loading;
            tui.chat_input.render(frame, areas.input);
        }
        Tab::Document => {
            tui.document_input.disabled = app.analysis_loading;
            tui.document_input.render(frame, areas.input);
        }
        _ => {}
    }
}
