use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// Anything that draws itself into a region of the frame.
///
/// Props are plain struct fields set by the parent before each frame.
/// `render` takes `&mut self` so stateful components (the message list,
/// input boxes) can update scroll offsets and cursor windows while drawing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that consumes terminal events and may emit a higher-level one.
pub trait EventHandler {
    type Event;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
