//! # TitleBar Component
//!
//! Top status bar: which ranker is running and the last status message.
//!
//! ```text
//! Ranker (audio) | Moved song_2 to #1
//! ```
//!
//! Purely presentational. It receives all data as props and has no internal
//! state, so it is rebuilt every frame from `Ranker`.

use crate::ComponentType;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

/// Top status bar showing the ranker variant and status.
pub struct TitleBar {
    pub component_type: ComponentType,
    /// Status message (e.g., "4 items", "Moved b to #3")
    pub status_message: String,
}

impl TitleBar {
    pub fn new(component_type: ComponentType, status_message: String) -> Self {
        Self {
            component_type,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title_text = if self.status_message.is_empty() {
            format!("Ranker ({})", self.component_type)
        } else {
            format!("Ranker ({}) | {}", self.component_type, self.status_message)
        };

        frame.render_widget(
            Span::styled(title_text, Style::default().add_modifier(Modifier::BOLD)),
            area,
        );
    }
}
