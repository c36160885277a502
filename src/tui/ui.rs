use crate::core::state::Ranker;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{RankedList, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

pub fn draw_ui(frame: &mut Frame, app: &Ranker, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    TitleBar::new(app.component_type, app.status_message.clone()).render(frame, title_area);

    // An empty ranking leaves the main area blank
    RankedList::new(&mut tui.ranked_list, &app.sequence, app.schema).render(frame, main_area);

    let help = help_text(app, tui.ranked_list.drag.is_dragging());
    frame.render_widget(
        Span::styled(help, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

fn help_text(app: &Ranker, dragging: bool) -> String {
    if dragging {
        return "↑/↓ move · Space/Enter drop · Esc cancel".to_string();
    }
    let mut keys = vec!["↑/↓ select", "Space grab", "e Entspannt"];
    if app.schema.fields.len() > 1 {
        keys.push("b Bekannt");
        keys.push("g Gefallen");
    }
    keys.push("q quit");
    keys.join(" · ")
}
