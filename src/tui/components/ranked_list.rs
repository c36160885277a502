//! # Ranked List Component
//!
//! The sortable list: one two-line row per item, with a drag handle, the
//! rank, a media marker, the label and the per-item controls.
//!
//! ```text
//! ⠿ 2. [▣] Song 3
//!          ♪ Audio   [x] Entspannt  [ ] Bekannt  Gefallen? Ja
//! ```
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `RankedListState` lives in `TuiState` (selection, scroll, drag gesture)
//! - `RankedList` is created per frame / per event with borrowed props
//!
//! Raw keys and mouse events become at most one `Action`. A drag is picked up
//! with Space or a left click, moved with ↑/↓ or by dragging, and put down
//! with Space/Enter or by releasing the button. Esc cancels.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::action::Action;
use crate::core::annotate::{Annotation, AnnotationField};
use crate::core::drag::DragGesture;
use crate::core::item::Item;
use crate::core::schema::{ItemSchema, MediaKind};
use crate::core::sequence::Sequence;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Every item occupies this many terminal rows.
pub const ROW_HEIGHT: u16 = 2;

const HANDLE: &str = "⠿";
const DROP_MARKER: &str = "▶";

/// Persistent state for the ranked list.
#[derive(Debug, Default)]
pub struct RankedListState {
    pub selected: usize,
    pub list_state: ListState,
    pub drag: DragGesture,
    /// Inner list area from the last render, for mouse hit-testing.
    pub area: Rect,
}

impl RankedListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the selection inside a list of `len` items.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Item index under terminal row `row`, if any.
    pub fn hit_test(&self, row: u16, len: usize) -> Option<usize> {
        let area = self.area;
        if row < area.y || row >= area.y.saturating_add(area.height) {
            return None;
        }
        let index = self.list_state.offset() + ((row - area.y) / ROW_HEIGHT) as usize;
        (index < len).then_some(index)
    }
}

/// Transient wrapper: persistent state plus this frame's props.
pub struct RankedList<'a> {
    state: &'a mut RankedListState,
    sequence: &'a Sequence,
    schema: &'a ItemSchema,
}

impl<'a> RankedList<'a> {
    pub fn new(
        state: &'a mut RankedListState,
        sequence: &'a Sequence,
        schema: &'a ItemSchema,
    ) -> Self {
        Self {
            state,
            sequence,
            schema,
        }
    }

    fn select(&mut self, index: usize) {
        self.state.selected = index;
        self.state.list_state.select(Some(index));
    }

    fn grab(&mut self, index: usize) {
        if let Some(item) = self.sequence.get(index) {
            self.state.drag.begin(item.id.clone());
        }
    }

    /// Move the drop target one row up or down.
    fn move_target(&mut self, down: bool) {
        let current = self
            .state
            .drag
            .target()
            .or(self.state.drag.source())
            .and_then(|id| self.sequence.position(id))
            .unwrap_or(self.state.selected);
        let next = if down {
            (current + 1).min(self.sequence.len() - 1)
        } else {
            current.saturating_sub(1)
        };
        if let Some(item) = self.sequence.get(next) {
            self.state.drag.over(Some(item.id.clone()));
        }
        self.select(next);
    }

    fn hover(&mut self, row: u16) {
        let hit = self.state.hit_test(row, self.sequence.len());
        let target = hit.and_then(|i| self.sequence.get(i)).map(|item| item.id.clone());
        self.state.drag.over(target);
        if let Some(index) = hit {
            self.select(index);
        }
    }

    /// Put the dragged item down. The selection follows it to where
    /// array-move will place it: the target's current index.
    fn release(&mut self) -> Option<Action> {
        let action = self.state.drag.release();
        if let Some(Action::Reorder {
            source, target, ..
        }) = &action
        {
            let landing = target
                .as_ref()
                .or(Some(source))
                .and_then(|id| self.sequence.position(id));
            if let Some(index) = landing {
                self.select(index);
            }
        }
        action
    }

    fn cancel(&mut self) {
        if let Some(index) = self
            .state
            .drag
            .source()
            .and_then(|id| self.sequence.position(id))
        {
            self.select(index);
        }
        self.state.drag.cancel();
    }

    fn toggle(&self, field: AnnotationField) -> Option<Action> {
        let item = self.sequence.get(self.state.selected)?;
        // Suppressed controls are never offered, so they can't fire
        if !self.schema.offers(item, field) {
            return None;
        }
        Some(Action::Annotate {
            item_id: item.id.clone(),
            annotation: Annotation::toggled(item, field),
        })
    }

    fn item_lines(&self, index: usize, item: &Item, width: u16) -> Vec<Line<'static>> {
        let is_source = self.state.drag.source() == Some(&item.id);
        let is_target = !is_source && self.state.drag.target() == Some(&item.id);
        let is_selected = index == self.state.selected && !self.state.drag.is_dragging();

        let base = if is_source {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if is_target {
            Style::default().fg(Color::Cyan)
        } else if is_selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };

        // Line 1: handle, rank, media marker, label, length
        let handle = if is_target { DROP_MARKER } else { HANDLE };
        let rank = format!("{}.", index + 1);
        let media = if self.schema.image(item).is_some() { "[▣]" } else { "[?]" };
        let length = match (self.schema.media, item.length.as_deref()) {
            (MediaKind::Thumbnail, Some(len)) if !len.is_empty() => format!("  Dauer: {len}"),
            _ => String::new(),
        };
        let prefix = format!("{handle} {rank:<3} {media} ");
        let label_width = (width as usize)
            .saturating_sub(prefix.width())
            .saturating_sub(length.width());
        let label = truncate_to_width(self.schema.label(item), label_width);

        let first = Line::from(vec![
            Span::styled(prefix, base),
            Span::styled(label, base.add_modifier(Modifier::BOLD)),
            Span::styled(length, base.add_modifier(Modifier::DIM)),
        ]);

        // Line 2: audio status, then the controls this item offers
        let mut spans = vec![Span::raw("         ")];
        if self.schema.shows_player(item) {
            let has_clip = item.audio_data_url.as_deref().is_some_and(|s| !s.is_empty());
            spans.push(if has_clip {
                Span::styled("♪ Audio", Style::default().fg(Color::Green))
            } else {
                Span::styled("Audio file not found.", Style::default().fg(Color::Red))
            });
            spans.push(Span::raw("   "));
        }
        for (i, field) in self.schema.controls_for(item).into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(control_text(item, field), base));
        }

        vec![first, Line::from(spans)]
    }
}

fn control_text(item: &Item, field: AnnotationField) -> String {
    match Annotation::read(item, field) {
        Annotation::Known(checked) | Annotation::Relaxed(checked) => {
            let mark = if checked { "[x]" } else { "[ ]" };
            format!("{} {}", mark, field.label())
        }
        Annotation::Liked(liked) => format!("{} {}", field.label(), liked.label()),
    }
}

/// Truncate `s` to at most `max_width` columns, ending with "…" if cut.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

impl Component for RankedList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // An empty ranking renders nothing at all
        if self.sequence.is_empty() {
            self.state.area = Rect::default();
            return;
        }
        self.state.clamp(self.sequence.len());

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.schema.component_type));
        let inner = block.inner(area);
        self.state.area = inner;

        let items: Vec<ListItem> = self
            .sequence
            .iter()
            .enumerate()
            .map(|(i, item)| ListItem::new(self.item_lines(i, item, inner.width)))
            .collect();

        let list = List::new(items).block(block);
        self.state.list_state.select(Some(self.state.selected));
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

impl EventHandler for RankedList<'_> {
    type Event = Action;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Action> {
        let len = self.sequence.len();
        if len == 0 {
            self.state.drag.cancel();
            return None;
        }
        self.state.clamp(len);
        let dragging = self.state.drag.is_dragging();

        match event {
            TuiEvent::CursorUp if dragging => {
                self.move_target(false);
                None
            }
            TuiEvent::CursorDown if dragging => {
                self.move_target(true);
                None
            }
            TuiEvent::CursorUp => {
                self.select(self.state.selected.saturating_sub(1));
                None
            }
            TuiEvent::CursorDown => {
                self.select((self.state.selected + 1).min(len - 1));
                None
            }
            TuiEvent::Grab | TuiEvent::Submit if dragging => self.release(),
            TuiEvent::Grab => {
                self.grab(self.state.selected);
                None
            }
            TuiEvent::Escape if dragging => {
                self.cancel();
                None
            }
            TuiEvent::Toggle(field) if !dragging => self.toggle(*field),
            TuiEvent::MouseDown(_, row) => {
                let index = self.state.hit_test(*row, len)?;
                self.select(index);
                self.grab(index);
                None
            }
            TuiEvent::MouseDrag(_, row) if dragging => {
                self.hover(*row);
                None
            }
            TuiEvent::MouseUp(_, row) if dragging => {
                self.hover(*row);
                self.release()
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::item::{ItemId, Liked};
    use crate::core::schema::{AUDIO_SCHEMA, YOUTUBE_SCHEMA};
    use crate::test_support::{audio_sequence, sequence_of};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn send(
        state: &mut RankedListState,
        sequence: &Sequence,
        schema: &ItemSchema,
        event: TuiEvent,
    ) -> Option<Action> {
        RankedList::new(state, sequence, schema).handle_event(&event)
    }

    fn render_lines(
        state: &mut RankedListState,
        sequence: &Sequence,
        schema: &ItemSchema,
        width: u16,
        height: u16,
    ) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| RankedList::new(state, sequence, schema).render(f, f.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_keyboard_drag_moves_down() {
        let seq = sequence_of(&["A", "B", "C", "D"]);
        let mut state = RankedListState::new();
        send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::CursorDown);
        send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::Grab);
        send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::CursorDown);
        send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::CursorDown);
        send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::CursorDown);

        match send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::Submit) {
            Some(Action::Reorder { source, target }) => {
                assert_eq!(source, ItemId::from("B"));
                assert_eq!(target, Some(ItemId::from("D")));
            }
            other => panic!("expected Reorder, got {:?}", other),
        }
        assert_eq!(state.selected, 3);
        assert!(!state.drag.is_dragging());
    }

    #[test]
    fn test_keyboard_drag_moves_up() {
        let seq = sequence_of(&["A", "B", "C", "D"]);
        let mut state = RankedListState::new();
        state.selected = 3;
        send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::Grab);
        for _ in 0..5 {
            send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::CursorUp);
        }
        let action = send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::Grab);
        assert!(matches!(
            action,
            Some(Action::Reorder { target: Some(ItemId::Text(ref t)), .. }) if t == "A"
        ));
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_grab_and_drop_in_place_targets_self() {
        let seq = sequence_of(&["A", "B"]);
        let mut state = RankedListState::new();
        send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::Grab);
        let action = send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::Grab);
        assert!(matches!(
            action,
            Some(Action::Reorder { ref source, target: Some(ref target) }) if source == target
        ));
    }

    #[test]
    fn test_escape_cancels_drag() {
        let seq = sequence_of(&["A", "B", "C"]);
        let mut state = RankedListState::new();
        send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::Grab);
        send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::CursorDown);
        assert_eq!(send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::Escape).map(|_| ()), None);
        assert_eq!(state.selected, 0);
        assert!(send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::Submit).is_none());
    }

    #[test]
    fn test_toggle_offered_control() {
        let seq = audio_sequence();
        let mut state = RankedListState::new();
        state.selected = 1;
        let action = send(
            &mut state,
            &seq,
            &AUDIO_SCHEMA,
            TuiEvent::Toggle(AnnotationField::Liked),
        );
        assert!(matches!(
            action,
            Some(Action::Annotate { annotation: Annotation::Liked(Liked::Yes), .. })
        ));
    }

    #[test]
    fn test_baseline_suppressed_controls_never_fire() {
        let seq = audio_sequence();
        let mut state = RankedListState::new();
        for field in [AnnotationField::Known, AnnotationField::Liked] {
            assert!(send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::Toggle(field)).is_none());
        }
        assert!(
            send(
                &mut state,
                &seq,
                &AUDIO_SCHEMA,
                TuiEvent::Toggle(AnnotationField::Relaxed)
            )
            .is_some()
        );
    }

    #[test]
    fn test_youtube_offers_only_relaxed() {
        let seq = sequence_of(&["v1"]);
        let mut state = RankedListState::new();
        assert!(
            send(
                &mut state,
                &seq,
                &YOUTUBE_SCHEMA,
                TuiEvent::Toggle(AnnotationField::Known)
            )
            .is_none()
        );
    }

    #[test]
    fn test_toggle_ignored_while_dragging() {
        let seq = sequence_of(&["A", "B"]);
        let mut state = RankedListState::new();
        send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::Grab);
        assert!(
            send(
                &mut state,
                &seq,
                &AUDIO_SCHEMA,
                TuiEvent::Toggle(AnnotationField::Relaxed)
            )
            .is_none()
        );
    }

    #[test]
    fn test_empty_sequence_accepts_nothing() {
        let seq = Sequence::default();
        let mut state = RankedListState::new();
        for event in [TuiEvent::Grab, TuiEvent::CursorDown, TuiEvent::Submit] {
            assert!(send(&mut state, &seq, &AUDIO_SCHEMA, event).is_none());
        }
        assert!(!state.drag.is_dragging());
    }

    #[test]
    fn test_mouse_drag_between_rows() {
        let seq = sequence_of(&["A", "B", "C"]);
        let mut state = RankedListState::new();
        render_lines(&mut state, &seq, &AUDIO_SCHEMA, 60, 10);
        // Border on row 0; A on rows 1-2, B on 3-4, C on 5-6
        assert_eq!(state.hit_test(1, 3), Some(0));
        assert_eq!(state.hit_test(6, 3), Some(2));
        assert_eq!(state.hit_test(7, 3), None);

        send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::MouseDown(5, 1));
        send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::MouseDrag(5, 4));
        let action = send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::MouseUp(5, 5));
        match action {
            Some(Action::Reorder { source, target }) => {
                assert_eq!(source, ItemId::from("A"));
                assert_eq!(target, Some(ItemId::from("C")));
            }
            other => panic!("expected Reorder, got {:?}", other),
        }
    }

    #[test]
    fn test_mouse_release_outside_has_no_target() {
        let seq = sequence_of(&["A", "B"]);
        let mut state = RankedListState::new();
        render_lines(&mut state, &seq, &AUDIO_SCHEMA, 60, 10);
        send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::MouseDown(5, 3));
        let action = send(&mut state, &seq, &AUDIO_SCHEMA, TuiEvent::MouseUp(5, 30));
        assert!(matches!(
            action,
            Some(Action::Reorder { target: None, .. })
        ));
    }

    #[test]
    fn test_render_audio_rows() {
        let mut items = audio_sequence().to_items();
        items[2].audio_data_url = None;
        items[1].known = true;
        let seq = Sequence::new(items);
        let mut state = RankedListState::new();
        let lines = render_lines(&mut state, &seq, &AUDIO_SCHEMA, 90, 10);

        // Baseline: no player, only Entspannt
        assert!(lines[1].contains("1."));
        assert!(lines[1].contains("Grundaktivität"));
        assert!(lines[2].contains("[ ] Entspannt"));
        assert!(!lines[2].contains("Bekannt"));
        assert!(!lines[2].contains("Audio"));

        // Song 1: clip present, known ticked
        assert!(lines[4].contains("♪ Audio"));
        assert!(lines[4].contains("[x] Bekannt"));
        assert!(lines[4].contains("Gefallen? Neutral"));

        // Song 2: clip missing
        assert!(lines[6].contains("Audio file not found."));
    }

    #[test]
    fn test_render_youtube_length_and_placeholder() {
        let mut clip = Item::new("v1");
        clip.title = Some("Rain Sounds".into());
        clip.length = Some("03:12".into());
        let seq = Sequence::new(vec![clip]);
        let mut state = RankedListState::new();
        let lines = render_lines(&mut state, &seq, &YOUTUBE_SCHEMA, 60, 4);

        assert!(lines[1].contains("[?]"));
        assert!(lines[1].contains("Rain Sounds"));
        assert!(lines[1].contains("Dauer: 03:12"));
        assert!(!lines[2].contains("Bekannt"));
    }

    #[test]
    fn test_render_empty_draws_nothing() {
        let seq = Sequence::default();
        let mut state = RankedListState::new();
        let lines = render_lines(&mut state, &seq, &AUDIO_SCHEMA, 20, 3);
        assert!(lines.iter().all(|l| l.trim().is_empty()));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Song", 10), "Song");
        assert_eq!(truncate_to_width("Grundaktivität", 6), "Grund…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
