//! # Drag Gestures
//!
//! A small state machine that sits between raw input and the Reorder Engine.
//! Whatever the input device is (pointer, keyboard), it only reports three
//! things: which item was picked up, which item it is hovering over, and
//! whether it was dropped or cancelled.
//!
//! ```text
//! Idle ──begin(id)──▶ Dragging { source, over }
//!                       │  over(id) updates `over`
//!                       ├─ release() ─▶ Idle, yields Action::Reorder
//!                       └─ cancel() ──▶ Idle, yields nothing
//! ```

use crate::core::action::Action;
use crate::core::item::ItemId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragGesture {
    active: Option<ActiveDrag>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveDrag {
    source: ItemId,
    over: Option<ItemId>,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up `source`. Replaces any drag already in progress.
    pub fn begin(&mut self, source: ItemId) {
        self.active = Some(ActiveDrag {
            over: Some(source.clone()),
            source,
        });
    }

    /// Hover over `target`, or over nothing.
    pub fn over(&mut self, target: Option<ItemId>) {
        if let Some(active) = self.active.as_mut() {
            active.over = target;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn source(&self) -> Option<&ItemId> {
        self.active.as_ref().map(|a| &a.source)
    }

    pub fn target(&self) -> Option<&ItemId> {
        self.active.as_ref().and_then(|a| a.over.as_ref())
    }

    /// Release. The engine decides whether the resolved pair is a no-op.
    pub fn release(&mut self) -> Option<Action> {
        self.active.take().map(|active| Action::Reorder {
            source: active.source,
            target: active.over,
        })
    }

    /// Abort the drag. Nothing reaches the engine.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}
