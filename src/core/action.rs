//! # Actions
//!
//! Everything that can happen to a ranking becomes an `Action`.
//! User drops an item onto another? That's `Action::Reorder`.
//! User ticks "Entspannt"? That's `Action::Annotate`.
//!
//! The `update()` function takes the current state and an action,
//! then returns the effect the caller must carry out. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  Effect
//! ```
//!
//! A mutation that changes nothing yields `Effect::None`, so the caller never
//! emits a value the host already has.

use log::debug;

use crate::ComponentType;
use crate::core::annotate::{Annotation, set_annotation};
use crate::core::item::ItemId;
use crate::core::reorder::reorder;
use crate::core::sequence::Sequence;
use crate::core::state::Ranker;

#[derive(Debug, Clone)]
pub enum Action {
    /// Host replaced the item list, possibly under another component type.
    Load {
        sequence: Sequence,
        component_type: Option<ComponentType>,
    },
    /// Drag ended. `target` is `None` when dropped outside the list.
    Reorder {
        source: ItemId,
        target: Option<ItemId>,
    },
    /// A control changed on one item.
    Annotate {
        item_id: ItemId,
        annotation: Annotation,
    },
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Report this sequence to the host.
    Emit(Sequence),
    Quit,
}

pub fn update(app: &mut Ranker, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Load {
            sequence,
            component_type,
        } => {
            if let Some(component_type) = component_type {
                app.mount(component_type);
            }
            app.load(sequence);
            Effect::None
        }
        Action::Reorder { source, target } => {
            let next = reorder(&app.sequence, &source, target.as_ref());
            if Sequence::same(&next, &app.sequence) {
                return Effect::None;
            }
            if let Some(rank) = next.position(&source) {
                app.status_message = format!("Moved {} to #{}", source, rank + 1);
            }
            app.sequence = next;
            Effect::Emit(app.sequence.clone())
        }
        Action::Annotate {
            item_id,
            annotation,
        } => {
            let next = set_annotation(&app.sequence, &item_id, annotation);
            if Sequence::same(&next, &app.sequence) {
                return Effect::None;
            }
            app.status_message = format!("{}: {}", item_id, annotation.field().label());
            app.sequence = next;
            Effect::Emit(app.sequence.clone())
        }
        Action::Quit => Effect::Quit,
    }
}
