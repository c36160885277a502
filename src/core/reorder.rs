//! # Reorder Engine
//!
//! Turns a resolved drag gesture `(source, target)` into a new sequence.
//!
//! The move is the classic array-move: take the source out, then insert it at
//! the index the target had before removal.
//!
//! ```text
//! [A, B, C, D]  move B onto D  →  [A, C, D, B]
//! [A, B, C, D]  move D onto A  →  [D, A, B, C]
//! ```
//!
//! Anything that can't be resolved (no target, unknown ids, dropping an item
//! onto itself) returns the input sequence unchanged. Callers detect that
//! with `Sequence::same()`.

use log::debug;
use std::sync::Arc;

use crate::core::item::ItemId;
use crate::core::sequence::Sequence;

/// Move the element at `from` so that it ends up at index `to`.
///
/// Out-of-range indices leave the slice order untouched.
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut moved = items.to_vec();
    if from >= moved.len() || to >= moved.len() {
        return moved;
    }
    let element = moved.remove(from);
    moved.insert(to, element);
    moved
}

/// Reorder `sequence` by dropping `source` onto `target`.
pub fn reorder(sequence: &Sequence, source: &ItemId, target: Option<&ItemId>) -> Sequence {
    let Some(target) = target else {
        debug!("Reorder of {} cancelled: no drop target", source);
        return sequence.clone();
    };
    if source == target {
        return sequence.clone();
    }

    let (Some(from), Some(to)) = (sequence.position(source), sequence.position(target)) else {
        debug!(
            "Reorder ignored: {} -> {} not found in current sequence",
            source, target
        );
        return sequence.clone();
    };

    let moved: Vec<Arc<_>> = array_move(sequence.as_slice(), from, to);
    Sequence::from_shared(moved)
}
