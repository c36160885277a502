//! # Reconciliation
//!
//! The host keeps its own copy of every item, usually richer than what it
//! sent to the ranker (file paths, play order). When an emission comes back,
//! the host rebuilds its list in the emitted order and copies over only the
//! three annotation fields. Everything else stays as the host had it.
//!
//! The rebuilt list is rejected if it would drop or invent items.

use log::warn;
use std::collections::{HashMap, HashSet};

use crate::core::item::{Item, ItemId, Liked};

/// What the host compares to decide whether anything changed.
pub fn signature(items: &[Item]) -> Vec<(ItemId, bool, Liked, bool)> {
    items
        .iter()
        .map(|item| (item.id.clone(), item.known, item.liked, item.relaxed))
        .collect()
}

/// Fold `returned` into `current`.
///
/// Returns `None` when nothing changed, or when the result wouldn't hold
/// exactly the items of `current`: each id once, none missing, none new.
pub fn reconcile(current: &[Item], returned: &[Item]) -> Option<Vec<Item>> {
    if signature(current) == signature(returned) {
        return None;
    }

    let originals: HashMap<&ItemId, &Item> = current.iter().map(|item| (&item.id, item)).collect();
    let rebuilt: Vec<Item> = returned
        .iter()
        .filter_map(|ret| {
            originals.get(&ret.id).map(|orig| {
                let mut item = Item::clone(orig);
                item.known = ret.known;
                item.liked = ret.liked;
                item.relaxed = ret.relaxed;
                item
            })
        })
        .collect();

    if rebuilt.is_empty() || rebuilt.len() != current.len() {
        return None;
    }
    let distinct: HashSet<&ItemId> = rebuilt.iter().map(|item| &item.id).collect();
    if distinct.len() != originals.len() {
        warn!("Rejecting returned list: duplicated ids");
        return None;
    }
    Some(rebuilt)
}
