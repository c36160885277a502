//! # Ordered Sequence
//!
//! The ranking itself: an ordered list of shared items.
//!
//! ```text
//! Sequence
//! └── Arc<Vec<Arc<Item>>>
//!         │        └── items are shared, so an annotation update can copy
//!         │            one item and reuse every other `Arc` as-is
//!         └── the list is shared, so a no-op hands back the same allocation
//! ```
//!
//! `Sequence::same()` is the cheap "did anything happen?" check: two
//! sequences are `same` only if they point to the same list.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

use crate::core::item::{Item, ItemId};

#[derive(Debug, Clone, Default)]
pub struct Sequence {
    items: Arc<Vec<Arc<Item>>>,
}

impl Sequence {
    pub fn new(items: Vec<Item>) -> Self {
        Self::from_shared(items.into_iter().map(Arc::new).collect())
    }

    pub fn from_shared(items: Vec<Arc<Item>>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Item>> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Item>> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Arc<Item>] {
        &self.items
    }

    /// Zero-based position of the item with `id`.
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    /// True if both sequences share the same underlying list.
    pub fn same(a: &Sequence, b: &Sequence) -> bool {
        Arc::ptr_eq(&a.items, &b.items)
    }

    /// Deep copy into owned items (used when the host takes the value back).
    pub fn to_items(&self) -> Vec<Item> {
        self.items.iter().map(|item| Item::clone(item)).collect()
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        Sequence::same(self, other)
            || (self.len() == other.len()
                && self.iter().zip(other.iter()).all(|(a, b)| a == b))
    }
}

impl From<Vec<Item>> for Sequence {
    fn from(items: Vec<Item>) -> Self {
        Sequence::new(items)
    }
}

impl Serialize for Sequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter().map(|item| item.as_ref()))
    }
}

impl<'de> Deserialize<'de> for Sequence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A null item list is a valid, empty ranking
        let items = Option::<Vec<Item>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(Sequence::new(items))
    }
}
