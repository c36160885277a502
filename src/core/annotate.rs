//! # Annotation Merger
//!
//! Applies one typed field update to one item, found by id.
//!
//! The field and its value travel together as an [`Annotation`], so a
//! `gefallen` update can only ever carry a [`Liked`] and a checkbox update
//! only a `bool`.
//!
//! The merger has no notion of which controls a variant shows. If a caller
//! sets `bekannt` on the baseline item, it is applied like anywhere else.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::core::item::{Item, ItemId, Liked};
use crate::core::sequence::Sequence;

/// The annotation fields an item carries.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationField {
    #[serde(rename = "bekannt")]
    Known,
    #[serde(rename = "gefallen")]
    Liked,
    #[serde(rename = "entspannt")]
    Relaxed,
}

impl AnnotationField {
    pub const ALL: [AnnotationField; 3] = [
        AnnotationField::Known,
        AnnotationField::Liked,
        AnnotationField::Relaxed,
    ];

    /// Wire name, as the host spells it.
    pub fn key(&self) -> &'static str {
        match self {
            AnnotationField::Known => "bekannt",
            AnnotationField::Liked => "gefallen",
            AnnotationField::Relaxed => "entspannt",
        }
    }

    /// Label shown next to the control.
    pub fn label(&self) -> &'static str {
        match self {
            AnnotationField::Known => "Bekannt",
            AnnotationField::Liked => "Gefallen?",
            AnnotationField::Relaxed => "Entspannt",
        }
    }
}

/// A single field update with a value of the field's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    Known(bool),
    Liked(Liked),
    Relaxed(bool),
}

#[derive(Debug)]
pub enum AnnotationError {
    /// The value's JSON type doesn't match the field.
    TypeMismatch { field: AnnotationField, value: Value },
}

impl fmt::Display for AnnotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationError::TypeMismatch { field, value } => {
                write!(f, "invalid value for {}: {value}", field.key())
            }
        }
    }
}

impl std::error::Error for AnnotationError {}

impl Annotation {
    /// Build an annotation from a wire field name and an untyped value.
    pub fn from_value(field: AnnotationField, value: Value) -> Result<Self, AnnotationError> {
        let annotation = match field {
            AnnotationField::Known => value.as_bool().map(Annotation::Known),
            AnnotationField::Relaxed => value.as_bool().map(Annotation::Relaxed),
            AnnotationField::Liked => serde_json::from_value::<Liked>(value.clone())
                .ok()
                .map(Annotation::Liked),
        };
        annotation.ok_or(AnnotationError::TypeMismatch { field, value })
    }

    pub fn field(&self) -> AnnotationField {
        match self {
            Annotation::Known(_) => AnnotationField::Known,
            Annotation::Liked(_) => AnnotationField::Liked,
            Annotation::Relaxed(_) => AnnotationField::Relaxed,
        }
    }

    /// Overwrite exactly this field on `item`.
    pub fn apply(&self, item: &mut Item) {
        match *self {
            Annotation::Known(v) => item.known = v,
            Annotation::Liked(v) => item.liked = v,
            Annotation::Relaxed(v) => item.relaxed = v,
        }
    }

    /// The current value of `field` on `item`.
    pub fn read(item: &Item, field: AnnotationField) -> Self {
        match field {
            AnnotationField::Known => Annotation::Known(item.known),
            AnnotationField::Liked => Annotation::Liked(item.liked),
            AnnotationField::Relaxed => Annotation::Relaxed(item.relaxed),
        }
    }

    /// The value a single user toggle produces: checkboxes flip, the
    /// tri-state selector advances.
    pub fn toggled(item: &Item, field: AnnotationField) -> Self {
        match field {
            AnnotationField::Known => Annotation::Known(!item.known),
            AnnotationField::Liked => Annotation::Liked(item.liked.next()),
            AnnotationField::Relaxed => Annotation::Relaxed(!item.relaxed),
        }
    }
}

/// Set one annotation on the item with `item_id`.
///
/// Every other item in the result is the same `Arc` as in `sequence`. An
/// unknown id returns `sequence` itself.
pub fn set_annotation(sequence: &Sequence, item_id: &ItemId, annotation: Annotation) -> Sequence {
    let Some(index) = sequence.position(item_id) else {
        debug!(
            "Annotation {:?} ignored: {} not found in current sequence",
            annotation, item_id
        );
        return sequence.clone();
    };

    let mut items: Vec<Arc<Item>> = sequence.as_slice().to_vec();
    let mut updated = Item::clone(&items[index]);
    annotation.apply(&mut updated);
    items[index] = Arc::new(updated);
    Sequence::from_shared(items)
}
