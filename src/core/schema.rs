//! # Item Schemas
//!
//! The YouTube and audio rankers share one engine. What differs between them
//! is captured here as data:
//!
//! | Variant | Annotations              | Hidden on baseline  | Media               |
//! |---------|--------------------------|---------------------|---------------------|
//! | youtube | entspannt                | (none)              | thumbnail + length  |
//! | audio   | entspannt, bekannt, gef. | bekannt, gefallen   | cover + audio clip  |
//!
//! Suppression is purely a rendering concern. The annotation merger never
//! consults the schema.

use crate::ComponentType;
use crate::core::annotate::AnnotationField;
use crate::core::item::Item;

/// How an item's media is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Video thumbnail plus an optional duration string.
    Thumbnail,
    /// Cover image plus an optional audio clip.
    AudioClip,
}

/// Per-variant capability descriptor.
#[derive(Debug, PartialEq, Eq)]
pub struct ItemSchema {
    pub component_type: ComponentType,
    /// Controls offered per item, in display order.
    pub fields: &'static [AnnotationField],
    /// Controls withheld from the baseline item.
    pub baseline_suppressed: &'static [AnnotationField],
    pub media: MediaKind,
}

pub static YOUTUBE_SCHEMA: ItemSchema = ItemSchema {
    component_type: ComponentType::Youtube,
    fields: &[AnnotationField::Relaxed],
    baseline_suppressed: &[],
    media: MediaKind::Thumbnail,
};

pub static AUDIO_SCHEMA: ItemSchema = ItemSchema {
    component_type: ComponentType::Audio,
    fields: &[
        AnnotationField::Relaxed,
        AnnotationField::Known,
        AnnotationField::Liked,
    ],
    baseline_suppressed: &[AnnotationField::Known, AnnotationField::Liked],
    media: MediaKind::AudioClip,
};

impl ItemSchema {
    pub fn for_type(component_type: ComponentType) -> &'static ItemSchema {
        match component_type {
            ComponentType::Youtube => &YOUTUBE_SCHEMA,
            ComponentType::Audio => &AUDIO_SCHEMA,
        }
    }

    /// Whether the rendering layer may offer `field` on `item`.
    pub fn offers(&self, item: &Item, field: AnnotationField) -> bool {
        self.fields.contains(&field)
            && !(item.is_baseline() && self.baseline_suppressed.contains(&field))
    }

    /// The controls to render for `item`, in display order.
    pub fn controls_for(&self, item: &Item) -> Vec<AnnotationField> {
        self.fields
            .iter()
            .copied()
            .filter(|field| self.offers(item, *field))
            .collect()
    }

    /// Audio baselines have no clip to play.
    pub fn shows_player(&self, item: &Item) -> bool {
        self.media == MediaKind::AudioClip && !item.is_baseline()
    }

    /// Cover / thumbnail source, if the host supplied one.
    pub fn image<'a>(&self, item: &'a Item) -> Option<&'a str> {
        match self.media {
            MediaKind::Thumbnail => item.thumbnail.as_deref(),
            MediaKind::AudioClip => item.image_data_url.as_deref(),
        }
        .filter(|s| !s.is_empty())
    }

    /// Human-readable label. Audio prefers `display_name` over `name`.
    pub fn label<'a>(&self, item: &'a Item) -> &'a str {
        let non_empty = |s: &'a Option<String>| s.as_deref().filter(|s| !s.is_empty());
        let label = match self.media {
            MediaKind::Thumbnail => non_empty(&item.title),
            MediaKind::AudioClip => non_empty(&item.display_name).or_else(|| non_empty(&item.name)),
        };
        label.unwrap_or("")
    }
}
