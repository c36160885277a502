//! # Items
//!
//! One rankable entity: a YouTube video or an audio clip.
//!
//! Field names on the wire match what the host sends (`bekannt`, `gefallen`,
//! `entspannt`). Annotation fields are plain typed values with explicit
//! defaults, so an item missing `gefallen` deserializes to `Liked::Neutral`.
//!
//! Anything the host attaches that this crate doesn't model (`play_order`,
//! `duration_seconds`, ...) lands in `extra` and is emitted back untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Id of the designated reference item in audio rankings.
pub const BASELINE_ID: &str = "baseline";

/// Stable identity of an item. Hosts send either strings or numbers; any
/// JSON number is kept as sent (negative, beyond `i64`, fractional).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ItemId {
    Number(Number),
    Text(String),
}

impl ItemId {
    pub fn is_baseline(&self) -> bool {
        matches!(self, ItemId::Text(s) if s == BASELINE_ID)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{n}"),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::Text(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId::Text(s)
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        ItemId::Number(n.into())
    }
}

/// Tri-state "did you like it" answer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Liked {
    #[default]
    Neutral,
    #[serde(rename = "Ja")]
    Yes,
    #[serde(rename = "Nein")]
    No,
}

impl Liked {
    /// Cycle to the next answer: Neutral → Ja → Nein → Neutral.
    pub fn next(self) -> Self {
        match self {
            Liked::Neutral => Liked::Yes,
            Liked::Yes => Liked::No,
            Liked::No => Liked::Neutral,
        }
    }

    /// The label the host uses for this answer.
    pub fn label(&self) -> &'static str {
        match self {
            Liked::Neutral => "Neutral",
            Liked::Yes => "Ja",
            Liked::No => "Nein",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,

    // Labels: `title` for videos, `name` / `display_name` for audio clips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    // Media references. Absence renders a placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_data_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,

    #[serde(rename = "bekannt", default, deserialize_with = "null_as_default")]
    pub known: bool,
    #[serde(rename = "gefallen", default, deserialize_with = "null_as_default")]
    pub liked: Liked,
    #[serde(rename = "entspannt", default, deserialize_with = "null_as_default")]
    pub relaxed: bool,

    /// Host fields this crate passes through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Annotations are nullable on the wire; `null` means "not set yet".
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Item {
    /// A bare item with default annotations and no media.
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            name: None,
            display_name: None,
            thumbnail: None,
            image_data_url: None,
            audio_data_url: None,
            length: None,
            known: false,
            liked: Liked::Neutral,
            relaxed: false,
            extra: Map::new(),
        }
    }

    pub fn is_baseline(&self) -> bool {
        self.id.is_baseline()
    }

    /// `title` for videos, `name` for audio. Ignores `display_name`.
    pub fn original_name(&self) -> Option<&str> {
        self.title
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.name.as_deref().filter(|s| !s.is_empty()))
    }

    /// Host-assigned playback position, if any.
    pub fn play_order(&self) -> Option<i64> {
        self.extra.get("play_order").and_then(Value::as_i64)
    }

    /// Clip length in seconds, when the host sent `duration_seconds`.
    pub fn duration_seconds(&self) -> Option<f64> {
        self.extra.get("duration_seconds").and_then(Value::as_f64)
    }
}
