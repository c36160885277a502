//! # Host Side
//!
//! Everything that faces the embedding host rather than the user:
//!
//! - [`payload`]: reading the mount payload (discriminator + items)
//! - [`reconcile`]: folding an emitted value back into the host's own list
//! - [`report`]: the plain-text ranking export
//!
//! [`Host`] is the single writer: every action, whether it comes from the
//! TUI or from a replayed gesture log, goes through [`Host::dispatch`], which
//! runs the reducer and hands any resulting sequence to the emitter before
//! the next action is looked at.

pub mod payload;
pub mod reconcile;
pub mod report;

use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::io::BufRead;

use crate::ComponentType;
use crate::core::action::{Action, Effect, update};
use crate::core::annotate::{Annotation, AnnotationError, AnnotationField};
use crate::core::emit::Emitter;
use crate::core::item::ItemId;
use crate::core::sequence::Sequence;
use crate::core::state::Ranker;

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum HostError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// The payload named a component type this crate doesn't know.
    UnknownComponentType(String),
    /// A gesture line parsed but can't become an action.
    Gesture(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Io(e) => write!(f, "host I/O error: {e}"),
            HostError::Json(e) => write!(f, "host JSON error: {e}"),
            HostError::UnknownComponentType(t) => write!(f, "Unknown component type: {t}"),
            HostError::Gesture(msg) => write!(f, "invalid gesture: {msg}"),
        }
    }
}

impl std::error::Error for HostError {}

impl From<std::io::Error> for HostError {
    fn from(e: std::io::Error) -> Self {
        HostError::Io(e)
    }
}

impl From<serde_json::Error> for HostError {
    fn from(e: serde_json::Error) -> Self {
        HostError::Json(e)
    }
}

impl From<AnnotationError> for HostError {
    fn from(e: AnnotationError) -> Self {
        HostError::Gesture(e.to_string())
    }
}

impl From<HostError> for std::io::Error {
    fn from(e: HostError) -> Self {
        match e {
            HostError::Io(e) => e,
            other => std::io::Error::new(std::io::ErrorKind::InvalidData, other.to_string()),
        }
    }
}

// ============================================================================
// Gestures (one JSON object per line)
// ============================================================================

/// A recorded user or host event.
///
/// ```text
/// {"op":"reorder","source":"song_2","target":"song_4"}
/// {"op":"reorder","source":"song_2","target":null}
/// {"op":"annotate","id":"song_2","field":"gefallen","value":"Ja"}
/// {"op":"load","items":[...]}
/// {"op":"load","component_type":"audio","items":[...]}
/// {"op":"quit"}
/// ```
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Gesture {
    Reorder {
        source: ItemId,
        #[serde(default)]
        target: Option<ItemId>,
    },
    Annotate {
        id: ItemId,
        field: AnnotationField,
        value: Value,
    },
    Load {
        #[serde(default)]
        items: Sequence,
        #[serde(default)]
        component_type: Option<ComponentType>,
    },
    Quit,
}

impl Gesture {
    pub fn into_action(self) -> Result<Action, HostError> {
        Ok(match self {
            Gesture::Reorder { source, target } => Action::Reorder { source, target },
            Gesture::Annotate { id, field, value } => Action::Annotate {
                item_id: id,
                annotation: Annotation::from_value(field, value)?,
            },
            Gesture::Load {
                items,
                component_type,
            } => Action::Load {
                sequence: items,
                component_type,
            },
            Gesture::Quit => Action::Quit,
        })
    }
}

pub fn parse_gesture(line: &str) -> Result<Action, HostError> {
    let gesture: Gesture = serde_json::from_str(line)?;
    gesture.into_action()
}

// ============================================================================
// Host
// ============================================================================

/// Counts from one replay run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub skipped: usize,
    pub emitted: usize,
}

pub struct Host<E: Emitter> {
    pub ranker: Ranker,
    emitter: E,
    emissions: usize,
}

impl<E: Emitter> Host<E> {
    pub fn new(ranker: Ranker, emitter: E) -> Self {
        Self {
            ranker,
            emitter,
            emissions: 0,
        }
    }

    /// Run one action through the reducer and emit if it changed the ranking.
    pub fn dispatch(&mut self, action: Action) -> Effect {
        let effect = update(&mut self.ranker, action);
        if let Effect::Emit(sequence) = &effect {
            self.emitter.emit(sequence);
            self.emissions += 1;
            debug!("Emission #{} ({} items)", self.emissions, sequence.len());
        }
        effect
    }

    pub fn emissions(&self) -> usize {
        self.emissions
    }

    pub fn sequence(&self) -> &Sequence {
        &self.ranker.sequence
    }

    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    pub fn into_parts(self) -> (Ranker, E) {
        (self.ranker, self.emitter)
    }

    /// Apply gestures line by line until EOF or a quit gesture.
    ///
    /// Blank lines are ignored. Lines that don't parse are logged and
    /// skipped; only read errors end the replay early.
    pub fn replay<R: BufRead>(&mut self, reader: R) -> Result<ReplaySummary, HostError> {
        let mut summary = ReplaySummary::default();
        let emitted_before = self.emissions;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let action = match parse_gesture(line) {
                Ok(action) => action,
                Err(e) => {
                    warn!("Skipping gesture on line {}: {}", line_no + 1, e);
                    summary.skipped += 1;
                    continue;
                }
            };

            summary.applied += 1;
            if self.dispatch(action) == Effect::Quit {
                info!("Quit gesture on line {}", line_no + 1);
                break;
            }
        }

        summary.emitted = self.emissions - emitted_before;
        info!(
            "Replay finished: {} applied, {} skipped, {} emitted",
            summary.applied, summary.skipped, summary.emitted
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::item::Liked;
    use crate::test_support::{RecordingEmitter, ids_of, sequence_of};
    use std::io::Cursor;

    fn host(ids: &[&str]) -> Host<RecordingEmitter> {
        Host::new(
            Ranker::with_items(ComponentType::Audio, sequence_of(ids)),
            RecordingEmitter::default(),
        )
    }

    #[test]
    fn test_parse_reorder_gesture() {
        let action = parse_gesture(r#"{"op":"reorder","source":"a","target":"b"}"#).unwrap();
        assert!(matches!(
            action,
            Action::Reorder { target: Some(ItemId::Text(ref t)), .. } if t == "b"
        ));
    }

    #[test]
    fn test_parse_reorder_without_target() {
        let action = parse_gesture(r#"{"op":"reorder","source":1}"#).unwrap();
        assert!(matches!(
            action,
            Action::Reorder { ref source, target: None } if *source == ItemId::from(1)
        ));
    }

    #[test]
    fn test_parse_annotate_gesture() {
        let action =
            parse_gesture(r#"{"op":"annotate","id":"x","field":"gefallen","value":"Nein"}"#)
                .unwrap();
        assert!(matches!(
            action,
            Action::Annotate { annotation: Annotation::Liked(Liked::No), .. }
        ));
    }

    #[test]
    fn test_parse_annotate_type_mismatch() {
        let err = parse_gesture(r#"{"op":"annotate","id":"x","field":"bekannt","value":"Ja"}"#)
            .unwrap_err();
        assert!(matches!(err, HostError::Gesture(_)));
    }

    #[test]
    fn test_parse_unknown_op() {
        assert!(matches!(
            parse_gesture(r#"{"op":"shuffle"}"#),
            Err(HostError::Json(_))
        ));
    }

    #[test]
    fn test_dispatch_emits_once_per_accepted_mutation() {
        let mut host = host(&["A", "B", "C", "D"]);
        host.dispatch(Action::Reorder {
            source: "B".into(),
            target: Some("D".into()),
        });
        host.dispatch(Action::Reorder {
            source: "B".into(),
            target: None,
        });
        host.dispatch(Action::Annotate {
            item_id: "A".into(),
            annotation: Annotation::Relaxed(true),
        });

        assert_eq!(host.emissions(), 2);
        let emitted = &host.emitter().emitted;
        assert_eq!(ids_of(&emitted[0]), vec!["A", "C", "D", "B"]);
        assert!(emitted[1].get(0).unwrap().relaxed);
    }

    #[test]
    fn test_replay_skips_bad_lines_and_stops_at_quit() {
        let mut host = host(&["A", "B", "C"]);
        let log = r#"
{"op":"reorder","source":"C","target":"A"}
not json
{"op":"annotate","id":"B","field":"entspannt","value":true}
{"op":"quit"}
{"op":"reorder","source":"A","target":"B"}
"#;
        let summary = host.replay(Cursor::new(log)).unwrap();
        assert_eq!(
            summary,
            ReplaySummary {
                applied: 3,
                skipped: 1,
                emitted: 2
            }
        );
        assert_eq!(ids_of(host.sequence()), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_replay_load_replaces_without_emitting() {
        let mut host = host(&["A"]);
        let log = r#"{"op":"load","items":[{"id":"x"},{"id":"y"}]}"#;
        let summary = host.replay(Cursor::new(log)).unwrap();
        assert_eq!(summary.emitted, 0);
        assert_eq!(ids_of(host.sequence()), vec!["x", "y"]);
        assert_eq!(host.ranker.component_type, ComponentType::Audio);
    }

    #[test]
    fn test_replay_load_can_switch_component_type() {
        let mut host = host(&["A"]);
        let log = r#"
{"op":"load","component_type":"youtube","items":[{"id":1,"title":"Clip"}]}
{"op":"load","component_type":"vinyl","items":[]}
"#;
        let summary = host.replay(Cursor::new(log)).unwrap();
        assert_eq!(summary.applied, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(host.ranker.component_type, ComponentType::Youtube);
        assert!(std::ptr::eq(host.ranker.schema, &crate::core::schema::YOUTUBE_SCHEMA));
        assert_eq!(host.sequence().len(), 1);
    }
}
