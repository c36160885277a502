//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::emit::Emitter;
use crate::core::item::{Item, ItemId};
use crate::core::sequence::Sequence;

/// Bare items with the given ids and a `name` per id.
pub fn items_of(ids: &[&str]) -> Vec<Item> {
    ids.iter()
        .map(|id| {
            let mut item = Item::new(*id);
            item.name = Some(format!("Name {id}"));
            item
        })
        .collect()
}

pub fn sequence_of(ids: &[&str]) -> Sequence {
    Sequence::new(items_of(ids))
}

/// Ids in order, as plain strings.
pub fn ids_of(sequence: &Sequence) -> Vec<String> {
    sequence.iter().map(|item| item.id.to_string()).collect()
}

/// A small audio ranking: baseline first, then three songs.
pub fn audio_sequence() -> Sequence {
    let mut baseline = Item::new("baseline");
    baseline.name = Some("Grundaktivität".into());

    let songs = (1..=3).map(|i| {
        let mut song = Item::new(ItemId::Text(format!("song_{i}")));
        song.name = Some(format!("Song {i}"));
        song.audio_data_url = Some(format!("data:audio/mpeg;base64,song{i}"));
        song
    });

    Sequence::new(std::iter::once(baseline).chain(songs).collect())
}

/// Records every emission for later assertions.
#[derive(Default)]
pub struct RecordingEmitter {
    pub emitted: Vec<Sequence>,
}

impl Emitter for RecordingEmitter {
    fn emit(&mut self, sequence: &Sequence) {
        self.emitted.push(sequence.clone());
    }
}
