//! # Emission Channel
//!
//! After every accepted mutation the full sequence goes to the host. Always
//! the whole list, never a delta, so order and annotations arrive together.
//!
//! Emission is fire-and-forget: there is no acknowledgement to wait for, and
//! a failed write is logged and dropped. The next emission carries the full
//! state again anyway.

use log::warn;
use std::io::Write;
use std::sync::mpsc;

use crate::core::sequence::Sequence;

/// Receives every emitted sequence, in order.
pub trait Emitter {
    fn emit(&mut self, sequence: &Sequence);
}

/// Writes each emission as one line of JSON (an array of items).
pub struct JsonLinesEmitter<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Emitter for JsonLinesEmitter<W> {
    fn emit(&mut self, sequence: &Sequence) {
        let line = match serde_json::to_string(sequence) {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to serialize emission: {}", e);
                return;
            }
        };
        if let Err(e) = writeln!(self.writer, "{line}").and_then(|_| self.writer.flush()) {
            warn!("Failed to write emission: {}", e);
        }
    }
}

/// Forwards each emission over a channel, e.g. to an observer thread.
pub struct ChannelEmitter {
    sender: mpsc::Sender<Sequence>,
}

impl ChannelEmitter {
    pub fn new(sender: mpsc::Sender<Sequence>) -> Self {
        Self { sender }
    }
}

impl Emitter for ChannelEmitter {
    fn emit(&mut self, sequence: &Sequence) {
        if self.sender.send(sequence.clone()).is_err() {
            warn!("Failed to send emission: receiver dropped");
        }
    }
}

impl<E: Emitter + ?Sized> Emitter for Box<E> {
    fn emit(&mut self, sequence: &Sequence) {
        (**self).emit(sequence);
    }
}
