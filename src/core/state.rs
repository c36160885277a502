//! # Application State
//!
//! The Item Store: the one authoritative ordered sequence, plus the schema it
//! is rendered with. No TUI types live here.
//!
//! ```text
//! Ranker
//! ├── component_type: ComponentType   // youtube | audio
//! ├── schema: &ItemSchema             // controls + media per variant
//! ├── sequence: Sequence              // the current ranking
//! └── status_message: String          // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::ComponentType;
use crate::core::schema::ItemSchema;
use crate::core::sequence::Sequence;

pub struct Ranker {
    pub component_type: ComponentType,
    pub schema: &'static ItemSchema,
    pub sequence: Sequence,
    pub status_message: String,
}

impl Ranker {
    pub fn new(component_type: ComponentType) -> Self {
        Self {
            component_type,
            schema: ItemSchema::for_type(component_type),
            sequence: Sequence::default(),
            status_message: String::new(),
        }
    }

    pub fn with_items(component_type: ComponentType, sequence: Sequence) -> Self {
        let mut ranker = Self::new(component_type);
        ranker.load(sequence);
        ranker
    }

    /// Switch to another variant's schema. The sequence is left alone.
    pub fn mount(&mut self, component_type: ComponentType) {
        self.component_type = component_type;
        self.schema = ItemSchema::for_type(component_type);
    }

    /// Replace the store wholesale with a host-supplied list.
    ///
    /// Items are taken as they are: no shape validation.
    pub fn load(&mut self, sequence: Sequence) -> &Sequence {
        self.status_message = format!("{} items", sequence.len());
        self.sequence = sequence;
        &self.sequence
    }

    /// An empty ranking renders nothing and accepts no gestures.
    pub fn accepts_gestures(&self) -> bool {
        !self.sequence.is_empty()
    }
}
