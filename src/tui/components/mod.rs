//! # TUI Components
//!
//! UI components for the terminal ranker.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top status bar showing the variant and status
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `RankedList`: the sortable list; turns keys and mouse drags into
//!   `Action::Reorder` / `Action::Annotate`
//!
//! Each component file holds its state type, rendering, event handling and
//! tests. Components receive external data as props rather than reaching into
//! `Ranker` directly.
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── title_bar.rs    (Top status bar)
//! └── ranked_list.rs  (Sortable item list)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod ranked_list;
pub use ranked_list::{RankedList, RankedListState};
