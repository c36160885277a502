//! # Core Ranking Logic
//!
//! The ordered-item state machine. It knows nothing about any specific UI
//! technology or host.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Ranker (item store)  │
//!                    │  • Action (gestures)    │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No UI. No host.        │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Headless  │      │  Emitter   │
//!     │  Adapter   │      │   Host     │      │ (to host)  │
//!     │ (ratatui)  │      │ (JSONL)    │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`item`]: `Item`, `ItemId`, `Liked`
//! - [`sequence`]: the shared, ordered ranking
//! - [`schema`]: per-variant capability descriptors
//! - [`reorder`]: array-move on drag end
//! - [`annotate`]: single-field annotation updates
//! - [`action`]: the `Action` enum and `update()`
//! - [`drag`]: begin / over / release gesture tracking
//! - [`state`]: `Ranker`, the item store
//! - [`emit`]: the channel back to the host
//! - [`config`]: `~/.ranker/config.toml` and overrides

pub mod action;
pub mod annotate;
pub mod config;
pub mod drag;
pub mod emit;
pub mod item;
pub mod reorder;
pub mod schema;
pub mod sequence;
pub mod state;
