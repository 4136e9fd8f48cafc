//! Layout Engine - Snapshot store and node handles.
//!
//! The engine manages the core data structures:
//! - BoxConfig: Immutable per-node configuration, shared between snapshots
//! - LayoutTree: The committed snapshot, its version and its signal
//! - BoxNode: Lazy path-addressed handle with the read/write API
//!
//! # Architecture
//!
//! Nodes are NOT objects with cached geometry. A node is a path into the
//! committed tree:
//!
//! ```text
//! LayoutTree ── Signal<Rc<BoxConfig>> ── root
//!                                        ├── "header"  (Rc, shared until mutated)
//!                                        └── "body"
//!                                            └── "label"
//! BoxNode { tree, path: ["body", "label"] }
//! ```
//!
//! A write copies only the nodes on the path to the edited node and
//! publishes the new root in one step. Geometry is resolved by
//! [`crate::layout`] on every read.

mod box_config;
mod box_node;
mod tree;

pub use box_config::{BoxConfig, diff};
pub use box_node::BoxNode;
pub use tree::{Draft, LayoutTree};
