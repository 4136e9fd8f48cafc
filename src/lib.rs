//! # spark-layout
//!
//! Box layout resolution for reactive UI trees.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! A layout tree is an immutable snapshot of node configurations. Each node
//! declares an anchor, a size per axis (pixels, percent of its parent, hug
//! its children, or grow into free space), alignment, pivot, flow direction
//! and constraints. Geometry is never stored: every read resolves it from
//! the current snapshot.
//!
//! ```text
//! BoxSpec (JSON / builder) → normalize → Rc<BoxConfig> snapshot → Resolver → Frame
//!                                               ↑                      ↓
//!                                         BoxNode writes      Derived / effect
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (Axis, Align, SizeSpec, Bounds, Mutation, Frame)
//! - [`config`] - Declarative node specifications and keyword aliases
//! - [`engine`] - Snapshot store, commits and node handles
//! - [`layout`] - Pull-based geometry resolution
//! - [`pipeline`] - Reactive frame deriveds and watchers
//!
//! ## Example
//!
//! ```
//! use spark_layout::LayoutTree;
//!
//! let tree = LayoutTree::from_json(r#"{
//!     "area": { "x": 0, "y": 0, "width": 120, "height": 10 },
//!     "align": { "direction": "row" },
//!     "children": {
//!         "a": { "area": { "width": 20 } },
//!         "b": { "area": { "width": "grow" } }
//!     }
//! }"#).unwrap();
//!
//! let b = tree.node(&["b"]).unwrap();
//! assert_eq!(b.x().unwrap(), 20.0);
//! assert_eq!(b.width().unwrap(), 100.0);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::BoxSpec;

pub use engine::{BoxConfig, BoxNode, Draft, LayoutTree};

pub use error::{ConfigError, LayoutError, Result};

pub use layout::{CellMeasurer, ContentMeasurer, OpaqueContent, Resolver};

pub use pipeline::{create_frame_derived, watch_frame};
