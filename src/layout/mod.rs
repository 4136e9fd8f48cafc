//! Layout Module
//!
//! Pull-based geometry resolution over an immutable snapshot.
//!
//! # Architecture
//!
//! Every accessor is a pure function of the committed tree. Nothing is
//! cached: a read builds the root-to-node lineage and resolves on demand.
//!
//! 1. `measurement` turns px/percent into pixels
//! 2. `constraint` clamps against min/max
//! 3. `axis` sizes a node (fixed, fill, percent, hug, grow)
//! 4. `distribute` shares a container's main axis and measures hug extents
//! 5. `flow` and `anchor` place a node inside its parent
//! 6. `pivot` converts the anchor to a top-left corner
//! 7. `resolver` composes world coordinates and full frames
//!
//! # Reactivity
//!
//! Reads themselves do not track anything. Wrap them in a `derived` over
//! the tree's snapshot signal (see [`crate::pipeline`]) to recompute on
//! every commit.
//!
//! # Example
//!
//! ```
//! use spark_layout::config::BoxSpec;
//! use spark_layout::layout::{OpaqueContent, Resolver, lineage};
//!
//! let root = BoxSpec::at(0.0, 0.0)
//!     .sized(100.0, 40.0)
//!     .with_child("a", BoxSpec::default().sized(20.0, 10.0))
//!     .normalize_root()
//!     .unwrap();
//!
//! let path = vec!["a".to_string()];
//! let links = lineage(&root, &path).unwrap();
//! let frame = Resolver::new(&OpaqueContent).frame(&links).unwrap();
//! assert_eq!((frame.width, frame.height), (20.0, 10.0));
//! ```

mod anchor;
mod axis;
mod content_measure;
mod distribute;
mod flow;
mod resolver;

pub mod constraint;
pub mod measurement;
pub mod pivot;

pub use anchor::aligned;
pub use content_measure::{
    CellMeasurer, ContentMeasurer, OpaqueContent, measure_text_height, string_width,
};
pub use distribute::{FlowBasis, FlowItem, FlowLayout, FlowSlot, distribute};
pub use resolver::{Link, Resolver, lineage};
