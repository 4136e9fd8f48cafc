//! Reactive Pipeline
//!
//! Connects a layout tree to whatever consumes its geometry.
//!
//! # Pipeline Architecture
//!
//! ```text
//! BoxNode writes → snapshot Signal → frameDerived → watch effect
//! ```
//!
//! ## Data Flow
//!
//! 1. **snapshot** - Each commit publishes a new root `Rc<BoxConfig>`
//! 2. **frameDerived** - Reads the snapshot, resolves one node's frame
//! 3. **watch effect** - Monitors the derived, hands frames to a callback
//!
//! ## Key Design Principles
//!
//! - **Pure Deriveds**: frame resolution reads the snapshot and nothing else
//! - **Side Effects in Effect**: only the watch callback does anything
//! - **Wholesale invalidation**: one commit, one recompute

pub mod layout_derived;

pub use layout_derived::{create_frame_derived, watch_frame};
