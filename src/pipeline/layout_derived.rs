//! Frame Derived - Reactive geometry for one node.
//!
//! Creates a Derived that resolves a node's frame whenever the tree commits.
//! Reading the tree's snapshot inside the derived is the only dependency:
//! every commit invalidates it wholesale, and nothing finer-grained is
//! tracked.

use spark_signals::{Derived, derived, effect};

use crate::engine::BoxNode;
use crate::error::Result;
use crate::types::Frame;

/// Create the frame derived for `node`.
///
/// Returns a Derived that re-resolves the frame on every commit. A node that
/// gets removed yields `Err(NodeNotFound)` rather than a stale frame.
pub fn create_frame_derived(node: BoxNode) -> Derived<Result<Frame>> {
    derived(move || node.frame())
}

/// Run `callback` with the node's frame now and after every commit.
///
/// Returns the stop function of the underlying effect.
pub fn watch_frame(
    node: BoxNode,
    mut callback: impl FnMut(Result<Frame>) + 'static,
) -> impl FnOnce() {
    let frame = create_frame_derived(node);
    effect(move || {
        // Read the derived (creates reactive dependency)
        callback(frame.get());
    })
}

// =============================================================================
// Tests
// =============================================================================
