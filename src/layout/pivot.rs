//! Pivot correction: which point of its own box a node's anchor refers to.

use crate::types::Pivot;

/// Distance from the top-left corner to the pivot point.
#[inline]
pub fn offset(pivot: Pivot, size: f32) -> f32 {
    match pivot {
        Pivot::Start => 0.0,
        Pivot::Center => size / 2.0,
        Pivot::End => size,
    }
}

/// Top-left coordinate for a node whose `pivot` sits at `anchor`.
#[inline]
pub fn top_left(anchor: f32, pivot: Pivot, size: f32) -> f32 {
    anchor - offset(pivot, size)
}
