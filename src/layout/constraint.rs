//! Min/max clamping.
//!
//! When both bounds are present and `min > max`, min wins. `f32::clamp` is
//! never used here because it panics on exactly that input.

use crate::types::Bounds;

/// Clamp `base` into `bounds`.
pub fn apply(base: f32, bounds: Option<Bounds>) -> f32 {
    let Some(Bounds { min, max }) = bounds else {
        return base;
    };
    match (min, max) {
        (Some(min), Some(max)) if min > max => base.max(min),
        (min, max) => {
            let capped = max.map_or(base, |max| base.min(max));
            min.map_or(capped, |min| capped.max(min))
        }
    }
}

/// Clamp a flexible child's share of free space.
///
/// The configured min never pushes a child above its weighted share: the
/// effective min is `min(configured_min, share)`. Max stays a hard cap.
pub fn flexible(share: f32, bounds: Option<Bounds>) -> f32 {
    let bounds = bounds.map(|b| Bounds {
        min: b.min.map(|min| min.min(share)),
        max: b.max,
    });
    apply(share, bounds)
}
