//! Anchor resolution.
//!
//! The anchor is the alignment-adjusted point the pivot is placed on. The
//! root and absolute nodes use their configured offset as-is; everything
//! else aligns inside the parent's inner box and then shifts by the
//! parent's leading padding and its flow offset.

use crate::error::Result;
use crate::types::{Align, Axis, Measure, padding_start};

use super::measurement;
use super::resolver::{Link, Resolver, split};

/// Align a node of size `own` inside `parent` pixels.
///
/// `offset` moves toward the inside for `end`: `(parent - own) - offset`.
#[inline]
pub fn aligned(align: Align, offset: f32, own: f32, parent: f32) -> f32 {
    match align {
        Align::Start | Align::Fill => offset,
        Align::Center => (parent - own) / 2.0 + offset,
        Align::End => (parent - own) - offset,
    }
}

impl Resolver<'_> {
    /// Anchor of the node on `axis`, in its parent's frame.
    pub fn anchor(&self, lineage: &[Link<'_>], axis: Axis) -> Result<f32> {
        let (node, parent) = split(lineage);
        let config = node.config;
        let raw = config.anchor(axis);

        let Some(parent) = parent else {
            return measurement::resolve(raw, None, axis);
        };

        let offset = match raw {
            Measure::Px(v) => v,
            Measure::Percent(_) => {
                measurement::resolve(raw, Some(self.inner_size(parent, axis)?), axis)?
            }
        };
        if config.absolute() {
            return Ok(offset);
        }

        let align = config.align(axis);
        let local = match align {
            Align::Start | Align::Fill => offset,
            Align::Center | Align::End => {
                let own = self.size(lineage, axis)?;
                let parent_size = self.inner_size(parent, axis)?;
                aligned(align, offset, own, parent_size)
            }
        };

        let (container, _) = split(parent);
        let leading = padding_start(&container.config.padding(), axis);
        Ok(local + leading + self.flow_offset(lineage, axis)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::BoxSpec;
    use crate::layout::{OpaqueContent, lineage};

    #[test]
    fn test_aligned_formulas() {
        assert_eq!(aligned(Align::Start, 5.0, 100.0, 400.0), 5.0);
        assert_eq!(aligned(Align::Fill, 5.0, 100.0, 400.0), 5.0);
        assert_eq!(aligned(Align::Center, 5.0, 100.0, 400.0), 155.0);
        assert_eq!(aligned(Align::End, 5.0, 100.0, 400.0), 295.0);
    }

    fn anchor_of(value: serde_json::Value, key: &str, axis: Axis) -> f32 {
        let root = BoxSpec::from_value(value).unwrap().normalize_root().unwrap();
        let path = vec![key.to_string()];
        let links = lineage(&root, &path).unwrap();
        Resolver::new(&OpaqueContent).anchor(&links, axis).unwrap()
    }

    #[test]
    fn test_padding_shifts_anchor() {
        let tree = json!({
            "area": { "x": 0, "y": 0, "width": 100, "height": 100 },
            "spacing": { "padding": { "left": 6, "top": 3 } },
            "children": { "a": { "area": { "x": 2, "width": 10, "height": 10 } } }
        });
        assert_eq!(anchor_of(tree.clone(), "a", Axis::X), 8.0);
        assert_eq!(anchor_of(tree, "a", Axis::Y), 3.0);
    }

    #[test]
    fn test_end_alignment_inside_padding() {
        let tree = json!({
            "area": { "x": 0, "y": 0, "width": 100, "height": 100 },
            "spacing": { "padding": 10 },
            "children": {
                "a": { "area": { "width": 20, "height": 10 }, "align": { "x": "end" } }
            }
        });
        // Inner width 80: (80 - 20) - 0 + 10
        assert_eq!(anchor_of(tree, "a", Axis::X), 70.0);
    }

    #[test]
    fn test_percent_offset_resolves_against_parent() {
        let tree = json!({
            "area": { "x": 0, "y": 0, "width": 200, "height": 100 },
            "children": { "a": { "area": { "x": "25%", "width": 10 } } }
        });
        assert_eq!(anchor_of(tree, "a", Axis::X), 50.0);
    }

    #[test]
    fn test_absolute_anchor_is_raw_offset() {
        let tree = json!({
            "area": { "x": 0, "y": 0, "width": 200, "height": 100 },
            "spacing": { "padding": 10 },
            "children": {
                "first": { "area": { "height": 40 } },
                "floating": {
                    "area": { "x": 7, "y": 9, "width": 10, "height": 10 },
                    "align": { "x": "end" },
                    "absolute": true
                }
            }
        });
        assert_eq!(anchor_of(tree.clone(), "floating", Axis::X), 7.0);
        assert_eq!(anchor_of(tree, "floating", Axis::Y), 9.0);
    }
}
