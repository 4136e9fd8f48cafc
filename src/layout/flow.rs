//! Flow offsets.
//!
//! A flow child sits after every earlier non-absolute sibling in its
//! parent's ordered children, one gap apart. Absolute children neither
//! take a slot nor receive an offset.

use crate::error::Result;
use crate::types::Axis;

use super::resolver::{Link, Resolver, split};

impl Resolver<'_> {
    /// Offset contributed by earlier siblings on `axis`.
    ///
    /// Zero for the root, for absolute nodes and off the parent's flow axis.
    pub fn flow_offset(&self, lineage: &[Link<'_>], axis: Axis) -> Result<f32> {
        let (node, parent) = split(lineage);
        let Some(parent) = parent else {
            return Ok(0.0);
        };
        let (container, _) = split(parent);
        if node.config.absolute() || container.config.direction().flow_axis() != axis {
            return Ok(0.0);
        }

        let layout = self.flow_layout(parent, axis)?;
        Ok(layout
            .slot_for(container.config, node.key)
            .map(|slot| slot.offset)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::config::BoxSpec;
    use crate::layout::{OpaqueContent, Resolver, lineage};
    use crate::types::Axis;

    fn offsets(value: serde_json::Value, keys: &[&str], axis: Axis) -> Vec<f32> {
        let root = BoxSpec::from_value(value).unwrap().normalize_root().unwrap();
        let resolver = Resolver::new(&OpaqueContent);
        keys.iter()
            .map(|key| {
                let path = vec![key.to_string()];
                let links = lineage(&root, &path).unwrap();
                resolver.flow_offset(&links, axis).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_row_offsets_accumulate() {
        let tree = json!({
            "area": { "x": 0, "y": 0, "width": 100, "height": 20 },
            "align": { "direction": "row" },
            "children": {
                "a": { "area": { "width": 10 } },
                "b": { "area": { "width": 15 } },
                "c": { "area": { "width": 10 } }
            }
        });
        assert_eq!(offsets(tree.clone(), &["a", "b", "c"], Axis::X), vec![0.0, 10.0, 25.0]);
        assert_eq!(offsets(tree, &["a", "b", "c"], Axis::Y), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_gap_between_siblings() {
        let tree = json!({
            "area": { "x": 0, "y": 0, "width": 100, "height": 100 },
            "spacing": { "gap": 4 },
            "children": {
                "a": { "area": { "height": 10 } },
                "b": { "area": { "height": 10 } }
            }
        });
        assert_eq!(offsets(tree, &["a", "b"], Axis::Y), vec![0.0, 14.0]);
    }

    #[test]
    fn test_absolute_siblings_take_no_slot() {
        let tree = json!({
            "area": { "x": 0, "y": 0, "width": 100, "height": 100 },
            "children": {
                "a": { "area": { "height": 30 }, "absolute": true },
                "b": { "area": { "height": 10 } },
                "c": { "area": { "height": 10 } }
            }
        });
        assert_eq!(offsets(tree, &["a", "b", "c"], Axis::Y), vec![0.0, 0.0, 10.0]);
    }

    #[test]
    fn test_order_changes_offsets() {
        let tree = json!({
            "area": { "x": 0, "y": 0, "width": 100, "height": 100 },
            "children": {
                "a": { "area": { "height": 10 }, "order": 2 },
                "b": { "area": { "height": 20 }, "order": 1 }
            }
        });
        assert_eq!(offsets(tree, &["a", "b"], Axis::Y), vec![20.0, 0.0]);
    }
}
