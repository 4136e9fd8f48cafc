//! Axis sizing.
//!
//! # Rules
//!
//! For node `N` with parent `P` on axis `a`:
//! - root: `Px` and `Hug` resolve, `Percent` and `Grow` have nothing to
//!   resolve against
//! - non-absolute `N` on `P`'s flow axis: the size the distributor assigns
//! - otherwise `align: fill` takes `P`'s inner size, else by `SizeSpec` (`Grow`
//!   off the flow axis fills too)
//!
//! Results outside the distributor are clamped by the node's constraint.
//! A hug node measures its content inside its resolved extent on the other
//! axis.

use taffy::geometry::Size;

use crate::error::{LayoutError, Result};
use crate::types::{AlongAxis, Align, Axis, Measure, SizeSpec, padding_sum};

use super::constraint;
use super::distribute::own_extent;
use super::measurement;
use super::resolver::{Link, Resolver, split};

impl Resolver<'_> {
    /// Resolved size of the node on `axis`.
    pub fn size(&self, lineage: &[Link<'_>], axis: Axis) -> Result<f32> {
        let (node, parent) = split(lineage);
        let config = node.config;
        let spec = config.size_spec(axis);

        let Some(parent) = parent else {
            let base = match spec {
                SizeSpec::Px(v) => v,
                SizeSpec::Hug => self.hug_extent(config, axis, Size { width: None, height: None })?,
                SizeSpec::Percent(_) | SizeSpec::Grow(_) => {
                    return Err(LayoutError::MissingParentDimension { axis });
                }
            };
            return Ok(constraint::apply(base, config.constraint(axis)));
        };

        let (container, _) = split(parent);
        if !config.absolute() && container.config.direction().flow_axis() == axis {
            let layout = self.flow_layout(parent, axis)?;
            let slot = layout.slot_for(container.config, node.key);
            return Ok(slot.map(|slot| slot.size).unwrap_or_default());
        }

        let base = if !config.absolute() && config.align(axis) == Align::Fill {
            self.inner_size(parent, axis)?
        } else {
            match spec {
                SizeSpec::Px(v) => v,
                SizeSpec::Percent(p) => {
                    let parent_pixels = self.inner_size(parent, axis)?;
                    measurement::resolve(Measure::Percent(p), Some(parent_pixels), axis)?
                }
                SizeSpec::Hug => {
                    let mut outer = own_extent(config, self.offered_size(parent)?);
                    let other = axis.cross();
                    let sized_other = config.size_spec(other) != SizeSpec::Hug
                        || (!config.absolute() && config.align(other) == Align::Fill);
                    if sized_other {
                        // Measure inside the node's own extent, a flow slot included.
                        match self.size(lineage, other) {
                            Ok(size) => outer.set_along(other, Some(size)),
                            Err(LayoutError::MissingParentDimension { .. }) => {}
                            Err(err) => return Err(err),
                        }
                    }
                    self.hug_extent_within(config, axis, outer)?
                }
                SizeSpec::Grow(_) => self.inner_size(parent, axis)?,
            }
        };
        Ok(constraint::apply(base, config.constraint(axis)))
    }

    /// Resolved size minus padding on `axis`, floored at 0.
    pub fn inner_size(&self, lineage: &[Link<'_>], axis: Axis) -> Result<f32> {
        let (node, _) = split(lineage);
        let size = self.size(lineage, axis)?;
        Ok((size - padding_sum(&node.config.padding(), axis)).max(0.0))
    }

    /// Space the node offers its children on `axis`.
    ///
    /// A node that hugs on `axis` has no size of its own yet: it passes down
    /// what its parent offered, less its padding. An unsized root offers
    /// nothing (`None`).
    pub fn offered(&self, lineage: &[Link<'_>], axis: Axis) -> Result<Option<f32>> {
        let (node, parent) = split(lineage);
        let config = node.config;
        if config.size_spec(axis) != SizeSpec::Hug {
            return self.inner_size(lineage, axis).map(Some);
        }
        let outer = match parent {
            Some(parent) => self.offered(parent, axis)?,
            None => None,
        };
        let padding = padding_sum(&config.padding(), axis);
        Ok(outer.map(|space| (space - padding).max(0.0)))
    }

    /// [`offered`](Self::offered) on both axes.
    pub fn offered_size(&self, lineage: &[Link<'_>]) -> Result<Size<Option<f32>>> {
        Ok(Size {
            width: self.offered(lineage, Axis::X)?,
            height: self.offered(lineage, Axis::Y)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::config::BoxSpec;
    use crate::engine::BoxConfig;
    use crate::error::LayoutError;
    use crate::layout::{OpaqueContent, Resolver, lineage};
    use crate::types::Axis;

    fn root(value: serde_json::Value) -> BoxConfig {
        BoxSpec::from_value(value).unwrap().normalize_root().unwrap()
    }

    fn size_at(config: &BoxConfig, path: &[&str], axis: Axis) -> Result<f32, LayoutError> {
        let path: Vec<String> = path.iter().map(|key| key.to_string()).collect();
        let links = lineage(config, &path).unwrap();
        Resolver::new(&OpaqueContent).size(&links, axis)
    }

    #[test]
    fn test_root_px_and_percent() {
        let fixed = root(json!({ "area": { "x": 0, "y": 0, "width": 120 } }));
        assert_eq!(size_at(&fixed, &[], Axis::X), Ok(120.0));

        let percent = root(json!({ "area": { "x": 0, "y": 0, "width": "50%" } }));
        assert_eq!(
            size_at(&percent, &[], Axis::X),
            Err(LayoutError::MissingParentDimension { axis: Axis::X })
        );
    }

    #[test]
    fn test_percent_of_parent_inner_size() {
        let config = root(json!({
            "area": { "x": 0, "y": 0, "width": 200, "height": 100 },
            "spacing": { "padding": { "left": 10, "right": 10 } },
            "children": { "a": { "area": { "width": "50%" } } }
        }));
        assert_eq!(size_at(&config, &["a"], Axis::X), Ok(90.0));
    }

    #[test]
    fn test_fill_takes_parent_inner_size() {
        let config = root(json!({
            "area": { "x": 0, "y": 0, "width": 300, "height": 100 },
            "children": { "a": { "area": { "width": 20 }, "align": { "x": "fill" } } }
        }));
        assert_eq!(size_at(&config, &["a"], Axis::X), Ok(300.0));
    }

    #[test]
    fn test_cross_axis_grow_fills() {
        let config = root(json!({
            "area": { "x": 0, "y": 0, "width": 300, "height": 100 },
            "children": { "a": { "area": { "width": "grow" } } }
        }));
        assert_eq!(size_at(&config, &["a"], Axis::X), Ok(300.0));
    }

    #[test]
    fn test_absolute_ignores_fill() {
        let config = root(json!({
            "area": { "x": 0, "y": 0, "width": 300, "height": 100 },
            "children": {
                "a": { "area": { "width": 20 }, "align": { "x": "fill" }, "absolute": true }
            }
        }));
        assert_eq!(size_at(&config, &["a"], Axis::X), Ok(20.0));
    }

    #[test]
    fn test_constraint_clamps_resolved_size() {
        let config = root(json!({
            "area": { "x": 0, "y": 0, "width": 300, "height": 100 },
            "children": {
                "a": { "area": { "width": "100%" }, "constrain": { "x": { "max": 120 } } }
            }
        }));
        assert_eq!(size_at(&config, &["a"], Axis::X), Ok(120.0));
    }

    #[test]
    fn test_hug_root_wraps_children() {
        let config = root(json!({
            "area": { "x": 0, "y": 0 },
            "spacing": { "gap": 5, "padding": 2 },
            "children": {
                "a": { "area": { "width": 30, "height": 10 } },
                "b": { "area": { "width": 50, "height": 20 } }
            }
        }));
        // Column flow: heights stack with one gap, widths take the max.
        assert_eq!(size_at(&config, &[], Axis::Y), Ok(10.0 + 5.0 + 20.0 + 4.0));
        assert_eq!(size_at(&config, &[], Axis::X), Ok(50.0 + 4.0));
    }

    #[test]
    fn test_fill_inside_hug_parent_uses_final_size() {
        let config = root(json!({
            "area": { "x": 0, "y": 0 },
            "children": {
                "wide": { "area": { "width": 80, "height": 10 } },
                "bar": { "area": { "height": 2 }, "align": { "x": "fill" } }
            }
        }));
        assert_eq!(size_at(&config, &["bar"], Axis::X), Ok(80.0));
    }
}
